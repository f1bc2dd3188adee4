use super::super::commands::{control_command_defs, settings_command_defs};
use super::*;

impl App {
    pub(super) fn available_command_defs(&self) -> Vec<CommandDef> {
        match self.mode() {
            UiMode::Control => control_command_defs(),
            UiMode::Settings => settings_command_defs(),
        }
    }

    pub(super) fn recompute_suggestions(&mut self) {
        let show = self.input.buf.trim_start().starts_with('/');
        let q = self.input.buf.trim_start_matches('/').trim().to_lowercase();
        if q.is_empty() {
            if show {
                let mut defs = self.available_command_defs();
                defs.sort_by(|a, b| a.name.cmp(b.name));
                self.suggestions = defs;
            } else {
                self.suggestions.clear();
            }
            self.suggestion_selected = 0;
            return;
        }

        // Once arguments are being typed the palette only gets in the way.
        let mut parts = q.splitn(2, char::is_whitespace);
        let first = parts.next().unwrap_or("");
        if first.is_empty() || parts.next().is_some() {
            self.suggestions.clear();
            self.suggestion_selected = 0;
            return;
        }

        let mut scored = self
            .available_command_defs()
            .into_iter()
            .map(|d| (score_def(first, &d), d))
            .filter(|(score, _)| *score > 0)
            .collect::<Vec<_>>();
        sort_scored_suggestions(&mut scored);
        self.suggestions = scored.into_iter().map(|(_, d)| d).collect();
        self.suggestion_selected = self
            .suggestion_selected
            .min(self.suggestions.len().saturating_sub(1));
    }

    pub(super) fn apply_selected_suggestion(&mut self) {
        if self.suggestions.is_empty() {
            return;
        }
        let show = self.input.buf.trim_start().starts_with('/');
        let sel = self
            .suggestion_selected
            .min(self.suggestions.len().saturating_sub(1));
        let cmd = self.suggestions[sel].name;

        let prefix = if show { "/" } else { "" };
        let raw = self.input.buf.trim_start_matches('/').trim_start();
        let rest = raw
            .split_once(char::is_whitespace)
            .map(|(_, rest)| rest.trim_start())
            .unwrap_or("");
        if rest.is_empty() {
            self.input.set(format!("{}{} ", prefix, cmd));
        } else {
            self.input.set(format!("{}{} {}", prefix, cmd, rest));
        }
        self.recompute_suggestions();
    }

    /// Resolves a typed command word to a canonical name: exact, alias, then
    /// unambiguous prefix.
    pub(super) fn resolve_command(&self, word: &str) -> Option<&'static str> {
        let defs = self.available_command_defs();
        if let Some(d) = defs.iter().find(|d| d.name == word) {
            return Some(d.name);
        }
        if let Some(d) = defs.iter().find(|d| d.aliases.contains(&word)) {
            return Some(d.name);
        }
        let matches = defs
            .iter()
            .filter(|d| d.name.starts_with(word))
            .collect::<Vec<_>>();
        match matches.as_slice() {
            [only] => Some(only.name),
            _ => None,
        }
    }

    pub(super) fn run_current_input(&mut self) {
        let raw = self.input.buf.clone();
        let line = raw.trim().to_string();
        if line.is_empty() {
            return;
        }

        self.input.push_history(&line);
        self.push_command(line.clone());
        self.input.clear();
        self.suggestions.clear();
        self.suggestion_selected = 0;

        let (word, raw_rest) = split_command_line(&raw);
        let Some(cmd) = self.resolve_command(&word) else {
            self.push_error(format!("unknown command: {} (try `help`)", word));
            return;
        };
        let rest = match cmd {
            "send" if !raw_rest.trim().is_empty() => raw_rest,
            _ => raw_rest.trim(),
        };
        self.dispatch_command(cmd, rest);
    }

    pub(super) fn dispatch_command(&mut self, cmd: &str, rest: &str) {
        match cmd {
            "help" => self.cmd_help(rest),
            "quit" => self.quit = true,
            "clear" => self.log.clear(),
            "log" => {
                let lines = self.log_lines();
                self.open_modal("Activity Log", lines);
            }
            "settings" => self.cmd_settings(),
            "import" => self.cmd_import(rest),

            "send" => self.cmd_send(rest),
            "say" => self.cmd_say(rest),
            "ai" => self.cmd_ai(rest),
            "preset" => self.cmd_preset(rest),
            "edit" => self.cmd_edit(),

            "set" => self.cmd_set(rest),
            "save" => self.cmd_save(),
            "back" => self.pop_mode(),

            other => self.push_error(format!("unknown command: {}", other)),
        }
    }

    pub(super) fn run_default_action(&mut self) {
        match self.mode() {
            UiMode::Control => {
                if self.descriptor.is_configured() {
                    self.cmd_send("");
                } else {
                    self.cmd_settings();
                }
            }
            UiMode::Settings => self.edit_selected_field(),
        }
    }

    fn cmd_help(&mut self, rest: &str) {
        let defs = self.available_command_defs();
        if !rest.is_empty() {
            let word = rest.to_lowercase();
            let found = self
                .resolve_command(&word)
                .and_then(|name| defs.iter().find(|d| d.name == name));
            match found {
                Some(d) => {
                    let mut lines = vec![format!("usage: {}", d.usage), d.help.to_string()];
                    if !d.aliases.is_empty() {
                        lines.push(format!("aliases: {}", d.aliases.join(", ")));
                    }
                    self.open_modal(format!("help {}", d.name), lines);
                }
                None => self.push_error(format!("unknown command: {}", word)),
            }
            return;
        }

        let mut sorted = defs;
        sorted.sort_by(|a, b| a.name.cmp(b.name));
        let mut lines = sorted
            .iter()
            .map(|d| format!("{: <36} {}", d.usage, d.help))
            .collect::<Vec<_>>();
        lines.push(String::new());
        lines.push("Enter on an empty line runs the default action.".to_string());
        lines.push("Esc clears input, leaves settings, or quits.".to_string());
        self.open_modal("Commands", lines);
    }
}

/// Lowercased command word and everything after the single separator that
/// follows it, untouched.
pub(super) fn split_command_line(buf: &str) -> (String, &str) {
    let body = buf.trim_start();
    let body = body.strip_prefix('/').unwrap_or(body);
    match body.split_once(char::is_whitespace) {
        Some((w, r)) => (w.to_lowercase(), r),
        None => (body.trim_end().to_lowercase(), ""),
    }
}

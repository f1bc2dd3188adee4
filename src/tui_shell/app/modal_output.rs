use super::*;

impl App {
    pub(super) fn push_command(&mut self, line: String) {
        self.last_command = Some(line);
    }

    pub(in crate::tui_shell) fn push_output(&mut self, message: impl Into<String>) {
        self.log.info(message);
    }

    pub(in crate::tui_shell) fn push_error(&mut self, message: impl Into<String>) {
        self.log.error(message);
    }

    pub(super) fn open_modal(&mut self, title: impl Into<String>, lines: Vec<String>) {
        self.modal = Some(Modal {
            title: title.into(),
            lines,
            scroll: 0,
            kind: ModalKind::Viewer,
            input: Input::default(),
        });
    }

    /// Inline alert; used where the browser console would have called
    /// `alert()` and nothing should reach the activity log.
    pub(super) fn open_alert(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.modal = Some(Modal {
            title: title.into(),
            lines: vec![message.into(), String::new(), "Press any key.".to_string()],
            scroll: 0,
            kind: ModalKind::Alert,
            input: Input::default(),
        });
    }

    pub(in crate::tui_shell) fn open_text_input_modal(
        &mut self,
        title: impl Into<String>,
        prompt: impl Into<String>,
        action: TextInputAction,
        initial: Option<String>,
        lines: Vec<String>,
    ) {
        let mut input = Input::default();
        if let Some(s) = initial {
            input.set(s);
        }
        self.modal = Some(Modal {
            title: title.into(),
            lines,
            scroll: 0,
            kind: ModalKind::TextInput {
                prompt: prompt.into(),
                action,
            },
            input,
        });
    }

    pub(in crate::tui_shell) fn modal_mut(&mut self) -> Option<&mut Modal> {
        self.modal.as_mut()
    }

    pub(in crate::tui_shell) fn close_modal(&mut self) {
        self.modal = None;
    }

    /// Full activity log as viewer lines, oldest first.
    pub(super) fn log_lines(&self) -> Vec<String> {
        if self.log.is_empty() {
            return vec!["No logs generated yet...".to_string()];
        }
        self.log
            .entries()
            .iter()
            .map(|e| {
                format!(
                    "{} {: <7} {}",
                    fmt_clock(e.created_at),
                    e.severity.as_str(),
                    e.message
                )
            })
            .collect()
    }
}

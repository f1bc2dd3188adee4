use super::*;

impl App {
    pub(super) fn cmd_settings(&mut self) {
        if self.mode() == UiMode::Settings {
            return;
        }
        self.push_view(SettingsView::new(self.descriptor.clone()));
    }

    /// `set <field> <value>`; an empty value clears the field.
    pub(super) fn cmd_set(&mut self, rest: &str) {
        let (name, value) = match rest.split_once(char::is_whitespace) {
            Some((n, v)) => (n, v.trim()),
            None => (rest, ""),
        };
        let Some(field) = DescriptorField::parse(name) else {
            let known = DescriptorField::ALL
                .iter()
                .map(|f| f.key())
                .collect::<Vec<_>>()
                .join(", ");
            self.push_error(format!("unknown field: {} ({})", name, known));
            return;
        };
        match self.current_view_mut::<SettingsView>() {
            Some(v) => v.set_field(field, value.to_string()),
            None => self.push_error("open `settings` first"),
        }
    }

    pub(super) fn edit_selected_field(&mut self) {
        let Some(v) = self.current_view::<SettingsView>() else {
            return;
        };
        let field = v.selected_field();
        let current = v.form.get(field).to_string();
        self.open_text_input_modal(
            format!("Edit {}", field.label()),
            format!("{}: ", field.key()),
            TextInputAction::EditField(field),
            Some(current),
            vec!["Enter to keep (empty clears); Esc to cancel.".to_string()],
        );
    }

    /// Quick import of a pasted vendor config object. Malformed input only
    /// raises an alert; the form is left as it was.
    pub(super) fn cmd_import(&mut self, rest: &str) {
        if rest.is_empty() {
            self.open_text_input_modal(
                "Quick Import",
                "json: ",
                TextInputAction::ImportConfig,
                None,
                vec![
                    "Paste the firebaseConfig object from the Firebase console.".to_string(),
                    "The database path is kept.".to_string(),
                ],
            );
            return;
        }

        let base = self
            .current_view::<SettingsView>()
            .map(|v| v.form.clone())
            .unwrap_or_else(|| self.descriptor.clone());
        let form = match base.import_vendor_config(rest) {
            Ok(form) => form,
            Err(err) => {
                tracing::debug!(error = %err, "rejected config import");
                self.open_alert("Import", "Invalid JSON");
                return;
            }
        };
        self.cmd_settings();
        if let Some(v) = self.current_view_mut::<SettingsView>() {
            v.replace_form(form);
        }
    }

    /// Persists the form, reconnects with it and returns to the control view.
    pub(super) fn cmd_save(&mut self) {
        let Some(form) = self.current_view::<SettingsView>().map(|v| v.form.clone()) else {
            self.push_error("open `settings` first");
            return;
        };
        if let Err(err) = self.settings.save(&form) {
            self.push_error(format!("Failed to save configuration: {:#}", err));
            return;
        }
        tracing::info!(path = %self.settings.path().display(), "configuration saved");
        self.descriptor = form;
        self.log.success("Firebase configuration saved locally.");
        self.pop_mode();
        self.connect();
    }

    pub(in crate::tui_shell) fn submit_text_input(&mut self, action: TextInputAction, value: String) {
        match action {
            TextInputAction::EditField(field) => {
                if let Some(v) = self.current_view_mut::<SettingsView>() {
                    v.set_field(field, value);
                }
            }
            TextInputAction::ImportConfig => {
                if !value.trim().is_empty() {
                    self.cmd_import(value.trim());
                }
            }
            TextInputAction::EditDraft => {
                if let Some(v) = self.control_mut() {
                    v.set_draft(value, Origin::Manual);
                }
            }
            TextInputAction::AiPrompt => self.cmd_ai(&value),
            TextInputAction::TextMessage => self.cmd_say(&value),
        }
    }
}

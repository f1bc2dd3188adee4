use super::*;

impl App {
    /// Writes `raw` in the background; the log entries and the
    /// `SendFinished` marker come back over the worker channel.
    fn spawn_dispatch(&mut self, raw: String, origin: Origin) {
        let (Some(store), Some(path)) = (self.session.store(), self.session.path().cloned())
        else {
            let reason = self
                .connect_err
                .clone()
                .unwrap_or_else(|| "not connected (configure the database first)".to_string());
            self.push_error(format!("Write failed: {}", reason));
            return;
        };

        if let Some(v) = self.control_mut() {
            v.sending = true;
        }
        let tx = self.worker_tx.clone();
        self.runtime.spawn(async move {
            let mut log = ChannelLog(tx.clone());
            if let Err(err) = dispatch::dispatch(store.as_ref(), &path, &raw, origin, &mut log).await
            {
                tracing::warn!(error = %err, %path, "dispatch failed");
            }
            let _ = tx.send(WorkerMsg::SendFinished);
        });
    }

    pub(super) fn cmd_send(&mut self, rest: &str) {
        if !rest.is_empty() {
            self.spawn_dispatch(rest.to_string(), Origin::Manual);
            return;
        }
        let Some((draft, origin)) = self.control().map(|v| (v.draft.clone(), v.draft_origin))
        else {
            return;
        };
        self.spawn_dispatch(draft, origin);
    }

    pub(super) fn cmd_say(&mut self, rest: &str) {
        if rest.trim().is_empty() {
            self.open_text_input_modal(
                "Send Message",
                "text: ",
                TextInputAction::TextMessage,
                None,
                vec!["Shown on the device display (action PRINT).".to_string()],
            );
            return;
        }
        if let Some(payload) = dispatch::text_message(rest, dispatch::now_millis()) {
            self.spawn_dispatch(payload, Origin::Text);
        }
    }

    pub(super) fn cmd_ai(&mut self, rest: &str) {
        if rest.trim().is_empty() {
            self.open_text_input_modal(
                "AI Command Generator",
                "prompt: ",
                TextInputAction::AiPrompt,
                None,
                vec!["e.g. 'Blink the led 5 times quickly'".to_string()],
            );
            return;
        }
        let Some(generator) = self.generator.clone() else {
            let reason = self
                .generator_err
                .clone()
                .unwrap_or_else(|| "generator unavailable".to_string());
            self.push_error(format!("AI Generation failed: {}", reason));
            return;
        };
        if self.control().is_some_and(|v| v.generating) {
            self.log.warning("A generation request is already running.");
            return;
        }

        if let Some(v) = self.control_mut() {
            v.generating = true;
        }
        self.push_output("Asking Gemini to generate command...");
        let prompt = rest.to_string();
        let tx = self.worker_tx.clone();
        self.runtime.spawn(async move {
            let res = generator.generate(&prompt).await.map_err(|e| e.to_string());
            let _ = tx.send(WorkerMsg::Draft(res));
        });
    }

    pub(super) fn cmd_preset(&mut self, rest: &str) {
        if rest.is_empty() {
            let lines = dispatch::PRESETS
                .iter()
                .map(|p| format!("{: <8} {: <8} {}", p.name, p.label, p.payload))
                .collect();
            self.open_modal("Presets", lines);
            return;
        }
        let Some(preset) = dispatch::find_preset(rest) else {
            self.push_error(format!("unknown preset: {} (led-on, led-off, reboot)", rest));
            return;
        };
        if let Some(v) = self.control_mut() {
            v.set_draft(preset.payload.to_string(), Origin::Manual);
        }
    }

    pub(super) fn cmd_edit(&mut self) {
        let draft = self.control().map(|v| v.draft.clone());
        self.open_text_input_modal(
            "Manual Command",
            "json: ",
            TextInputAction::EditDraft,
            draft,
            vec![
                "JSON objects get a timestamp; anything else is sent as text.".to_string(),
                "Enter to keep; Esc to cancel.".to_string(),
            ],
        );
    }
}

use super::*;

impl App {
    pub(super) fn load(settings: SettingsStore, runtime: tokio::runtime::Handle) -> Self {
        let mut app = App::new(settings, runtime);
        match app.settings.load() {
            Ok(descriptor) => app.descriptor = descriptor,
            Err(err) => {
                tracing::warn!(error = %format!("{:#}", err), "could not load settings");
                app.push_error(format!("Failed to parse saved config: {:#}", err));
            }
        }

        app.push_output("Type `help` for commands (`/` lists them; Esc goes back).");
        if let Some(err) = app.generator_err.clone() {
            app.log.warning(format!("AI drafts unavailable: {}", err));
        }
        app.connect();
        app
    }

    /// Brings the session in line with `self.descriptor`. Without an API key
    /// nothing is subscribed.
    pub(super) fn connect(&mut self) {
        let descriptor = self.descriptor.clone();
        if let Some(v) = self.control_mut() {
            v.show_descriptor(&descriptor);
        }

        if !descriptor.is_configured() {
            self.session.close();
            self.connect_err = None;
            if let Some(v) = self.control_mut() {
                v.reset_live();
            }
            return;
        }

        let _guard = self.runtime.enter();
        let unchanged = self.session.is_connected()
            && self.session.descriptor() == Some(&descriptor);
        if !unchanged {
            self.push_output("Subscribing to Firebase Realtime Database...");
        }
        let resubscribed = match self.session.reconfigure(&descriptor) {
            Ok(changed) => {
                self.connect_err = None;
                changed
            }
            Err(err) => {
                tracing::warn!(error = %err, "connect failed");
                self.connect_err = Some(err.to_string());
                self.push_error(format!("Connection failed: {}", err));
                true
            }
        };
        let note = self.connect_err.clone();
        if let Some(v) = self.control_mut() {
            v.connect_note = note;
            if resubscribed {
                v.reset_live();
            }
        }
    }
}

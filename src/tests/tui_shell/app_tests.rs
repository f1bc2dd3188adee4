    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use serde_json::json;

    use super::*;
    use crate::model::LogEntry;

    struct Harness {
        app: App,
        _dir: tempfile::TempDir,
        _rt: tokio::runtime::Runtime,
    }

    impl Drop for Harness {
        fn drop(&mut self) {
            self.app.session.close();
        }
    }

    fn harness() -> Harness {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let settings = SettingsStore::at(dir.path().join("config.json"));
        let app = App::new(settings, rt.handle().clone());
        Harness {
            app,
            _dir: dir,
            _rt: rt,
        }
    }

    fn messages(app: &App) -> Vec<String> {
        app.log.entries().iter().map(|e| e.message.clone()).collect()
    }

    #[test]
    fn malformed_import_alerts_without_touching_the_form() {
        let mut h = harness();
        let app = &mut h.app;
        app.dispatch_command("settings", "");
        app.dispatch_command("set", "projectId before");
        app.dispatch_command("import", "{not json");

        let form = &app.current_view::<SettingsView>().unwrap().form;
        assert_eq!(form.project_id, "before");
        assert!(matches!(
            app.modal.as_ref().map(|m| &m.kind),
            Some(ModalKind::Alert)
        ));
        assert!(app.log.is_empty());
    }

    #[test]
    fn import_replaces_fields_but_keeps_the_path() {
        let mut h = harness();
        let app = &mut h.app;
        app.dispatch_command("settings", "");
        app.dispatch_command("set", "path /custom/node");
        app.dispatch_command(
            "import",
            r#"{"apiKey":"k","databaseURL":"https://p1.firebaseio.com","projectId":"p1"}"#,
        );

        let v = app.current_view::<SettingsView>().unwrap();
        assert!(v.dirty);
        assert_eq!(v.form.api_key, "k");
        assert_eq!(v.form.project_id, "p1");
        assert_eq!(v.form.database_path, "/custom/node");
        // Nothing is live until save.
        assert!(!app.descriptor.is_configured());
    }

    #[test]
    fn import_from_control_view_opens_settings() {
        let mut h = harness();
        let app = &mut h.app;
        app.dispatch_command("import", r#"{"projectId":"p2"}"#);
        assert_eq!(app.mode(), UiMode::Settings);
        assert_eq!(
            app.current_view::<SettingsView>().unwrap().form.project_id,
            "p2"
        );
    }

    #[test]
    fn save_persists_logs_and_returns_to_control() {
        let mut h = harness();
        let app = &mut h.app;
        app.dispatch_command("settings", "");
        app.dispatch_command("set", "apiKey k");
        app.dispatch_command("set", "databaseURL http://127.0.0.1:9");
        app.dispatch_command("set", "projectId p1");
        app.dispatch_command("save", "");

        assert_eq!(app.mode(), UiMode::Control);
        assert_eq!(app.settings.load().unwrap().project_id, "p1");
        let log = messages(app);
        assert!(log.contains(&"Firebase configuration saved locally.".to_string()));
        assert!(log.contains(&"Subscribing to Firebase Realtime Database...".to_string()));
        assert!(app.session.is_connected());
        assert_eq!(app.control().unwrap().project, "p1");
    }

    #[test]
    fn unconfigured_console_does_not_subscribe() {
        let mut h = harness();
        let app = &mut h.app;
        app.connect();
        assert!(!app.session.is_connected());
        assert!(app.log.is_empty());
        assert!(!app.control().unwrap().configured);
    }

    #[test]
    fn clear_empties_the_log() {
        let mut h = harness();
        let app = &mut h.app;
        app.push_output("one");
        app.push_error("two");
        app.dispatch_command("clear", "");
        assert!(app.log.is_empty());
        assert_eq!(app.log_lines(), vec!["No logs generated yet...".to_string()]);

        app.push_output("three");
        assert_eq!(messages(app), vec!["three".to_string()]);
    }

    #[test]
    fn stale_store_events_are_dropped() {
        let mut h = harness();
        let app = &mut h.app;
        app.apply_worker_msg(WorkerMsg::Store {
            generation: 7,
            event: StoreEvent::Value(Some(json!({"action": "OLD"}))),
        });
        assert!(!app.control().unwrap().is_live());
    }

    #[test]
    fn worker_results_update_the_control_view() {
        let mut h = harness();
        let app = &mut h.app;
        app.control_mut().unwrap().generating = true;
        app.apply_worker_msg(WorkerMsg::Draft(Ok(r#"{"command":"BLINK"}"#.to_string())));
        let v = app.control().unwrap();
        assert!(!v.generating);
        assert_eq!(v.draft, r#"{"command":"BLINK"}"#);
        assert_eq!(v.draft_origin, Origin::Ai);
        assert_eq!(messages(app), vec!["AI generated a command.".to_string()]);

        app.apply_worker_msg(WorkerMsg::Draft(Err("quota".to_string())));
        assert_eq!(
            app.log.last().map(|e| e.message.as_str()),
            Some("AI Generation failed: quota")
        );

        app.control_mut().unwrap().sending = true;
        app.apply_worker_msg(WorkerMsg::Log(LogEntry::new(
            Severity::Success,
            "Data successfully written to Firebase!",
        )));
        app.apply_worker_msg(WorkerMsg::SendFinished);
        assert!(!app.control().unwrap().sending);
        assert_eq!(app.log.last().unwrap().severity, Severity::Success);
    }

    #[test]
    fn preset_and_edit_replace_the_draft() {
        let mut h = harness();
        let app = &mut h.app;
        app.dispatch_command("preset", "led-off");
        assert_eq!(
            app.control().unwrap().draft,
            r#"{"action": "SET_LED", "state": false}"#
        );

        app.dispatch_command("edit", "");
        assert!(app.modal.is_some());
        app.close_modal();
        app.submit_text_input(TextInputAction::EditDraft, "plain text".to_string());
        assert_eq!(app.control().unwrap().draft, "plain text");
        assert_eq!(app.control().unwrap().draft_origin, Origin::Manual);
    }

    #[test]
    fn send_without_connection_logs_an_error() {
        let mut h = harness();
        let app = &mut h.app;
        app.dispatch_command("send", "");
        let last = app.log.last().unwrap();
        assert_eq!(last.severity, Severity::Error);
        assert!(last.message.starts_with("Write failed:"));
        assert!(!app.control().unwrap().sending);
    }

    #[test]
    fn commands_resolve_by_alias_and_prefix() {
        let mut h = harness();
        let app = &mut h.app;
        assert_eq!(app.resolve_command("s"), Some("send"));
        assert_eq!(app.resolve_command("pre"), Some("preset"));
        assert_eq!(app.resolve_command("zzz"), None);

        app.input.set("/se".to_string());
        app.recompute_suggestions();
        assert_eq!(app.suggestions.first().map(|d| d.name), Some("send"));
        app.apply_selected_suggestion();
        assert_eq!(app.input.buf, "/send ");
    }

    fn configure(app: &mut App) {
        app.dispatch_command("settings", "");
        app.dispatch_command("set", "apiKey k");
        app.dispatch_command("set", "databaseURL http://127.0.0.1:9");
        app.dispatch_command("set", "projectId p1");
        app.dispatch_command("save", "");
    }

    #[test]
    fn unchanged_resave_keeps_the_live_value() {
        let mut h = harness();
        let app = &mut h.app;
        configure(app);
        let generation = app.session.generation();
        app.apply_worker_msg(WorkerMsg::Store {
            generation,
            event: StoreEvent::Value(Some(json!({"action": "HELLO"}))),
        });
        assert!(app.control().unwrap().is_live());

        app.dispatch_command("settings", "");
        app.dispatch_command("save", "");
        assert_eq!(app.session.generation(), generation);
        let v = app.control().unwrap();
        assert!(v.is_live());
        assert_eq!(v.live_text(), "{\n  \"action\": \"HELLO\"\n}");
    }

    #[test]
    fn changed_resave_waits_for_the_new_subscription() {
        let mut h = harness();
        let app = &mut h.app;
        configure(app);
        app.apply_worker_msg(WorkerMsg::Store {
            generation: app.session.generation(),
            event: StoreEvent::Value(None),
        });

        app.dispatch_command("settings", "");
        app.dispatch_command("set", "projectId p2");
        app.dispatch_command("save", "");
        let v = app.control().unwrap();
        assert_eq!(v.project, "p2");
        assert!(!v.is_live());
        assert_eq!(v.live_text(), "Waiting for data...");
    }

    #[test]
    fn read_errors_are_logged_and_keep_the_subscription() {
        let mut h = harness();
        let app = &mut h.app;
        configure(app);
        let generation = app.session.generation();
        app.apply_worker_msg(WorkerMsg::Store {
            generation,
            event: StoreEvent::ReadError("listener cancelled by store: Permission denied".into()),
        });

        let last = app.log.last().unwrap();
        assert_eq!(last.severity, Severity::Error);
        assert_eq!(
            last.message,
            "Read failed: listener cancelled by store: Permission denied"
        );
        assert!(app.session.is_connected());

        app.apply_worker_msg(WorkerMsg::Store {
            generation,
            event: StoreEvent::Value(Some(json!("after"))),
        });
        assert_eq!(app.control().unwrap().live_text(), "\"after\"");
    }

    #[test]
    fn send_payload_keeps_surrounding_whitespace() {
        let (word, rest) = cmd_dispatch::split_command_line("/SEND  padded text  ");
        assert_eq!(word, "send");
        assert_eq!(rest, " padded text  ");

        let (word, rest) = cmd_dispatch::split_command_line("  help");
        assert_eq!(word, "help");
        assert_eq!(rest, "");
    }

    #[test]
    fn draft_editor_submits_text_verbatim() {
        let mut h = harness();
        let app = &mut h.app;
        app.open_text_input_modal(
            "Manual Command",
            "json: ",
            TextInputAction::EditDraft,
            Some("  spaced out  ".to_string()),
            Vec::new(),
        );
        modal::handle_modal_key(app, KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert!(app.modal.is_none());
        assert_eq!(app.control().unwrap().draft, "  spaced out  ");
    }


    use std::cell::RefCell;
    use std::sync::Mutex;

    use super::*;
    use crate::error::BridgeError;
    use crate::model::RemoteValue;

    thread_local! {
        static JOURNAL: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
    }

    fn record(line: String) {
        JOURNAL.with(|j| j.borrow_mut().push(line));
    }

    fn journal() -> Vec<String> {
        JOURNAL.with(|j| j.borrow().clone())
    }

    struct FakeStore {
        project: String,
    }

    impl RealtimeStore for FakeStore {
        fn connect(descriptor: &ConnectionDescriptor) -> BridgeResult<Self> {
            descriptor.validate()?;
            record(format!("connect {}", descriptor.project_id));
            Ok(Self {
                project: descriptor.project_id.clone(),
            })
        }

        async fn write(&self, _path: &DbPath, _value: &RemoteValue) -> BridgeResult<()> {
            Ok(())
        }

        fn subscribe<F>(&self, path: &DbPath, mut on_change: F) -> Subscription
        where
            F: FnMut(StoreEvent) + Send + 'static,
        {
            record(format!("subscribe {} {}", self.project, path));
            on_change(StoreEvent::Value(None));
            let project = self.project.clone();
            Subscription::new(move || record(format!("release {}", project)))
        }
    }

    fn descriptor(project: &str) -> ConnectionDescriptor {
        ConnectionDescriptor {
            api_key: "k".to_string(),
            database_url: "https://x.firebaseio.com".to_string(),
            project_id: project.to_string(),
            database_path: "/d/cmd".to_string(),
            ..ConnectionDescriptor::default()
        }
    }

    fn session() -> (Session<FakeStore>, std::sync::Arc<Mutex<Vec<(u64, StoreEvent)>>>) {
        let events = std::sync::Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let session = Session::new(move |generation, event| {
            sink.lock().unwrap().push((generation, event));
        });
        (session, events)
    }

    #[test]
    fn first_configure_connects_and_subscribes() {
        let (mut s, events) = session();
        assert!(s.reconfigure(&descriptor("p1")).unwrap());
        assert!(s.is_connected());
        assert_eq!(s.path().unwrap().as_str(), "/d/cmd");
        assert_eq!(journal(), ["connect p1", "subscribe p1 /d/cmd"]);
        assert_eq!(
            events.lock().unwrap().as_slice(),
            &[(1, StoreEvent::Value(None))]
        );
    }

    #[test]
    fn unchanged_descriptor_is_a_no_op() {
        let (mut s, _events) = session();
        s.reconfigure(&descriptor("p1")).unwrap();
        assert!(!s.reconfigure(&descriptor("p1")).unwrap());
        assert_eq!(s.generation(), 1);
        assert_eq!(journal().len(), 2);
    }

    #[test]
    fn project_change_tears_down_once_before_setup() {
        let (mut s, events) = session();
        s.reconfigure(&descriptor("p1")).unwrap();
        s.reconfigure(&descriptor("p2")).unwrap();

        assert_eq!(
            journal(),
            [
                "connect p1",
                "subscribe p1 /d/cmd",
                "release p1",
                "connect p2",
                "subscribe p2 /d/cmd",
            ]
        );
        assert_eq!(s.generation(), 2);
        let gens: Vec<u64> = events.lock().unwrap().iter().map(|(g, _)| *g).collect();
        assert_eq!(gens, [1, 2]);

        drop(s);
        let releases = journal().iter().filter(|l| l.starts_with("release")).count();
        assert_eq!(releases, 2);
    }

    #[test]
    fn failed_connect_leaves_session_closed() {
        let (mut s, _events) = session();
        s.reconfigure(&descriptor("p1")).unwrap();

        let mut bad = descriptor("p2");
        bad.database_url.clear();
        let err = s.reconfigure(&bad).unwrap_err();
        assert!(matches!(err, BridgeError::Configuration(_)));
        assert!(!s.is_connected());
        assert_eq!(journal().last().map(String::as_str), Some("release p1"));
    }

    #[test]
    fn close_is_idempotent() {
        let (mut s, _events) = session();
        s.reconfigure(&descriptor("p1")).unwrap();
        s.close();
        s.close();
        drop(s);
        let releases = journal().iter().filter(|l| l.starts_with("release")).count();
        assert_eq!(releases, 1);
    }

    #[test]
    fn open_connects_in_one_step() {
        let s = Session::<FakeStore>::open(&descriptor("p3"), |_, _| {}).unwrap();
        assert!(s.is_connected());
        assert_eq!(s.generation(), 1);
        assert_eq!(journal(), ["connect p3", "subscribe p3 /d/cmd"]);
    }

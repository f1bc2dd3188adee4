    use super::*;

    fn configured() -> ConnectionDescriptor {
        ConnectionDescriptor {
            api_key: "old-key".to_string(),
            auth_domain: "old.firebaseapp.com".to_string(),
            database_url: "https://old.firebaseio.com".to_string(),
            project_id: "old".to_string(),
            storage_bucket: String::new(),
            messaging_sender_id: String::new(),
            app_id: String::new(),
            database_path: "/lab/relay".to_string(),
        }
    }

    #[test]
    fn import_populates_fields_and_keeps_path() {
        let current = configured();
        let imported = current
            .import_vendor_config(
                r#"{"apiKey":"k","authDomain":"p1.firebaseapp.com","databaseURL":"https://x.firebaseio.com","projectId":"p1","storageBucket":"p1.appspot.com","messagingSenderId":"42","appId":"1:42:web:abc","databasePath":"/ignored"}"#,
            )
            .unwrap();

        assert_eq!(imported.api_key, "k");
        assert_eq!(imported.auth_domain, "p1.firebaseapp.com");
        assert_eq!(imported.database_url, "https://x.firebaseio.com");
        assert_eq!(imported.project_id, "p1");
        assert_eq!(imported.storage_bucket, "p1.appspot.com");
        assert_eq!(imported.messaging_sender_id, "42");
        assert_eq!(imported.app_id, "1:42:web:abc");
        assert_eq!(imported.database_path, "/lab/relay");
    }

    #[test]
    fn import_blanks_missing_fields() {
        let imported = configured()
            .import_vendor_config(r#"{"projectId":"p2","measurementId":"G-1"}"#)
            .unwrap();
        assert_eq!(imported.project_id, "p2");
        assert_eq!(imported.api_key, "");
        assert_eq!(imported.database_url, "");
    }

    #[test]
    fn import_defaults_blank_path() {
        let mut current = configured();
        current.database_path = "  ".to_string();
        let imported = current.import_vendor_config(r#"{"apiKey":"k"}"#).unwrap();
        assert_eq!(imported.database_path, DEFAULT_DATABASE_PATH);
    }

    #[test]
    fn malformed_import_is_a_parse_error() {
        let current = configured();
        let err = current.import_vendor_config("{apiKey: 'k'").unwrap_err();
        assert!(matches!(err, BridgeError::Parse(_)));
        assert_eq!(current, configured());
    }

    #[test]
    fn validate_requires_url_and_path() {
        let mut d = configured();
        assert!(d.validate().is_ok());
        d.database_url.clear();
        assert!(matches!(d.validate(), Err(BridgeError::Configuration(_))));

        let mut d = configured();
        d.database_path.clear();
        assert!(d.validate().is_err());
    }

    #[test]
    fn serializes_with_vendor_keys() {
        let json = serde_json::to_value(configured()).unwrap();
        assert_eq!(json["databaseURL"], "https://old.firebaseio.com");
        assert_eq!(json["databasePath"], "/lab/relay");
        assert!(json.get("database_url").is_none());
    }

    #[test]
    fn field_names_parse_loosely() {
        assert_eq!(DescriptorField::parse("databaseURL"), Some(DescriptorField::DatabaseUrl));
        assert_eq!(DescriptorField::parse("project_id"), Some(DescriptorField::ProjectId));
        assert_eq!(DescriptorField::parse("path"), Some(DescriptorField::DatabasePath));
        assert_eq!(DescriptorField::parse("nope"), None);
    }

    #[test]
    fn import_renders_non_string_scalars() {
        let imported = configured()
            .import_vendor_config(
                r#"{"apiKey":"k","messagingSenderId":123456789012,"appId":0,"storageBucket":null,"authDomain":{"nested":true}}"#,
            )
            .unwrap();
        assert_eq!(imported.api_key, "k");
        assert_eq!(imported.messaging_sender_id, "123456789012");
        assert_eq!(imported.app_id, "");
        assert_eq!(imported.storage_bucket, "");
        assert_eq!(imported.auth_domain, "");
    }

    #[test]
    fn import_of_non_object_json_blanks_every_field() {
        let imported = configured().import_vendor_config("[1, 2]").unwrap();
        assert_eq!(imported.api_key, "");
        assert_eq!(imported.project_id, "");
        assert_eq!(imported.database_path, "/lab/relay");
    }


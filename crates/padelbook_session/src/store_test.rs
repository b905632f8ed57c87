#[cfg(test)]
mod tests {
    use crate::store::FileSessionStore;
    use padelbook_common::models::SessionToken;
    use padelbook_common::{ClientError, SessionStore};
    use padelbook_config::SessionConfig;
    use serde_json::{json, Value};
    use std::fs;

    fn read_json(path: &std::path::Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::open(dir.path().join("session.json"), "token").unwrap();

        assert!(!store.has_token());
        assert!(!store.path().exists(), "opening must not create the file");
    }

    #[test]
    fn test_token_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let store = FileSessionStore::open(&path, "token").unwrap();
        store.set_token(SessionToken::new("jwt-1"));
        assert_eq!(read_json(&path), json!({"token": "jwt-1"}));

        let reopened = FileSessionStore::open(&path, "token").unwrap();
        assert_eq!(reopened.token(), Some(SessionToken::new("jwt-1")));
    }

    #[test]
    fn test_clear_removes_only_own_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, r#"{"token": "jwt-1", "theme": "dark"}"#).unwrap();

        let store = FileSessionStore::open(&path, "token").unwrap();
        assert!(store.has_token());

        store.clear();

        assert!(!store.has_token());
        assert_eq!(read_json(&path), json!({"theme": "dark"}));
    }

    #[test]
    fn test_empty_token_counts_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, r#"{"token": ""}"#).unwrap();

        let store = FileSessionStore::open(&path, "token").unwrap();

        assert!(!store.has_token());
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let err = FileSessionStore::open(&path, "token").unwrap_err();

        assert!(matches!(err, ClientError::Storage(_)));
    }

    #[test]
    fn test_from_config_uses_configured_file_and_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.json");
        fs::write(&path, r#"{"jwt": "abc"}"#).unwrap();
        let config = SessionConfig {
            token_file: Some(path),
            storage_key: "jwt".to_string(),
        };

        let store = FileSessionStore::from_config(&config).unwrap();

        assert_eq!(store.token(), Some(SessionToken::new("abc")));
    }

    #[tokio::test]
    async fn test_subscribers_see_file_store_changes() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::open(dir.path().join("session.json"), "token").unwrap();
        let mut rx = store.subscribe();

        store.set_token(SessionToken::new("abc"));
        rx.changed().await.unwrap();

        assert_eq!(*rx.borrow(), Some(SessionToken::new("abc")));
    }
}

//! Integration tests for the durable and session stores
//!
//! Covers the file store used by desktop builds and the theme/identity
//! behaviour on top of it.

use chat_widget::identity::SessionIdentity;
use chat_widget::storage::{FileStore, KeyValueStore, MemoryStore, THEME_KEY, USER_ID_KEY};
use chat_widget::theme::ThemeController;
use chat_widget::types::ThemeMode;

mod file_store_tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = FileStore::new(dir.path());

        store.set(THEME_KEY, "dark").expect("Failed to set");
        assert_eq!(store.get(THEME_KEY), Some("dark".to_string()));
    }

    #[test]
    fn test_get_nonexistent() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = FileStore::new(dir.path().join("not-created-yet"));
        assert_eq!(store.get(THEME_KEY), None);
    }

    #[test]
    fn test_creates_missing_directory() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let nested = dir.path().join("a").join("b");
        let store = FileStore::new(&nested);

        store.set(USER_ID_KEY, "abc").expect("Failed to set");
        assert!(nested.exists());
    }

    #[test]
    fn test_trailing_newline_is_ignored() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        std::fs::write(dir.path().join("theme.txt"), "dark\n").expect("Failed to write");
        let store = FileStore::new(dir.path());

        assert_eq!(store.get(THEME_KEY), Some("dark".to_string()));

        let theme = ThemeController::new(Box::new(store));
        assert_eq!(theme.init(false), ThemeMode::Dark);
    }

    #[test]
    fn test_unreadable_entry_reads_as_missing() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        // A directory where the file should be makes the read fail with
        // something other than NotFound.
        std::fs::create_dir(dir.path().join("theme.txt")).expect("Failed to create dir");
        let store = FileStore::new(dir.path());

        assert_eq!(store.get(THEME_KEY), None);
    }
}

mod persistence_tests {
    use super::*;

    #[test]
    fn test_theme_survives_a_reload() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");

        let first = ThemeController::new(Box::new(FileStore::new(dir.path())));
        assert_eq!(first.init(false), ThemeMode::Light);
        first.set_theme(true);

        // Fresh controller over the same directory, OS hint now says light
        let second = ThemeController::new(Box::new(FileStore::new(dir.path())));
        assert!(second.init(false).is_dark());
    }

    #[test]
    fn test_session_id_is_per_session() {
        let tab_a = MemoryStore::new();
        let tab_b = MemoryStore::new();

        let a = SessionIdentity::load_or_create(&tab_a);
        let a_again = SessionIdentity::load_or_create(&tab_a);
        let b = SessionIdentity::load_or_create(&tab_b);

        assert_eq!(a, a_again);
        assert_ne!(a, b);
    }
}

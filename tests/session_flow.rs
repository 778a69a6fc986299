//! End-to-end session lifecycle over a temporary store: create, persist,
//! recover, add, delete.

use solvault_wallet::domain::session::{SessionState, WalletRecord, WalletSession};
use solvault_wallet::infra::store::Store;

fn record(n: u32) -> WalletRecord {
    WalletRecord {
        public: format!("A{}", n),
        private: format!("B{}", n),
    }
}

#[test]
fn create_persist_recover_add_delete() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::with_path(dir.path().join("session.mdb")).unwrap();

    // Create: a fresh session from the key service, persisted as an effect
    // of the creation.
    let created = WalletSession::new("abandon ability able about".into(), record(1));
    store.save_session(&created).unwrap();

    // Recover: a later run loads the same session back.
    let recovered = store.load_session().unwrap().expect("session was saved");
    assert_eq!(recovered, created);

    // Add: append the next key pair, selection follows, change is persisted.
    let mut state = SessionState::new(recovered);
    let selected = state.push_record(record(2));
    assert_eq!(selected, 1);
    assert_eq!(state.records().len(), 2);
    assert_eq!(state.selected_record().unwrap().public, "A2");
    store.save_session(state.session()).unwrap();

    let reloaded = store.load_session().unwrap().unwrap();
    assert_eq!(reloaded.key.len(), 2);
    assert_eq!(reloaded.phrase, "abandon ability able about");
    assert_eq!(reloaded.key[1], record(2));

    // Delete: the persisted entry is gone, regardless of prior state.
    store.clear_session().unwrap();
    assert_eq!(store.load_session().unwrap(), None);
}

#[test]
fn recovery_on_fresh_device_finds_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::with_path(dir.path().join("session.mdb")).unwrap();
    assert_eq!(store.load_session().unwrap(), None);
}

#[test]
fn persisted_session_includes_private_keys() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::with_path(dir.path().join("session.mdb")).unwrap();

    let session = WalletSession::new("phrase".into(), record(1));
    store.save_session(&session).unwrap();

    let loaded = store.load_session().unwrap().unwrap();
    assert_eq!(loaded.key[0].private, "B1");
}

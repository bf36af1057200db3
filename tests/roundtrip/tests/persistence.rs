//! Persistence across requests: facades sharing a file store.
//!
//! Each test simulates consecutive HTTP requests by building a fresh facade
//! per request over one `FileStore` root, the way a request handler would.

use std::sync::Arc;

use serde_json::json;
use sessionkit::{
    FileStore, ResponseCookies, Session, SessionConfig, SessionStatus, SessionStore,
};
use tempfile::TempDir;

// ─── Helpers ───────────────────────────────────────────────────────────────

fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}

fn file_store(dir: &TempDir) -> FileStore {
    FileStore::open(dir.path().join("sessions")).expect("open file store")
}

fn request(store: &FileStore, cookies: &ResponseCookies) -> Session {
    Session::new(
        Arc::new(store.clone()),
        Arc::new(cookies.clone()),
        SessionConfig::default(),
    )
}

// ─── Tests ─────────────────────────────────────────────────────────────────

#[test]
fn data_survives_across_requests() {
    init_tracing();
    let dir = tempfile::tempdir().expect("temp dir");
    let store = file_store(&dir);
    let cookies = ResponseCookies::new();

    // First request: start, write, close.
    let mut session = request(&store, &cookies);
    assert!(session.start());
    let id = session.id().expect("active session has an id").to_string();
    session
        .set("user", "alice")
        .set("cart", json!(["apples", "pears"]));
    assert!(session.close());

    // The client presents the id cookie on the next request.
    let presented = cookies.drain().pop().expect("id cookie was emitted");
    assert_eq!(presented.value, id);

    let mut session = request(&store, &cookies);
    session.set_id(presented.value.as_str());
    assert!(session.start());
    assert_eq!(session.get_as::<String>("user").as_deref(), Some("alice"));
    assert_eq!(session.get("cart"), Some(&json!(["apples", "pears"])));
}

#[test]
fn destroyed_sessions_leave_no_file_behind() {
    init_tracing();
    let dir = tempfile::tempdir().expect("temp dir");
    let store = file_store(&dir);
    let cookies = ResponseCookies::new();

    let mut session = request(&store, &cookies);
    session.start();
    let id = session.id().expect("id").to_string();
    session.set("user", "alice");
    session.close();
    assert!(store.load(&id).unwrap().is_some());

    let mut session = request(&store, &cookies);
    session.set_id(id.as_str());
    session.start();
    assert!(session.destroy());
    assert_eq!(session.status(), SessionStatus::None);
    assert!(store.load(&id).unwrap().is_none());
}

#[test]
fn regeneration_moves_data_to_the_new_file() {
    init_tracing();
    let dir = tempfile::tempdir().expect("temp dir");
    let store = file_store(&dir);
    let cookies = ResponseCookies::new();

    let mut session = request(&store, &cookies);
    session.start();
    let old_id = session.id().expect("id").to_string();
    session.set("user", "alice");
    assert!(session.regenerate_id(true));
    let new_id = session.id().expect("id").to_string();
    session.close();

    assert_ne!(new_id, old_id);
    assert!(store.load(&old_id).unwrap().is_none());

    let mut session = request(&store, &cookies);
    session.set_id(new_id.as_str());
    session.start();
    assert_eq!(session.get_as::<String>("user").as_deref(), Some("alice"));
}

#[test]
fn sweep_expires_idle_sessions_only() {
    init_tracing();
    let dir = tempfile::tempdir().expect("temp dir");
    let store = file_store(&dir);
    let cookies = ResponseCookies::new();

    let mut session = request(&store, &cookies);
    session.start();
    let idle_id = session.id().expect("id").to_string();
    session.close();

    // Age the record on disk by rewriting its timestamp.
    let mut record = store.load(&idle_id).unwrap().expect("record exists");
    record.touched = record.touched - chrono::Duration::hours(2);
    store.save(&idle_id, &record).unwrap();

    let mut session = request(&store, &cookies);
    session.start();
    session.close();

    assert_eq!(store.sweep(3600).unwrap(), 1);
    assert!(store.load(&idle_id).unwrap().is_none());
}

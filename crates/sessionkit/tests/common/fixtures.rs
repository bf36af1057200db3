//! Test fixtures for facade tests.

use std::sync::Arc;

use sessionkit::{MemoryStore, ResponseCookies, Session, SessionConfig};

/// A facade over a shared in-memory store, plus handles to both
/// collaborators for inspection.
pub fn memory_session(config: SessionConfig) -> (Session, MemoryStore, ResponseCookies) {
    let store = MemoryStore::new();
    let cookies = ResponseCookies::new();
    let session = Session::new(
        Arc::new(store.clone()),
        Arc::new(cookies.clone()),
        config,
    );
    (session, store, cookies)
}

/// A second facade bound to the same store and cookie channel, simulating
/// a later request from the same client.
pub fn next_request(store: &MemoryStore, cookies: &ResponseCookies, config: SessionConfig) -> Session {
    Session::new(Arc::new(store.clone()), Arc::new(cookies.clone()), config)
}

//! sessionkit — an object-oriented session facade with pluggable storage.
//!
//! The facade wraps two injected collaborators: a [`SessionStore`] that
//! persists identifier → key-value records, and a [`CookieChannel`] that
//! carries the identifier cookie back to the client. The facade itself adds
//! no session semantics of its own: every call is a thin delegation, and
//! misuse degrades to a no-op or a `false` return instead of failing the
//! caller.
//!
//! ```
//! use std::sync::Arc;
//! use sessionkit::{MemoryStore, ResponseCookies, Session, SessionConfig};
//!
//! let store = Arc::new(MemoryStore::new());
//! let cookies = Arc::new(ResponseCookies::new());
//! let config = SessionConfig::builder().name("SID").build();
//!
//! let mut session = Session::new(store, cookies, config);
//! assert!(session.start());
//! session.set("user", "alice").set("visits", 1);
//! assert!(session.close());
//! ```

pub mod config;
pub mod cookie;
pub mod error;
pub mod session;
pub mod status;
pub mod store;

pub use config::{CookieParams, SessionConfig, SessionConfigBuilder};
pub use cookie::{CookieChannel, ResponseCookies, SetCookie};
#[cfg(feature = "toml-config")]
pub use error::ConfigError;
pub use error::{StoreError, StoreResult};
pub use session::Session;
pub use status::SessionStatus;
pub use store::{FileStore, MemoryStore, SessionRecord, SessionStore};

//! The session facade.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::{CookieParams, SessionConfig};
use crate::cookie::{CookieChannel, SetCookie};
use crate::status::SessionStatus;
use crate::store::{SessionRecord, SessionStore};

/// Offset used when expiring the identifier cookie. Any moment comfortably
/// in the past works; 150 days survives badly skewed client clocks.
const EXPIRE_OFFSET_SECS: i64 = 12_960_000;

/// Typed, chainable facade over a [`SessionStore`] and a [`CookieChannel`].
///
/// One instance serves one request. The facade never invents session
/// semantics of its own: lifecycle and persistence belong to the store,
/// cookie transmission to the channel. Data operations before `start()`
/// fail soft — absent values, `false`, or a no-op — rather than erroring.
pub struct Session {
    store: Arc<dyn SessionStore>,
    cookies: Arc<dyn CookieChannel>,
    config: SessionConfig,
    id: Option<String>,
    record: Option<SessionRecord>,
}

impl Session {
    /// Build a facade over `store` and `cookies` with the given
    /// configuration.
    pub fn new(
        store: Arc<dyn SessionStore>,
        cookies: Arc<dyn CookieChannel>,
        config: SessionConfig,
    ) -> Self {
        Self {
            store,
            cookies,
            config,
            id: None,
            record: None,
        }
    }

    // ── Status ──────────────────────────────────────────────────────────

    /// Current session status.
    pub fn status(&self) -> SessionStatus {
        if !self.config.enabled {
            SessionStatus::Disabled
        } else if self.record.is_some() {
            SessionStatus::Active
        } else {
            SessionStatus::None
        }
    }

    /// Sessions are enabled and one has been started.
    pub fn is_active(&self) -> bool {
        self.status() == SessionStatus::Active
    }

    /// Sessions are enabled but none exists.
    pub fn is_none(&self) -> bool {
        self.status() == SessionStatus::None
    }

    /// Sessions are disabled for this facade.
    pub fn is_disabled(&self) -> bool {
        self.status() == SessionStatus::Disabled
    }

    // ── Lifecycle ───────────────────────────────────────────────────────

    /// Start a new session, or resume the one named by [`set_id`](Self::set_id).
    ///
    /// A freshly minted identifier is sent to the client through the cookie
    /// channel when cookies are in use. Returns false when sessions are
    /// disabled or the store fails; starting an already-active session is a
    /// no-op returning true.
    pub fn start(&mut self) -> bool {
        match self.status() {
            SessionStatus::Disabled => {
                warn!("start() called while sessions are disabled");
                return false;
            }
            SessionStatus::Active => {
                debug!("start() called on an active session; ignoring");
                return true;
            }
            SessionStatus::None => {}
        }

        let (id, fresh) = match self.id.take() {
            Some(id) => (id, false),
            None => (generate_id(), true),
        };

        let existing = match self.store.load(&id) {
            Ok(existing) => existing,
            Err(e) => {
                error!(id = %id, "session store load failed: {e}");
                if !fresh {
                    self.id = Some(id);
                }
                return false;
            }
        };

        let resumed = existing.is_some();
        info!(id = %id, resumed, "session started");

        if fresh && self.config.use_cookies {
            self.emit_id_cookie(&id);
        }
        self.record = Some(existing.unwrap_or_default());
        self.id = Some(id);
        true
    }

    /// Flush data to the store and release the session for the remainder of
    /// the request. The stored record survives; status reverts to `None`.
    pub fn close(&mut self) -> bool {
        let (Some(id), Some(mut record)) = (self.id.clone(), self.record.take()) else {
            debug!("close() called with no active session");
            return false;
        };

        record.touched = Utc::now();
        match self.store.save(&id, &record) {
            Ok(()) => {
                debug!(id = %id, "session closed");
                true
            }
            Err(e) => {
                error!(id = %id, "session write-back failed: {e}");
                false
            }
        }
    }

    /// Delete all data associated with the current session.
    ///
    /// The identifier cookie is left untouched; expiring it is a separate,
    /// explicit step — see [`destroy_cookie`](Self::destroy_cookie).
    pub fn destroy(&mut self) -> bool {
        if !self.is_active() {
            warn!("destroy() called with no active session");
            return false;
        }
        let Some(id) = self.id.take() else {
            return false;
        };
        self.record = None;

        match self.store.delete(&id) {
            Ok(()) => {
                info!(id = %id, "session destroyed");
                true
            }
            Err(e) => {
                error!(id = %id, "session delete failed: {e}");
                false
            }
        }
    }

    // ── Identity ────────────────────────────────────────────────────────

    /// Current session identifier, if any.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Set the identifier to resume on the next [`start`](Self::start).
    ///
    /// Only meaningful before `start()`. Once a session is active the call
    /// changes nothing and returns false.
    pub fn set_id(&mut self, new_id: impl Into<String>) -> bool {
        if self.is_active() {
            warn!("set_id() after start() has no effect");
            return false;
        }
        self.id = Some(new_id.into());
        true
    }

    /// Cookie/parameter name carrying the identifier.
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Rename the identifier cookie/parameter for sessions started later.
    ///
    /// Only meaningful before `start()`. Once a session is active the call
    /// changes nothing and returns false.
    pub fn set_name(&mut self, new_name: impl Into<String>) -> bool {
        if self.is_active() {
            warn!("set_name() after start() has no effect");
            return false;
        }
        self.config.name = new_name.into();
        true
    }

    /// Issue a newly generated identifier for the active session.
    ///
    /// With `delete_old` the superseded record is removed from the store;
    /// otherwise it remains valid until swept. The new identifier is sent
    /// to the client when cookies are in use.
    pub fn regenerate_id(&mut self, delete_old: bool) -> bool {
        if !self.is_active() {
            warn!("regenerate_id() called with no active session");
            return false;
        }

        // The superseded record goes first; a failed delete returns false
        // with the facade unchanged.
        if delete_old {
            if let Some(old_id) = self.id.as_deref() {
                if let Err(e) = self.store.delete(old_id) {
                    error!(id = %old_id, "failed to delete superseded session: {e}");
                    return false;
                }
            }
        }

        let new_id = generate_id();
        self.id = Some(new_id.clone());
        if self.config.use_cookies {
            self.emit_id_cookie(&new_id);
        }
        info!(id = %new_id, "session id regenerated");
        true
    }

    // ── Data ────────────────────────────────────────────────────────────

    /// Value stored under `key`, or `None` when absent or no session is
    /// active.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.record.as_ref()?.values.get(key)
    }

    /// Typed variant of [`get`](Self::get). `None` when the key is absent
    /// or the value does not deserialize to `T`.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.get(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// Every key-value pair currently held. Empty with no active session.
    pub fn get_all(&self) -> HashMap<String, Value> {
        self.record
            .as_ref()
            .map(|record| record.values.clone())
            .unwrap_or_default()
    }

    /// Store `value` under `key`. Chainable; a no-op with no active
    /// session.
    ///
    /// ```
    /// # use std::sync::Arc;
    /// # use sessionkit::{MemoryStore, ResponseCookies, Session, SessionConfig};
    /// # let mut session = Session::new(
    /// #     Arc::new(MemoryStore::new()),
    /// #     Arc::new(ResponseCookies::new()),
    /// #     SessionConfig::default(),
    /// # );
    /// # session.start();
    /// session.set("name", "Bob").set("surname", "Marley");
    /// ```
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        if let Some(record) = self.record.as_mut() {
            record.values.insert(key.into(), value.into());
        }
        self
    }

    /// Alias of [`set`](Self::set).
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.set(key, value)
    }

    /// Apply [`set`](Self::set) for every entry in iteration order; later
    /// entries win on duplicate keys. Chainable.
    pub fn put_all<K, V, I>(&mut self, entries: I) -> &mut Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in entries {
            self.set(key, value);
        }
        self
    }

    /// Whether the session holds `key`.
    pub fn has(&self, key: &str) -> bool {
        self.record
            .as_ref()
            .is_some_and(|record| record.values.contains_key(key))
    }

    /// Remove `key`. True iff it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        self.record
            .as_mut()
            .is_some_and(|record| record.values.remove(key).is_some())
    }

    /// Drop every key while keeping the session itself alive.
    pub fn clear(&mut self) {
        if let Some(record) = self.record.as_mut() {
            record.values.clear();
        }
    }

    // ── Cookies ─────────────────────────────────────────────────────────

    /// Whether the identifier travels in a cookie.
    pub fn use_cookies(&self) -> bool {
        self.config.use_cookies
    }

    /// Identifier cookie transmission parameters.
    pub fn cookie_params(&self) -> &CookieParams {
        &self.config.cookie
    }

    /// Replace the cookie parameters for sessions started later.
    ///
    /// Only meaningful before `start()`. Once a session is active the call
    /// changes nothing and returns false.
    pub fn set_cookie_params(&mut self, params: CookieParams) -> bool {
        if self.is_active() {
            warn!("set_cookie_params() after start() has no effect");
            return false;
        }
        self.config.cookie = params;
        true
    }

    /// Expire the identifier cookie on the client by emitting an empty
    /// value with an expiration in the past. Returns false when cookies are
    /// not in use, otherwise the channel's outcome.
    pub fn destroy_cookie(&self) -> bool {
        if !self.use_cookies() {
            return false;
        }
        self.cookies.emit(SetCookie {
            name: self.config.name.clone(),
            value: String::new(),
            expires: Some(Utc::now() - Duration::seconds(EXPIRE_OFFSET_SECS)),
            params: self.config.cookie.clone(),
        })
    }

    fn emit_id_cookie(&self, id: &str) {
        let lifetime = self.config.cookie.lifetime_secs;
        // Saturate rather than wrap: an absurd lifetime must still expire
        // in the future.
        let expires = (lifetime > 0).then(|| {
            let secs = i64::try_from(lifetime).unwrap_or(i64::MAX);
            Duration::try_seconds(secs)
                .and_then(|delta| Utc::now().checked_add_signed(delta))
                .unwrap_or(chrono::DateTime::<Utc>::MAX_UTC)
        });
        let sent = self.cookies.emit(SetCookie {
            name: self.config.name.clone(),
            value: id.to_string(),
            expires,
            params: self.config.cookie.clone(),
        });
        if !sent {
            warn!(id = %id, "cookie channel refused the session id cookie");
        }
    }
}

/// Freshly generated opaque identifier.
fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

//! The cookie channel: outgoing `Set-Cookie` values for the response.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use crate::config::CookieParams;

/// A single outgoing cookie.
#[derive(Debug, Clone, PartialEq)]
pub struct SetCookie {
    pub name: String,
    pub value: String,
    /// Absolute expiration. `None` means a session cookie.
    pub expires: Option<DateTime<Utc>>,
    pub params: CookieParams,
}

impl SetCookie {
    /// Render as an RFC 6265 `Set-Cookie` header value.
    pub fn to_header_value(&self) -> String {
        let mut out = format!("{}={}", self.name, self.value);
        if let Some(expires) = self.expires {
            out.push_str("; Expires=");
            out.push_str(&expires.format("%a, %d %b %Y %H:%M:%S GMT").to_string());
        }
        // An already-expired cookie advertises Max-Age=0 regardless of the
        // configured lifetime, so clients discard it at once.
        if self.is_expired() {
            out.push_str("; Max-Age=0");
        } else if self.params.lifetime_secs > 0 {
            out.push_str(&format!("; Max-Age={}", self.params.lifetime_secs));
        }
        if !self.params.path.is_empty() {
            out.push_str("; Path=");
            out.push_str(&self.params.path);
        }
        if !self.params.domain.is_empty() {
            out.push_str("; Domain=");
            out.push_str(&self.params.domain);
        }
        if self.params.secure {
            out.push_str("; Secure");
        }
        if self.params.http_only {
            out.push_str("; HttpOnly");
        }
        out
    }

    /// True when the cookie is already expired, i.e. it deletes itself on
    /// arrival at the client.
    pub fn is_expired(&self) -> bool {
        matches!(self.expires, Some(t) if t <= Utc::now())
    }
}

/// Sink for cookies emitted alongside the HTTP response.
pub trait CookieChannel: Send + Sync {
    /// Queue `cookie` for transmission. Returns false when the channel can
    /// no longer accept cookies (e.g. headers already sent).
    fn emit(&self, cookie: SetCookie) -> bool;
}

/// Collects emitted cookies until request-handling code drains them into
/// response headers. Cloning yields another handle to the same queue.
#[derive(Debug, Clone, Default)]
pub struct ResponseCookies {
    queue: Arc<Mutex<Vec<SetCookie>>>,
}

impl ResponseCookies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every queued cookie, leaving the queue empty.
    pub fn drain(&self) -> Vec<SetCookie> {
        std::mem::take(&mut *self.lock())
    }

    /// Snapshot of the queued cookies, oldest first.
    pub fn pending(&self) -> Vec<SetCookie> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<SetCookie>> {
        self.queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl CookieChannel for ResponseCookies {
    fn emit(&self, cookie: SetCookie) -> bool {
        self.lock().push(cookie);
        true
    }
}

//! Session availability tri-state.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether sessions are enabled and whether one currently exists.
///
/// - [`Active`](SessionStatus::Active): sessions are enabled and one has
///   been started.
/// - [`None`](SessionStatus::None): sessions are enabled but none exists.
/// - [`Disabled`](SessionStatus::Disabled): sessions are disabled for this
///   facade; the state is permanent for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    None,
    Disabled,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStatus::Active => write!(f, "active"),
            SessionStatus::None => write!(f, "none"),
            SessionStatus::Disabled => write!(f, "disabled"),
        }
    }
}

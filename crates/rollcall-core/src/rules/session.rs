use crate::error::CoreError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SESSION_TIMEOUT_SECS: u64 = 5 * 60;
pub const MAX_SESSION_TIMEOUT_SECS: u64 = 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// No activity was ever recorded.
    Fresh,
    Active,
    Expired,
}

impl SessionState {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionState::Fresh => "fresh",
            SessionState::Active => "active",
            SessionState::Expired => "expired",
        }
    }
}

/// Fixed-window inactivity check. Timestamps are unix milliseconds.
pub fn session_state(now_ms: i64, last_activity_ms: Option<i64>, timeout_secs: u64) -> SessionState {
    let Some(last) = last_activity_ms else {
        return SessionState::Fresh;
    };
    let timeout_ms = i64::try_from(timeout_secs.saturating_mul(1000)).unwrap_or(i64::MAX);
    if now_ms.saturating_sub(last) > timeout_ms {
        SessionState::Expired
    } else {
        SessionState::Active
    }
}

pub fn validate_session_timeout(secs: u64) -> Result<u64, CoreError> {
    if secs == 0 || secs > MAX_SESSION_TIMEOUT_SECS {
        return Err(CoreError::InvalidSessionTimeout(secs));
    }
    Ok(secs)
}

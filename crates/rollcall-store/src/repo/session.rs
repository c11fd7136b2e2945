use crate::error::Result;
use crate::kv::{KvStore, SESSION_TIME_KEY};
use rollcall_core::rules::{session_state, SessionState};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionCheck {
    pub state: SessionState,
    pub previous_activity_ms: Option<i64>,
}

/// Last-activity slot backing the inactivity heuristic.
pub struct SessionRepo<K: KvStore> {
    kv: K,
}

impl<K: KvStore> SessionRepo<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    pub fn last_activity(&self) -> Result<Option<i64>> {
        read_last_activity(&self.kv)
    }

    pub fn touch(&self, now_ms: i64) -> Result<()> {
        self.kv.set(SESSION_TIME_KEY, &now_ms.to_string())
    }

    pub fn check(&self, now_ms: i64, timeout_secs: u64) -> Result<SessionState> {
        let last = self.last_activity()?;
        Ok(session_state(now_ms, last, timeout_secs))
    }

    /// Evaluates the session against the stored activity, then records `now_ms`
    /// as the latest activity. An expired session simply starts over.
    pub fn check_and_touch(&self, now_ms: i64, timeout_secs: u64) -> Result<SessionCheck> {
        self.kv.transact(|kv| {
            let previous = read_last_activity(kv)?;
            let state = session_state(now_ms, previous, timeout_secs);
            kv.set(SESSION_TIME_KEY, &now_ms.to_string())?;
            debug!(state = state.as_str(), "session checked");
            Ok(SessionCheck {
                state,
                previous_activity_ms: previous,
            })
        })
    }

    pub fn reset(&self) -> Result<()> {
        self.kv.remove(SESSION_TIME_KEY)
    }
}

fn read_last_activity<K: KvStore>(kv: &K) -> Result<Option<i64>> {
    let raw = kv.get(SESSION_TIME_KEY)?;
    Ok(raw.and_then(|value| value.trim().parse::<i64>().ok()))
}

#[cfg(test)]
mod tests {
    use super::SessionRepo;
    use crate::kv::{KvStore, MemorySlots, SESSION_TIME_KEY};
    use rollcall_core::rules::SessionState;

    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn first_check_is_fresh_then_active() {
        let slots = MemorySlots::new();
        let session = SessionRepo::new(&slots);

        let first = session.check_and_touch(NOW, 300).expect("check");
        assert_eq!(first.state, SessionState::Fresh);
        assert!(first.previous_activity_ms.is_none());

        let second = session.check_and_touch(NOW + 1_000, 300).expect("check");
        assert_eq!(second.state, SessionState::Active);
        assert_eq!(second.previous_activity_ms, Some(NOW));
    }

    #[test]
    fn idle_past_timeout_expires_and_restarts() {
        let slots = MemorySlots::new();
        let session = SessionRepo::new(&slots);
        session.touch(NOW).expect("touch");

        let later = NOW + 301_000;
        let check = session.check_and_touch(later, 300).expect("check");
        assert_eq!(check.state, SessionState::Expired);
        assert_eq!(session.last_activity().expect("last"), Some(later));
        assert_eq!(
            session.check(later + 1, 300).expect("check"),
            SessionState::Active
        );
    }

    #[test]
    fn garbage_timestamp_counts_as_missing() {
        let slots = MemorySlots::new();
        slots.set(SESSION_TIME_KEY, "not-a-number").expect("set");
        let session = SessionRepo::new(&slots);
        assert_eq!(session.check(NOW, 300).expect("check"), SessionState::Fresh);
    }
}

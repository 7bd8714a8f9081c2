use chrono::{DateTime, Duration, Utc};

use super::StoredRating;

const MAX_RATING_AGE_DAYS: i64 = 30;

/// Decides whether a freshly computed rating should overwrite the stored one.
/// The fresh rating is always returned to the caller either way; only the
/// write is gated.
#[derive(Debug, Clone)]
pub struct RefreshPolicy {
    max_age: Duration,
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self {
            max_age: Duration::days(MAX_RATING_AGE_DAYS),
        }
    }
}

impl RefreshPolicy {
    pub fn new(max_age: Duration) -> Self {
        Self { max_age }
    }

    pub fn decide(
        &self,
        stored: Option<&StoredRating>,
        now: DateTime<Utc>,
        force: bool,
    ) -> RefreshDecision {
        if force {
            return RefreshDecision::Refresh(RefreshReason::Forced);
        }

        let stored = match stored {
            Some(stored) => stored,
            None => return RefreshDecision::Refresh(RefreshReason::NeverComputed),
        };

        if stored.components.is_empty() {
            return RefreshDecision::Refresh(RefreshReason::MissingComponents);
        }

        if now.signed_duration_since(stored.computed_at) > self.max_age {
            return RefreshDecision::Refresh(RefreshReason::Stale);
        }

        RefreshDecision::Keep
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshDecision {
    Refresh(RefreshReason),
    Keep,
}

impl RefreshDecision {
    pub const fn should_persist(self) -> bool {
        matches!(self, RefreshDecision::Refresh(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshReason {
    Forced,
    NeverComputed,
    MissingComponents,
    Stale,
}

impl RefreshReason {
    pub const fn label(self) -> &'static str {
        match self {
            RefreshReason::Forced => "forced",
            RefreshReason::NeverComputed => "never computed",
            RefreshReason::MissingComponents => "missing components",
            RefreshReason::Stale => "stale",
        }
    }
}

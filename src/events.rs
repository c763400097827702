use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::ids::{Isbn, UserId};

/// A change in who holds a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(tag = "event", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum LoanEvent {
    /// The user took the book off the shelf
    Borrowed {
        /// Borrowing user
        user_id: UserId,
        /// Book taken
        isbn: Isbn,
    },
    /// The user brought the book back
    Returned {
        /// Returning user
        user_id: UserId,
        /// Book returned
        isbn: Isbn,
    },
    /// The loan ended because the holder or the book was removed from the catalog
    Released {
        /// Holder of the book
        user_id: UserId,
        /// Book released
        isbn: Isbn,
    },
}

impl LoanEvent {
    /// Book the event concerns
    #[must_use]
    pub fn isbn(&self) -> Isbn {
        match *self {
            Self::Borrowed { isbn, .. }
            | Self::Returned { isbn, .. }
            | Self::Released { isbn, .. } => isbn,
        }
    }

    /// User the event concerns
    #[must_use]
    pub fn user_id(&self) -> UserId {
        match *self {
            Self::Borrowed { user_id, .. }
            | Self::Returned { user_id, .. }
            | Self::Released { user_id, .. } => user_id,
        }
    }
}

/// Wall-clock time of a recorded event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
pub struct TimeStamp {
    /// Seconds since Unix epoch
    pub seconds: u64,
    /// Nanoseconds part
    pub nanos: u32,
}

impl TimeStamp {
    /// The current system time; clocks set before the epoch read as zero
    #[must_use]
    pub fn now() -> Self {
        let duration = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
        Self { seconds: duration.as_secs(), nanos: duration.subsec_nanos() }
    }
}

/// One entry of the library's loan history
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRecord {
    /// What happened
    pub event: LoanEvent,
    /// When it happened
    pub at: TimeStamp,
}

impl LoanRecord {
    /// Record `event` as happening now
    #[must_use]
    pub fn now(event: LoanEvent) -> Self {
        Self { event, at: TimeStamp::now() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_cover_every_variant() {
        let events = [
            LoanEvent::Borrowed { user_id: UserId(1), isbn: Isbn(10) },
            LoanEvent::Returned { user_id: UserId(1), isbn: Isbn(10) },
            LoanEvent::Released { user_id: UserId(1), isbn: Isbn(10) },
        ];
        assert!(events.iter().all(|e| e.user_id() == UserId(1) && e.isbn() == Isbn(10)));
    }

    #[test]
    fn events_serialize_with_a_tag() {
        let json = serde_json::to_value(LoanEvent::Returned { user_id: UserId(2), isbn: Isbn(7) })
            .unwrap_or_default();
        assert_eq!(json, serde_json::json!({"event": "returned", "userId": 2, "isbn": 7}));
    }

    #[test]
    fn timestamps_are_after_the_epoch() {
        let record = LoanRecord::now(LoanEvent::Borrowed { user_id: UserId(1), isbn: Isbn(1) });
        assert!(record.at.seconds > 0);
    }
}

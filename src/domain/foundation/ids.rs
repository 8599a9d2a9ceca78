//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

uuid_id! {
    /// Unique identifier for a platform user.
    UserId
}

uuid_id! {
    /// Unique identifier for a flashcard.
    FlashcardId
}

uuid_id! {
    /// Unique identifier for a course track.
    TrackId
}

uuid_id! {
    /// Unique identifier for a lesson within a track.
    LessonId
}

uuid_id! {
    /// Unique identifier for an enrollment grant.
    EnrollmentId
}

uuid_id! {
    /// Unique identifier for a payment record.
    PaymentId
}

uuid_id! {
    /// Unique identifier for a subscription plan.
    PlanId
}

uuid_id! {
    /// Unique identifier for a forum thread.
    ThreadId
}

uuid_id! {
    /// Unique identifier for a forum post.
    PostId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_generates_unique_values() {
        let id1 = UserId::new();
        let id2 = UserId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn flashcard_id_parses_from_valid_string() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: FlashcardId = uuid_str.parse().unwrap();
        assert_eq!(id.to_string(), uuid_str);
    }

    #[test]
    fn track_id_from_uuid_preserves_value() {
        let uuid = Uuid::new_v4();
        let id = TrackId::from_uuid(uuid);
        assert_eq!(id.as_uuid(), &uuid);
    }

    #[test]
    fn payment_id_serializes_to_json() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: PaymentId = uuid_str.parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid_str));
    }

    #[test]
    fn thread_id_rejects_malformed_string() {
        let result: Result<ThreadId, _> = "not-a-uuid".parse();
        assert!(result.is_err());
    }
}

//! Identifier types for the lessonly engine.
//!
//! Entities that live in the remote content store (courses, students,
//! invoices, users) carry opaque string identifiers assigned by the store.
//! The `entity_id_type!` macro generates a newtype wrapper per entity so the
//! ids cannot be mixed up at call sites.
//!
//! The one locally-generated identifier is [`BookingId`]: a UUID minted per
//! booking attempt and sent along with invoice creation as an idempotency
//! key.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to define an opaque string identifier with standard trait
/// implementations: `Clone`, `PartialEq`, `Eq`, `Hash`, `Serialize`,
/// `Deserialize` (transparent string), `Display`, `From<&str>/String`.
macro_rules! entity_id_type {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw id value from the content store.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// The raw id value as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

entity_id_type!(CourseId, "A course identifier assigned by the content store.");
entity_id_type!(StudentId, "A dependent-learner identifier assigned by the content store.");
entity_id_type!(InvoiceId, "An invoice identifier assigned by the content store.");
entity_id_type!(UserId, "A user (account owner) identifier.");

/// A booking-attempt identifier.
///
/// Generated locally when a booking session starts and attached to the
/// invoice-creation request, so a retried confirmation that already reached
/// the server cannot create a second invoice for the same intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(uuid::Uuid);

impl BookingId {
    /// Generate a fresh booking id.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// The underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_id_display_roundtrip() {
        let id = CourseId::new("course-42");
        assert_eq!(id.to_string(), "course-42");
        assert_eq!(id.as_str(), "course-42");
    }

    #[test]
    fn entity_id_serde_is_transparent() {
        let id = InvoiceId::new("inv_9");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"inv_9\"");
        let parsed: InvoiceId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn booking_ids_are_unique() {
        let a = BookingId::generate();
        let b = BookingId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn booking_id_serde_json() {
        let id = BookingId::generate();
        let json = serde_json::to_string(&id).unwrap();
        let parsed: BookingId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}

//! Numeric identifier newtypes for the domain aggregates.
//!
//! Identifiers are assigned by the persistence adapters and are stable for
//! the lifetime of the record. The wire format is a plain integer.

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            serde::Serialize,
            serde::Deserialize,
            utoipa::ToSchema,
        )]
        #[serde(transparent)]
        #[schema(value_type = i64)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw identifier value.
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// The raw identifier value.
            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

define_id! {
    /// Identifier of a registered user.
    UserId
}

define_id! {
    /// Identifier of a shareable item.
    ItemId
}

define_id! {
    /// Identifier of a booking.
    BookingId
}

define_id! {
    /// Identifier of an item request.
    RequestId
}

define_id! {
    /// Identifier of a comment left on an item.
    CommentId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialise_as_plain_integers() {
        let id = BookingId::new(42);
        assert_eq!(serde_json::to_string(&id).expect("serialise"), "42");
        let back: BookingId = serde_json::from_str("42").expect("deserialise");
        assert_eq!(back, id);
    }

    #[test]
    fn display_matches_raw_value() {
        assert_eq!(UserId::new(7).to_string(), "7");
    }
}

//! Strongly-typed ID wrappers for all entity types
//!
//! Identifiers are plain positive integers on the wire, derived from the
//! creation time in milliseconds. Each collection gets its own newtype so a
//! member id can never be passed where an EMI id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw identifier
            pub const fn from_raw(raw: i64) -> Self {
                Self(raw)
            }

            /// Get the underlying integer
            pub const fn as_i64(&self) -> i64 {
                self.0
            }

            /// Parse an ID from a string
            pub fn parse(s: &str) -> Result<Self, ParseIntError> {
                s.trim().parse().map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

define_id!(UserId);
define_id!(MemberId);
define_id!(EmiId);
define_id!(ExpenseId);

/// Pick the next identifier for a collection.
///
/// Uses the current Unix time in milliseconds, bumped past `max_existing` so
/// two records created within the same millisecond still differ. Returns
/// `None` once `max_existing` is `i64::MAX`.
pub fn next_raw_id(max_existing: Option<i64>) -> Option<i64> {
    let now = chrono::Utc::now().timestamp_millis();
    match max_existing {
        Some(max) if max >= now => max.checked_add(1),
        _ => Some(now),
    }
}

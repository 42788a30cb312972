//! Serde helpers for update payloads

use serde::{Deserialize, Deserializer};

/// Distinguish an absent field from an explicit `null`
///
/// Use with `#[serde(default, deserialize_with = "...")]`: a missing key stays
/// `None` (keep the current value), `null` becomes `Some(None)` (clear it) and
/// a value becomes `Some(Some(v))`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

//! Serde helpers for partial updates.
//!
//! A patch field is `Option<Option<T>>`: `None` leaves the field untouched,
//! `Some(None)` clears it (explicit JSON `null`), `Some(Some(v))` sets it.

use serde::{Deserialize, Deserializer};

/// Deserialize a present field (even `null`) as `Some(..)`. Pair with
/// `#[serde(default)]` so an absent field stays `None`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// SPDX-FileCopyrightText: 2026 Ninebot Checkin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lenient deserializers for string fields.
//!
//! TOML allows `auto_copy = 1` or an all-digit key written as a number.
//! These fields are always strings to us.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Str(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
}

impl From<Scalar> for String {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Str(s) => s,
            Scalar::Int(n) => n.to_string(),
            Scalar::UInt(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

/// Deserializes an optional scalar into `Option<String>`.
///
/// Empty strings become `None` so that `BARK_KEY=` disables the channel.
pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(value.map(String::from).filter(|s| !s.trim().is_empty()))
}

/// Deserializes a scalar into `String`, using `fallback` when it is blank.
///
/// `[bark] url = ""` means "use the default server", not "no server".
pub fn string_or<'de, D>(deserializer: D, fallback: fn() -> String) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::from(Scalar::deserialize(deserializer)?);
    if value.trim().is_empty() {
        Ok(fallback())
    } else {
        Ok(value)
    }
}

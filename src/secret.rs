//! Sensitive string values.
//!
//! [`SecretString`] carries credentials such as SCIM passwords and OIDC
//! client secrets. It never prints its contents, is zeroized on drop, and
//! must be exposed explicitly. On the wire it serializes to the plain value
//! because the remote API needs it.
//!
//! Persisted state never holds those values. Fields declared as concealed
//! are replaced by a redaction marker: a JSON object of the form
//! `{"redacted": "<sha256 hex>", "salt": "<hex>"}`. Each marker gets its own
//! random salt, so equal secrets in different markers have different digests.
//! A configured value is compared by concealing it with the salt of the
//! marker it is compared against. Being an object, the marker cannot be
//! mistaken for any string a user might legitimately configure.

use std::fmt;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use rand::RngCore;
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

/// Placeholder used by Debug and Display.
pub const REDACTED: &str = "[REDACTED]";

/// Key of the redaction marker object.
pub const MARKER_KEY: &str = "redacted";

/// Key holding the marker's salt.
pub const SALT_KEY: &str = "salt";

const SALT_LEN: usize = 16;

/// A string that must not leak into logs or persisted state.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct SecretString {
    inner: String,
}

impl SecretString {
    pub fn new(inner: impl Into<String>) -> Self {
        Self {
            inner: inner.into(),
        }
    }

    /// Explicitly access the inner value.
    pub fn expose(&self) -> &str {
        &self.inner
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Clone for SecretString {
    fn clone(&self) -> Self {
        Self::new(self.inner.clone())
    }
}

impl PartialEq for SecretString {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for SecretString {}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SecretString").field(&REDACTED).finish()
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl Serialize for SecretString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.inner)
    }
}

impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SecretVisitor;

        impl<'de> Visitor<'de> for SecretVisitor {
            type Value = SecretString;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a secret string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(SecretString::new(v))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
                Ok(SecretString::new(v))
            }

            fn visit_map<A: MapAccess<'de>>(self, _map: A) -> Result<Self::Value, A::Error> {
                Err(de::Error::custom(
                    "value is redacted in state; supply it from configuration",
                ))
            }
        }

        deserializer.deserialize_any(SecretVisitor)
    }
}

/// Build the redaction marker for a sensitive value under a fresh salt.
pub fn conceal(value: &str) -> Value {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    conceal_with_salt(value, &hex::encode(salt))
}

/// Build the redaction marker for a sensitive value under `salt`.
pub fn conceal_with_salt(value: &str, salt: &str) -> Value {
    let digest = Sha256::new()
        .chain_update(salt.as_bytes())
        .chain_update(value.as_bytes())
        .finalize();
    let mut marker = Map::new();
    marker.insert(MARKER_KEY.to_string(), Value::String(hex::encode(digest)));
    marker.insert(SALT_KEY.to_string(), Value::String(salt.to_string()));
    Value::Object(marker)
}

/// Salt of a redaction marker.
pub fn marker_salt(value: &Value) -> Option<&str> {
    if !is_concealed(value) {
        return None;
    }
    value.get(SALT_KEY).and_then(Value::as_str)
}

/// Whether a value is a redaction marker.
pub fn is_concealed(value: &Value) -> bool {
    match value {
        Value::Object(map) => {
            map.get(MARKER_KEY).is_some_and(Value::is_string)
                && map.keys().all(|k| k == MARKER_KEY || k == SALT_KEY)
                && map.get(SALT_KEY).is_none_or(Value::is_string)
        }
        _ => false,
    }
}

//! User record DTOs
//!
//! The upstream API owns the shape of a user record. Apart from `id`, its
//! fields are carried through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier of a user record, as used in upstream paths and cache keys.
pub type UserId = i64;

/// A user record as received from or sent to the upstream API.
///
/// Stored as a JSON object so that fields this service does not know about
/// survive a round-trip through the cache unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserRecord(Map<String, Value>);

impl UserRecord {
    /// Wraps an existing JSON object.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Parses a record from a JSON body.
    ///
    /// Returns None if the body is empty or not a JSON object.
    pub fn from_slice(body: &[u8]) -> Option<Self> {
        match serde_json::from_slice::<Value>(body).ok()? {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    // == Id ==
    /// Returns the record's `id`, if one is present and usable.
    ///
    /// Accepts both `"id": 7` and `"id": "7"`; the upstream echoes ids of
    /// newly created records as strings.
    pub fn id(&self) -> Option<UserId> {
        match self.0.get("id")? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Returns a field by name.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Returns the underlying JSON object.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for UserRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Envelope returned by `GET /api/users/{id}`.
///
/// Other top-level keys (`support`, ...) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct UserEnvelope {
    #[serde(default)]
    pub data: Option<UserRecord>,
}

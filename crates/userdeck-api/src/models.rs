// Provider response types
//
// The directory endpoint returns a bare JSON array of user objects with
// Spanish field names. Fields use `#[serde(default)]` liberally because the
// provider is a loosely-typed JSON service: any text field may be missing
// or `null`, ids may be numbers or strings, and `intereses` may be a single
// string or a list of strings.

use std::fmt;

use serde::{Deserialize, Serialize};

// ── Identifiers ──────────────────────────────────────────────────────

/// Record identifier as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

// ── Interests ────────────────────────────────────────────────────────

/// The `intereses` field: free text or a list of tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawInterests {
    Text(String),
    List(Vec<String>),
}

// ── User ─────────────────────────────────────────────────────────────

/// One user object from `GET /usuarios`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: RawId,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub apellidos: Option<String>,
    #[serde(default)]
    pub perfil: Option<String>,
    #[serde(default)]
    pub intereses: Option<RawInterests>,
    #[serde(default)]
    pub correo: Option<String>,
    #[serde(default)]
    pub foto: Option<String>,
    /// Catch-all for fields the browser does not use.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

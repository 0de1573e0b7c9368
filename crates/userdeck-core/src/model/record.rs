// ── Record domain types ──
//
// A Record is one user profile from the directory provider. Records are
// immutable once built and shared as `Arc<Record>` between the dataset,
// the filtered view, the current page, and the selection.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ── RecordId ────────────────────────────────────────────────────────

/// Identifier of a record, unique within one load cycle.
///
/// The provider emits either numeric or string ids; consumers compare
/// and display them without caring which.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Numeric(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl FromStr for RecordId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        Self::Numeric(n)
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        match s.parse::<i64>() {
            Ok(n) => Self::Numeric(n),
            Err(_) => Self::Text(s),
        }
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self::from(s.to_owned())
    }
}

// ── Interests ───────────────────────────────────────────────────────

/// Free-text interests or a list of interest tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Interests {
    Text(String),
    List(Vec<String>),
}

impl Interests {
    /// Textual form used for matching and display. Lists are joined with
    /// `,` and no spaces, the same way the provider's clients coerce arrays.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(s) => Cow::Borrowed(s),
            Self::List(items) => Cow::Owned(items.join(",")),
        }
    }
}

impl Default for Interests {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl fmt::Display for Interests {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

// ── Record ──────────────────────────────────────────────────────────

/// The canonical user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    pub surname: String,
    pub profile: String,
    pub interests: Interests,
    pub email: String,
    pub photo_url: String,
}

impl Record {
    /// Minimal record with only an id and a name; the rest empty.
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            surname: String::new(),
            profile: String::new(),
            interests: Interests::default(),
            email: String::new(),
            photo_url: String::new(),
        }
    }

    /// `"name surname"`, or whichever half is present.
    pub fn full_name(&self) -> String {
        match (self.name.is_empty(), self.surname.is_empty()) {
            (false, false) => format!("{} {}", self.name, self.surname),
            (false, true) => self.name.clone(),
            (true, _) => self.surname.clone(),
        }
    }

    /// The searchable fields, in match order.
    pub fn search_fields(&self) -> [Cow<'_, str>; 5] {
        [
            Cow::Borrowed(self.name.as_str()),
            Cow::Borrowed(self.surname.as_str()),
            Cow::Borrowed(self.profile.as_str()),
            self.interests.as_text(),
            Cow::Borrowed(self.email.as_str()),
        ]
    }

    /// Whether any searchable field contains `needle` case-insensitively.
    ///
    /// `needle` must already be trimmed and lower-cased.
    pub fn matches(&self, needle: &str) -> bool {
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_parses_numeric_strings() {
        assert_eq!(RecordId::from("42"), RecordId::Numeric(42));
        assert_eq!(RecordId::from("u-42"), RecordId::Text("u-42".into()));
        assert_eq!(RecordId::Numeric(42).to_string(), "42");
    }

    #[test]
    fn interests_list_joins_without_spaces_for_matching() {
        let list = Interests::List(vec!["cine".into(), "rust".into()]);
        assert_eq!(list.as_text(), "cine,rust");
        assert_eq!(list.to_string(), "cine, rust");
    }

    #[test]
    fn full_name_handles_missing_halves() {
        let mut r = Record::new(1, "Ana");
        assert_eq!(r.full_name(), "Ana");
        r.surname = "García".into();
        assert_eq!(r.full_name(), "Ana García");
        r.name.clear();
        assert_eq!(r.full_name(), "García");
    }

    #[test]
    fn matches_any_field_case_insensitively() {
        let r = Record {
            email: "Ana.Garcia@Example.com".into(),
            interests: Interests::List(vec!["Ajedrez".into()]),
            ..Record::new(1, "Ana")
        };
        assert!(r.matches("example.com"));
        assert!(r.matches("ajedrez"));
        assert!(!r.matches("beto"));
    }

    #[test]
    fn matches_across_list_separator() {
        let r = Record {
            interests: Interests::List(vec!["cine".into(), "rust".into()]),
            ..Record::new(1, "Ana")
        };
        assert!(r.matches("cine,rust"));
        assert!(!r.matches("cine, rust"));
    }

    #[test]
    fn id_is_not_searchable() {
        let r = Record::new(12345, "Ana");
        assert!(!r.matches("12345"));
    }
}

// ── API → domain conversion ──
//
// Maps the provider's Spanish wire fields onto `Record`. Missing and
// `null` text fields become empty strings so every record has the same
// searchable shape.

use userdeck_api::{RawId, RawInterests, UserRecord};

use crate::model::{Interests, Record, RecordId};

impl From<RawId> for RecordId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Number(n) => RecordId::Numeric(n),
            RawId::Text(s) => RecordId::Text(s),
        }
    }
}

impl From<RawInterests> for Interests {
    fn from(raw: RawInterests) -> Self {
        match raw {
            RawInterests::Text(s) => Interests::Text(s),
            RawInterests::List(items) => Interests::List(items),
        }
    }
}

impl From<UserRecord> for Record {
    fn from(u: UserRecord) -> Self {
        Record {
            id: u.id.into(),
            name: u.nombre.unwrap_or_default(),
            surname: u.apellidos.unwrap_or_default(),
            profile: u.perfil.unwrap_or_default(),
            interests: u.intereses.map(Interests::from).unwrap_or_default(),
            email: u.correo.unwrap_or_default(),
            photo_url: u.foto.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn full_user_converts() {
        let raw: UserRecord = serde_json::from_value(json!({
            "id": 3,
            "nombre": "Ana",
            "apellidos": "García",
            "perfil": "Diseñadora",
            "intereses": ["cine", "viajes"],
            "correo": "ana@example.com",
            "foto": "https://example.com/ana.jpg"
        }))
        .unwrap();

        let record = Record::from(raw);

        assert_eq!(
            record,
            Record {
                id: RecordId::Numeric(3),
                name: "Ana".into(),
                surname: "García".into(),
                profile: "Diseñadora".into(),
                interests: Interests::List(vec!["cine".into(), "viajes".into()]),
                email: "ana@example.com".into(),
                photo_url: "https://example.com/ana.jpg".into(),
            }
        );
    }

    #[test]
    fn sparse_user_gets_empty_fields() {
        let raw: UserRecord =
            serde_json::from_value(json!({ "id": "x1", "perfil": null })).unwrap();
        let record = Record::from(raw);
        assert_eq!(record.id, RecordId::Text("x1".into()));
        assert!(record.profile.is_empty());
        assert_eq!(record.interests, Interests::Text(String::new()));
    }
}

//! Normalizer for employee directory records.

use search_connector_shared::{Envelope, SourceSlug};
use serde_json::Value;
use tracing::debug;

use crate::processor::{identifier, Normalizer};

/// Contact fields joined into the display name, in order.
const NAME_FIELDS: [&str; 3] = ["voornaam", "voorvoegselAchternaam", "achternaam"];

/// Data fields joined into the meta summary, in order.
const META_FIELDS: [&str; 3] = ["functie", "afdeling", "skills"];

/// Maps an employee object (`{record: {data}}`) to an envelope.
///
/// - id: `<slug>_<data.id>`
/// - title: first name, surname prefix and surname, joined by single spaces
/// - meta summary: function, department and skills, joined the same way
#[derive(Debug, Clone)]
pub struct EmployeeNormalizer {
    slug: SourceSlug,
}

impl EmployeeNormalizer {
    pub fn new(slug: SourceSlug) -> Self {
        Self { slug }
    }
}

impl Normalizer for EmployeeNormalizer {
    fn normalize(&self, raw: &Value) -> Option<Envelope> {
        let data = raw
            .get("record")
            .and_then(|record| record.get("data"))
            .filter(|data| data.is_object())?;

        let Some(id) = identifier(data, "id") else {
            debug!(source = %self.slug, "Employee without id");
            return None;
        };

        let title = data
            .get("contact")
            .and_then(|contact| join_fields(contact, &NAME_FIELDS));
        let meta = join_fields(data, &META_FIELDS);

        Envelope::new(self.slug.document_id(&id), data.clone())
            .ok()
            .map(|envelope| envelope.with_title(title).with_meta_summary(meta))
    }
}

/// Join the non-blank parts of `fields` with a single space.
///
/// String fields contribute their trimmed value; array fields contribute
/// their non-blank string elements. Anything else is ignored.
fn join_fields(value: &Value, fields: &[&str]) -> Option<String> {
    let mut parts: Vec<&str> = Vec::new();
    for field in fields {
        match value.get(*field) {
            Some(Value::String(s)) => parts.push(s.trim()),
            Some(Value::Array(items)) => {
                parts.extend(items.iter().filter_map(Value::as_str).map(str::trim))
            }
            _ => {}
        }
    }
    parts.retain(|part| !part.is_empty());

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalizer() -> EmployeeNormalizer {
        EmployeeNormalizer::new(SourceSlug::new("smoelenboek").unwrap())
    }

    fn employee(data: Value) -> Value {
        json!({"uuid": "ignored", "record": {"data": data}})
    }

    #[test]
    fn test_blank_middle_name_part_is_dropped() {
        let raw = employee(json!({
            "id": "42",
            "contact": {"voornaam": "Jan", "voorvoegselAchternaam": "", "achternaam": "Jansen"}
        }));

        let envelope = normalizer().normalize(&raw).unwrap();
        assert_eq!(envelope.id(), "smoelenboek_42");
        assert_eq!(envelope.title(), Some("Jan Jansen"));
    }

    #[test]
    fn test_full_name_and_meta() {
        let raw = employee(json!({
            "id": 7,
            "contact": {"voornaam": " Anna ", "voorvoegselAchternaam": "van", "achternaam": "Dijk"},
            "functie": "Adviseur",
            "afdeling": "Burgerzaken",
            "skills": ["Rust", " ", "Zaakgericht werken"]
        }));

        let envelope = normalizer().normalize(&raw).unwrap();
        assert_eq!(envelope.id(), "smoelenboek_7");
        assert_eq!(envelope.title(), Some("Anna van Dijk"));
        assert_eq!(
            envelope.meta_summary(),
            Some("Adviseur Burgerzaken Rust Zaakgericht werken")
        );
        assert_eq!(envelope.payload()["afdeling"], "Burgerzaken");
    }

    #[test]
    fn test_missing_contact_and_meta() {
        let envelope = normalizer()
            .normalize(&employee(json!({"id": "1"})))
            .unwrap();
        assert_eq!(envelope.title(), None);
        assert_eq!(envelope.meta_summary(), None);
    }

    #[test]
    fn test_missing_id_is_skipped() {
        let normalizer = normalizer();
        assert!(normalizer
            .normalize(&employee(json!({"contact": {"voornaam": "Jan"}})))
            .is_none());
        assert!(normalizer.normalize(&employee(json!({"id": "  "}))).is_none());
        assert!(normalizer.normalize(&json!({"record": {}})).is_none());
    }
}

use crate::error::ImportError;
use crate::schema::{field_by_name, FieldKey, TARGET_FIELDS};

/// Operator-chosen correspondence between target fields and source columns.
/// Each target field maps to at most one column.
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    entries: Vec<(FieldKey, usize)>,
}

impl Mapping {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn column_for(&self, key: FieldKey) -> Option<usize> {
        self.entries
            .iter()
            .find(|(entry_key, _)| *entry_key == key)
            .map(|(_, column)| *column)
    }

    pub fn entries(&self) -> impl Iterator<Item = (FieldKey, usize)> + '_ {
        self.entries.iter().copied()
    }

    /// Pairs of (target field label or name, source column header).
    pub fn resolve(pairs: &[(String, String)], headers: &[String]) -> Result<Self, ImportError> {
        let mut mapping = Mapping::default();
        for (field_raw, column_raw) in pairs {
            let field = field_by_name(field_raw).ok_or_else(|| {
                ImportError::Validation(format!("unknown import field: {field_raw}"))
            })?;
            let column = header_index(headers, column_raw).ok_or_else(|| {
                ImportError::Validation(format!("column not found in file: {column_raw}"))
            })?;
            if mapping.column_for(field.key).is_some() {
                return Err(ImportError::Validation(format!(
                    "field mapped twice: {}",
                    field.label
                )));
            }
            mapping.entries.push((field.key, column));
        }
        Ok(mapping)
    }

    /// Matches source headers against target labels and names, case
    /// insensitively. Template files map completely.
    pub fn auto(headers: &[String]) -> Self {
        let mut mapping = Mapping::default();
        for field in TARGET_FIELDS {
            if mapping.column_for(field.key).is_some() {
                continue;
            }
            if let Some(index) = headers.iter().position(|header| {
                let header = header.trim();
                header.eq_ignore_ascii_case(field.label) || header.eq_ignore_ascii_case(field.name)
            }) {
                mapping.entries.push((field.key, index));
            }
        }
        mapping
    }
}

fn header_index(headers: &[String], wanted: &str) -> Option<usize> {
    let wanted = wanted.trim();
    headers
        .iter()
        .position(|header| header.trim().eq_ignore_ascii_case(wanted))
}

#[cfg(test)]
mod tests {
    use super::Mapping;
    use crate::error::ImportError;
    use crate::schema::{template_csv, FieldKey, TARGET_FIELDS};

    fn headers(raw: &str) -> Vec<String> {
        raw.split(',').map(str::to_string).collect()
    }

    #[test]
    fn auto_maps_the_template_completely() {
        let template = template_csv();
        let headers = headers(template.trim_end());
        let mapping = Mapping::auto(&headers);
        assert_eq!(mapping.len(), TARGET_FIELDS.len());
        assert_eq!(mapping.column_for(FieldKey::Fname), Some(0));
        assert_eq!(mapping.column_for(FieldKey::Status), Some(24));
    }

    #[test]
    fn auto_skips_unrecognized_headers() {
        let headers = headers("Email,Mystery Column,Score");
        let mapping = Mapping::auto(&headers);
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.column_for(FieldKey::Email), Some(0));
        assert_eq!(mapping.column_for(FieldKey::Score), Some(2));
    }

    #[test]
    fn resolve_accepts_labels_and_names() {
        let headers = headers("contact_email,points");
        let pairs = vec![
            ("Email".to_string(), "contact_email".to_string()),
            ("score".to_string(), "points".to_string()),
        ];
        let mapping = Mapping::resolve(&pairs, &headers).expect("resolve");
        assert_eq!(mapping.column_for(FieldKey::Email), Some(0));
        assert_eq!(mapping.column_for(FieldKey::Score), Some(1));
    }

    #[test]
    fn resolve_rejects_unknown_field_and_column() {
        let headers = headers("a,b");
        let err = Mapping::resolve(&[("Nope".to_string(), "a".to_string())], &headers).unwrap_err();
        assert!(matches!(err, ImportError::Validation(_)));

        let err =
            Mapping::resolve(&[("Email".to_string(), "missing".to_string())], &headers).unwrap_err();
        assert!(matches!(err, ImportError::Validation(_)));
    }

    #[test]
    fn resolve_rejects_double_mapping() {
        let headers = headers("a,b");
        let pairs = vec![
            ("Email".to_string(), "a".to_string()),
            ("email".to_string(), "b".to_string()),
        ];
        let err = Mapping::resolve(&pairs, &headers).unwrap_err();
        assert!(matches!(err, ImportError::Validation(_)));
    }
}

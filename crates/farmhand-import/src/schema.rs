/// The fixed, ordered target schema for buyer imports. Labels double as the
/// downloadable template header row; `name` is the flag-friendly spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    Fname,
    Lname,
    Email,
    Phone,
    Phone2,
    Phone3,
    Company,
    Score,
    Notes,
    MailingAddress,
    MailingCity,
    MailingState,
    MailingZip,
    Locations,
    Tags,
    Vetted,
    Vip,
    CanReceiveSms,
    CanReceiveEmail,
    PropertyType,
    BudgetMin,
    BudgetMax,
    Timeline,
    Source,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Bool,
    Number,
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetField {
    pub key: FieldKey,
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

pub const TARGET_FIELDS: &[TargetField] = &[
    TargetField { key: FieldKey::Fname, name: "fname", label: "First Name", kind: FieldKind::Text },
    TargetField { key: FieldKey::Lname, name: "lname", label: "Last Name", kind: FieldKind::Text },
    TargetField { key: FieldKey::Email, name: "email", label: "Email", kind: FieldKind::Text },
    TargetField { key: FieldKey::Phone, name: "phone", label: "Phone 1", kind: FieldKind::Text },
    TargetField { key: FieldKey::Phone2, name: "phone2", label: "Phone 2", kind: FieldKind::Text },
    TargetField { key: FieldKey::Phone3, name: "phone3", label: "Phone 3", kind: FieldKind::Text },
    TargetField { key: FieldKey::Company, name: "company", label: "Company", kind: FieldKind::Text },
    TargetField { key: FieldKey::Score, name: "score", label: "Score", kind: FieldKind::Number },
    TargetField { key: FieldKey::Notes, name: "notes", label: "Notes", kind: FieldKind::Text },
    TargetField { key: FieldKey::MailingAddress, name: "mailing_address", label: "Mailing Address", kind: FieldKind::Text },
    TargetField { key: FieldKey::MailingCity, name: "mailing_city", label: "Mailing City", kind: FieldKind::Text },
    TargetField { key: FieldKey::MailingState, name: "mailing_state", label: "Mailing State", kind: FieldKind::Text },
    TargetField { key: FieldKey::MailingZip, name: "mailing_zip", label: "Mailing Zip", kind: FieldKind::Text },
    TargetField { key: FieldKey::Locations, name: "locations", label: "Geotag/Locations", kind: FieldKind::List },
    TargetField { key: FieldKey::Tags, name: "tags", label: "Tags", kind: FieldKind::List },
    TargetField { key: FieldKey::Vetted, name: "vetted", label: "Is Vetted?", kind: FieldKind::Bool },
    TargetField { key: FieldKey::Vip, name: "vip", label: "Is VIP?", kind: FieldKind::Bool },
    TargetField { key: FieldKey::CanReceiveSms, name: "can_receive_sms", label: "Can Receive Text?", kind: FieldKind::Bool },
    TargetField { key: FieldKey::CanReceiveEmail, name: "can_receive_email", label: "Can Receive Email?", kind: FieldKind::Bool },
    TargetField { key: FieldKey::PropertyType, name: "property_type", label: "Property Types", kind: FieldKind::List },
    TargetField { key: FieldKey::BudgetMin, name: "budget_min", label: "Budget Min", kind: FieldKind::Number },
    TargetField { key: FieldKey::BudgetMax, name: "budget_max", label: "Budget Max", kind: FieldKind::Number },
    TargetField { key: FieldKey::Timeline, name: "timeline", label: "Timeline", kind: FieldKind::Text },
    TargetField { key: FieldKey::Source, name: "source", label: "Source", kind: FieldKind::Text },
    TargetField { key: FieldKey::Status, name: "status", label: "Status", kind: FieldKind::Text },
];

pub fn field_by_key(key: FieldKey) -> &'static TargetField {
    TARGET_FIELDS
        .iter()
        .find(|field| field.key == key)
        .expect("every key is listed")
}

/// Case-insensitive match against the display label or the flag name.
pub fn field_by_name(raw: &str) -> Option<&'static TargetField> {
    let trimmed = raw.trim();
    TARGET_FIELDS.iter().find(|field| {
        field.label.eq_ignore_ascii_case(trimmed) || field.name.eq_ignore_ascii_case(trimmed)
    })
}

/// Template: exactly the target labels as a header row, no data rows.
pub fn template_csv() -> String {
    let labels: Vec<&str> = TARGET_FIELDS.iter().map(|field| field.label).collect();
    let mut out = labels.join(",");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::{field_by_name, template_csv, FieldKey, FieldKind, TARGET_FIELDS};

    #[test]
    fn schema_is_complete_and_ordered() {
        assert_eq!(TARGET_FIELDS.len(), 25);
        assert_eq!(TARGET_FIELDS[0].label, "First Name");
        assert_eq!(TARGET_FIELDS[TARGET_FIELDS.len() - 1].label, "Status");
    }

    #[test]
    fn lookups_accept_label_and_name() {
        assert_eq!(field_by_name("Is VIP?").unwrap().key, FieldKey::Vip);
        assert_eq!(field_by_name("vip").unwrap().key, FieldKey::Vip);
        assert_eq!(field_by_name(" score ").unwrap().kind, FieldKind::Number);
        assert!(field_by_name("unknown").is_none());
    }

    #[test]
    fn template_is_labels_only() {
        let template = template_csv();
        let mut lines = template.lines();
        let header = lines.next().expect("header row");
        assert!(header.starts_with("First Name,Last Name,Email,Phone 1"));
        assert!(header.ends_with("Timeline,Source,Status"));
        assert_eq!(lines.next(), None);
    }
}

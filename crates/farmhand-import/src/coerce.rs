use crate::record::BuyerDraft;
use crate::schema::{FieldKey, TargetField};

const TRUTHY: [&str; 6] = ["yes", "true", "1", "y", "t", "on"];

/// Anything outside the accepted vocabulary, including empty, is false.
pub fn parse_bool(raw: &str) -> bool {
    TRUTHY.contains(&raw.trim().to_lowercase().as_str())
}

/// Splits on comma, semicolon, or pipe; trims; drops empties.
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split([',', ';', '|'])
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// Empty or non-numeric input is absent, never zero. Fractional inputs
/// truncate toward zero.
pub fn parse_number(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<i64>()
        .ok()
        .or_else(|| trimmed.parse::<f64>().ok().map(|value| value as i64))
}

/// Trimmed text; empty stays absent.
pub fn parse_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Routes one raw cell into the draft per the target field's declared kind.
pub fn apply_cell(draft: &mut BuyerDraft, field: &TargetField, raw: &str) {
    match field.key {
        FieldKey::Fname => draft.fname = parse_text(raw),
        FieldKey::Lname => draft.lname = parse_text(raw),
        FieldKey::Email => draft.email = parse_text(raw),
        FieldKey::Phone => draft.phone = parse_text(raw),
        FieldKey::Phone2 => draft.phone2 = parse_text(raw),
        FieldKey::Phone3 => draft.phone3 = parse_text(raw),
        FieldKey::Company => draft.company = parse_text(raw),
        FieldKey::Score => draft.score = parse_number(raw),
        FieldKey::Notes => draft.notes = parse_text(raw),
        FieldKey::MailingAddress => draft.mailing_address = parse_text(raw),
        FieldKey::MailingCity => draft.mailing_city = parse_text(raw),
        FieldKey::MailingState => draft.mailing_state = parse_text(raw),
        FieldKey::MailingZip => draft.mailing_zip = parse_text(raw),
        FieldKey::Locations => draft.locations = Some(parse_list(raw)),
        FieldKey::Tags => draft.tags = Some(parse_list(raw)),
        FieldKey::Vetted => draft.vetted = Some(parse_bool(raw)),
        FieldKey::Vip => draft.vip = Some(parse_bool(raw)),
        FieldKey::CanReceiveSms => draft.can_receive_sms = Some(parse_bool(raw)),
        FieldKey::CanReceiveEmail => draft.can_receive_email = Some(parse_bool(raw)),
        FieldKey::PropertyType => draft.property_type = Some(parse_list(raw)),
        FieldKey::BudgetMin => draft.budget_min = parse_number(raw),
        FieldKey::BudgetMax => draft.budget_max = parse_number(raw),
        FieldKey::Timeline => draft.timeline = parse_text(raw),
        FieldKey::Source => draft.source = parse_text(raw),
        FieldKey::Status => draft.status = parse_text(raw),
    }
}

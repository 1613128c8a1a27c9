use crate::pipeline::DedupePolicy;

/// A buyer row as produced by mapping and coercion. Unmapped fields stay
/// `None` rather than carrying explicit nulls; defaults land afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuyerDraft {
    pub fname: Option<String>,
    pub lname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub phone2: Option<String>,
    pub phone3: Option<String>,
    pub company: Option<String>,
    pub score: Option<i64>,
    pub notes: Option<String>,
    pub mailing_address: Option<String>,
    pub mailing_city: Option<String>,
    pub mailing_state: Option<String>,
    pub mailing_zip: Option<String>,
    pub locations: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub vetted: Option<bool>,
    pub vip: Option<bool>,
    pub can_receive_sms: Option<bool>,
    pub can_receive_email: Option<bool>,
    pub property_type: Option<Vec<String>>,
    pub budget_min: Option<i64>,
    pub budget_max: Option<i64>,
    pub timeline: Option<String>,
    pub source: Option<String>,
    pub status: Option<String>,
}

impl BuyerDraft {
    /// Applied once per row, after coercion, only where still absent.
    pub fn apply_defaults(&mut self) {
        self.score.get_or_insert(0);
        if self.status.as_deref().map_or(true, str::is_empty) {
            self.status = Some("lead".to_string());
        }
        self.vip.get_or_insert(false);
        self.vetted.get_or_insert(false);
        self.can_receive_email.get_or_insert(true);
        self.can_receive_sms.get_or_insert(true);
    }

    pub fn dedupe_key(&self, policy: DedupePolicy) -> Option<String> {
        let raw = match policy {
            DedupePolicy::None => return None,
            DedupePolicy::Email => self.email.as_deref(),
            DedupePolicy::Phone => self.phone.as_deref(),
        }?;
        let key = raw.trim().to_lowercase();
        if key.is_empty() {
            None
        } else {
            Some(key)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BuyerDraft;
    use crate::pipeline::DedupePolicy;

    #[test]
    fn defaults_fill_only_absent_fields() {
        let mut draft = BuyerDraft {
            score: Some(42),
            vip: Some(true),
            ..Default::default()
        };
        draft.apply_defaults();
        assert_eq!(draft.score, Some(42));
        assert_eq!(draft.vip, Some(true));
        assert_eq!(draft.vetted, Some(false));
        assert_eq!(draft.status.as_deref(), Some("lead"));
        assert_eq!(draft.can_receive_email, Some(true));
        assert_eq!(draft.can_receive_sms, Some(true));
    }

    #[test]
    fn dedupe_key_normalizes_case_and_whitespace() {
        let draft = BuyerDraft {
            email: Some(" John@Example.COM ".to_string()),
            ..Default::default()
        };
        assert_eq!(
            draft.dedupe_key(DedupePolicy::Email).as_deref(),
            Some("john@example.com")
        );
        assert_eq!(draft.dedupe_key(DedupePolicy::Phone), None);
        assert_eq!(draft.dedupe_key(DedupePolicy::None), None);
    }
}

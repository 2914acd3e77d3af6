use serde::Serialize;

/// Placeholder stored when a field could not be scraped.
pub const SENTINEL: &str = "-";

/// Fields scraped from one CRM contact page. Values are kept raw; the
/// merge step turns the sentinel into NULL and parses the dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactEnrichment {
    pub contact_id: String,
    pub external_id: String,
    pub last_account_contact: String,
    pub last_contact_response: String,
}

impl ContactEnrichment {
    /// A record with every scraped field set to the sentinel.
    pub fn unresolved(contact_id: &str) -> Self {
        Self {
            contact_id: contact_id.to_string(),
            external_id: SENTINEL.to_string(),
            last_account_contact: SENTINEL.to_string(),
            last_contact_response: SENTINEL.to_string(),
        }
    }
}

/// Which scraped field a selector feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    ExternalId,
    LastAccountContact,
    LastContactResponse,
}

impl ContactField {
    pub const ALL: [ContactField; 3] = [
        ContactField::ExternalId,
        ContactField::LastAccountContact,
        ContactField::LastContactResponse,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactField::ExternalId => "pow_id",
            ContactField::LastAccountContact => "last_time_account_dir_comm",
            ContactField::LastContactResponse => "last_time_contact_dir_comm",
        }
    }

    /// CSS selector of the field on the contact details page.
    pub fn selector(&self) -> &'static str {
        match self {
            ContactField::ExternalId => r#"[data-qa="contact-basic-info-integration-pow-id"]"#,
            ContactField::LastAccountContact => {
                r#"[data-qa="contact-basic-info-customer-fields-contact-last-contacted-date"]"#
            }
            ContactField::LastContactResponse => {
                r#"[data-qa="contact-basic-info-customer-fields-contact-last-responded-date"]"#
            }
        }
    }

    pub fn set(&self, record: &mut ContactEnrichment, value: String) {
        match self {
            ContactField::ExternalId => record.external_id = value,
            ContactField::LastAccountContact => record.last_account_contact = value,
            ContactField::LastContactResponse => record.last_contact_response = value,
        }
    }
}

/// A `ContactEnrichment` as stored in the mapping table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingRow {
    pub contact_id: String,
    pub external_id: Option<i64>,
    pub last_account_contact: Option<chrono::NaiveDate>,
    pub last_contact_response: Option<chrono::NaiveDate>,
}

/// `None` for the sentinel or an empty value, the trimmed text otherwise.
pub fn null_if_sentinel(raw: &str) -> Option<&str> {
    let t = raw.trim();
    if t.is_empty() || t == SENTINEL {
        None
    } else {
        Some(t)
    }
}

impl From<&ContactEnrichment> for MappingRow {
    /// Sentinels become NULL, the external id is cast to an integer and the
    /// dates are read as `%m/%d/%Y`. Values that do not convert are NULL.
    fn from(c: &ContactEnrichment) -> Self {
        Self {
            contact_id: c.contact_id.clone(),
            external_id: null_if_sentinel(&c.external_id).and_then(|v| v.parse().ok()),
            last_account_contact: null_if_sentinel(&c.last_account_contact)
                .and_then(crate::utils::date::parse_us_date),
            last_contact_response: null_if_sentinel(&c.last_contact_response)
                .and_then(crate::utils::date::parse_us_date),
        }
    }
}

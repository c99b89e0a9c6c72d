//! Email module - the immutable input unit

use serde::{Deserialize, Serialize};

/// A shipment enquiry email as read from the input file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    /// Caller-assigned identifier, copied verbatim into the output record
    pub id: String,

    /// Subject line
    #[serde(default)]
    pub subject: String,

    /// Message body
    #[serde(default)]
    pub body: String,
}

impl Email {
    /// Create a new email
    pub fn new(id: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// Lowercased `"{subject} {body}"`, the haystack for keyword rules
    pub fn keyword_text(&self) -> String {
        format!("{} {}", self.subject, self.body).to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_text_joins_and_lowercases() {
        let email = Email::new("e1", "RFQ: IMO Cargo", "Please QUOTE");
        assert_eq!(email.keyword_text(), "rfq: imo cargo please quote");
    }

    #[test]
    fn test_deserialize_missing_subject() {
        let email: Email = serde_json::from_str(r#"{"id": "e2", "body": "hello"}"#).unwrap();
        assert_eq!(email.subject, "");
        assert_eq!(email.body, "hello");
    }
}

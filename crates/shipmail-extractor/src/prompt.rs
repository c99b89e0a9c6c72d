//! LLM prompt for shipment extraction

use shipmail_domain::Email;

/// System prompt sent with every email
pub const EXTRACTION_INSTRUCTIONS: &str = r#"You are an information extraction system.

Extract shipment details from the email.

Rules:
- Use email BODY over subject
- Extract ONLY the first shipment
- Default incoterm = FOB
- If incoterm ambiguous → FOB
- Dangerous if DG / IMO / IMDG / UN / Class
- non-DG / non-hazardous → false
- Missing values → null

Return ONLY valid JSON in this exact format:
{
  "origin_port_name": string | null,
  "destination_port_name": string | null,
  "incoterm": string | null,
  "cargo_weight_kg": number | null,
  "cargo_cbm": number | null,
  "is_dangerous": boolean
}

Do not include explanations.
Do not include markdown.
Do not include text outside JSON."#;

/// Builds the two-part prompt for one email
pub struct PromptBuilder<'a> {
    email: &'a Email,
    max_body_chars: Option<usize>,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(email: &'a Email) -> Self {
        Self {
            email,
            max_body_chars: None,
        }
    }

    /// Cut the body after this many characters
    pub fn with_max_body_chars(mut self, limit: usize) -> Self {
        self.max_body_chars = Some(limit);
        self
    }

    /// The fixed system prompt
    pub fn system_prompt(&self) -> &'static str {
        EXTRACTION_INSTRUCTIONS
    }

    /// `Subject: {subject}\nBody: {body}`
    pub fn user_prompt(&self) -> String {
        format!("Subject: {}\nBody: {}", self.email.subject, self.body())
    }

    /// Whether the body is longer than the limit and will be cut
    pub fn is_body_truncated(&self) -> bool {
        self.cut_index().is_some()
    }

    fn body(&self) -> &str {
        let body = self.email.body.as_str();
        match self.cut_index() {
            Some(cut) => &body[..cut],
            None => body,
        }
    }

    fn cut_index(&self) -> Option<usize> {
        let limit = self.max_body_chars?;
        self.email.body.char_indices().nth(limit).map(|(cut, _)| cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_prompt_format() {
        let email = Email::new("e1", "RFQ Chennai", "2 pallets, 450 kg");
        let prompt = PromptBuilder::new(&email).user_prompt();
        assert_eq!(prompt, "Subject: RFQ Chennai\nBody: 2 pallets, 450 kg");
    }

    #[test]
    fn test_system_prompt_lists_schema_fields() {
        let email = Email::new("e1", "", "");
        let system = PromptBuilder::new(&email).system_prompt();
        for field in [
            "origin_port_name",
            "destination_port_name",
            "incoterm",
            "cargo_weight_kg",
            "cargo_cbm",
            "is_dangerous",
        ] {
            assert!(system.contains(field), "missing {}", field);
        }
    }

    #[test]
    fn test_body_truncation_respects_char_boundaries() {
        let email = Email::new("e1", "s", "Ünïcödé body");
        let prompt = PromptBuilder::new(&email).with_max_body_chars(4).user_prompt();
        assert_eq!(prompt, "Subject: s\nBody: Ünïc");
    }

    #[test]
    fn test_short_body_untouched() {
        let email = Email::new("e1", "s", "short");
        let prompt = PromptBuilder::new(&email).with_max_body_chars(100).user_prompt();
        assert_eq!(prompt, "Subject: s\nBody: short");
    }

    #[test]
    fn test_truncation_is_reported() {
        let email = Email::new("e1", "s", "twelve chars");
        assert!(PromptBuilder::new(&email).with_max_body_chars(5).is_body_truncated());
        assert!(!PromptBuilder::new(&email).with_max_body_chars(12).is_body_truncated());
        assert!(!PromptBuilder::new(&email).is_body_truncated());
    }
}

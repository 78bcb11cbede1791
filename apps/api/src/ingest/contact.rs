use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\w.-]+@[\w.-]+\.\w+").unwrap());
static PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\+?\d[\d\s-]{8,15}\d").unwrap());

/// Identity fields read from the top of a resume. Any of them may be absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl ContactFields {
    pub fn from_text(text: &str) -> Self {
        Self {
            name: extract_name(text),
            email: extract_email(text),
            phone: extract_phone(text),
        }
    }
}

pub fn extract_email(text: &str) -> Option<String> {
    EMAIL.find(text).map(|m| m.as_str().to_string())
}

pub fn extract_phone(text: &str) -> Option<String> {
    PHONE.find(text).map(|m| m.as_str().trim().to_string())
}

/// First non-empty line.
pub fn extract_name(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "\n  Priya Sharma  \npriya.sharma@mail.co.in | +91 98765 43210\nBangalore\n";

    #[test]
    fn test_contact_fields_from_header() {
        let contact = ContactFields::from_text(HEADER);
        assert_eq!(contact.name.as_deref(), Some("Priya Sharma"));
        assert_eq!(contact.email.as_deref(), Some("priya.sharma@mail.co.in"));
        assert_eq!(contact.phone.as_deref(), Some("+91 98765 43210"));
    }

    #[test]
    fn test_missing_fields_are_none() {
        let contact = ContactFields::from_text("just some words");
        assert_eq!(contact.name.as_deref(), Some("just some words"));
        assert!(contact.email.is_none());
        assert!(contact.phone.is_none());
    }

    #[test]
    fn test_empty_text_has_no_fields() {
        assert_eq!(ContactFields::from_text("  \n \n"), ContactFields::default());
    }

    #[test]
    fn test_short_digit_runs_are_not_phones() {
        assert!(extract_phone("Class of 2019, GPA 3.9").is_none());
    }
}

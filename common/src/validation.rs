use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::field::{Field, FormSubmission};

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\p{L}\s]+$").unwrap());

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
});

// +971XXXXXXXXX, 971XXXXXXXXX, 0XXXXXXXXX, 05XXXXXXX
static UAE_PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\+971[0-9]{9}|971[0-9]{9}|0[0-9]{9}|05[0-9]{7})$").unwrap()
});

pub fn validate_name(value: &str) -> bool {
    NAME_RE.is_match(value)
}

pub fn validate_email(value: &str) -> bool {
    if value.trim().is_empty() || !EMAIL_RE.is_match(value) {
        return false;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    if local.starts_with(['.', '_', '-']) || local.ends_with(['.', '_', '-']) {
        return false;
    }
    if domain.starts_with(['.', '-']) || domain.ends_with(['.', '-']) {
        return false;
    }
    if local.contains("..") || domain.contains("..") {
        return false;
    }

    match domain.rsplit_once('.') {
        Some((_, tld)) => tld.len() >= 2,
        None => false,
    }
}

/// Empty means "not given", which is fine for an optional field.
pub fn validate_phone(value: &str) -> bool {
    if value.trim().is_empty() {
        return true;
    }
    let cleaned: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
        .collect();
    UAE_PHONE_RE.is_match(&cleaned)
}

/// The check run while the user types: a non-empty value in the wrong format.
///
/// Never reports a missing required value, that only happens on submit.
pub fn format_error(field: Field, value: &str) -> Option<&'static str> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    let valid = match field {
        Field::FirstName | Field::LastName => validate_name(value),
        Field::Email => validate_email(value),
        Field::Phone => validate_phone(value),
        Field::Company | Field::HelpType | Field::Message => true,
    };
    if valid {
        None
    } else {
        field.format_message()
    }
}

/// Every failing field of a submission with the message to show for it.
pub fn validate_submission(submission: &FormSubmission) -> ValidationResult {
    let mut result = ValidationResult::default();
    for field in Field::ALL {
        let value = submission.get(field).trim();
        if value.is_empty() {
            if let Some(message) = field.required_message() {
                result.insert(field, message);
            }
        } else if let Some(message) = format_error(field, value) {
            result.insert(field, message);
        }
    }
    result
}

/// Field to message, ordered by form position. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: BTreeMap<Field, String>,
}

impl ValidationResult {
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn first(&self) -> Option<Field> {
        self.errors.keys().next().copied()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        self.errors
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }

    /// Messages in form order, for the itemised list of a general error.
    pub fn messages(&self) -> Vec<String> {
        self.errors.values().cloned().collect()
    }

    /// Errors keyed by the canonical wire name.
    pub fn to_field_errors(&self) -> BTreeMap<String, String> {
        self.errors
            .iter()
            .map(|(field, message)| (field.key().to_string(), message.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn valid_submission() -> FormSubmission {
        FormSubmission {
            first_name: "Amal".into(),
            last_name: "Haddad".into(),
            email: "amal@example.com".into(),
            phone: "050 123 4567".into(),
            company: String::new(),
            help_type: "web-development".into(),
            message: "We need a new site.".into(),
        }
    }

    #[test]
    fn names_accept_unicode_letters_and_spaces() {
        for name in ["Amal", "Jean Luc", "Zoë", "José María", "محمد", "Łukasz"] {
            assert!(validate_name(name), "{name} should be valid");
        }
    }

    #[test]
    fn names_reject_digits_symbols_and_empty() {
        for name in ["", "R2D2", "Anne-Marie", "O'Brien", "bob!", "a_b"] {
            assert!(!validate_name(name), "{name} should be invalid");
        }
    }

    #[test]
    fn emails() {
        assert!(validate_email("name@example.com"));
        assert!(validate_email("first.last+tag@mail.example.co"));
        assert!(validate_email("a%b@ex-ample.org"));

        for bad in [
            "",
            "   ",
            "a@b",
            "a..b@example.com",
            ".name@example.com",
            "name_@example.com",
            "-name@example.com",
            "name@-example.com",
            "name@example..com",
            "name@example.c",
            "name@example.c0m",
            "name example@example.com",
            "name@@example.com",
            "nameexample.com",
        ] {
            assert!(!validate_email(bad), "{bad:?} should be invalid");
        }
    }

    #[test]
    fn phones() {
        for good in [
            "",
            "+971501234567",
            "971501234567",
            "0501234567",
            "050 123 4567",
            "+971 50 123 4567",
            "(050) 123-4567",
            "051234567",
        ] {
            assert!(validate_phone(good), "{good:?} should be valid");
        }
        for bad in ["12345", "+97150123456", "+9715012345678", "1501234567", "05012345ab"] {
            assert!(!validate_phone(bad), "{bad:?} should be invalid");
        }
    }

    #[test]
    fn format_error_ignores_empty_values() {
        for field in Field::ALL {
            assert_eq!(format_error(field, ""), None);
            assert_eq!(format_error(field, "   "), None);
        }
    }

    #[test]
    fn format_error_reports_bad_formats_only() {
        assert_eq!(
            format_error(Field::FirstName, "4my"),
            Some("First name should only contain letters and spaces")
        );
        assert_eq!(format_error(Field::FirstName, " Amy "), None);
        assert!(format_error(Field::Email, "amy@").is_some());
        assert!(format_error(Field::Phone, "12345").is_some());
        assert_eq!(format_error(Field::Message, "!!!"), None);
    }

    #[test]
    fn complete_submission_is_valid() {
        assert!(validate_submission(&valid_submission()).is_valid());
    }

    #[test]
    fn missing_first_name_and_email_reports_exactly_those() {
        let mut submission = valid_submission();
        submission.first_name.clear();
        submission.email = "  ".into();

        let result = validate_submission(&submission);
        assert_eq!(result.fields().collect::<Vec<_>>(), vec![Field::FirstName, Field::Email]);
        assert_eq!(result.get(Field::FirstName), Some("First name is required"));
        assert_eq!(result.get(Field::Email), Some("Email address is required"));
        assert_eq!(result.first(), Some(Field::FirstName));
    }

    #[test]
    fn optional_fields_only_fail_on_format() {
        let mut submission = valid_submission();
        submission.phone.clear();
        submission.company.clear();
        assert!(validate_submission(&submission).is_valid());

        submission.phone = "12345".into();
        let result = validate_submission(&submission);
        assert_eq!(result.fields().collect::<Vec<_>>(), vec![Field::Phone]);
    }

    #[test]
    fn empty_submission_lists_required_fields_in_form_order() {
        let result = validate_submission(&FormSubmission::default());
        assert_eq!(
            result.fields().collect::<Vec<_>>(),
            vec![
                Field::FirstName,
                Field::LastName,
                Field::Email,
                Field::HelpType,
                Field::Message,
            ]
        );
        assert_eq!(result.messages().len(), 5);
    }

    #[test]
    fn field_errors_use_wire_keys() {
        let mut result = ValidationResult::default();
        result.insert(Field::HelpType, "Please select how we can help you");
        let map = result.to_field_errors();
        assert_eq!(map.get("helpType").map(String::as_str), Some("Please select how we can help you"));
    }
}

use serde::{Deserialize, Serialize};

/// One input of the contact form, in the order the form renders them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Phone,
    Company,
    HelpType,
    Message,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::Phone,
        Field::Company,
        Field::HelpType,
        Field::Message,
    ];

    /// Canonical wire name, also the element id of the page form.
    pub fn key(self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Company => "company",
            Field::HelpType => "helpType",
            Field::Message => "message",
        }
    }

    pub fn from_key(key: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.key() == key)
    }

    pub fn is_required(self) -> bool {
        self.required_message().is_some()
    }

    pub fn required_message(self) -> Option<&'static str> {
        match self {
            Field::FirstName => Some("First name is required"),
            Field::LastName => Some("Last name is required"),
            Field::Email => Some("Email address is required"),
            Field::HelpType => Some("Please select how we can help you"),
            Field::Message => Some("Message is required"),
            Field::Phone | Field::Company => None,
        }
    }

    pub fn format_message(self) -> Option<&'static str> {
        match self {
            Field::FirstName => Some("First name should only contain letters and spaces"),
            Field::LastName => Some("Last name should only contain letters and spaces"),
            Field::Email => Some("Please enter a valid email address (e.g., name@example.com)"),
            Field::Phone => Some(
                "Please enter a valid UAE phone number (e.g., +971 50 123 4567 or 050 123 4567)",
            ),
            Field::Company | Field::HelpType | Field::Message => None,
        }
    }
}

/// The values of one submit attempt. Absent optional fields are empty strings,
/// which is also how they travel on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub help_type: String,
    pub message: String,
}

impl FormSubmission {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Company => &self.company,
            Field::HelpType => &self.help_type,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::Company => &mut self.company,
            Field::HelpType => &mut self.help_type,
            Field::Message => &mut self.message,
        };
        *slot = value.into();
    }

    /// Copy with surrounding whitespace removed from every value.
    pub fn trimmed(&self) -> FormSubmission {
        let mut out = FormSubmission::default();
        for field in Field::ALL {
            out.set(field, self.get(field).trim());
        }
        out
    }

    /// `(wire key, value)` pairs in form order.
    pub fn pairs(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        Field::ALL
            .into_iter()
            .map(move |field| (field.key(), self.get(field)))
    }
}

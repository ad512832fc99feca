use common::Field;

/// Which on-screen copy of the contact form this is. Both share the field
/// schema; element ids differ so both can live in one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormVariant {
    /// The full form on the contact page, canonical ids (`email`).
    Page,
    /// The call-to-action form inside the dialog, ids prefixed `cta` (`ctaEmail`).
    Modal,
}

impl FormVariant {
    const MODAL_PREFIX: &'static str = "cta";

    pub fn form_id(self) -> &'static str {
        match self {
            FormVariant::Page => "contactForm",
            FormVariant::Modal => "ctaContactForm",
        }
    }

    pub fn message_container_id(self) -> &'static str {
        match self {
            FormVariant::Page => "formMessage",
            FormVariant::Modal => "ctaFormMessage",
        }
    }

    pub fn element_id(self, field: Field) -> String {
        match self {
            FormVariant::Page => field.key().to_string(),
            FormVariant::Modal => prefixed(Self::MODAL_PREFIX, field.key()),
        }
    }

    pub fn error_id(self, field: Field) -> String {
        format!("{}-error", self.element_id(field))
    }

    /// Resolves a field key sent by the server to a field of this form.
    ///
    /// Accepts the canonical key or this variant's own element id. Ids that
    /// belong to another variant do not resolve.
    pub fn resolve_key(self, key: &str) -> Option<Field> {
        Field::from_key(key).or_else(|| {
            Field::ALL
                .into_iter()
                .find(|field| self != FormVariant::Page && self.element_id(*field) == key)
        })
    }
}

fn prefixed(prefix: &str, key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => format!("{}{}{}", prefix, first.to_ascii_uppercase(), chars.as_str()),
        None => prefix.to_string(),
    }
}

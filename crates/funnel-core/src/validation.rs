//! Field Validation

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::lead::LeadForm;
use crate::phone::MAX_PHONE_DIGITS;

/// Permissive `local@domain.tld` shape
static EMAIL_SHAPE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").ok());

/// Dialog step
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    /// Contact details
    One,
    /// Offer confirmation and bonus
    Two,
}

/// Keys of the error map
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    CompanyName,
    FullName,
    Email,
    Phone,
    Sector,
    SocialLink,
    /// Submission-time failures
    General,
}

impl FormField {
    /// JSON/form name of the field
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CompanyName => "companyName",
            Self::FullName => "fullName",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Sector => "sector",
            Self::SocialLink => "socialLink",
            Self::General => "general",
        }
    }

    /// Input label shown on step 1
    ///
    /// The company has no step-1 rule but the checkout needs it, so it is not
    /// marked optional.
    pub const fn label(self) -> &'static str {
        match self {
            Self::CompanyName => "Company name",
            Self::FullName => "Full name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Sector => "Sector (optional)",
            Self::SocialLink => "Instagram / website (optional)",
            Self::General => "",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field error messages; a missing key means the field is valid
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<FormField, String>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Drop the message for one field
    pub fn clear_field(&mut self, field: FormField) {
        self.0.remove(&field);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Replace everything with a single general error
    pub fn general(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.insert(FormField::General, message);
        errors
    }
}

/// Check the fields a step requires
///
/// Step 2 adds nothing: the bonus is gated by submit eligibility, not by the
/// error map.
pub fn validate(step: Step, form: &LeadForm) -> FormErrors {
    let mut errors = FormErrors::new();

    if step == Step::One {
        if form.full_name.trim().is_empty() {
            errors.insert(FormField::FullName, "Full name is required.");
        }

        let email = form.email.trim();
        if email.is_empty() {
            errors.insert(FormField::Email, "Email is required.");
        } else if !is_email_shaped(email) {
            errors.insert(FormField::Email, "Invalid email format.");
        }

        let digits = digit_count(&form.phone);
        if digits == 0 {
            errors.insert(FormField::Phone, "Phone number is required.");
        } else if !(9..=MAX_PHONE_DIGITS).contains(&digits) {
            errors.insert(FormField::Phone, "Enter a valid phone number (9-10 digits).");
        }
    }

    errors
}

fn is_email_shaped(email: &str) -> bool {
    EMAIL_SHAPE.as_ref().is_some_and(|re| re.is_match(email))
}

fn digit_count(input: &str) -> usize {
    input.chars().filter(char::is_ascii_digit).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> LeadForm {
        LeadForm {
            full_name: "Giulia Bianchi".into(),
            email: "giulia@studio.it".into(),
            phone: "3471234567".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_step_one() {
        assert!(validate(Step::One, &valid_form()).is_empty());
    }

    #[test]
    fn test_nine_digit_phone_accepted() {
        let form = LeadForm {
            phone: "347123456".into(),
            ..valid_form()
        };
        assert!(validate(Step::One, &form).is_empty());
    }

    #[test]
    fn test_formatted_phone_counts_digits_only() {
        let form = LeadForm {
            phone: "347 123 4567".into(),
            ..valid_form()
        };
        assert!(validate(Step::One, &form).is_empty());
    }

    #[test]
    fn test_missing_fields_reported() {
        let errors = validate(Step::One, &LeadForm::default());
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get(FormField::FullName), Some("Full name is required."));
        assert_eq!(errors.get(FormField::Email), Some("Email is required."));
        assert_eq!(errors.get(FormField::Phone), Some("Phone number is required."));
        assert!(!errors.contains(FormField::General));
    }

    #[test]
    fn test_bad_email_shapes() {
        for email in ["giulia", "giulia@studio", "@.", "giulia@ studio.it"] {
            let form = LeadForm {
                email: email.into(),
                ..valid_form()
            };
            let errors = validate(Step::One, &form);
            assert_eq!(errors.get(FormField::Email), Some("Invalid email format."), "{email}");
        }
    }

    #[test]
    fn test_phone_length_bounds() {
        for phone in ["34712345", "34712345678"] {
            let form = LeadForm {
                phone: phone.into(),
                ..valid_form()
            };
            assert!(validate(Step::One, &form).contains(FormField::Phone), "{phone}");
        }
    }

    #[test]
    fn test_step_two_has_no_required_fields() {
        assert!(validate(Step::Two, &LeadForm::default()).is_empty());
    }

    #[test]
    fn test_only_unchecked_extras_are_labelled_optional() {
        let optional: Vec<FormField> = [
            FormField::CompanyName,
            FormField::FullName,
            FormField::Email,
            FormField::Phone,
            FormField::Sector,
            FormField::SocialLink,
        ]
        .into_iter()
        .filter(|field| field.label().contains("optional"))
        .collect();

        assert_eq!(optional, vec![FormField::Sector, FormField::SocialLink]);
    }

    #[test]
    fn test_clear_field() {
        let mut errors = validate(Step::One, &LeadForm::default());
        errors.clear_field(FormField::Email);
        assert!(!errors.contains(FormField::Email));
        assert!(errors.contains(FormField::FullName));
    }
}

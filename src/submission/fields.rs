use crate::models::{ContactForm, Submission};

/// A form whose three fields are all present and non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ValidForm {
    /// Timestamp is taken here, at persistence time, never from the client.
    pub fn into_submission(self) -> Submission {
        Submission::new(self.name, self.email, self.message)
    }
}

/// Presence check. On failure, returns the names of the offending fields.
pub fn require_all(form: ContactForm) -> Result<ValidForm, Vec<&'static str>> {
    let missing = form.missing_fields();
    if !missing.is_empty() {
        return Err(missing);
    }

    match (form.name, form.email, form.message) {
        (Some(name), Some(email), Some(message)) => Ok(ValidForm {
            name,
            email,
            message,
        }),
        _ => Err(vec!["name", "email", "message"]),
    }
}

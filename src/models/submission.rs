use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fields posted by the contact form, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl ContactForm {
    /// Pull the three known fields out of a parsed body. Anything that is not
    /// a string counts as absent; unknown keys are ignored.
    pub fn from_value(value: &Value) -> Self {
        let field = |key: &str| value.get(key).and_then(|v| v.as_str()).map(|s| s.to_string());

        Self {
            name: field("name"),
            email: field("email"),
            message: field("message"),
        }
    }

    /// Names of the fields that are missing or empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ]
        .into_iter()
        .filter(|(_, v)| v.as_deref().is_none_or(str::is_empty))
        .map(|(k, _)| k)
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub date: DateTime<Utc>,
}

impl Submission {
    /// Stamp a validated form with the current server time.
    pub fn new(name: String, email: String, message: String) -> Self {
        Self {
            name,
            email,
            message,
            date: Utc::now(),
        }
    }
}

/// Signup intake processing
///
/// Validates and persists the two signup shapes. The enhanced path writes
/// the account, its extension record, and 3-5 interest rows in a single
/// transaction.

mod processor;

pub use processor::IntakeProcessor;

use serde::{Deserialize, Serialize};

/// Basic signup form payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasicSignup {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Enhanced signup form payload. Field names match the client form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedSignup {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub bio: String,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub age: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub tech_interests: Option<String>,
    #[serde(default)]
    pub mindfulness_practices: Option<String>,
    #[serde(default)]
    pub work_style: Option<String>,
    #[serde(default)]
    pub hobbies: Option<String>,
    #[serde(default)]
    pub connection_type: Option<String>,
    #[serde(default)]
    pub privacy_level: Option<String>,
    #[serde(default)]
    pub newsletter: Option<bool>,
}

/// Result of a successful signup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupOutcome {
    pub id: i64,
    pub message: String,
    #[serde(rename = "type")]
    pub signup_type: String,
}

/// Bio length bounds, applied to the trimmed string
pub const BIO_MIN_CHARS: usize = 50;
pub const BIO_MAX_CHARS: usize = 500;

/// Interest count bounds at creation time
pub const MIN_INTERESTS: usize = 3;
pub const MAX_INTERESTS: usize = 5;

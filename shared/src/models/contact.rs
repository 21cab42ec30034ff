//! Contact form message

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::validation::{
    self, MAX_MESSAGE_LEN, MAX_NAME_LEN, MAX_SUBJECT_LEN, validate_email,
};

/// Contact form payload delivered through the email service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactMessage {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate_min_text(&self.name, "name", 2, MAX_NAME_LEN)?;
        validate_email(&self.email)?;
        validation::validate_required_text(&self.subject, "subject", MAX_SUBJECT_LEN)?;
        validation::validate_min_text(&self.message, "message", 10, MAX_MESSAGE_LEN)
    }
}

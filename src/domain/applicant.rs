use serde::{Deserialize, Serialize};

/// The signed-in user applying for a scholarship.
///
/// Comes from the session provider and is passed to the checkout page when it is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Applicant {
    pub name: String,
    pub email: String,
    pub id: String,
}

impl Applicant {
    pub fn new(name: impl Into<String>, email: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            id: id.into(),
        }
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Largest integer a JSON number carries without precision loss
const MAX_SAFE_ID: u64 = (1 << 53) - 1;

/// The identity of the logged-in operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    pub email: String,
    pub name: String,
    pub id: u64,
}

impl SessionIdentity {
    /// Create an identity for `email` under a fresh random id. The display
    /// name is the local part of the address.
    pub fn new(email: impl Into<String>) -> Self {
        let email = email.into();
        let name = email.split('@').next().unwrap_or_default().to_string();
        let id = (Uuid::new_v4().as_u128() as u64) & MAX_SAFE_ID;
        Self { email, name, id }
    }
}

impl fmt::Display for SessionIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::Identified;

/// Geographic coordinates, kept as the strings the API returns
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geolocation {
    #[serde(default)]
    pub lat: String,
    #[serde(default)]
    pub long: String,
}

/// Postal address of a user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zipcode: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub geolocation: Geolocation,
}

/// Employer details of a user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub catch_phrase: String,
}

/// Represents a user in the directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    #[serde(default, deserialize_with = "full_name")]
    pub name: String,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub company: Company,
}

/// The fake store API nests the name as `{firstname, lastname}`; local
/// records carry a single string.
#[derive(Deserialize)]
#[serde(untagged)]
enum NameRepr {
    Plain(String),
    Split {
        #[serde(default)]
        firstname: String,
        #[serde(default)]
        lastname: String,
    },
}

fn full_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match NameRepr::deserialize(deserializer)? {
        NameRepr::Plain(name) => name,
        NameRepr::Split { firstname, lastname } => {
            format!("{} {}", firstname, lastname).trim().to_string()
        }
    })
}

impl User {
    /// Build a user from a draft under a locally allocated id
    pub fn from_draft(id: u64, draft: UserDraft) -> Self {
        Self {
            id,
            name: draft.name,
            username: draft.username,
            email: draft.email,
            phone: draft.phone,
            address: draft.address.unwrap_or_default(),
            company: draft.company.unwrap_or_default(),
        }
    }

    /// Merge a patch over this user. Every field but the id is overridable.
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(username) = patch.username {
            self.username = username;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(address) = patch.address {
            self.address = address;
        }
        if let Some(company) = patch.company {
            self.company = company;
        }
    }
}

impl Identified for User {
    fn id(&self) -> u64 {
        self.id
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.id, self.username)
    }
}

/// Input for creating a user locally
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDraft {
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub address: Option<Address>,
    pub company: Option<Company>,
}

impl UserDraft {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    pub fn with_company(mut self, company: Company) -> Self {
        self.company = Some(company);
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.username.trim().is_empty() {
            return Err("username must not be empty".to_string());
        }
        Ok(())
    }
}

/// Partial update for an existing user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<Address>,
    pub company: Option<Company>,
}

impl UserPatch {
    pub fn validate(&self) -> Result<(), String> {
        match &self.username {
            Some(username) if username.trim().is_empty() => {
                Err("username must not be empty".to_string())
            }
            _ => Ok(()),
        }
    }
}

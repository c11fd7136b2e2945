use crate::domain::email::normalize_email;
use crate::domain::ids::VolunteerId;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volunteer {
    pub id: VolunteerId,
    pub name: String,
    pub email: String,
    pub address: String,
}

impl Volunteer {
    pub fn from_new(id: VolunteerId, new: NewVolunteer) -> Self {
        Self {
            id,
            name: new.name,
            email: new.email,
            address: new.address,
        }
    }

    pub fn normalized_email(&self) -> Option<String> {
        normalize_email(&self.email)
    }
}

/// A record that passed validation and enrichment, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVolunteer {
    pub name: String,
    pub email: String,
    pub address: String,
}

impl NewVolunteer {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::EmptyName);
        }
        if normalize_email(&self.email).is_none() {
            return Err(CoreError::EmptyEmail);
        }
        if self.address.trim().is_empty() {
            return Err(CoreError::EmptyAddress);
        }
        Ok(())
    }
}

use crate::domain::VolunteerId;
use serde::{Deserialize, Serialize};

/// Row of a rendered list. `position` is only meaningful for the snapshot it
/// was read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolunteerListItemDto {
    pub position: usize,
    pub id: VolunteerId,
    pub name: String,
    pub email: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressLookupDto {
    pub postal_code: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatusDto {
    pub state: String,
    pub last_activity_at: Option<i64>,
    pub timeout_secs: u64,
}

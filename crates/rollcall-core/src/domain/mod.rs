pub mod address;
pub mod email;
pub mod ids;
pub mod postal_code;
pub mod volunteer;

pub use address::{format_address, AddressFields};
pub use email::{emails_match, normalize_email};
pub use ids::VolunteerId;
pub use postal_code::{normalize_postal_code, PostalCode, POSTAL_CODE_DIGITS};
pub use volunteer::{NewVolunteer, Volunteer};

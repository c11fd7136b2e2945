pub mod enrichment;
pub mod filter;
pub mod session;
pub mod validation;

pub use enrichment::{
    enrich, prepare_volunteer, resolve_address, AddressLookup, IntakeError, LookupFailure,
};
pub use filter::filter_volunteers;
pub use session::{
    session_state, validate_session_timeout, SessionState, DEFAULT_SESSION_TIMEOUT_SECS,
    MAX_SESSION_TIMEOUT_SECS,
};
pub use validation::{validate, ValidatedForm, ValidationError, VolunteerForm};

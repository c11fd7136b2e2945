use crate::domain::{format_address, AddressFields, NewVolunteer, PostalCode, Volunteer};
use crate::rules::validation::{validate, ValidatedForm, ValidationError, VolunteerForm};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupFailure {
    #[error("postal code not found: {0}")]
    NotFound(String),
    #[error("address lookup failed: {0}")]
    Transport(String),
}

/// External collaborator that turns a postal code into address fields.
pub trait AddressLookup {
    fn lookup(&self, postal_code: &PostalCode) -> Result<AddressFields, LookupFailure>;
}

impl<T: AddressLookup + ?Sized> AddressLookup for &T {
    fn lookup(&self, postal_code: &PostalCode) -> Result<AddressFields, LookupFailure> {
        (**self).lookup(postal_code)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntakeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Lookup(#[from] LookupFailure),
}

pub fn resolve_address<L: AddressLookup + ?Sized>(
    lookup: &L,
    postal_code: &PostalCode,
) -> Result<String, LookupFailure> {
    let fields = lookup.lookup(postal_code)?;
    let formatted = format_address(&fields);
    if formatted.is_empty() {
        return Err(LookupFailure::NotFound(postal_code.to_string()));
    }
    Ok(formatted)
}

/// Fills in the address. A manual address wins and the lookup is never called.
pub fn enrich<L: AddressLookup + ?Sized>(
    validated: ValidatedForm,
    lookup: &L,
) -> Result<NewVolunteer, IntakeError> {
    let address = match validated.address {
        Some(address) => address,
        None => resolve_address(lookup, &validated.postal_code)?,
    };
    Ok(NewVolunteer {
        name: validated.name,
        email: validated.email,
        address,
    })
}

pub fn prepare_volunteer<L: AddressLookup + ?Sized>(
    form: &VolunteerForm,
    existing: &[Volunteer],
    lookup: &L,
) -> Result<NewVolunteer, IntakeError> {
    let validated = validate(form, existing)?;
    enrich(validated, lookup)
}

use rollcall_core::domain::{AddressFields, PostalCode};
use rollcall_core::rules::{
    prepare_volunteer, AddressLookup, IntakeError, LookupFailure, ValidationError, VolunteerForm,
};
use rollcall_store::Store;

/// Answers every lookup with the Praça da Sé address.
struct SeLookup;

impl AddressLookup for SeLookup {
    fn lookup(&self, postal_code: &PostalCode) -> Result<AddressFields, LookupFailure> {
        if postal_code.as_str() != "01001000" {
            return Err(LookupFailure::NotFound(postal_code.to_string()));
        }
        Ok(AddressFields {
            street: "Praça da Sé".to_string(),
            neighborhood: "Sé".to_string(),
            city: "São Paulo".to_string(),
            state: "SP".to_string(),
        })
    }
}

fn open_store() -> Store {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");
    store
}

fn submit(store: &Store, form: &VolunteerForm) -> Result<(), IntakeError> {
    let existing = store.volunteers().load_all().expect("load");
    let new = prepare_volunteer(form, &existing, &SeLookup)?;
    store.volunteers().append(new).expect("append");
    Ok(())
}

#[test]
fn submit_resolves_address_and_rejects_repeat_email() {
    let store = open_store();

    let form = VolunteerForm {
        name: "Ana".to_string(),
        email: "ana@x.com".to_string(),
        postal_code: "01001-000".to_string(),
        address: Some(String::new()),
    };
    submit(&store, &form).expect("first submit");

    let stored = store.volunteers().load_all().expect("load");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].address, "Praça da Sé, Sé, São Paulo - SP");

    let again = VolunteerForm {
        name: "Another Ana".to_string(),
        email: "ANA@x.com".to_string(),
        postal_code: "20040-020".to_string(),
        address: Some("Rua Primeiro de Março, Rio de Janeiro - RJ".to_string()),
    };
    let err = submit(&store, &again).expect_err("duplicate");
    assert_eq!(err, IntakeError::Validation(ValidationError::DuplicateEmail));
    assert_eq!(store.volunteers().count().expect("count"), 1);
}

#[test]
fn failed_lookup_persists_nothing() {
    let store = open_store();

    let form = VolunteerForm {
        name: "Bruno".to_string(),
        email: "bruno@x.com".to_string(),
        postal_code: "99999-999".to_string(),
        address: None,
    };
    let err = submit(&store, &form).expect_err("not found");
    assert!(matches!(err, IntakeError::Lookup(LookupFailure::NotFound(_))));
    assert!(store.volunteers().load_all().expect("load").is_empty());
}

#[test]
fn invalid_postal_code_persists_nothing() {
    let store = open_store();

    let form = VolunteerForm {
        name: "Carla".to_string(),
        email: "carla@x.com".to_string(),
        postal_code: "1234-56".to_string(),
        address: Some("Rua C".to_string()),
    };
    let err = submit(&store, &form).expect_err("invalid");
    assert_eq!(err, IntakeError::Validation(ValidationError::InvalidPostalCode));
    assert!(store.volunteers().load_all().expect("load").is_empty());
}

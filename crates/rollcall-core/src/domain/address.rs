use serde::{Deserialize, Serialize};

/// Structured address as returned by a postal-code lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressFields {
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

impl AddressFields {
    pub fn is_empty(&self) -> bool {
        [&self.street, &self.neighborhood, &self.city, &self.state]
            .iter()
            .all(|field| field.trim().is_empty())
    }
}

/// Renders `street, neighborhood, city - state`, dropping empty parts so no
/// dangling separators remain.
pub fn format_address(fields: &AddressFields) -> String {
    let locality: Vec<&str> = [&fields.street, &fields.neighborhood, &fields.city]
        .into_iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect();
    let locality = locality.join(", ");
    let state = fields.state.trim();

    match (locality.is_empty(), state.is_empty()) {
        (false, false) => format!("{} - {}", locality, state),
        (false, true) => locality,
        (true, false) => state.to_string(),
        (true, true) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::{format_address, AddressFields};

    fn fields(street: &str, neighborhood: &str, city: &str, state: &str) -> AddressFields {
        AddressFields {
            street: street.to_string(),
            neighborhood: neighborhood.to_string(),
            city: city.to_string(),
            state: state.to_string(),
        }
    }

    #[test]
    fn format_address_joins_all_fields() {
        let value = format_address(&fields("Praça da Sé", "Sé", "São Paulo", "SP"));
        assert_eq!(value, "Praça da Sé, Sé, São Paulo - SP");
    }

    #[test]
    fn format_address_skips_missing_street_and_neighborhood() {
        // Single-CEP towns come back with only city and state.
        let value = format_address(&fields("", "", "Pirapora do Bom Jesus", "SP"));
        assert_eq!(value, "Pirapora do Bom Jesus - SP");
    }

    #[test]
    fn format_address_skips_middle_gap() {
        let value = format_address(&fields("Rua A", " ", "Recife", ""));
        assert_eq!(value, "Rua A, Recife");
    }

    #[test]
    fn format_address_empty_when_nothing_returned() {
        let empty = AddressFields::default();
        assert!(empty.is_empty());
        assert_eq!(format_address(&empty), "");
        assert_eq!(format_address(&fields("", "", "", "RJ")), "RJ");
    }
}

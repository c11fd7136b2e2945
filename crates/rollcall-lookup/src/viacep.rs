use crate::{LookupError, Result};
use reqwest::blocking::Client;
use rollcall_core::domain::{AddressFields, PostalCode};
use rollcall_core::rules::{AddressLookup, LookupFailure};
use serde::{Deserialize, Deserializer};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

const DEFAULT_USER_AGENT: &str = "rollcall";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Body of `GET /ws/{cep}/json/`. Unknown codes come back as `{"erro": true}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ViaCepResponse {
    #[serde(default)]
    pub cep: Option<String>,
    #[serde(default)]
    pub logradouro: Option<String>,
    #[serde(default)]
    pub bairro: Option<String>,
    #[serde(default)]
    pub localidade: Option<String>,
    #[serde(default)]
    pub uf: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub erro: bool,
}

impl ViaCepResponse {
    pub fn into_fields(self) -> AddressFields {
        AddressFields {
            street: self.logradouro.unwrap_or_default(),
            neighborhood: self.bairro.unwrap_or_default(),
            city: self.localidade.unwrap_or_default(),
            state: self.uf.unwrap_or_default(),
        }
    }
}

/// The service has sent both `true` and `"true"` for the error flag.
fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(value)) => value,
        Some(Flag::Text(value)) => value.trim().eq_ignore_ascii_case("true"),
        None => false,
    })
}

pub fn parse_response(postal_code: &PostalCode, body: &str) -> Result<AddressFields> {
    let response: ViaCepResponse =
        serde_json::from_str(body).map_err(|err| LookupError::Parse(err.to_string()))?;
    if response.erro {
        return Err(LookupError::NotFound(postal_code.to_string()));
    }
    Ok(response.into_fields())
}

#[derive(Debug, Clone)]
pub struct ViaCepClient {
    base_url: Url,
    client: Client,
}

impl ViaCepClient {
    pub fn new(base_url: &str, timeout: Duration, user_agent: Option<&str>) -> Result<Self> {
        let base_url = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(LookupError::Parse(format!(
                "lookup url must use http or https: {}",
                base_url
            )));
        }
        let client = Client::builder()
            .user_agent(user_agent.unwrap_or(DEFAULT_USER_AGENT))
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;
        Ok(Self { base_url, client })
    }

    pub fn endpoint(&self, postal_code: &PostalCode) -> Result<Url> {
        Ok(self
            .base_url
            .join(&format!("{}/json/", postal_code.as_str()))?)
    }

    pub fn fetch(&self, postal_code: &PostalCode) -> Result<AddressFields> {
        let url = self.endpoint(postal_code)?;
        debug!(%url, "looking up postal code");
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()?
            .error_for_status()?;
        let body = response.text()?;
        parse_response(postal_code, &body)
    }
}

impl AddressLookup for ViaCepClient {
    fn lookup(&self, postal_code: &PostalCode) -> std::result::Result<AddressFields, LookupFailure> {
        self.fetch(postal_code).map_err(|err| {
            warn!(postal_code = %postal_code, error = %err, "address lookup failed");
            LookupFailure::from(err)
        })
    }
}

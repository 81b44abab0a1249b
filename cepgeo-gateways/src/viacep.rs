use anyhow::anyhow;
use async_trait::async_trait;
use cepgeo_core::{
    entities::*,
    gateways::postal_lookup::{PostalLookupError, PostalLookupGateway},
};
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://viacep.com.br/ws";

/// Postal code lookup based on viacep.com.br.
#[derive(Debug, Clone)]
pub struct ViaCep {
    client: reqwest::Client,
    base_url: String,
}

impl ViaCep {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct Response {
    #[serde(default)]
    erro: Option<serde_json::Value>,
    logradouro: Option<String>,
    bairro: Option<String>,
    localidade: Option<String>,
    uf: Option<String>,
}

impl Response {
    // The flag was a boolean in older versions and is a string now.
    fn is_error(&self) -> bool {
        match &self.erro {
            None | Some(serde_json::Value::Null) => false,
            Some(serde_json::Value::Bool(flag)) => *flag,
            Some(serde_json::Value::String(flag)) => flag == "true",
            Some(_) => true,
        }
    }
}

fn non_empty(field: Option<String>) -> Option<String> {
    field
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
}

fn into_address(
    postal_code: &PostalCode,
    response: Response,
) -> Result<PostalAddress, PostalLookupError> {
    if response.is_error() {
        return Err(PostalLookupError::NotFound);
    }
    let Response {
        logradouro,
        bairro,
        localidade,
        uf,
        ..
    } = response;
    Ok(PostalAddress {
        postal_code: postal_code.clone(),
        street: non_empty(logradouro),
        neighborhood: non_empty(bairro),
        city: non_empty(localidade),
        state: non_empty(uf),
    })
}

#[async_trait]
impl PostalLookupGateway for ViaCep {
    async fn lookup(&self, postal_code: &PostalCode) -> Result<PostalAddress, PostalLookupError> {
        let url = format!("{}/{}/json/", self.base_url, postal_code.as_str());
        log::debug!("Looking up postal code {postal_code}");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| PostalLookupError::Unavailable(err.into()))?;
        let status = response.status();
        if status.as_u16() == 400 || status.as_u16() == 404 {
            return Err(PostalLookupError::NotFound);
        }
        if !status.is_success() {
            return Err(PostalLookupError::Unavailable(anyhow!(
                "Unexpected response status {status}"
            )));
        }
        let response = response
            .json::<Response>()
            .await
            .map_err(|err| PostalLookupError::Unavailable(err.into()))?;
        into_address(postal_code, response)
    }
}

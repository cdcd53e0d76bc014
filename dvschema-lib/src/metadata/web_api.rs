//! Dataverse Web API client
//!
//! Minimal OData client implementing [`MetadataService`] over the platform's
//! Web API. Authentication is delegated to the caller: an already-acquired
//! bearer token is attached to every request.

use super::resilient_http::{RetryPolicy, resilient_get};
use super::{EntityMetadata, Environment, MetadataService, Query, Row};
use crate::Result;
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use url::Url;
use uuid::Uuid;

const LOG_TARGET: &str = "   web-api";

const USER_AGENT: &str = concat!("dvschema/", env!("CARGO_PKG_VERSION"));

/// Full metadata makes every derived-type instance carry its `@odata.type`,
/// which is what attribute variants are keyed on.
const ACCEPT_JSON_FULL_METADATA: &str = "application/json;odata.metadata=full";

const RETRIEVE_ALL_ENTITIES_PATH: &str = "RetrieveAllEntities(EntityFilters=@p1,RetrieveAsIfPublished=@p2)";
const RETRIEVE_ALL_ENTITIES_PARAMS: &str = "@p1=Microsoft.Dynamics.CRM.EntityFilters'Entity,Attributes,Relationships'&@p2=true";
const SELECT_ENTITY_NAMES: &str = "$select=MetadataId,LogicalName,SchemaName";

const DEFAULT_API_VERSION: &str = "v9.2";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Longest slice of an error body echoed back in error messages.
const MAX_ERROR_BODY_CHARS: usize = 300;

/// How to reach an environment.
#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    /// Environment URL (e.g. `https://contoso.crm.dynamics.com`)
    pub url: Url,

    /// OAuth bearer token for the environment
    pub access_token: Option<String>,

    /// Web API version segment (e.g. `v9.2`)
    pub api_version: String,

    /// Timeout applied to each individual request
    pub request_timeout: Duration,

    pub retry_policy: RetryPolicy,
}

impl ConnectionSettings {
    #[must_use]
    pub fn new(url: Url) -> Self {
        Self {
            url,
            access_token: None,
            api_version: DEFAULT_API_VERSION.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            retry_policy: RetryPolicy::default(),
        }
    }
}

/// An OData collection page.
#[derive(Debug, Deserialize)]
struct Collection<T> {
    value: Vec<T>,

    #[serde(rename = "@odata.nextLink", default)]
    next_link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RetrieveAllEntitiesResponse {
    #[serde(rename = "EntityMetadata", default)]
    entity_metadata: Vec<EntityMetadata>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,

    #[serde(default)]
    message: Option<String>,
}

/// Web API client for one environment.
#[derive(Debug, Clone)]
pub struct WebApiClient {
    client: reqwest::Client,
    api_root: Url,
    environment: Environment,
    retry_policy: RetryPolicy,
    request_timeout: Duration,
}

impl WebApiClient {
    /// Connect to an environment and look up its organization name.
    pub async fn connect(settings: &ConnectionSettings) -> Result<Self> {
        let mut client = Self {
            client: build_http_client(settings)?,
            api_root: api_root(&settings.url, &settings.api_version)?,
            environment: Environment {
                url: settings.url.to_string(),
                organization_name: String::new(),
            },
            retry_policy: settings.retry_policy,
            request_timeout: settings.request_timeout,
        };

        let rows = client.retrieve_multiple(&Query::new("organizations").column("name")).await?;
        if let Some(name) = rows.first().and_then(|row| row.get_str("name")) {
            client.environment.organization_name = name.to_string();
        } else {
            log::warn!(target: LOG_TARGET, "environment '{}' did not report an organization name", settings.url);
        }

        log::info!(
            target: LOG_TARGET,
            "connected to '{}' ({})",
            client.environment.organization_name,
            client.api_root
        );

        Ok(client)
    }

    /// The Web API root URL (e.g. `https://contoso.crm.dynamics.com/api/data/v9.2/`).
    #[must_use]
    pub const fn api_root(&self) -> &Url {
        &self.api_root
    }

    fn endpoint(&self, path: &str, query: &str) -> Result<Url> {
        let mut url = self
            .api_root
            .join(path)
            .into_app_err_with(|| format!("building request URL for '{path}'"))?;

        if !query.is_empty() {
            url.set_query(Some(query));
        }

        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T> {
        log::debug!(target: LOG_TARGET, "GET {url}");

        let resp = resilient_get(&self.client, url, &self.retry_policy, self.request_timeout).await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(app_err!("request to '{url}' failed with status {status}: {}", describe_error_body(&body)));
        }

        resp.json::<T>()
            .await
            .into_app_err_with(|| format!("parsing response from '{url}'"))
    }
}

impl MetadataService for WebApiClient {
    fn environment(&self) -> &Environment {
        &self.environment
    }

    async fn retrieve_all_entities(&self) -> Result<Vec<EntityMetadata>> {
        let url = self.endpoint(RETRIEVE_ALL_ENTITIES_PATH, RETRIEVE_ALL_ENTITIES_PARAMS)?;
        let response: RetrieveAllEntitiesResponse = self.get_json(&url).await?;

        log::info!(target: LOG_TARGET, "retrieved {} entity definitions", response.entity_metadata.len());
        Ok(response.entity_metadata)
    }

    async fn retrieve_multiple(&self, query: &Query) -> Result<Vec<Row>> {
        let mut url = self.endpoint(query.table(), &query.to_odata_query())?;
        let mut rows = Vec::new();

        loop {
            let page: Collection<Map<String, Value>> = self.get_json(&url).await?;
            rows.extend(page.value.into_iter().map(Row::from));

            match page.next_link {
                Some(next) => {
                    url = Url::parse(&next).into_app_err_with(|| format!("parsing next page link '{next}'"))?;
                }
                None => break,
            }
        }

        log::debug!(target: LOG_TARGET, "query on '{}' returned {} row(s)", query.table(), rows.len());
        Ok(rows)
    }

    async fn retrieve_entity(&self, metadata_id: Uuid) -> Result<EntityMetadata> {
        let url = self.endpoint(&format!("EntityDefinitions({metadata_id})"), SELECT_ENTITY_NAMES)?;
        self.get_json(&url).await
    }
}

fn build_http_client(settings: &ConnectionSettings) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    let _ = headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_JSON_FULL_METADATA));
    let _ = headers.insert("OData-MaxVersion", HeaderValue::from_static("4.0"));
    let _ = headers.insert("OData-Version", HeaderValue::from_static("4.0"));

    if let Some(token) = &settings.access_token {
        let mut auth_val = HeaderValue::from_str(&format!("Bearer {token}"))?;
        auth_val.set_sensitive(true);
        let _ = headers.insert(AUTHORIZATION, auth_val);
    }

    Ok(reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .timeout(settings.request_timeout)
        .build()?)
}

/// Compute `<environment>/api/data/<version>/`.
fn api_root(environment_url: &Url, api_version: &str) -> Result<Url> {
    let mut base = environment_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    base.set_query(None);
    base.set_fragment(None);

    base.join(&format!("api/data/{api_version}/"))
        .into_app_err_with(|| format!("building Web API URL from '{environment_url}'"))
}

/// Turn an error response body into something readable.
fn describe_error_body(body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        let ErrorBody { code, message } = envelope.error;
        return match (code, message) {
            (Some(code), Some(message)) => format!("{message} ({code})"),
            (None, Some(message)) => message,
            (Some(code), None) => code,
            (None, None) => "no error details".to_string(),
        };
    }

    if body.trim().is_empty() {
        return "empty response body".to_string();
    }

    body.chars().take(MAX_ERROR_BODY_CHARS).collect()
}

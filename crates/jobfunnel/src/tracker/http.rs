use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::domain::{ApplicationDraft, ApplicationId, ApplicationPatch, JobApplication};
use super::gateway::{ApplicationGateway, GatewayError, TransportError};
use super::validation::ValidationError;

const APPLICATIONS_PATH: [&str; 3] = ["api", "v1", "applications"];

/// Gateway speaking to a remote jobfunnel API over HTTP.
///
/// Uses the blocking client; drive it from `spawn_blocking` when inside an
/// async runtime.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: Url,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl HttpGateway {
    pub fn new(base_url: impl AsRef<str>, timeout: Duration) -> Result<Self, TransportError> {
        let raw = base_url.as_ref();
        let base_url = Url::parse(raw)
            .map_err(|err| TransportError::unreachable(format!("invalid base url '{raw}': {err}")))?;
        if base_url.cannot_be_a_base() {
            return Err(TransportError::unreachable(format!(
                "base url '{raw}' cannot carry a path"
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| TransportError::unreachable(format!("failed to build client: {err}")))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    fn collection_url(&self) -> Result<Url, GatewayError> {
        self.endpoint(None)
    }

    fn record_url(&self, id: &ApplicationId) -> Result<Url, GatewayError> {
        self.endpoint(Some(id))
    }

    /// Appends the collection path, and the percent-encoded id when given,
    /// to whatever path the base url already carries.
    fn endpoint(&self, id: Option<&ApplicationId>) -> Result<Url, GatewayError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                TransportError::unreachable(format!("base url '{}' cannot carry a path", self.base_url))
            })?;
            segments.pop_if_empty().extend(APPLICATIONS_PATH);
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        Ok(url)
    }

    fn send(&self, request: reqwest::blocking::RequestBuilder) -> Result<Response, GatewayError> {
        request
            .send()
            .map_err(|err| GatewayError::Transport(TransportError::unreachable(err.to_string())))
    }

    fn json<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
        let status = response.status();
        response.json::<T>().map_err(|err| {
            GatewayError::Transport(TransportError::new(
                status.as_u16(),
                format!("malformed response body: {err}"),
            ))
        })
    }

    /// Maps non-success responses onto the gateway error taxonomy.
    fn check(response: Response, id: Option<&ApplicationId>) -> Result<Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error)
            .unwrap_or_else(|_| {
                if text.is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                } else {
                    text
                }
            });

        match (status, id) {
            (StatusCode::NOT_FOUND, Some(id)) => Err(GatewayError::NotFound(id.clone())),
            (StatusCode::UNPROCESSABLE_ENTITY, _) => {
                Err(GatewayError::Validation(ValidationError::Rejected(message)))
            }
            _ => Err(GatewayError::Transport(TransportError::new(
                status.as_u16(),
                message,
            ))),
        }
    }
}

impl ApplicationGateway for HttpGateway {
    fn fetch_all(&self) -> Result<Vec<JobApplication>, GatewayError> {
        let response = self.send(self.client.get(self.collection_url()?))?;
        Self::json(Self::check(response, None)?)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<JobApplication, GatewayError> {
        let response = self.send(self.client.get(self.record_url(id)?))?;
        Self::json(Self::check(response, Some(id))?)
    }

    fn create(&self, draft: ApplicationDraft) -> Result<JobApplication, GatewayError> {
        let response = self.send(self.client.post(self.collection_url()?).json(&draft))?;
        Self::json(Self::check(response, None)?)
    }

    fn update(
        &self,
        id: &ApplicationId,
        patch: ApplicationPatch,
    ) -> Result<JobApplication, GatewayError> {
        let response = self.send(self.client.patch(self.record_url(id)?).json(&patch))?;
        Self::json(Self::check(response, Some(id))?)
    }

    fn delete(&self, id: &ApplicationId) -> Result<(), GatewayError> {
        let response = self.send(self.client.delete(self.record_url(id)?))?;
        Self::check(response, Some(id))?;
        Ok(())
    }
}

//! REST client for the HR backend.
//!
//! [`HrmsClient`] attaches the employee's bearer token to every call,
//! decodes bodies through [`Envelope`] and classifies failures into
//! [`ClientError`]. Forms are validated and uploads checked before any
//! request is sent. Nothing is retried.

mod attachment;
mod envelope;
mod error;
mod resources;
mod scope;

use std::future::Future;
use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::multipart::Form;
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::cache::{CacheLookup, Screen, TtlCache};
use crate::config::ConfigLoader;
use crate::forms::ValidationErrors;

pub use attachment::{Attachment, UploadKind};
pub use envelope::{Envelope, decode_envelope};
pub use error::{ClientError, ClientResult, GENERIC_FAILURE_MESSAGE};
pub use scope::{RequestScope, ScopedRequest};

impl From<ValidationErrors> for ClientError {
    fn from(errors: ValidationErrors) -> Self {
        ClientError::Validation {
            message: errors.summary(),
            fields: errors.into_fields(),
        }
    }
}

/// Authenticated client for the HR REST API.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HrmsClient {
    base_url: String,
    http: reqwest::Client,
    config: Arc<ConfigLoader>,
}

impl HrmsClient {
    /// Creates a client for `base_url` authenticated with `token`.
    ///
    /// # Example
    ///
    /// ```
    /// use hrms_engine::client::HrmsClient;
    /// use hrms_engine::config::ConfigLoader;
    /// use std::sync::Arc;
    ///
    /// let client = HrmsClient::new(
    ///     "https://hr.example.com/api/",
    ///     "token-123",
    ///     Arc::new(ConfigLoader::default()),
    /// )
    /// .unwrap();
    /// assert_eq!(client.base_url(), "https://hr.example.com/api");
    /// ```
    pub fn new(
        base_url: impl Into<String>,
        token: &str,
        config: Arc<ConfigLoader>,
    ) -> ClientResult<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| ClientError::Configuration(format!("invalid token: {}", e)))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::Configuration(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            config,
        })
    }

    /// The API root, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Policy and catalog used for client-side checks.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
            .header(reqwest::header::ACCEPT, "application/json")
    }

    async fn send_raw(&self, method: &Method, path: &str, request: RequestBuilder) -> ClientResult<Vec<u8>> {
        debug!(%method, path, "Sending request");

        let response = request.send().await.map_err(|e| {
            warn!(%method, path, error = %e, "Request did not reach the server");
            ClientError::Network(e)
        })?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let err = ClientError::from_status(status, &String::from_utf8_lossy(&body));
            warn!(
                %method,
                path,
                status = status.as_u16(),
                error = %err,
                "Request failed"
            );
            return Err(err);
        }

        Ok(body.to_vec())
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
    ) -> ClientResult<T> {
        let body = self.send_raw(&method, path, request).await?;
        Ok(decode_envelope(&body)?)
    }

    /// Reads one screen's data through `cache`, fetching with `fetch` on a miss
    /// and refreshing in the background when stale.
    pub(crate) async fn cached<V, F, Fut>(
        &self,
        cache: &TtlCache,
        screen: Screen,
        fetch: F,
    ) -> ClientResult<CacheLookup<V>>
    where
        V: Serialize + DeserializeOwned + Send + 'static,
        F: FnOnce(HrmsClient) -> Fut,
        Fut: Future<Output = ClientResult<V>> + Send + 'static,
    {
        let ttl = screen.ttl(&self.config.policy().cache);
        let client = self.clone();
        cache.read_through(screen.key(), ttl, move || fetch(client)).await
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.request(Method::GET, path);
        self.send(Method::GET, path, request).await
    }

    pub(crate) async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> ClientResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.request(Method::GET, path).query(query);
        self.send(Method::GET, path, request).await
    }

    pub(crate) async fn get_bytes(&self, path: &str) -> ClientResult<Vec<u8>> {
        let request = self.request(Method::GET, path);
        self.send_raw(&Method::GET, path, request).await
    }

    pub(crate) async fn send_json<T, B>(&self, method: Method, path: &str, body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.request(method.clone(), path).json(body);
        self.send(method, path, request).await
    }

    /// Sends a body-less POST and ignores the response payload.
    pub(crate) async fn post_empty(&self, path: &str) -> ClientResult<()> {
        let request = self.request(Method::POST, path);
        self.send_raw(&Method::POST, path, request).await.map(|_| ())
    }

    pub(crate) async fn send_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> ClientResult<T> {
        let request = self.request(Method::POST, path).multipart(form);
        self.send(Method::POST, path, request).await
    }
}

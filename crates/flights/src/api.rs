//! HTTP access to the flight backend.

use std::str::FromStr;

use reqwest::Url;
use runtime::LookupFailure;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{Error, Result};

/// Backend that serves both the status and the cost endpoints.
pub const DEFAULT_BASE_URL: &str = "https://backend-lm-agent-lm-agent.pubfed4-ocp-7e584e106e8632fde4ff5d99d5f27ba6-0000.us-south.containers.appdomain.cloud";

/// An http(s) URL that path segments can be appended to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(Url);

impl BaseUrl {
    pub fn parse(url: &str) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidBaseUrl {
            url: url.to_string(),
            reason,
        };

        let parsed = Url::parse(url).map_err(|e| invalid(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
        }
        if parsed.cannot_be_a_base() {
            return Err(invalid("cannot carry a path".to_string()));
        }
        Ok(Self(parsed))
    }

    /// Append `segments` to the base path, percent-encoding each one.
    ///
    /// A trailing `/` on the base is dropped first, so `http://h/api/` and
    /// `http://h/api` join identically.
    pub fn join<I, S>(&self, segments: I) -> Url
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut url = self.0.clone();
        // Infallible: `parse` rejects cannot-be-a-base URLs.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

impl FromStr for BaseUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// JSON-over-GET client for the flight backend.
///
/// Holds no state beyond its base URL and HTTP client handle, so one value
/// can serve any number of concurrent lookups.
#[derive(Debug, Clone)]
pub struct FlightApi {
    http: reqwest::Client,
    base: BaseUrl,
}

impl FlightApi {
    pub fn new(base: BaseUrl) -> Self {
        Self::with_client(base, reqwest::Client::new())
    }

    pub fn with_client(base: BaseUrl, http: reqwest::Client) -> Self {
        Self { http, base }
    }

    pub fn base(&self) -> &BaseUrl {
        &self.base
    }

    /// Issue one GET and decode a 2xx body as `T`.
    ///
    /// Transport errors, non-2xx statuses and undecodable bodies stay
    /// distinct in the returned [`LookupFailure`].
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
    ) -> std::result::Result<T, LookupFailure> {
        debug!(%url, "GET");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| LookupFailure::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupFailure::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| LookupFailure::transport(e.to_string()))?;

        serde_json::from_slice(&body).map_err(|e| LookupFailure::decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stub::{StubUpstream, client, unreachable_base};
    use serde_json::{Value, json};

    #[test]
    fn join_tolerates_trailing_slash() {
        let with = BaseUrl::parse("http://flights.test/api/").unwrap();
        let without = BaseUrl::parse("http://flights.test/api").unwrap();
        assert_eq!(
            with.join(["flights", "AA777"]).as_str(),
            "http://flights.test/api/flights/AA777"
        );
        assert_eq!(with.join(["x"]), without.join(["x"]));
    }

    #[test]
    fn join_on_bare_host() {
        let base = BaseUrl::parse("https://flights.test").unwrap();
        assert_eq!(
            base.join(["cost", "DFW"]).as_str(),
            "https://flights.test/cost/DFW"
        );
    }

    #[test]
    fn join_encodes_segments() {
        let base = BaseUrl::parse("http://flights.test").unwrap();
        assert_eq!(
            base.join(["flights", "AA 7/77"]).as_str(),
            "http://flights.test/flights/AA%207%2F77"
        );
    }

    #[test]
    fn rejects_unusable_base() {
        assert!(BaseUrl::parse("not a url").is_err());
        assert!(BaseUrl::parse("ftp://flights.test").is_err());
        assert!(BaseUrl::parse("mailto:ops@flights.test").is_err());
        assert!("http://flights.test".parse::<BaseUrl>().is_ok());
    }

    #[test]
    fn default_base_is_valid() {
        assert!(BaseUrl::parse(DEFAULT_BASE_URL).is_ok());
    }

    #[tokio::test]
    async fn get_json_distinguishes_failures() {
        let upstream = StubUpstream::builder()
            .json("/ok", json!({ "a": 1 }))
            .status("/down", 503)
            .raw("/garbled", "<html>")
            .start()
            .await;
        let api = upstream.api();

        let ok: Value = api.get_json(upstream.base().join(["ok"])).await.unwrap();
        assert_eq!(ok, json!({ "a": 1 }));

        let down = api
            .get_json::<Value>(upstream.base().join(["down"]))
            .await
            .unwrap_err();
        assert_eq!(down, LookupFailure::Status { status: 503 });

        let garbled = api
            .get_json::<Value>(upstream.base().join(["garbled"]))
            .await
            .unwrap_err();
        assert!(matches!(garbled, LookupFailure::Decode { .. }));

        let missing = api
            .get_json::<Value>(upstream.base().join(["nowhere"]))
            .await
            .unwrap_err();
        assert_eq!(missing, LookupFailure::Status { status: 404 });
    }

    #[tokio::test]
    async fn get_json_reports_transport_failure() {
        let base = unreachable_base().await;
        let api = FlightApi::with_client(base.clone(), client());
        let err = api.get_json::<Value>(base.join(["ok"])).await.unwrap_err();
        assert!(matches!(err, LookupFailure::Transport { .. }));
    }
}

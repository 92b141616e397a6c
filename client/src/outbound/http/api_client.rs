//! Shared reqwest client for the Stitch REST API.
//!
//! This type owns transport details only: endpoint resolution, the session
//! cookie jar, the optional request timeout and envelope decoding. Mapping to
//! port errors happens in the adapters.

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::dto::ApiEnvelope;

const USER_ME_PATH: &str = "api/users/me";
const MAJORS_LIST_PATH: &str = "api/majors/list";
const MAJORS_SELECT_PATH: &str = "api/majors/select";

/// Session and transport settings for [`StitchApi`].
#[derive(Debug, Clone, Default)]
pub struct StitchApiOptions {
    /// Raw `name=value` cookie identifying the logged-in session.
    pub session_cookie: Option<String>,
    /// Per-request timeout. Requests wait indefinitely when unset.
    pub timeout: Option<Duration>,
}

/// Errors raised while building a [`StitchApi`].
#[derive(Debug, Error)]
pub enum StitchApiBuildError {
    /// An endpoint could not be resolved against the server URL.
    #[error("invalid Stitch API endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
    /// The reqwest client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// HTTP client bound to one Stitch server and one session.
pub struct StitchApi {
    client: Client,
    user_me: Url,
    majors_list: Url,
    majors_select: Url,
}

impl StitchApi {
    /// Build a client for the server at `base_url`.
    ///
    /// Endpoints resolve below the base path, so `http://host/stitch` and
    /// `http://host/stitch/` address the same API.
    /// ```rust,ignore
    /// let api = StitchApi::new(base_url, StitchApiOptions::default())?;
    /// ```
    /// # Errors
    ///
    /// Returns an error when an endpoint cannot be resolved or the reqwest
    /// client cannot be constructed.
    pub fn new(base_url: Url, options: StitchApiOptions) -> Result<Self, StitchApiBuildError> {
        let base = with_trailing_slash(base_url);

        let jar = Jar::default();
        if let Some(cookie) = options.session_cookie.as_deref() {
            jar.add_cookie_str(cookie, &base);
        }
        let mut builder = Client::builder().cookie_provider(Arc::new(jar));
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            user_me: base.join(USER_ME_PATH)?,
            majors_list: base.join(MAJORS_LIST_PATH)?,
            majors_select: base.join(MAJORS_SELECT_PATH)?,
        })
    }

    pub(super) const fn user_me_url(&self) -> &Url {
        &self.user_me
    }

    pub(super) const fn majors_list_url(&self) -> &Url {
        &self.majors_list
    }

    pub(super) const fn majors_select_url(&self) -> &Url {
        &self.majors_select
    }

    pub(super) async fn get(&self, url: &Url) -> Result<RawReply, reqwest::Error> {
        let request = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json");
        Self::send(request, url).await
    }

    pub(super) async fn post_json<T>(&self, url: &Url, body: &T) -> Result<RawReply, reqwest::Error>
    where
        T: Serialize + ?Sized,
    {
        let request = self
            .client
            .post(url.clone())
            .header(ACCEPT, "application/json")
            .json(body);
        Self::send(request, url).await
    }

    async fn send(request: RequestBuilder, url: &Url) -> Result<RawReply, reqwest::Error> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();
        debug!(%url, status = status.as_u16(), bytes = body.len(), "Stitch API answered");
        Ok(RawReply { status, body })
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

/// Status and body of one API response.
pub(super) struct RawReply {
    pub(super) status: StatusCode,
    pub(super) body: Vec<u8>,
}

/// Envelope-level reading of a response.
#[derive(Debug, PartialEq)]
pub(super) enum EnvelopeOutcome {
    /// 2xx status and `code == "SUCCESS"`; carries `result` as sent.
    Success(Option<Value>),
    /// Anything else, with the server's `message` when the body had one.
    Failure {
        status: StatusCode,
        message: Option<String>,
    },
}

impl RawReply {
    /// Decode the envelope.
    ///
    /// Undecodable bodies on a non-2xx status are plain failures; on a 2xx
    /// status they are decode errors.
    pub(super) fn into_outcome(self) -> Result<EnvelopeOutcome, serde_json::Error> {
        match serde_json::from_slice::<ApiEnvelope>(&self.body) {
            Ok(envelope) if self.status.is_success() && envelope.is_success() => {
                Ok(EnvelopeOutcome::Success(envelope.result))
            }
            Ok(envelope) => Ok(EnvelopeOutcome::Failure {
                status: self.status,
                message: envelope.message,
            }),
            Err(error) if self.status.is_success() => Err(error),
            Err(_) => {
                debug!(
                    status = self.status.as_u16(),
                    body = %body_preview(&self.body),
                    "non-envelope error body"
                );
                Ok(EnvelopeOutcome::Failure {
                    status: self.status,
                    message: None,
                })
            }
        }
    }
}

pub(super) fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for endpoint resolution and envelope decoding.

    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn reply(status: u16, body: &str) -> RawReply {
        RawReply {
            status: StatusCode::from_u16(status).expect("valid status"),
            body: body.as_bytes().to_vec(),
        }
    }

    #[rstest]
    #[case::root("http://localhost:8080", "http://localhost:8080/api/users/me")]
    #[case::root_slash("http://localhost:8080/", "http://localhost:8080/api/users/me")]
    #[case::prefix("http://example.test/stitch", "http://example.test/stitch/api/users/me")]
    #[case::prefix_slash("http://example.test/stitch/", "http://example.test/stitch/api/users/me")]
    fn resolves_endpoints_below_base_path(#[case] base: &str, #[case] expected: &str) {
        let api = StitchApi::new(
            Url::parse(base).expect("valid base"),
            StitchApiOptions::default(),
        )
        .expect("client builds");

        assert_eq!(api.user_me_url().as_str(), expected);
        assert!(api.majors_list_url().as_str().ends_with("/api/majors/list"));
        assert!(api.majors_select_url().as_str().ends_with("/api/majors/select"));
    }

    #[rstest]
    fn success_needs_status_and_code() {
        let outcome = reply(200, r#"{"code":"SUCCESS","result":{"id":1}}"#)
            .into_outcome()
            .expect("decodes");
        assert_eq!(outcome, EnvelopeOutcome::Success(Some(json!({"id": 1}))));
    }

    #[rstest]
    #[case::error_code(200, r#"{"code":"FAIL","message":"nope"}"#, Some("nope"))]
    #[case::error_status(400, r#"{"code":"SUCCESS","message":"odd"}"#, Some("odd"))]
    #[case::html_error(502, "<html>Bad Gateway</html>", None)]
    #[case::empty_error(500, "", None)]
    fn everything_else_is_a_failure(
        #[case] status: u16,
        #[case] body: &str,
        #[case] message: Option<&str>,
    ) {
        let outcome = reply(status, body).into_outcome().expect("decodes");
        assert_eq!(
            outcome,
            EnvelopeOutcome::Failure {
                status: StatusCode::from_u16(status).expect("valid status"),
                message: message.map(str::to_owned),
            }
        );
    }

    #[rstest]
    fn undecodable_success_body_is_an_error() {
        assert!(reply(200, "not json").into_outcome().is_err());
    }

    #[rstest]
    fn body_preview_compacts_and_truncates() {
        assert_eq!(body_preview(b"  a \n b  "), "a b");
        let long = "x".repeat(200);
        let preview = body_preview(long.as_bytes());
        assert_eq!(preview.chars().count(), 163);
        assert!(preview.ends_with("..."));
    }
}

//! Reqwest-backed major catalogue adapter.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::api_client::{EnvelopeOutcome, StitchApi};
use crate::domain::MajorCatalogue;
use crate::domain::ports::{MajorCatalog, MajorCatalogError};

/// Major catalogue served by `/api/majors/list`.
pub struct HttpMajorCatalog {
    api: Arc<StitchApi>,
}

impl HttpMajorCatalog {
    /// Build an adapter sharing `api` and its session.
    pub const fn new(api: Arc<StitchApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl MajorCatalog for HttpMajorCatalog {
    async fn list_majors(&self) -> Result<MajorCatalogue, MajorCatalogError> {
        let reply = self
            .api
            .get(self.api.majors_list_url())
            .await
            .map_err(map_transport_error)?;
        let status = reply.status;
        if !status.is_success() {
            return Err(MajorCatalogError::unsuccessful(status.as_u16()));
        }
        let outcome = reply.into_outcome().map_err(|error| {
            MajorCatalogError::decode(format!("invalid major list JSON payload: {error}"))
        })?;

        match outcome {
            EnvelopeOutcome::Success(Some(result)) => parse_majors(result),
            EnvelopeOutcome::Success(None) => {
                Err(MajorCatalogError::decode("major list response carried no result"))
            }
            EnvelopeOutcome::Failure { .. } => Err(MajorCatalogError::decode(
                "major list response was not successful",
            )),
        }
    }
}

fn parse_majors(result: Value) -> Result<MajorCatalogue, MajorCatalogError> {
    if !result.is_array() {
        return Err(MajorCatalogError::decode("major list result is not an array"));
    }
    serde_json::from_value(result)
        .map_err(|error| MajorCatalogError::decode(format!("invalid major entry: {error}")))
}

fn map_transport_error(error: reqwest::Error) -> MajorCatalogError {
    if error.is_timeout() {
        MajorCatalogError::timeout(error.to_string())
    } else {
        MajorCatalogError::transport(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Identifier;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn parses_majors_in_server_order() {
        let majors = parse_majors(json!([
            {"id": 2, "name": "Physics"},
            {"id": "cs", "name": "Computer Science"}
        ]))
        .expect("list decodes");

        assert_eq!(majors.len(), 2);
        assert_eq!(majors.name_of(&Identifier::from("cs")), Some("Computer Science"));
    }

    #[rstest]
    #[case::object(json!({"id": 1, "name": "Physics"}))]
    #[case::null(json!(null))]
    #[case::missing_name(json!([{"id": 1}]))]
    fn rejects_unexpected_shapes(#[case] result: Value) {
        let error = parse_majors(result).expect_err("shape is wrong");
        assert!(matches!(error, MajorCatalogError::Decode { .. }));
    }
}

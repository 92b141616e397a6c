//! Reqwest-backed user directory adapter.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::api_client::{EnvelopeOutcome, StitchApi};
use super::dto::SelectMajorRequestDto;
use crate::domain::ports::{UserDirectory, UserDirectoryError};
use crate::domain::{Identifier, SelectionConfirmation, UserRecord, is_present};

/// User directory served by `/api/users/me` and `/api/majors/select`.
pub struct HttpUserDirectory {
    api: Arc<StitchApi>,
}

impl HttpUserDirectory {
    /// Build an adapter sharing `api` and its session.
    pub const fn new(api: Arc<StitchApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    async fn current_user(&self) -> Result<UserRecord, UserDirectoryError> {
        let reply = self
            .api
            .get(self.api.user_me_url())
            .await
            .map_err(map_transport_error)?;
        let outcome = reply.into_outcome().map_err(|error| {
            UserDirectoryError::decode(format!("invalid user JSON payload: {error}"))
        })?;

        match outcome {
            EnvelopeOutcome::Success(Some(result)) if is_present(&result) => parse_user(result),
            EnvelopeOutcome::Success(_) => Err(UserDirectoryError::decode(
                "user response carried no result",
            )),
            EnvelopeOutcome::Failure { status, message } if status.is_success() => {
                debug!(?message, "user lookup answered with a non-success code");
                Err(UserDirectoryError::decode("user response was not successful"))
            }
            EnvelopeOutcome::Failure { status, .. } => {
                Err(UserDirectoryError::unsuccessful(status.as_u16()))
            }
        }
    }

    async fn update_major(
        &self,
        user_id: &Identifier,
        major_id: &Identifier,
    ) -> Result<Option<SelectionConfirmation>, UserDirectoryError> {
        let body = SelectMajorRequestDto { user_id, major_id };
        let reply = self
            .api
            .post_json(self.api.majors_select_url(), &body)
            .await
            .map_err(map_transport_error)?;
        let outcome = reply.into_outcome().map_err(|error| {
            UserDirectoryError::decode(format!("invalid selection JSON payload: {error}"))
        })?;

        match outcome {
            EnvelopeOutcome::Success(result) => Ok(result
                .filter(is_present)
                .map(SelectionConfirmation::new)),
            EnvelopeOutcome::Failure {
                message: Some(message),
                ..
            } if !message.is_empty() => Err(UserDirectoryError::rejected(message)),
            EnvelopeOutcome::Failure { status, .. } => {
                Err(UserDirectoryError::unsuccessful(status.as_u16()))
            }
        }
    }
}

fn parse_user(result: Value) -> Result<UserRecord, UserDirectoryError> {
    serde_json::from_value(result)
        .map_err(|error| UserDirectoryError::decode(format!("user result is not an object: {error}")))
}

fn map_transport_error(error: reqwest::Error) -> UserDirectoryError {
    if error.is_timeout() {
        UserDirectoryError::timeout(error.to_string())
    } else {
        UserDirectoryError::transport(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn parses_object_results() {
        let user = parse_user(json!({"id": 3, "nickname": "Ada"})).expect("object decodes");
        assert_eq!(user.user_id(), Some(Identifier::Number(3)));
    }

    #[rstest]
    #[case::array(json!([1, 2]))]
    #[case::text(json!("ada"))]
    fn rejects_non_object_results(#[case] result: Value) {
        let error = parse_user(result).expect_err("shape is wrong");
        assert!(matches!(error, UserDirectoryError::Decode { .. }));
    }
}

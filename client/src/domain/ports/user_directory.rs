//! Driven port for the remote user directory.
//!
//! The directory owns the authoritative user profile. The client reads the
//! current session's user from it and asks it to record a major selection.

use async_trait::async_trait;
use serde_json::json;

use super::define_port_error;
use crate::domain::{Identifier, SelectionConfirmation, UserRecord};

define_port_error! {
    /// Errors surfaced by user directory adapters.
    pub enum UserDirectoryError {
        /// The request never produced a response.
        Transport { message: String } =>
            "user directory transport failed: {message}",
        /// The request exceeded the configured timeout.
        Timeout { message: String } =>
            "user directory timed out: {message}",
        /// The server answered without success and explained why.
        Rejected { message: String } =>
            "user directory rejected the request: {message}",
        /// The server answered without success and gave no reason.
        Unsuccessful { status: u16 } =>
            "user directory answered without success (status {status})",
        /// The response body did not have the expected shape.
        Decode { message: String } =>
            "user directory response decode failed: {message}",
    }
}

impl UserDirectoryError {
    /// Message supplied by the server, when the failure carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message } => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Port for reading and updating the current user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch the profile of the user owning the current session.
    async fn current_user(&self) -> Result<UserRecord, UserDirectoryError>;

    /// Record `major_id` as the major of `user_id`.
    ///
    /// Returns the server's confirmation payload, or `None` when the server
    /// confirmed success without one.
    async fn update_major(
        &self,
        user_id: &Identifier,
        major_id: &Identifier,
    ) -> Result<Option<SelectionConfirmation>, UserDirectoryError>;
}

/// Offline directory used by the CLI demo mode and in tests.
///
/// It always reports the same user and echoes major selections back.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserDirectory;

#[async_trait]
impl UserDirectory for FixtureUserDirectory {
    async fn current_user(&self) -> Result<UserRecord, UserDirectoryError> {
        serde_json::from_value(json!({
            "id": 1,
            "nickname": "Ada",
            "userCamInfo": {}
        }))
        .map_err(|err| UserDirectoryError::decode(format!("invalid fixture user: {err}")))
    }

    async fn update_major(
        &self,
        _user_id: &Identifier,
        major_id: &Identifier,
    ) -> Result<Option<SelectionConfirmation>, UserDirectoryError> {
        Ok(Some(SelectionConfirmation::new(json!({
            "id": major_id.to_value()
        }))))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_directory_reports_a_resolvable_user() {
        let user = FixtureUserDirectory
            .current_user()
            .await
            .expect("fixture user");
        assert_eq!(user.user_id(), Some(Identifier::Number(1)));
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_directory_echoes_the_selected_major() {
        let confirmation = FixtureUserDirectory
            .update_major(&Identifier::Number(1), &Identifier::from("cs"))
            .await
            .expect("fixture update")
            .expect("fixture confirms with a payload");
        assert_eq!(confirmation.major_id(), Some(Identifier::from("cs")));
    }

    #[rstest]
    fn only_rejections_carry_a_server_message() {
        assert_eq!(
            UserDirectoryError::rejected("Major is full").server_message(),
            Some("Major is full")
        );
        assert_eq!(UserDirectoryError::unsuccessful(500_u16).server_message(), None);
    }
}

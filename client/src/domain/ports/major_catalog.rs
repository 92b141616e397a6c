//! Driven port for listing the majors a user can choose from.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{Major, MajorCatalogue};

define_port_error! {
    /// Errors surfaced by major catalogue adapters.
    pub enum MajorCatalogError {
        /// The request never produced a response.
        Transport { message: String } =>
            "major catalogue transport failed: {message}",
        /// The request exceeded the configured timeout.
        Timeout { message: String } =>
            "major catalogue timed out: {message}",
        /// The server answered without success.
        Unsuccessful { status: u16 } =>
            "major catalogue answered without success (status {status})",
        /// The success payload was not an ordered list of majors.
        Decode { message: String } =>
            "major catalogue response decode failed: {message}",
    }
}

/// Port for reading the selectable majors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MajorCatalog: Send + Sync {
    /// List every selectable major in display order.
    async fn list_majors(&self) -> Result<MajorCatalogue, MajorCatalogError>;
}

/// Offline catalogue used by the CLI demo mode and in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMajorCatalog;

#[async_trait]
impl MajorCatalog for FixtureMajorCatalog {
    async fn list_majors(&self) -> Result<MajorCatalogue, MajorCatalogError> {
        Ok(MajorCatalogue::new(vec![
            Major::new(1, "Computer Science"),
            Major::new(2, "Mathematics"),
            Major::new(3, "Business Administration"),
        ]))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::Identifier;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_catalog_lists_majors_in_order() {
        let majors = FixtureMajorCatalog.list_majors().await.expect("fixture list");
        assert_eq!(majors.len(), 3);
        assert_eq!(majors.name_of(&Identifier::Number(2)), Some("Mathematics"));
    }
}

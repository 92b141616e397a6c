//! DTOs for the Stitch REST envelope.
//!
//! Every endpoint answers `{ "code", "message"?, "result"? }`. Adapters decode
//! the envelope first, then map `result` into domain types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::Identifier;

pub(super) const SUCCESS_CODE: &str = "SUCCESS";

#[derive(Debug, Deserialize)]
pub(super) struct ApiEnvelope {
    #[serde(default)]
    pub(super) code: Option<String>,
    #[serde(default)]
    pub(super) message: Option<String>,
    #[serde(default)]
    pub(super) result: Option<Value>,
}

impl ApiEnvelope {
    pub(super) fn is_success(&self) -> bool {
        self.code.as_deref() == Some(SUCCESS_CODE)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SelectMajorRequestDto<'a> {
    pub(super) user_id: &'a Identifier,
    pub(super) major_id: &'a Identifier,
}

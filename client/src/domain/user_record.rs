//! Current user's profile as held by the session cache.
//!
//! The record is kept as an open JSON object: the client only interprets the
//! identifier and major fields, and every other field must survive cache
//! merges untouched because other pages read them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{Identifier, SelectionConfirmation};

/// Candidate identifier fields, in lookup priority order.
pub const USER_ID_FIELDS: [&str; 3] = ["id", "userId", "user_id"];

const MAJOR_ID_FIELD: &str = "majorId";
const CAM_INFO_FIELD: &str = "userCamInfo";
const CAM_INFO_MAJOR_FIELD: &str = "major";
const MAJOR_NAME_FIELD: &str = "majorName";

/// Session user profile.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use stitch_client::domain::{Identifier, UserRecord};
///
/// let record: UserRecord =
///     serde_json::from_value(json!({ "userId": "u-7", "majorId": 3 })).expect("object");
/// assert_eq!(record.user_id(), Some(Identifier::from("u-7")));
/// assert_eq!(record.current_major_id(), Some(Identifier::Number(3)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserRecord(Map<String, Value>);

impl UserRecord {
    /// Wrap an existing JSON object.
    pub const fn from_map(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Borrow the underlying fields.
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Take ownership of the underlying fields.
    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }

    /// Read a single top-level field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Resolve the user identifier by trying [`USER_ID_FIELDS`] in order.
    ///
    /// The first field holding a set integer or string wins; unset values and
    /// values of other shapes fall through to the next candidate.
    pub fn user_id(&self) -> Option<Identifier> {
        USER_ID_FIELDS
            .iter()
            .find_map(|field| self.0.get(*field).and_then(Identifier::from_value))
    }

    /// The user's current major: top-level `majorId`, else
    /// `userCamInfo.major.id`.
    pub fn current_major_id(&self) -> Option<Identifier> {
        self.0
            .get(MAJOR_ID_FIELD)
            .and_then(Identifier::from_value)
            .or_else(|| {
                self.0
                    .get(CAM_INFO_FIELD)
                    .and_then(|info| info.get(CAM_INFO_MAJOR_FIELD))
                    .and_then(|major| major.get("id"))
                    .and_then(Identifier::from_value)
            })
    }

    /// Display name stored alongside a partially updated major.
    pub fn major_name(&self) -> Option<&str> {
        self.0.get(MAJOR_NAME_FIELD).and_then(Value::as_str)
    }

    /// Merge a freshly fetched record over this one.
    ///
    /// Every field of `fresh` overwrites the cached value; fields missing from
    /// `fresh` keep their cached value. The merge is shallow: nested objects
    /// from `fresh` replace cached ones wholesale.
    #[must_use]
    pub fn merged_with(mut self, fresh: Self) -> Self {
        self.0.extend(fresh.0);
        self
    }

    /// Record a confirmed major selection locally.
    ///
    /// Ensures the `userCamInfo` container exists (a missing or non-object
    /// value is replaced by an empty object), stores the confirmation under
    /// `userCamInfo.major` and, when given, the display name under
    /// `majorName`. No other field is touched.
    #[must_use]
    pub fn with_major_selection(
        mut self,
        confirmation: SelectionConfirmation,
        major_name: Option<&str>,
    ) -> Self {
        let info = self
            .0
            .entry(CAM_INFO_FIELD)
            .or_insert_with(|| Value::Object(Map::new()));
        if !info.is_object() {
            *info = Value::Object(Map::new());
        }
        if let Value::Object(container) = info {
            container.insert(CAM_INFO_MAJOR_FIELD.to_owned(), confirmation.into_value());
        }

        if let Some(name) = major_name {
            self.0
                .insert(MAJOR_NAME_FIELD.to_owned(), Value::from(name));
        }
        self
    }
}

impl From<Map<String, Value>> for UserRecord {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}

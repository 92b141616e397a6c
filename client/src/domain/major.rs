//! Academic majors offered for selection.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::Identifier;

/// One academic program as listed by the major catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Major {
    id: Identifier,
    #[serde(default, deserialize_with = "name_or_blank")]
    name: String,
}

fn name_or_blank<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Major {
    /// Build a new [`Major`].
    pub fn new(id: impl Into<Identifier>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Stable identifier of the major.
    pub const fn id(&self) -> &Identifier {
        &self.id
    }

    /// Display name of the major.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

/// Ordered list of majors fetched for one selection flow.
///
/// The order is the order the server returned; lookups match identifiers
/// strictly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MajorCatalogue(Vec<Major>);

impl MajorCatalogue {
    /// Wrap an ordered list of majors.
    pub const fn new(majors: Vec<Major>) -> Self {
        Self(majors)
    }

    /// Find the major with the given identifier.
    pub fn find(&self, id: &Identifier) -> Option<&Major> {
        self.0.iter().find(|major| major.id() == id)
    }

    /// Display name of the major with the given identifier, if listed with
    /// a non-empty name.
    pub fn name_of(&self, id: &Identifier) -> Option<&str> {
        self.find(id)
            .map(Major::name)
            .filter(|name| !name.is_empty())
    }

    /// Iterate over the majors in server order.
    pub fn iter(&self) -> std::slice::Iter<'_, Major> {
        self.0.iter()
    }

    /// Number of listed majors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the catalogue lists no majors.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a MajorCatalogue {
    type Item = &'a Major;
    type IntoIter = std::slice::Iter<'a, Major>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<Vec<Major>> for MajorCatalogue {
    fn from(value: Vec<Major>) -> Self {
        Self(value)
    }
}

/// Result payload returned by a successful major update.
///
/// The server describes the selected major here; it is not a full user
/// record, so the client stores it verbatim as the nested major info.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionConfirmation(Value);

impl SelectionConfirmation {
    /// Wrap the raw confirmation payload.
    pub const fn new(payload: Value) -> Self {
        Self(payload)
    }

    /// Identifier of the confirmed major, when the payload carries one.
    pub fn major_id(&self) -> Option<Identifier> {
        self.0.get("id").and_then(Identifier::from_value)
    }

    /// Borrow the raw payload.
    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    /// Take ownership of the raw payload.
    pub fn into_value(self) -> Value {
        self.0
    }
}

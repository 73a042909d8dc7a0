use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field names carried by every record that are never merged per-field.
///
/// They are recomputed on resolution instead.
pub const METADATA_FIELDS: [&str; 4] = ["id", "version", "updatedAt", "createdAt"];

/// Returns true if `name` is one of [`METADATA_FIELDS`].
#[must_use]
pub fn is_metadata_field(name: &str) -> bool {
    METADATA_FIELDS.contains(&name)
}

/// A record with an explicit version counter and last-modified time.
///
/// Everything that is not metadata lives in `fields`, whose structure is
/// defined by the table the record came from (vessel, crew member, audit
/// item). Serialized, the fields sit next to the metadata:
///
/// ```json
/// { "id": "v-17", "version": 3, "updatedAt": 1718000000000, "name": "MV Aurora" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionedRecord {
    pub id: String,
    pub version: u64,
    /// Last modification, epoch milliseconds.
    pub updated_at: i64,
    /// Creation time as the backend reported it: epoch milliseconds or an
    /// ISO-8601 string. Never merged per field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Value>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl VersionedRecord {
    /// Creates a record with no fields.
    pub fn new(id: impl Into<String>, version: u64, updated_at: i64) -> Self {
        Self {
            id: id.into(),
            version,
            updated_at,
            created_at: None,
            fields: Map::new(),
        }
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Builder-style setter for `created_at`.
    #[must_use]
    pub fn with_created_at(mut self, created_at: impl Into<Value>) -> Self {
        self.created_at = Some(created_at.into());
        self
    }

    /// Sets a field value. Metadata names are rejected and return `false`;
    /// use the struct fields for those.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> bool {
        let name = name.into();
        if is_metadata_field(&name) {
            return false;
        }
        self.fields.insert(name, value.into());
        true
    }

    /// Returns a field value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Returns a string field value.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|v| v.as_str())
    }

    /// Names of the non-metadata fields.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields
            .keys()
            .map(String::as_str)
            .filter(|name| !is_metadata_field(name))
    }

    /// Names of every non-metadata field whose value differs between the two
    /// records, or that is present on only one side.
    ///
    /// Order: this record's fields first, then fields only `other` has.
    pub fn differing_fields(&self, other: &Self) -> Vec<String> {
        self.field_union(other)
            .into_iter()
            .filter(|name| self.get(name) != other.get(name))
            .map(str::to_owned)
            .collect()
    }

    /// Returns true if both records agree on every non-metadata field.
    pub fn same_fields(&self, other: &Self) -> bool {
        self.differing_fields(other).is_empty()
    }

    /// Union of both records' non-metadata field names: this record's
    /// first, then names only `other` has.
    pub fn field_union<'a>(&'a self, other: &'a Self) -> Vec<&'a str> {
        let mut names: Vec<&str> = self.field_names().collect();
        names.extend(other.field_names().filter(|name| !self.fields.contains_key(*name)));
        names
    }
}

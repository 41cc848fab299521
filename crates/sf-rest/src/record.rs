//! Record types, their field tables and the codec that turns them into
//! request bodies.
//!
//! A record type lists its fields once in [`Record::FIELDS`]. That table is
//! the projection used by `find_by_id` and the filter [`RecordCodec`] applies
//! when building create and update bodies.
//!
//! ```rust,ignore
//! #[derive(Serialize, Deserialize)]
//! struct Account {
//!     #[serde(rename = "Id", skip_serializing_if = "Option::is_none")]
//!     id: Option<String>,
//!     #[serde(rename = "Name")]
//!     name: String,
//! }
//!
//! impl Record for Account {
//!     const FIELDS: &'static [FieldSpec] = &[
//!         FieldSpec::wire("id", "Id").read_only(),
//!         FieldSpec::wire("name", "Name"),
//!     ];
//! }
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, ErrorKind, Result};

/// Metadata for one field of a record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name on the Rust side.
    pub name: &'static str,
    /// Field name on the wire. Must match the serialized key.
    pub wire_name: &'static str,
    /// Sent in create bodies.
    pub include_on_create: bool,
    /// Sent in update bodies.
    pub include_on_update: bool,
}

impl FieldSpec {
    /// A field whose wire name equals its Rust name.
    pub const fn new(name: &'static str) -> Self {
        Self::wire(name, name)
    }

    /// A field serialized under a different wire name.
    pub const fn wire(name: &'static str, wire_name: &'static str) -> Self {
        Self {
            name,
            wire_name,
            include_on_create: true,
            include_on_update: true,
        }
    }

    /// Queried, never written (`Id`, system audit fields, formulas).
    pub const fn read_only(mut self) -> Self {
        self.include_on_create = false;
        self.include_on_update = false;
        self
    }

    /// Written on create only.
    pub const fn create_only(mut self) -> Self {
        self.include_on_update = false;
        self
    }
}

/// A typed record of some object.
pub trait Record: Serialize + DeserializeOwned {
    /// Fields in projection order.
    const FIELDS: &'static [FieldSpec];

    /// Wire names of [`FIELDS`](Record::FIELDS) in declaration order.
    fn projection() -> Vec<&'static str> {
        Self::FIELDS.iter().map(|field| field.wire_name).collect()
    }
}

/// Encodes request bodies and decodes response bodies.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordCodec;

impl RecordCodec {
    /// Serialize any value into a JSON body. A value that serializes to
    /// `null` is rejected.
    pub fn encode<B: Serialize + ?Sized>(record: &B) -> Result<Value> {
        let value = serde_json::to_value(record).map_err(|e| {
            Error::with_source(
                ErrorKind::InvalidArgument(format!("record could not be serialized: {e}")),
                e,
            )
        })?;
        if value.is_null() {
            return Err(Error::invalid_argument("record must not be null"));
        }
        Ok(value)
    }

    /// Create body: fields marked `include_on_create = false` are removed.
    pub fn for_create<R: Record>(record: &R) -> Result<Value> {
        Self::filtered(record, |field| field.include_on_create)
    }

    /// Update body: fields marked `include_on_update = false` are removed.
    pub fn for_update<R: Record>(record: &R) -> Result<Value> {
        Self::filtered(record, |field| field.include_on_update)
    }

    /// Deserialize a response body.
    pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
        Ok(serde_json::from_str(body)?)
    }

    fn filtered<R: Record>(record: &R, keep: impl Fn(&FieldSpec) -> bool) -> Result<Value> {
        let mut value = Self::encode(record)?;
        let Some(object) = value.as_object_mut() else {
            return Err(Error::invalid_argument(
                "record must serialize to a JSON object",
            ));
        };

        // Keys without an entry in the table are left alone.
        for field in R::FIELDS.iter().filter(|field| !keep(field)) {
            object.remove(field.wire_name);
        }
        Ok(value)
    }
}

//! Decoding of Firestore document CloudEvents (binary content mode, JSON data).
//!
//! Eventarc delivers the CloudEvent attributes as `ce-*` headers and the
//! `DocumentEventData` payload as the body. The payload's documents carry
//! Firestore-typed fields, decoded here into the plain [`DocumentChange`]
//! the handler consumes.

use axum::http::HeaderMap;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::adapter::outbound::firestore::value::decode_fields;
use crate::domain::{DocumentChange, EventId, Fields, ProductId};
use crate::error::{Error, Result};

/// Event type prefix shared by all Firestore document events.
pub const FIRESTORE_EVENT_PREFIX: &str = "google.cloud.firestore.document.v1.";

const DOCUMENT_EVENTS: [&str; 4] = ["written", "created", "updated", "deleted"];

/// CloudEvent attributes read from `ce-*` headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventAttributes {
    pub id: String,
    pub event_type: String,
    pub subject: Option<String>,
}

impl EventAttributes {
    /// Read the attributes from request headers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Event`] when `ce-id` or `ce-type` is missing, or the
    /// type is not a Firestore document event.
    pub fn from_headers(headers: &HeaderMap) -> Result<Self> {
        let id = header(headers, "ce-id")
            .ok_or_else(|| Error::Event("missing ce-id header".into()))?;
        let event_type = header(headers, "ce-type")
            .ok_or_else(|| Error::Event("missing ce-type header".into()))?;

        if !is_document_event(&event_type) {
            return Err(Error::Event(format!(
                "unsupported event type '{event_type}'"
            )));
        }

        Ok(Self {
            id,
            event_type,
            subject: header(headers, "ce-subject"),
        })
    }
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToOwned::to_owned)
}

/// Accepts `...v1.updated` as well as `...v1.updated.withAuthContext`.
fn is_document_event(event_type: &str) -> bool {
    event_type
        .strip_prefix(FIRESTORE_EVENT_PREFIX)
        .and_then(|rest| rest.split('.').next())
        .is_some_and(|kind| DOCUMENT_EVENTS.contains(&kind))
}

/// `DocumentEventData` in its JSON encoding.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentEventData {
    #[serde(default)]
    old_value: Option<FirestoreDocument>,
    #[serde(default)]
    value: Option<FirestoreDocument>,
}

#[derive(Debug, Deserialize)]
struct FirestoreDocument {
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

/// Collection and id of a document, from its resource name or event subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPath {
    pub collection: String,
    pub document_id: String,
}

impl DocumentPath {
    /// Parse `projects/p/databases/d/documents/{...}/{collection}/{id}` or
    /// the subject form `documents/{...}/{collection}/{id}`.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let relative = name
            .split_once("/documents/")
            .map(|(_, rest)| rest)
            .or_else(|| name.strip_prefix("documents/"))?;

        let segments: Vec<&str> = relative.split('/').collect();
        if segments.len() < 2 || segments.len() % 2 != 0 || segments.iter().any(|s| s.is_empty())
        {
            return None;
        }

        let n = segments.len();
        Some(Self {
            collection: segments[n - 2].to_string(),
            document_id: segments[n - 1].to_string(),
        })
    }
}

/// A decoded request: either a change to hand to the notifier, or an event
/// for a collection this service does not watch.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedEvent {
    Change(DocumentChange),
    Foreign { collection: String },
}

/// Decode headers and body into a change for `source_collection`.
///
/// # Errors
///
/// Returns [`Error::Event`] or [`Error::Json`] when the request is not a
/// well-formed Firestore document event.
pub fn decode(headers: &HeaderMap, body: &[u8], source_collection: &str) -> Result<DecodedEvent> {
    let attributes = EventAttributes::from_headers(headers)?;
    if body.is_empty() {
        return Err(Error::Event("empty event body".into()));
    }
    let data: DocumentEventData = serde_json::from_slice(body)?;

    let path = data
        .value
        .as_ref()
        .or(data.old_value.as_ref())
        .and_then(|doc| DocumentPath::parse(&doc.name))
        .or_else(|| attributes.subject.as_deref().and_then(DocumentPath::parse))
        .ok_or_else(|| Error::Event("cannot determine document path".into()))?;

    if path.collection != source_collection {
        return Ok(DecodedEvent::Foreign {
            collection: path.collection,
        });
    }

    let before: Fields = match &data.old_value {
        Some(doc) => decode_fields(&doc.fields)?,
        None => Fields::new(),
    };
    let after = data
        .value
        .as_ref()
        .map(|doc| decode_fields(&doc.fields))
        .transpose()?;

    Ok(DecodedEvent::Change(DocumentChange {
        product_id: ProductId::new(path.document_id),
        event_id: EventId::new(attributes.id),
        before,
        after,
    }))
}

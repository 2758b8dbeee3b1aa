//! Firestore REST implementation of [`NotificationStore`].
//!
//! Writes go through `documents:commit` so a single request can carry the
//! merge mask and the server-timestamp transform for `createdAt`.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

use super::value::encode_fields;
use crate::domain::NotificationRecord;
use crate::error::{Error, Result};
use crate::port::{NotificationStore, TokenSource};

/// Field stamped with the commit time on every write.
const CREATED_AT: &str = "createdAt";

/// Notification store backed by a Firestore collection.
pub struct FirestoreStore {
    client: Client,
    commit_url: Url,
    /// `projects/{project}/databases/{database}/documents`
    documents_root: String,
    collection: String,
    tokens: Arc<dyn TokenSource>,
}

impl FirestoreStore {
    /// Create a store writing into `collection`.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit URL cannot be built from `base_url`.
    pub fn new(
        client: Client,
        base_url: &Url,
        project_id: &str,
        database: &str,
        collection: impl Into<String>,
        tokens: Arc<dyn TokenSource>,
    ) -> Result<Self> {
        let documents_root = format!("projects/{project_id}/databases/{database}/documents");
        let commit_url = base_url.join(&format!("v1/{documents_root}:commit"))?;
        Ok(Self {
            client,
            commit_url,
            documents_root,
            collection: collection.into(),
            tokens,
        })
    }

    /// Full resource name of the notification document.
    #[must_use]
    pub fn document_name(&self, notif_id: &str) -> String {
        format!("{}/{}/{notif_id}", self.documents_root, self.collection)
    }

    fn commit_request(&self, record: &NotificationRecord) -> Result<CommitRequest> {
        let Value::Object(fields) = serde_json::to_value(record)? else {
            return Err(Error::Store("record did not serialize to a map".into()));
        };
        let field_paths = fields.keys().cloned().collect();

        Ok(CommitRequest {
            writes: vec![Write {
                update: Document {
                    name: self.document_name(record.notif_id.as_str()),
                    fields: encode_fields(&fields),
                },
                update_mask: DocumentMask { field_paths },
                update_transforms: vec![FieldTransform {
                    field_path: CREATED_AT,
                    set_to_server_value: "REQUEST_TIME",
                }],
            }],
        })
    }
}

#[derive(Debug, Serialize)]
struct CommitRequest {
    writes: Vec<Write>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Write {
    update: Document,
    update_mask: DocumentMask,
    update_transforms: Vec<FieldTransform>,
}

#[derive(Debug, Serialize)]
struct Document {
    name: String,
    fields: Map<String, Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentMask {
    field_paths: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FieldTransform {
    field_path: &'static str,
    set_to_server_value: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommitResponse {
    #[serde(default)]
    commit_time: Option<String>,
}

#[async_trait]
impl NotificationStore for FirestoreStore {
    fn name(&self) -> &'static str {
        "firestore"
    }

    async fn upsert(&self, record: &NotificationRecord) -> Result<()> {
        let request = self.commit_request(record)?;
        let token = self.tokens.token().await?;

        let response = self
            .client
            .post(self.commit_url.clone())
            .bearer_auth(token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Store(format!(
                "commit of {} failed with {status}: {body}",
                record.notif_id
            )));
        }

        let commit: CommitResponse = response.json().await?;
        tracing::debug!(
            notif_id = %record.notif_id,
            commit_time = commit.commit_time.as_deref().unwrap_or("-"),
            "Firestore commit acknowledged"
        );
        Ok(())
    }
}

//! Firebase Cloud Messaging HTTP v1 push gateway.
//!
//! Provides an implementation of the [`PushGateway`] trait that publishes
//! topic messages through `projects/{project}/messages:send`.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::PushMessage;
use crate::error::{Error, Result};
use crate::port::{PushGateway, TokenSource};

/// FCM HTTP v1 client.
pub struct FcmGateway {
    /// HTTP client for API requests.
    client: Client,
    /// Fully-resolved `messages:send` endpoint.
    send_url: Url,
    /// Bearer token provider.
    tokens: Arc<dyn TokenSource>,
}

impl FcmGateway {
    /// Create a gateway for `project_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the send URL cannot be built from `base_url`.
    pub fn new(
        client: Client,
        base_url: &Url,
        project_id: &str,
        tokens: Arc<dyn TokenSource>,
    ) -> Result<Self> {
        let send_url = base_url.join(&format!("v1/projects/{project_id}/messages:send"))?;
        Ok(Self {
            client,
            send_url,
            tokens,
        })
    }
}

#[derive(Serialize)]
struct SendRequest<'a> {
    message: Message<'a>,
}

#[derive(Serialize)]
struct Message<'a> {
    topic: &'a str,
    notification: Notification<'a>,
    android: AndroidConfig<'a>,
    data: &'a BTreeMap<String, String>,
}

#[derive(Serialize)]
struct Notification<'a> {
    title: &'a str,
    body: &'a str,
}

#[derive(Serialize)]
struct AndroidConfig<'a> {
    notification: AndroidNotification<'a>,
}

#[derive(Serialize)]
struct AndroidNotification<'a> {
    channel_id: &'a str,
    click_action: &'a str,
}

#[derive(Deserialize)]
struct SendResponse {
    name: String,
}

impl<'a> SendRequest<'a> {
    fn from_message(message: &'a PushMessage) -> Self {
        Self {
            message: Message {
                topic: &message.topic,
                notification: Notification {
                    title: &message.title,
                    body: &message.body,
                },
                android: AndroidConfig {
                    notification: AndroidNotification {
                        channel_id: &message.android.channel_id,
                        click_action: &message.android.click_action,
                    },
                },
                data: &message.data,
            },
        }
    }
}

#[async_trait]
impl PushGateway for FcmGateway {
    fn name(&self) -> &'static str {
        "fcm"
    }

    async fn publish(&self, message: &PushMessage) -> Result<String> {
        let token = self.tokens.token().await?;

        let response = self
            .client
            .post(self.send_url.clone())
            .bearer_auth(token)
            .json(&SendRequest::from_message(message))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Push(format!(
                "send to topic '{}' failed with {status}: {body}",
                message.topic
            )));
        }

        Ok(response.json::<SendResponse>().await?.name)
    }
}

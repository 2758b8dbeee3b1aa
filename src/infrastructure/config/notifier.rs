//! Watched collection and alert delivery settings.

use serde::{Deserialize, Serialize};

use crate::domain::AlertRouting;

/// Notifier configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifierConfig {
    /// Collection whose updates are evaluated.
    #[serde(default = "default_source_collection")]
    pub source_collection: String,
    /// Collection notification records are written to.
    #[serde(default = "default_notification_collection")]
    pub notification_collection: String,
    /// Push topic.
    #[serde(default = "default_topic")]
    pub topic: String,
    /// Android notification channel id.
    #[serde(default = "default_android_channel_id")]
    pub android_channel_id: String,
    /// Android click action.
    #[serde(default = "default_click_action")]
    pub click_action: String,
    /// Client route hint in the push data payload.
    #[serde(default = "default_route")]
    pub route: String,
}

fn default_source_collection() -> String {
    "spare_part".into()
}

fn default_notification_collection() -> String {
    "notification".into()
}

fn default_topic() -> String {
    AlertRouting::default().topic
}

fn default_android_channel_id() -> String {
    AlertRouting::default().channel_id
}

fn default_click_action() -> String {
    AlertRouting::default().click_action
}

fn default_route() -> String {
    AlertRouting::default().route
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            source_collection: default_source_collection(),
            notification_collection: default_notification_collection(),
            topic: default_topic(),
            android_channel_id: default_android_channel_id(),
            click_action: default_click_action(),
            route: default_route(),
        }
    }
}

impl NotifierConfig {
    #[must_use]
    pub fn routing(&self) -> AlertRouting {
        AlertRouting {
            topic: self.topic.clone(),
            channel_id: self.android_channel_id.clone(),
            click_action: self.click_action.clone(),
            route: self.route.clone(),
        }
    }
}

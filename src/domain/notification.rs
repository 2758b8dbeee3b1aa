//! Low-stock notification record and the push message derived from it.

use std::collections::BTreeMap;

use serde::Serialize;

use super::id::{EventId, NotificationId, ProductId};
use super::quantity::format_number;

/// Title shown in the in-app feed and the push notification.
pub const ALERT_TITLE: &str = "Low Stock Alert !!!";

/// Alert body for a product that dropped below `threshold`.
#[must_use]
pub fn alert_body(product_name: &str, threshold: f64) -> String {
    format!(
        "Stock for {product_name} has dropped below {} units. Please restock as soon as possible to avoid any potential disruptions.",
        format_number(threshold)
    )
}

/// Persisted low-stock notification.
///
/// Field names follow the document layout read by the client app. The
/// `createdAt` timestamp is assigned by the store at write time and is not
/// part of this struct.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRecord {
    pub notif_id: NotificationId,
    pub title: String,
    pub body: String,
    pub product_id: ProductId,
    pub product_name: String,
    pub stock: f64,
    pub stock_threshold: f64,
    pub image_url: String,
    pub read: bool,
}

impl NotificationRecord {
    /// Build the record for a crossing observed in `event`.
    #[must_use]
    pub fn low_stock(
        product_id: ProductId,
        event_id: &EventId,
        product_name: String,
        image_url: String,
        stock: f64,
        stock_threshold: f64,
    ) -> Self {
        let notif_id = NotificationId::compose(&product_id, event_id);
        let body = alert_body(&product_name, stock_threshold);
        Self {
            notif_id,
            title: ALERT_TITLE.to_string(),
            body,
            product_id,
            product_name,
            stock,
            stock_threshold,
            image_url,
            read: false,
        }
    }
}

/// Where and how alerts are pushed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertRouting {
    /// Broadcast topic subscribed to by the client app.
    pub topic: String,
    /// Android notification channel.
    pub channel_id: String,
    /// Android click action.
    pub click_action: String,
    /// Client-side route hint carried in the data payload.
    pub route: String,
}

impl Default for AlertRouting {
    fn default() -> Self {
        Self {
            topic: "lowStockTopic".into(),
            channel_id: "default_channel".into(),
            click_action: "FLUTTER_NOTIFICATION_CLICK".into(),
            route: "spare_part_detail".into(),
        }
    }
}

/// Platform-specific delivery hints, passed through unvalidated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AndroidHints {
    pub channel_id: String,
    pub click_action: String,
}

/// A topic push message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushMessage {
    pub topic: String,
    pub title: String,
    pub body: String,
    /// String-keyed data payload.
    pub data: BTreeMap<String, String>,
    pub android: AndroidHints,
}

impl PushMessage {
    /// Mirror a stored notification as a push message.
    #[must_use]
    pub fn for_record(record: &NotificationRecord, routing: &AlertRouting) -> Self {
        let data = BTreeMap::from([
            ("notifId".to_string(), record.notif_id.to_string()),
            ("productId".to_string(), record.product_id.to_string()),
            ("productName".to_string(), record.product_name.clone()),
            ("stock".to_string(), format_number(record.stock)),
            (
                "stockThreshold".to_string(),
                format_number(record.stock_threshold),
            ),
            ("imageUrl".to_string(), record.image_url.clone()),
            ("route".to_string(), routing.route.clone()),
        ]);

        Self {
            topic: routing.topic.clone(),
            title: record.title.clone(),
            body: record.body.clone(),
            data,
            android: AndroidHints {
                channel_id: routing.channel_id.clone(),
                click_action: routing.click_action.clone(),
            },
        }
    }
}

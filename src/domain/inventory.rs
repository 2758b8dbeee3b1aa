//! Inventory document snapshots and the change pair delivered by a trigger.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::id::{EventId, ProductId};
use super::quantity::Quantity;

/// Plain field map of a document.
pub type Fields = Map<String, Value>;

const FIELD_NAME: &str = "name";
const FIELD_IMAGE_URL: &str = "imageUrl";
const FIELD_STOCK: &str = "stock";
const FIELD_STOCK_THRESHOLD: &str = "stockThreshold";

/// Read-only view of one version of an inventory document.
#[derive(Debug, Clone, Copy)]
pub struct InventorySnapshot<'a> {
    fields: &'a Fields,
}

impl<'a> InventorySnapshot<'a> {
    #[must_use]
    pub const fn new(fields: &'a Fields) -> Self {
        Self { fields }
    }

    #[must_use]
    pub fn stock(&self) -> Quantity {
        Quantity::coerce(self.fields.get(FIELD_STOCK))
    }

    #[must_use]
    pub fn stock_threshold(&self) -> Quantity {
        Quantity::coerce(self.fields.get(FIELD_STOCK_THRESHOLD))
    }

    /// Display name, falling back to the product id when absent.
    #[must_use]
    pub fn display_name(&self, product: &ProductId) -> String {
        match self.fields.get(FIELD_NAME) {
            Some(Value::String(name)) => name.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => product.as_str().to_string(),
        }
    }

    /// Image URL, empty when absent or not a string.
    #[must_use]
    pub fn image_url(&self) -> String {
        match self.fields.get(FIELD_IMAGE_URL) {
            Some(Value::String(url)) => url.clone(),
            _ => String::new(),
        }
    }
}

/// One update of an inventory document, as delivered by the platform.
///
/// `before` is empty when the previous version did not exist or could not
/// be read; `after` is `None` when the document was deleted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentChange {
    pub product_id: ProductId,
    pub event_id: EventId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub before: Fields,
    #[serde(default)]
    pub after: Option<Fields>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Fields, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Fields>::deserialize(deserializer)?.unwrap_or_default())
}

impl DocumentChange {
    #[must_use]
    pub fn new(
        product_id: impl Into<ProductId>,
        event_id: impl Into<EventId>,
        before: Fields,
        after: Option<Fields>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            event_id: event_id.into(),
            before,
            after,
        }
    }

    /// Previous version, empty when unknown.
    #[must_use]
    pub fn before(&self) -> InventorySnapshot<'_> {
        InventorySnapshot::new(&self.before)
    }

    /// Current version, `None` when the document was deleted.
    #[must_use]
    pub fn after(&self) -> Option<InventorySnapshot<'_>> {
        self.after.as_ref().map(InventorySnapshot::new)
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pantry_core::{DomainError, DomainResult, Entity, ItemId};

use crate::category::Category;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// A lot of perishable goods waiting for distribution.
///
/// Construction validates the on-hand quantity, so every `InventoryItem` the
/// engine sees has `quantity > 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ItemRecord", into = "ItemRecord")]
pub struct InventoryItem {
    id: ItemId,
    name: String,
    quantity: u32,
    category: Category,
    expires_at: DateTime<Utc>,
    humidity: Option<f64>,
}

/// Wire shape of an item; validated on the way in.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ItemRecord {
    id: ItemId,
    name: String,
    quantity: u32,
    category: Category,
    expires_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    humidity: Option<f64>,
}

impl InventoryItem {
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        quantity: u32,
        category: Category,
        expires_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if quantity == 0 {
            return Err(DomainError::validation(format!(
                "item {id}: quantity must be positive"
            )));
        }
        Ok(Self {
            id,
            name,
            quantity,
            category,
            expires_at,
            humidity: None,
        })
    }

    /// Attach the storage humidity (percent relative humidity, 0..=100).
    ///
    /// Carried through serialization for the caller's records only; no
    /// allocation, waste or confidence figure reads it.
    pub fn with_humidity(mut self, humidity: f64) -> DomainResult<Self> {
        if !(humidity.is_finite() && (0.0..=100.0).contains(&humidity)) {
            return Err(DomainError::validation(format!(
                "item {}: humidity must be within 0..=100",
                self.id
            )));
        }
        self.humidity = Some(humidity);
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn humidity(&self) -> Option<f64> {
        self.humidity
    }

    /// Whole days until expiry, rounded up: anything expiring later today
    /// counts as one day, an item that expired an hour ago counts as zero.
    ///
    /// Negative for items that expired more than a day before `now`.
    pub fn days_until_expiry(&self, now: DateTime<Utc>) -> i64 {
        let millis = (self.expires_at - now).num_milliseconds();
        let days = millis.div_euclid(MILLIS_PER_DAY);
        if millis.rem_euclid(MILLIS_PER_DAY) == 0 {
            days
        } else {
            days + 1
        }
    }
}

impl Entity for InventoryItem {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl TryFrom<ItemRecord> for InventoryItem {
    type Error = DomainError;

    fn try_from(record: ItemRecord) -> Result<Self, Self::Error> {
        let item = InventoryItem::new(
            record.id,
            record.name,
            record.quantity,
            record.category,
            record.expires_at,
        )?;
        match record.humidity {
            Some(h) => item.with_humidity(h),
            None => Ok(item),
        }
    }
}

impl From<InventoryItem> for ItemRecord {
    fn from(item: InventoryItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            quantity: item.quantity,
            category: item.category,
            expires_at: item.expires_at,
            humidity: item.humidity,
        }
    }
}

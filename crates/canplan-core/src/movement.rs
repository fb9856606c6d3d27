//! 庫存移動模型（拠點間移動、入荷）
//!
//! 這裡只計算移動後的庫存值，不負責寫回儲存層。

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::inventory::{Inventory, ItemKind, Location};
use crate::order::ProductLine;
use crate::{CanplanError, Result};

/// 拠點間庫存移動
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryTransfer {
    /// 移動ID
    pub id: Uuid,

    /// 移動來源
    pub from_location: Location,

    /// 移動目的地
    pub to_location: Location,

    /// 產品線
    pub product_line: ProductLine,

    /// 品目
    pub item: ItemKind,

    /// 數量
    pub quantity: i64,

    /// 備註
    pub notes: Option<String>,

    /// 建立時間
    pub created_at: DateTime<Utc>,
}

impl InventoryTransfer {
    /// 創建新的庫存移動
    pub fn new(
        from_location: Location,
        to_location: Location,
        product_line: ProductLine,
        item: ItemKind,
        quantity: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            from_location,
            to_location,
            product_line,
            item,
            quantity,
            notes: None,
            created_at: Utc::now(),
        }
    }

    /// 建構器模式：設置備註
    pub fn with_notes(mut self, notes: String) -> Self {
        self.notes = Some(notes);
        self
    }

    /// 驗證移動內容
    pub fn validate(&self) -> Result<()> {
        if self.from_location == self.to_location {
            return Err(CanplanError::InvalidTransfer(format!(
                "移動來源與目的地相同: {}",
                self.from_location
            )));
        }
        if self.quantity <= 0 {
            return Err(CanplanError::InvalidTransfer(format!(
                "移動數量必須為 1 以上: {}",
                self.quantity
            )));
        }
        Ok(())
    }

    /// 計算移動後的庫存
    pub fn apply(&self, inventory: &Inventory) -> Result<Inventory> {
        self.validate()?;

        let available = inventory
            .location(self.from_location)
            .levels(self.product_line)
            .get(self.item);
        if available < self.quantity {
            return Err(CanplanError::InsufficientStock {
                location: self.from_location,
                item: self.item,
                available,
                requested: self.quantity,
            });
        }

        let mut updated = inventory.clone();
        *updated
            .location_mut(self.from_location)
            .levels_mut(self.product_line)
            .get_mut(self.item) -= self.quantity;
        *updated
            .location_mut(self.to_location)
            .levels_mut(self.product_line)
            .get_mut(self.item) += self.quantity;

        Ok(updated)
    }
}

/// 入荷狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    /// 入荷待ち
    Pending,
    /// 入荷完了
    Completed,
}

/// 入荷予定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomingDelivery {
    pub id: Uuid,

    /// 入荷目的地
    pub location: Location,

    pub product_line: ProductLine,

    pub item: ItemKind,

    pub quantity: i64,

    /// 入荷預定日
    pub scheduled_date: NaiveDate,

    pub status: DeliveryStatus,

    /// 完成時間
    pub completed_at: Option<DateTime<Utc>>,

    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl IncomingDelivery {
    /// 創建新的入荷予定
    pub fn new(
        location: Location,
        product_line: ProductLine,
        item: ItemKind,
        quantity: i64,
        scheduled_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            location,
            product_line,
            item,
            quantity,
            scheduled_date,
            status: DeliveryStatus::Pending,
            completed_at: None,
            notes: None,
            created_at: Utc::now(),
        }
    }

    /// 建構器模式：標記為已完成
    pub fn as_completed(mut self, completed_at: DateTime<Utc>) -> Self {
        self.status = DeliveryStatus::Completed;
        self.completed_at = Some(completed_at);
        self
    }

    pub fn is_pending(&self) -> bool {
        self.status == DeliveryStatus::Pending
    }

    /// 計算入荷後的庫存
    ///
    /// 入荷目的地加上數量；目的地不是メーカー時，同品目的メーカー庫存相應減少（最少為 0）。
    pub fn apply(&self, inventory: &Inventory) -> Result<Inventory> {
        if !self.is_pending() {
            return Err(CanplanError::DeliveryAlreadyCompleted(self.id));
        }
        if self.quantity <= 0 {
            return Err(CanplanError::InvalidTransfer(format!(
                "入荷數量必須為 1 以上: {}",
                self.quantity
            )));
        }

        let mut updated = inventory.clone();
        *updated
            .location_mut(self.location)
            .levels_mut(self.product_line)
            .get_mut(self.item) += self.quantity;

        if self.location != Location::Manufacturer {
            let manufacturer = updated
                .location_mut(Location::Manufacturer)
                .levels_mut(self.product_line)
                .get_mut(self.item);
            *manufacturer = (*manufacturer - self.quantity).max(0);
        }

        Ok(updated)
    }
}

/// 將指定日期（含）以前的入荷待ち依預定日順序套用到庫存
pub fn project_deliveries(
    inventory: &Inventory,
    deliveries: &[IncomingDelivery],
    through: NaiveDate,
) -> Result<Inventory> {
    let mut pending: Vec<&IncomingDelivery> = deliveries
        .iter()
        .filter(|d| d.is_pending() && d.scheduled_date <= through)
        .collect();
    pending.sort_by(|a, b| {
        a.scheduled_date
            .cmp(&b.scheduled_date)
            .then_with(|| a.created_at.cmp(&b.created_at))
    });

    pending
        .into_iter()
        .try_fold(inventory.clone(), |current, delivery| delivery.apply(&current))
}

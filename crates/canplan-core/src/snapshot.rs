//! 引當結果模型（受注別庫存快照）

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::inventory::StockCounts;
use crate::order::{ComponentQuantities, ProductLine};

/// 引當狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationStatus {
    /// 拠點庫存即可滿足
    LocalOk,
    /// 需要從メーカー取貨
    ManufacturerPickup,
    /// 全庫存仍不足，需要生產
    ProductionNeeded,
}

impl AllocationStatus {
    /// 依引當結果判定狀態
    ///
    /// 生產必要優先於メーカー取貨。
    pub fn resolve(manufacturer_used: bool, shortfall_remaining: bool) -> Self {
        if shortfall_remaining {
            AllocationStatus::ProductionNeeded
        } else if manufacturer_used {
            AllocationStatus::ManufacturerPickup
        } else {
            AllocationStatus::LocalOk
        }
    }

    pub fn is_local_ok(&self) -> bool {
        *self == AllocationStatus::LocalOk
    }
}

/// 單一部件的引當明細
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentAllocation {
    /// 必要數
    pub required: u64,

    /// 由拠點庫存引當
    pub from_depot: u64,

    /// 由メーカー庫存引當
    pub from_manufacturer: u64,

    /// 仍不足（生產必要數）
    pub production_needed: u64,

    /// 拠點引當中需要從捲料裁切的數量
    pub cut_from_rolls_at_depot: u64,
}

impl ComponentAllocation {
    /// 已引當數量（拠點 + メーカー）
    pub fn allocated(&self) -> u64 {
        self.from_depot + self.from_manufacturer
    }

    pub fn is_satisfied(&self) -> bool {
        self.production_needed == 0
    }
}

/// 受注別庫存快照
///
/// 每次執行引當時重新計算，不做保存。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    pub order_id: Uuid,
    pub order_number: String,
    pub customer_name: String,
    pub delivery_date: NaiveDate,
    pub product_line: ProductLine,
    pub set_quantity: u64,
    pub additional_lids: u64,

    /// 筒身
    pub body: ComponentAllocation,

    /// 底
    pub bottom: ComponentAllocation,

    /// 蓋
    pub lid: ComponentAllocation,

    /// 引當狀態
    pub allocation_status: AllocationStatus,

    /// 引當後的拠點庫存（僅拠點，不含メーカー）
    pub depot_after: StockCounts,
}

impl InventorySnapshot {
    /// 各部件必要數
    pub fn required(&self) -> ComponentQuantities {
        ComponentQuantities::new(self.body.required, self.bottom.required, self.lid.required)
    }

    /// 各部件生產必要數
    pub fn production_needed(&self) -> ComponentQuantities {
        ComponentQuantities::new(
            self.body.production_needed,
            self.bottom.production_needed,
            self.lid.production_needed,
        )
    }

    /// 底・蓋由拠點引當的合計
    pub fn bottom_lid_from_depot(&self) -> u64 {
        self.bottom.from_depot + self.lid.from_depot
    }

    /// 底・蓋由メーカー引當的合計
    pub fn bottom_lid_from_manufacturer(&self) -> u64 {
        self.bottom.from_manufacturer + self.lid.from_manufacturer
    }

    /// 底・蓋生產必要數合計
    pub fn bottom_lid_shortage(&self) -> u64 {
        self.bottom.production_needed + self.lid.production_needed
    }

    pub fn body_shortage(&self) -> u64 {
        self.body.production_needed
    }

    pub fn has_shortage(&self) -> bool {
        self.body_shortage() > 0 || self.bottom_lid_shortage() > 0
    }

    /// 出貨前需要先在拠點裁切捲料
    pub fn needs_cutting(&self) -> bool {
        self.bottom.cut_from_rolls_at_depot > 0 || self.lid.cut_from_rolls_at_depot > 0
    }
}

/// 庫存不足摘要
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySummary {
    /// 是否有拠點庫存不足的受注（メーカー取貨或生產必要）
    pub has_shortage: bool,

    /// 筒身不足合計
    pub total_body_shortage: u64,

    /// 底・蓋不足合計
    pub total_bottom_lid_shortage: u64,

    /// 非 local_ok 的受注（メーカー取貨或生產必要）
    pub affected_orders: Vec<InventorySnapshot>,
}

impl InventorySummary {
    /// 沒有任何需要關注的受注
    pub fn is_clear(&self) -> bool {
        self.affected_orders.is_empty()
    }
}

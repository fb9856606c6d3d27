//! # Canplan Core
//!
//! 核心資料模型與類型定義（受注、多拠點庫存、捲料換算、引當結果）

pub mod calendar;
pub mod config;
pub mod inventory;
pub mod movement;
pub mod order;
pub mod recommendation;
pub mod snapshot;

// Re-export 主要類型
pub use calendar::PlanningWindow;
pub use config::{CutShape, EngineConfig, RollConfig};
pub use inventory::{Inventory, ItemKind, Location, LocationInventory, StockCounts, StockLevels};
pub use movement::{project_deliveries, DeliveryStatus, IncomingDelivery, InventoryTransfer};
pub use order::{ComponentQuantities, Order, OrderStatus, ProductLine};
pub use recommendation::{MonthlyOrderRecommendation, ProductLinePlan, RecommendedPurchase};
pub use snapshot::{AllocationStatus, ComponentAllocation, InventorySnapshot, InventorySummary};

/// 引當引擎錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum CanplanError {
    #[error("數量不可為負數: {field} = {value}")]
    NegativeQuantity { field: String, value: i64 },

    #[error("找不到產品線的捲料配置: {0}")]
    RollConfigNotFound(ProductLine),

    #[error("捲料配置無效（{product_line}）: {reason}")]
    InvalidRollConfig {
        product_line: ProductLine,
        reason: String,
    },

    #[error("無效的日期: {0}")]
    InvalidDate(String),

    #[error("無效的庫存移動: {0}")]
    InvalidTransfer(String),

    #[error("庫存不足：{location} 的 {item} 可用 {available}，需要 {requested}")]
    InsufficientStock {
        location: Location,
        item: ItemKind,
        available: i64,
        requested: i64,
    },

    #[error("入荷予定已完成: {0}")]
    DeliveryAlreadyCompleted(uuid::Uuid),

    #[error("配置解析錯誤: {0}")]
    ConfigParse(String),
}

pub type Result<T> = std::result::Result<T, CanplanError>;

/// 檢查單一數量欄位是否為非負數，並轉換為無號整數
pub(crate) fn non_negative(field: &str, value: i64) -> Result<u64> {
    u64::try_from(value).map_err(|_| CanplanError::NegativeQuantity {
        field: field.to_string(),
        value,
    })
}

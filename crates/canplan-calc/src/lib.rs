//! # Canplan Calculation Engine
//!
//! 瀑布式庫存引當引擎與月次發注建議

pub mod alert;
pub mod allocation;
pub mod calculator;
pub mod conversion;
pub mod recommendation;
pub mod sequencing;
pub mod summary;
pub mod waterfall;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use canplan_core::{
    EngineConfig, Inventory, InventorySnapshot, InventorySummary, MonthlyOrderRecommendation,
    Order,
};

// Re-export 主要類型
pub use alert::{build_production_alert, ProductionAlert};
pub use allocation::{ComponentAllocator, Draw};
pub use calculator::AllocationCalculator;
pub use conversion::UnitConverter;
pub use recommendation::MonthlyRecommendationCalculator;
pub use sequencing::OrderSequencer;
pub use summary::SnapshotAggregator;
pub use waterfall::{DemandAllocation, LineStock, TierSet, TierState, WaterfallAllocator};

/// 引當計算結果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationResult {
    /// 受注別快照（依引當順序）
    pub snapshots: Vec<InventorySnapshot>,

    /// 不足摘要
    pub summary: InventorySummary,

    /// 警告信息
    pub warnings: Vec<AllocationWarning>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl AllocationResult {
    /// 創建空的計算結果
    pub fn empty() -> Self {
        Self {
            snapshots: Vec::new(),
            summary: SnapshotAggregator::summarize(&[]),
            warnings: Vec::new(),
            calculation_time_ms: None,
        }
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: AllocationWarning) {
        self.warnings.push(warning);
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// 引當警告
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationWarning {
    /// 對象（如 `manufacturer.pail`）
    pub subject: String,
    pub message: String,
    pub severity: WarningSeverity,
}

impl AllocationWarning {
    pub fn new(subject: String, message: String, severity: WarningSeverity) -> Self {
        Self {
            subject,
            message,
            severity,
        }
    }

    pub fn info(subject: String, message: String) -> Self {
        Self::new(subject, message, WarningSeverity::Info)
    }

    pub fn warning(subject: String, message: String) -> Self {
        Self::new(subject, message, WarningSeverity::Warning)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningSeverity {
    Info,
    Warning,
}

/// 以預設捲料配置計算受注別快照
pub fn compute_snapshots(
    orders: &[Order],
    inventory: &Inventory,
) -> canplan_core::Result<Vec<InventorySnapshot>> {
    AllocationCalculator::default().compute_snapshots(orders, inventory)
}

/// 彙總快照為不足摘要
pub fn summarize(snapshots: &[InventorySnapshot]) -> InventorySummary {
    SnapshotAggregator::summarize(snapshots)
}

/// 以預設捲料配置計算月次發注建議
pub fn compute_monthly_recommendation(
    orders: &[Order],
    inventory: &Inventory,
    today: NaiveDate,
) -> canplan_core::Result<MonthlyOrderRecommendation> {
    MonthlyRecommendationCalculator::calculate(orders, inventory, &EngineConfig::default(), today)
}

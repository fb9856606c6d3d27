//! 月次發注建議模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::PlanningWindow;
use crate::inventory::StockCounts;
use crate::order::{ComponentQuantities, ProductLine};

/// 建議發注量
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedPurchase {
    /// 筒身（枚）
    pub body_pieces: u64,

    /// 底・蓋（枚）
    pub bottom_lid_pieces: u64,

    /// 底・蓋換算捲料（支，無條件進位）
    pub bottom_lid_rolls: u64,

    /// 底・蓋換算長度（m）= 支數 × 捲料長度
    pub bottom_lid_meters: Decimal,
}

impl RecommendedPurchase {
    pub fn is_empty(&self) -> bool {
        self.body_pieces == 0 && self.bottom_lid_pieces == 0
    }
}

/// 單一產品線的月次計算結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductLinePlan {
    pub product_line: ProductLine,

    /// 期間內必要數合計
    pub required: ComponentQuantities,

    /// 扣除逾期受注後的拠點可用庫存
    pub depot_available: StockCounts,

    /// 不足數（最少為 0）
    pub shortage: ComponentQuantities,

    /// 建議發注量
    pub recommended: RecommendedPurchase,
}

/// 月次發注建議
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyOrderRecommendation {
    /// 對象期間（今日 ～ 翌月末）
    pub target_period: PlanningWindow,

    /// 各產品線結果（依 `ProductLine::ALL` 順序）
    pub lines: Vec<ProductLinePlan>,

    /// 對象期間內的受注（依引當順序）
    pub window_orders: Vec<Uuid>,

    /// 已先行扣除的逾期受注（依引當順序）
    pub overdue_orders: Vec<Uuid>,
}

impl MonthlyOrderRecommendation {
    /// 本月是否需要向メーカー發注
    pub fn needs_order(&self) -> bool {
        self.lines.iter().any(|line| !line.recommended.is_empty())
    }

    /// 取得指定產品線的結果
    pub fn line(&self, product_line: ProductLine) -> Option<&ProductLinePlan> {
        self.lines
            .iter()
            .find(|line| line.product_line == product_line)
    }
}

//! 引當主計算器

use chrono::NaiveDate;

use canplan_core::{
    EngineConfig, Inventory, InventorySnapshot, MonthlyOrderRecommendation, Order, ProductLine,
    Result,
};

use crate::alert::{build_production_alert, ProductionAlert};
use crate::recommendation::MonthlyRecommendationCalculator;
use crate::sequencing::OrderSequencer;
use crate::summary::SnapshotAggregator;
use crate::waterfall::{TierSet, TierState, WaterfallAllocator};
use crate::{AllocationResult, AllocationWarning};

/// 引當計算器
///
/// 持有捲料配置；每次計算都從傳入的受注與庫存重新開始，不保留任何狀態。
#[derive(Debug, Clone, Default)]
pub struct AllocationCalculator {
    config: EngineConfig,
}

impl AllocationCalculator {
    /// 創建新的引當計算器（配置無效時回傳錯誤）
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// 計算受注別庫存快照（依引當順序）
    pub fn compute_snapshots(
        &self,
        orders: &[Order],
        inventory: &Inventory,
    ) -> Result<Vec<InventorySnapshot>> {
        let sequenced = OrderSequencer::sequence(orders)?;
        let mut state = TierState::from_inventory(inventory, TierSet::DepotThenManufacturer)?;
        WaterfallAllocator::run(&sequenced, &mut state, &self.config)
    }

    /// 主引當計算入口：快照、不足摘要與警告
    pub fn calculate(&self, orders: &[Order], inventory: &Inventory) -> Result<AllocationResult> {
        tracing::info!("開始引當計算：受注 {} 筆", orders.len());
        let start_time = std::time::Instant::now();

        let mut result = AllocationResult::empty();

        for line in ProductLine::ALL {
            let ignored = inventory.ignored_manufacturer_bottom_lid(line);
            if ignored > 0 {
                tracing::warn!("メーカー庫存的底・蓋 {} 枚不參與引當（{}）", ignored, line);
                result.add_warning(AllocationWarning::warning(
                    format!("manufacturer.{line}"),
                    format!("メーカー側記錄的底・蓋 {ignored} 枚視為 0"),
                ));
            }
        }

        let inactive = orders.iter().filter(|o| !o.is_active()).count();
        if inactive > 0 {
            result.add_warning(AllocationWarning::info(
                "orders".to_string(),
                format!("非進行中的受注 {inactive} 筆未參與引當"),
            ));
        }

        result.snapshots = self.compute_snapshots(orders, inventory)?;
        result.summary = SnapshotAggregator::summarize(&result.snapshots);

        let elapsed = start_time.elapsed();
        result.calculation_time_ms = Some(elapsed.as_millis());

        tracing::info!(
            "引當計算完成：快照 {} 筆，需關注 {} 筆，耗時 {:?}",
            result.snapshots.len(),
            result.summary.affected_orders.len(),
            elapsed
        );

        Ok(result)
    }

    /// 月次發注建議
    pub fn monthly_recommendation(
        &self,
        orders: &[Order],
        inventory: &Inventory,
        today: NaiveDate,
    ) -> Result<MonthlyOrderRecommendation> {
        MonthlyRecommendationCalculator::calculate(orders, inventory, &self.config, today)
    }

    /// メーカー生產警示
    pub fn production_alert(
        &self,
        snapshots: &[InventorySnapshot],
        today: NaiveDate,
    ) -> Result<Option<ProductionAlert>> {
        build_production_alert(snapshots, &self.config, today)
    }
}

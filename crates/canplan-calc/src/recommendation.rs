//! 月次發注建議計算
//!
//! 只看拠點庫存：先以逾期未出貨的受注扣減庫存，
//! 再以今日至翌月末的需求合計算出本月需要向メーカー發注的數量。

use chrono::NaiveDate;

use canplan_core::{
    ComponentQuantities, EngineConfig, Inventory, MonthlyOrderRecommendation, Order,
    PlanningWindow, ProductLine, ProductLinePlan, RecommendedPurchase, Result,
};

use crate::conversion::UnitConverter;
use crate::sequencing::OrderSequencer;
use crate::waterfall::{TierSet, TierState, WaterfallAllocator};

/// 月次發注建議計算器
pub struct MonthlyRecommendationCalculator;

impl MonthlyRecommendationCalculator {
    /// 計算本月發注建議
    pub fn calculate(
        orders: &[Order],
        inventory: &Inventory,
        config: &EngineConfig,
        today: NaiveDate,
    ) -> Result<MonthlyOrderRecommendation> {
        let window = PlanningWindow::through_end_of_next_month(today)?;
        let sequenced = OrderSequencer::sequence(orders)?;

        let (overdue, upcoming): (Vec<&Order>, Vec<&Order>) =
            sequenced.into_iter().partition(|o| o.is_overdue(today));
        let in_window: Vec<&Order> = upcoming
            .into_iter()
            .filter(|o| window.contains(o.delivery_date))
            .collect();

        tracing::info!(
            "月次計算 {} ～ {}：逾期 {} 筆，期間內 {} 筆",
            window.start,
            window.end,
            overdue.len(),
            in_window.len()
        );

        // 逾期受注先行扣減拠點庫存
        let mut state = TierState::from_inventory(inventory, TierSet::DepotOnly)?;
        WaterfallAllocator::run(&overdue, &mut state, config)?;

        let mut lines = Vec::with_capacity(ProductLine::ALL.len());
        for line in ProductLine::ALL {
            let required = in_window
                .iter()
                .filter(|o| o.product_line == line)
                .try_fold(ComponentQuantities::default(), |total, o| -> Result<_> {
                    Ok(total + o.required()?)
                })?;

            lines.push(Self::plan_line(line, required, &state, config)?);
        }

        Ok(MonthlyOrderRecommendation {
            target_period: window,
            lines,
            window_orders: in_window.iter().map(|o| o.id).collect(),
            overdue_orders: overdue.iter().map(|o| o.id).collect(),
        })
    }

    /// 以扣減後的拠點庫存計算單一產品線的不足與建議量
    fn plan_line(
        line: ProductLine,
        required: ComponentQuantities,
        state: &TierState,
        config: &EngineConfig,
    ) -> Result<ProductLinePlan> {
        let mut stock = *state.line(line);
        let depot_available = stock.depot;

        if required.is_zero() {
            return Ok(ProductLinePlan {
                product_line: line,
                required,
                depot_available,
                shortage: ComponentQuantities::default(),
                recommended: RecommendedPurchase::default(),
            });
        }

        let roll_config = config.roll_config(line)?;
        let shortage =
            WaterfallAllocator::allocate_demand(required, &mut stock, roll_config).shortage();

        let rolls = UnitConverter::rolls_for_mix(shortage.bottom, shortage.lid, roll_config);
        let recommended = RecommendedPurchase {
            body_pieces: shortage.body,
            bottom_lid_pieces: shortage.bottom_lid(),
            bottom_lid_rolls: rolls,
            bottom_lid_meters: roll_config.meters_for_rolls(rolls),
        };

        tracing::debug!(
            "{}: 必要 {:?}，不足 {:?}，建議捲料 {} 支",
            line,
            required,
            shortage,
            rolls
        );

        Ok(ProductLinePlan {
            product_line: line,
            required,
            depot_available,
            shortage,
            recommended,
        })
    }
}

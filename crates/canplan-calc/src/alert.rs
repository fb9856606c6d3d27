//! メーカー生產警示
//!
//! 只統計全庫存仍不足（production_needed）的受注，
//! 供呼叫端提醒向メーカー下生產單。

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use canplan_core::calendar::add_months;
use canplan_core::{AllocationStatus, EngineConfig, InventorySnapshot, ProductLine, Result};

use crate::conversion::UnitConverter;

/// 生產警示
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionAlert {
    /// 需要生產的受注（依引當順序）
    pub orders: Vec<Uuid>,

    /// 筒身生產必要數合計
    pub total_body: u64,

    /// 底・蓋生產必要數合計
    pub total_bottom_lid: u64,

    /// 底・蓋換算捲料支數（各產品線分別進位後合計）
    pub estimated_rolls: u64,

    /// 最早交期
    pub earliest_delivery: NaiveDate,

    /// 最早交期落在メーカー提前期內
    pub is_urgent: bool,
}

/// 由快照建立生產警示；沒有生產必要的受注時回傳 `None`
pub fn build_production_alert(
    snapshots: &[InventorySnapshot],
    config: &EngineConfig,
    today: NaiveDate,
) -> Result<Option<ProductionAlert>> {
    let needed: Vec<&InventorySnapshot> = snapshots
        .iter()
        .filter(|s| s.allocation_status == AllocationStatus::ProductionNeeded)
        .collect();

    let Some(earliest_delivery) = needed.iter().map(|s| s.delivery_date).min() else {
        return Ok(None);
    };

    let mut estimated_rolls = 0;
    for line in ProductLine::ALL {
        let (bottoms, lids) = needed
            .iter()
            .filter(|s| s.product_line == line)
            .fold((0, 0), |(b, l), s| {
                (b + s.bottom.production_needed, l + s.lid.production_needed)
            });
        if bottoms + lids > 0 {
            let roll_config = config.roll_config(line)?;
            estimated_rolls += UnitConverter::rolls_for_mix(bottoms, lids, roll_config);
        }
    }

    let urgent_until = add_months(today, config.manufacturer_lead_time_months)?;
    let alert = ProductionAlert {
        orders: needed.iter().map(|s| s.order_id).collect(),
        total_body: needed.iter().map(|s| s.body_shortage()).sum(),
        total_bottom_lid: needed.iter().map(|s| s.bottom_lid_shortage()).sum(),
        estimated_rolls,
        earliest_delivery,
        is_urgent: earliest_delivery < urgent_until,
    };

    tracing::info!(
        "生產必要受注 {} 筆，最早交期 {}{}",
        alert.orders.len(),
        alert.earliest_delivery,
        if alert.is_urgent { "（緊急）" } else { "" }
    );

    Ok(Some(alert))
}

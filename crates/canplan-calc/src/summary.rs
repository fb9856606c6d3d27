//! 庫存不足摘要

use canplan_core::{InventorySnapshot, InventorySummary};

/// 快照彙總器
pub struct SnapshotAggregator;

impl SnapshotAggregator {
    /// 彙總所有非 local_ok 的受注
    pub fn summarize(snapshots: &[InventorySnapshot]) -> InventorySummary {
        let affected_orders: Vec<InventorySnapshot> = snapshots
            .iter()
            .filter(|s| !s.allocation_status.is_local_ok())
            .cloned()
            .collect();

        InventorySummary {
            has_shortage: !affected_orders.is_empty(),
            total_body_shortage: affected_orders.iter().map(|s| s.body_shortage()).sum(),
            total_bottom_lid_shortage: affected_orders
                .iter()
                .map(|s| s.bottom_lid_shortage())
                .sum(),
            affected_orders,
        }
    }
}

//! 受注排序（引當優先順序）

use canplan_core::{Order, Result};

/// 受注排序器
pub struct OrderSequencer;

impl OrderSequencer {
    /// 取出進行中的受注並依引當優先順序排列
    ///
    /// 交期早者優先；同交期時建立時間早者優先。穩定排序，
    /// 交期與建立時間皆相同時維持輸入順序。
    ///
    /// 所有輸入受注（含非進行中、期間外）的數量都必須非負，否則整批中止。
    pub fn sequence(orders: &[Order]) -> Result<Vec<&Order>> {
        for order in orders {
            order.required()?;
        }

        let mut active: Vec<&Order> = orders.iter().filter(|o| o.is_active()).collect();

        active.sort_by(|a, b| {
            a.delivery_date
                .cmp(&b.delivery_date)
                .then_with(|| a.created_at.cmp(&b.created_at))
        });

        let skipped = orders.len() - active.len();
        if skipped > 0 {
            tracing::debug!("略過非進行中的受注 {} 筆", skipped);
        }

        Ok(active)
    }
}

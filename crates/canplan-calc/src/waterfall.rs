//! 瀑布式引當
//!
//! 依序為每筆受注先從拠點庫存、再從メーカー庫存引當，
//! 並將剩餘庫存帶入下一筆受注。

use canplan_core::{
    AllocationStatus, ComponentAllocation, ComponentQuantities, EngineConfig, Inventory,
    InventorySnapshot, Order, ProductLine, Result, RollConfig, StockCounts,
};

use crate::allocation::{ComponentAllocator, Draw};

/// 參與引當的庫存層
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierSet {
    /// 只用拠點庫存（月次發注建議）
    DepotOnly,
    /// 拠點 → メーカー
    DepotThenManufacturer,
}

/// 單一產品線的引當中庫存
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineStock {
    /// 拠點庫存（事務所 + 工場）
    pub depot: StockCounts,

    /// メーカー庫存；`None` 表示不參與引當
    pub manufacturer: Option<StockCounts>,
}

/// 一次引當計算中的庫存狀態
///
/// 只存在於單次計算內，不回寫呼叫端的庫存。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierState {
    standard: LineStock,
    pail: LineStock,
}

impl TierState {
    /// 由庫存記錄建立引當狀態（負數會回傳錯誤）
    pub fn from_inventory(inventory: &Inventory, tiers: TierSet) -> Result<Self> {
        let line_stock = |line: ProductLine| -> Result<LineStock> {
            let manufacturer = match tiers {
                TierSet::DepotOnly => None,
                TierSet::DepotThenManufacturer => Some(inventory.manufacturer_counts(line)?),
            };
            Ok(LineStock {
                depot: inventory.depot_counts(line)?,
                manufacturer,
            })
        };

        Ok(Self {
            standard: line_stock(ProductLine::Standard)?,
            pail: line_stock(ProductLine::Pail)?,
        })
    }

    pub fn line(&self, line: ProductLine) -> &LineStock {
        match line {
            ProductLine::Standard => &self.standard,
            ProductLine::Pail => &self.pail,
        }
    }

    pub fn line_mut(&mut self, line: ProductLine) -> &mut LineStock {
        match line {
            ProductLine::Standard => &mut self.standard,
            ProductLine::Pail => &mut self.pail,
        }
    }
}

/// 一組需求的引當結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemandAllocation {
    pub body: ComponentAllocation,
    pub bottom: ComponentAllocation,
    pub lid: ComponentAllocation,
    pub status: AllocationStatus,
}

impl DemandAllocation {
    /// 各部件仍不足的數量
    pub fn shortage(&self) -> ComponentQuantities {
        ComponentQuantities::new(
            self.body.production_needed,
            self.bottom.production_needed,
            self.lid.production_needed,
        )
    }
}

/// 瀑布式引當器
pub struct WaterfallAllocator;

impl WaterfallAllocator {
    /// 依序引當多筆受注（呼叫端負責排序）
    pub fn run(
        orders: &[&Order],
        state: &mut TierState,
        config: &EngineConfig,
    ) -> Result<Vec<InventorySnapshot>> {
        orders
            .iter()
            .map(|order| Self::allocate_order(order, state, config))
            .collect()
    }

    /// 引當單筆受注並更新庫存狀態
    pub fn allocate_order(
        order: &Order,
        state: &mut TierState,
        config: &EngineConfig,
    ) -> Result<InventorySnapshot> {
        let required = order.required()?;
        let roll_config = config.roll_config(order.product_line)?;
        let stock = state.line_mut(order.product_line);

        let allocation = Self::allocate_demand(required, stock, roll_config);

        tracing::debug!(
            "受注 {} ({}): 必要 {:?} → {:?}",
            order.order_number,
            order.delivery_date,
            required,
            allocation.status
        );

        Ok(InventorySnapshot {
            order_id: order.id,
            order_number: order.order_number.clone(),
            customer_name: order.customer_name.clone(),
            delivery_date: order.delivery_date,
            product_line: order.product_line,
            set_quantity: required.body,
            additional_lids: required.lid,
            body: allocation.body,
            bottom: allocation.bottom,
            lid: allocation.lid,
            allocation_status: allocation.status,
            depot_after: stock.depot,
        })
    }

    /// 對單一產品線的庫存引當一組需求
    ///
    /// 受注引當與月次計算共用此處理。筒身只用裁切完成庫存；
    /// 底・蓋在每一層共用該層的捲料。
    pub fn allocate_demand(
        required: ComponentQuantities,
        stock: &mut LineStock,
        roll_config: &RollConfig,
    ) -> DemandAllocation {
        // 拠點
        let body_depot = ComponentAllocator::allocate_cut(required.body, &mut stock.depot.body);
        let (bottom_depot, lid_depot) = ComponentAllocator::allocate_bottom_lid(
            required.bottom,
            required.lid,
            &mut stock.depot,
            roll_config,
        );

        // メーカー（拠點不足的部分）
        let (body_maker, bottom_maker, lid_maker) = match stock.manufacturer.as_mut() {
            Some(maker) => {
                let body = ComponentAllocator::allocate_cut(
                    body_depot.shortfall(required.body),
                    &mut maker.body,
                );
                let (bottom, lid) = ComponentAllocator::allocate_bottom_lid(
                    bottom_depot.shortfall(required.bottom),
                    lid_depot.shortfall(required.lid),
                    maker,
                    roll_config,
                );
                (body, bottom, lid)
            }
            None => (Draw::default(), Draw::default(), Draw::default()),
        };

        let body = component(required.body, body_depot, body_maker);
        let bottom = component(required.bottom, bottom_depot, bottom_maker);
        let lid = component(required.lid, lid_depot, lid_maker);

        let parts = [body, bottom, lid];
        let status = AllocationStatus::resolve(
            parts.iter().any(|c| c.from_manufacturer > 0),
            parts.iter().any(|c| c.production_needed > 0),
        );

        DemandAllocation {
            body,
            bottom,
            lid,
            status,
        }
    }
}

fn component(required: u64, depot: Draw, manufacturer: Draw) -> ComponentAllocation {
    ComponentAllocation {
        required,
        from_depot: depot.allocated,
        from_manufacturer: manufacturer.allocated,
        production_needed: required - depot.allocated - manufacturer.allocated,
        cut_from_rolls_at_depot: depot.from_rolls,
    }
}

//! 部件引當（單一庫存層）
//!
//! 先用裁切完成的庫存，不足時才開捲料。開封的捲料若有剩餘，
//! 以裁切完成品的形式回到庫存，不會丟棄。

use canplan_core::{RollConfig, StockCounts};

use crate::conversion::UnitConverter;

/// 單一部件在某一庫存層的引當結果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Draw {
    /// 實際引當數量（不超過必要數）
    pub allocated: u64,

    /// 其中由捲料裁切的數量
    pub from_rolls: u64,
}

impl Draw {
    /// 尚未滿足的數量
    pub fn shortfall(&self, required: u64) -> u64 {
        required.saturating_sub(self.allocated)
    }
}

/// 部件引當器
pub struct ComponentAllocator;

impl ComponentAllocator {
    /// 只從裁切完成庫存引當（筒身沒有捲料換算）
    pub fn allocate_cut(required: u64, cut: &mut u64) -> Draw {
        Draw {
            allocated: take(required, cut),
            from_rolls: 0,
        }
    }

    /// 單一形狀引當：裁切完成庫存 → 捲料
    ///
    /// 只開必要支數的捲料；開封後多出的枚數加回裁切完成庫存。
    /// 例：需要 450 枚、每支 300 枚、捲料 2 支 → 開 2 支，150 枚回到庫存，捲料剩 0。
    pub fn allocate(required: u64, cut: &mut u64, rolls: &mut u64, pieces_per_roll: u64) -> Draw {
        let from_cut = take(required, cut);
        let short = required - from_cut;
        if short == 0 || *rolls == 0 {
            return Draw {
                allocated: from_cut,
                from_rolls: 0,
            };
        }

        let rolls_opened = UnitConverter::pieces_to_rolls(short, pieces_per_roll).min(*rolls);
        let pieces = UnitConverter::rolls_to_pieces(rolls_opened, pieces_per_roll);
        let from_rolls = short.min(pieces);

        *rolls -= rolls_opened;
        *cut += pieces - from_rolls;

        Draw {
            allocated: from_cut + from_rolls,
            from_rolls,
        }
    }

    /// 底・蓋同時引當（共用同一庫存層的捲料）
    ///
    /// 底與蓋各自先用裁切完成庫存；剩餘需求依各自換算率折算成捲料支數，
    /// 開封的捲料依需求比例切成底與蓋。捲料不足時，可切出的枚數全部用完才算不足。
    pub fn allocate_bottom_lid(
        required_bottom: u64,
        required_lid: u64,
        stock: &mut StockCounts,
        config: &RollConfig,
    ) -> (Draw, Draw) {
        let bottom_from_cut = take(required_bottom, &mut stock.bottom);
        let lid_from_cut = take(required_lid, &mut stock.lid);

        let bottom_short = required_bottom - bottom_from_cut;
        let lid_short = required_lid - lid_from_cut;

        let mut bottom = Draw {
            allocated: bottom_from_cut,
            from_rolls: 0,
        };
        let mut lid = Draw {
            allocated: lid_from_cut,
            from_rolls: 0,
        };

        if (bottom_short == 0 && lid_short == 0) || stock.rolls == 0 {
            return (bottom, lid);
        }

        // 需求支數 f = numerator / denominator
        let (numerator, denominator) =
            UnitConverter::roll_fraction(bottom_short, lid_short, config);
        let rolls_opened = narrow(numerator.div_ceil(denominator)).min(stock.rolls);
        let opened = u128::from(rolls_opened);

        // 依需求比例切出：cut = short × opened / f
        let bottom_cut = narrow(u128::from(bottom_short) * opened * denominator / numerator);
        let lid_cut = narrow(u128::from(lid_short) * opened * denominator / numerator);

        bottom.from_rolls = bottom_short.min(bottom_cut);
        lid.from_rolls = lid_short.min(lid_cut);
        bottom.allocated += bottom.from_rolls;
        lid.allocated += lid.from_rolls;

        stock.rolls -= rolls_opened;
        stock.bottom += bottom_cut - bottom.from_rolls;
        stock.lid += lid_cut - lid.from_rolls;

        (bottom, lid)
    }
}

/// 從庫存取出最多 `required` 的數量，回傳實際取出量
fn take(required: u64, available: &mut u64) -> u64 {
    let taken = required.min(*available);
    *available -= taken;
    taken
}

fn narrow(value: u128) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

//! 捲料換算

use canplan_core::{CutShape, RollConfig};

/// 捲料 ↔ 枚數換算器
///
/// 換算率（每支枚數）必須為正數，由配置保證。
pub struct UnitConverter;

impl UnitConverter {
    /// 枚數換算為捲料支數（無條件進位）
    pub fn pieces_to_rolls(pieces: u64, pieces_per_roll: u64) -> u64 {
        pieces.div_ceil(pieces_per_roll)
    }

    /// 捲料支數換算為枚數
    pub fn rolls_to_pieces(rolls: u64, pieces_per_roll: u64) -> u64 {
        rolls * pieces_per_roll
    }

    /// 同時切出底與蓋所需的捲料支數（無條件進位）
    ///
    /// 以整數精確計算 `ceil(bottoms / 底換算率 + lids / 蓋換算率)`。
    pub fn rolls_for_mix(bottoms: u64, lids: u64, config: &RollConfig) -> u64 {
        let (numerator, denominator) = Self::roll_fraction(bottoms, lids, config);
        let rolls = numerator.div_ceil(denominator);
        u64::try_from(rolls).unwrap_or(u64::MAX)
    }

    /// 底・蓋需求換算為捲料支數的分數形式 `(分子, 分母)`
    pub(crate) fn roll_fraction(bottoms: u64, lids: u64, config: &RollConfig) -> (u128, u128) {
        let bottom_yield = u128::from(config.yield_for(CutShape::Bottom));
        let lid_yield = u128::from(config.yield_for(CutShape::Lid));

        (
            u128::from(bottoms) * lid_yield + u128::from(lids) * bottom_yield,
            bottom_yield * lid_yield,
        )
    }
}

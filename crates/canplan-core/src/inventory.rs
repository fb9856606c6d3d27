//! 庫存模型
//!
//! 三個拠點：事務所（office）、工場（factory）構成拠點庫存，
//! 另有メーカー（manufacturer）保管庫存。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

use crate::config::RollConfig;
use crate::order::ProductLine;
use crate::{non_negative, Result};

/// 拠點
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// 事務所
    Office,
    /// 工場
    Factory,
    /// メーカー
    Manufacturer,
}

impl Location {
    /// 構成拠點庫存的拠點
    pub const DEPOTS: [Location; 2] = [Location::Office, Location::Factory];

    /// 是否屬於拠點庫存（優先引當）
    pub fn is_depot(&self) -> bool {
        !matches!(self, Location::Manufacturer)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Office => write!(f, "office"),
            Location::Factory => write!(f, "factory"),
            Location::Manufacturer => write!(f, "manufacturer"),
        }
    }
}

/// 庫存品目
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// 裁切完成的筒身
    Body,
    /// 裁切完成的底
    Bottom,
    /// 裁切完成的蓋
    Lid,
    /// 未裁切的捲料（支）
    Rolls,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Body => write!(f, "body"),
            ItemKind::Bottom => write!(f, "bottom"),
            ItemKind::Lid => write!(f, "lid"),
            ItemKind::Rolls => write!(f, "rolls"),
        }
    }
}

/// 單一產品線的庫存數量（外部記錄格式，可能含未驗證的負值）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevels {
    pub body: i64,
    pub bottom: i64,
    pub lid: i64,
    pub rolls: i64,
}

impl StockLevels {
    pub fn new(body: i64, bottom: i64, lid: i64, rolls: i64) -> Self {
        Self {
            body,
            bottom,
            lid,
            rolls,
        }
    }

    /// 讀取指定品目的數量
    pub fn get(&self, item: ItemKind) -> i64 {
        match item {
            ItemKind::Body => self.body,
            ItemKind::Bottom => self.bottom,
            ItemKind::Lid => self.lid,
            ItemKind::Rolls => self.rolls,
        }
    }

    /// 取得指定品目的可變參考
    pub fn get_mut(&mut self, item: ItemKind) -> &mut i64 {
        match item {
            ItemKind::Body => &mut self.body,
            ItemKind::Bottom => &mut self.bottom,
            ItemKind::Lid => &mut self.lid,
            ItemKind::Rolls => &mut self.rolls,
        }
    }

    /// 驗證並轉換為非負數量
    ///
    /// `context` 用於錯誤訊息，例如 `"office.pail"`。
    pub fn to_counts(&self, context: &str) -> Result<StockCounts> {
        Ok(StockCounts {
            body: non_negative(&format!("{context}.body"), self.body)?,
            bottom: non_negative(&format!("{context}.bottom"), self.bottom)?,
            lid: non_negative(&format!("{context}.lid"), self.lid)?,
            rolls: non_negative(&format!("{context}.rolls"), self.rolls)?,
        })
    }
}

impl Add for StockLevels {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            body: self.body.saturating_add(rhs.body),
            bottom: self.bottom.saturating_add(rhs.bottom),
            lid: self.lid.saturating_add(rhs.lid),
            rolls: self.rolls.saturating_add(rhs.rolls),
        }
    }
}

/// 已驗證的非負庫存數量（引當模擬使用）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StockCounts {
    pub body: u64,
    pub bottom: u64,
    pub lid: u64,
    pub rolls: u64,
}

impl StockCounts {
    pub fn new(body: u64, bottom: u64, lid: u64, rolls: u64) -> Self {
        Self {
            body,
            bottom,
            lid,
            rolls,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.body == 0 && self.bottom == 0 && self.lid == 0 && self.rolls == 0
    }

    /// 底・蓋共通池（枚）：裁切完成的底 + 蓋 + 捲料換算
    ///
    /// 捲料以較小的換算率計算，顯示用途。
    pub fn bottom_lid_pool(&self, config: &RollConfig) -> u64 {
        let per_roll = config.bottom_yield.min(config.lid_yield);
        self.bottom
            .saturating_add(self.lid)
            .saturating_add(self.rolls.saturating_mul(per_roll))
    }
}

/// 單一拠點的庫存（依產品線分開）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationInventory {
    pub standard: StockLevels,
    pub pail: StockLevels,
}

impl LocationInventory {
    pub fn new(standard: StockLevels, pail: StockLevels) -> Self {
        Self { standard, pail }
    }

    /// 取得指定產品線的庫存
    pub fn levels(&self, line: ProductLine) -> &StockLevels {
        match line {
            ProductLine::Standard => &self.standard,
            ProductLine::Pail => &self.pail,
        }
    }

    pub fn levels_mut(&mut self, line: ProductLine) -> &mut StockLevels {
        match line {
            ProductLine::Standard => &mut self.standard,
            ProductLine::Pail => &mut self.pail,
        }
    }
}

/// 全拠點庫存
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    /// 事務所
    pub office: LocationInventory,

    /// 工場
    pub factory: LocationInventory,

    /// メーカー
    ///
    /// 底・蓋只在拠點或取貨時裁切，メーカー側記錄的底・蓋在引當時一律視為 0。
    pub manufacturer: LocationInventory,

    /// 最終更新時間
    pub last_updated: DateTime<Utc>,
}

impl Inventory {
    /// 創建空庫存
    pub fn new() -> Self {
        Self {
            office: LocationInventory::default(),
            factory: LocationInventory::default(),
            manufacturer: LocationInventory::default(),
            last_updated: Utc::now(),
        }
    }

    /// 建構器模式：設置某拠點某產品線的庫存
    pub fn with_levels(mut self, location: Location, line: ProductLine, levels: StockLevels) -> Self {
        *self.location_mut(location).levels_mut(line) = levels;
        self
    }

    /// 建構器模式：設置最終更新時間
    pub fn with_last_updated(mut self, last_updated: DateTime<Utc>) -> Self {
        self.last_updated = last_updated;
        self
    }

    pub fn location(&self, location: Location) -> &LocationInventory {
        match location {
            Location::Office => &self.office,
            Location::Factory => &self.factory,
            Location::Manufacturer => &self.manufacturer,
        }
    }

    pub fn location_mut(&mut self, location: Location) -> &mut LocationInventory {
        match location {
            Location::Office => &mut self.office,
            Location::Factory => &mut self.factory,
            Location::Manufacturer => &mut self.manufacturer,
        }
    }

    /// 拠點庫存合計（事務所 + 工場）
    pub fn depot_total(&self, line: ProductLine) -> StockLevels {
        *self.office.levels(line) + *self.factory.levels(line)
    }

    /// 全拠點合計（含メーカー）
    pub fn total(&self, line: ProductLine) -> StockLevels {
        self.depot_total(line) + *self.manufacturer.levels(line)
    }

    /// 驗證所有數量皆非負
    pub fn validate(&self) -> Result<()> {
        for location in [Location::Office, Location::Factory, Location::Manufacturer] {
            for line in ProductLine::ALL {
                self.location(location)
                    .levels(line)
                    .to_counts(&format!("{location}.{line}"))?;
            }
        }
        Ok(())
    }

    /// 拠點庫存（已驗證）
    pub fn depot_counts(&self, line: ProductLine) -> Result<StockCounts> {
        for location in Location::DEPOTS {
            self.location(location)
                .levels(line)
                .to_counts(&format!("{location}.{line}"))?;
        }
        self.depot_total(line).to_counts(&format!("depot.{line}"))
    }

    /// メーカー庫存（已驗證，底・蓋視為 0）
    pub fn manufacturer_counts(&self, line: ProductLine) -> Result<StockCounts> {
        let counts = self
            .manufacturer
            .levels(line)
            .to_counts(&format!("manufacturer.{line}"))?;

        Ok(StockCounts {
            bottom: 0,
            lid: 0,
            ..counts
        })
    }

    /// メーカー側記錄但引當時忽略的底・蓋數量
    pub fn ignored_manufacturer_bottom_lid(&self, line: ProductLine) -> i64 {
        let levels = self.manufacturer.levels(line);
        levels.bottom.max(0) + levels.lid.max(0)
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

//! 引當引擎配置模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::order::ProductLine;
use crate::{CanplanError, Result};

/// 從捲料切出的形狀
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CutShape {
    /// 底
    Bottom,
    /// 蓋
    Lid,
}

/// 捲料換算配置（每產品線一筆）
///
/// 底與蓋從同一規格的捲料切出，但切出長度不同，
/// 因此每支捲料可切出的枚數依形狀而異。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollConfig {
    /// 產品線
    pub product_line: ProductLine,

    /// 捲料長度（m）
    pub roll_length_m: Decimal,

    /// 每支捲料可切出的底（枚）
    pub bottom_yield: u64,

    /// 每支捲料可切出的蓋（枚）
    pub lid_yield: u64,

    /// 每公尺枚數（參考值，僅供顯示）
    pub pieces_per_meter: Option<Decimal>,
}

impl RollConfig {
    /// 創建底・蓋共用單一換算率的配置
    pub fn new(product_line: ProductLine, roll_length_m: Decimal, pieces_per_roll: u64) -> Self {
        Self {
            product_line,
            roll_length_m,
            bottom_yield: pieces_per_roll,
            lid_yield: pieces_per_roll,
            pieces_per_meter: None,
        }
    }

    /// 標準品預設值：200m、每公尺 1.5 枚、每支 300 枚
    pub fn standard() -> Self {
        Self::new(ProductLine::Standard, Decimal::from(200), 300)
            .with_pieces_per_meter(Decimal::new(15, 1))
    }

    /// 提桶預設值：200m、底 655 枚/支、蓋 606 枚/支
    pub fn pail() -> Self {
        Self::new(ProductLine::Pail, Decimal::from(200), 655).with_lid_yield(606)
    }

    /// 建構器模式：設置底的換算率
    pub fn with_bottom_yield(mut self, bottom_yield: u64) -> Self {
        self.bottom_yield = bottom_yield;
        self
    }

    /// 建構器模式：設置蓋的換算率
    pub fn with_lid_yield(mut self, lid_yield: u64) -> Self {
        self.lid_yield = lid_yield;
        self
    }

    /// 建構器模式：設置捲料長度
    pub fn with_roll_length(mut self, roll_length_m: Decimal) -> Self {
        self.roll_length_m = roll_length_m;
        self
    }

    /// 建構器模式：設置每公尺枚數
    pub fn with_pieces_per_meter(mut self, pieces_per_meter: Decimal) -> Self {
        self.pieces_per_meter = Some(pieces_per_meter);
        self
    }

    /// 取得指定形狀的換算率
    pub fn yield_for(&self, shape: CutShape) -> u64 {
        match shape {
            CutShape::Bottom => self.bottom_yield,
            CutShape::Lid => self.lid_yield,
        }
    }

    /// 捲料支數換算為長度（m）
    pub fn meters_for_rolls(&self, rolls: u64) -> Decimal {
        Decimal::from(rolls) * self.roll_length_m
    }

    /// 驗證換算率與長度皆為正數
    pub fn validate(&self) -> Result<()> {
        if self.bottom_yield == 0 || self.lid_yield == 0 {
            return Err(CanplanError::InvalidRollConfig {
                product_line: self.product_line,
                reason: format!(
                    "換算率必須為正數（底 {}，蓋 {}）",
                    self.bottom_yield, self.lid_yield
                ),
            });
        }

        if self.roll_length_m <= Decimal::ZERO {
            return Err(CanplanError::InvalidRollConfig {
                product_line: self.product_line,
                reason: format!("捲料長度必須為正數: {}", self.roll_length_m),
            });
        }

        Ok(())
    }
}

/// 引當引擎配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// 各產品線的捲料換算配置
    pub roll_configs: Vec<RollConfig>,

    /// メーカー生產提前期（月）
    ///
    /// 最早的生產必要交期落在此期間內時，生產警示視為緊急。
    #[serde(default = "default_lead_time_months")]
    pub manufacturer_lead_time_months: u32,
}

fn default_lead_time_months() -> u32 {
    3
}

impl EngineConfig {
    /// 創建空配置（不含任何產品線）
    pub fn new() -> Self {
        Self {
            roll_configs: Vec::new(),
            manufacturer_lead_time_months: default_lead_time_months(),
        }
    }

    /// 建構器模式：加入或取代某產品線的捲料配置
    pub fn with_roll_config(mut self, config: RollConfig) -> Self {
        self.roll_configs
            .retain(|existing| existing.product_line != config.product_line);
        self.roll_configs.push(config);
        self
    }

    /// 建構器模式：設置メーカー生產提前期
    pub fn with_manufacturer_lead_time(mut self, months: u32) -> Self {
        self.manufacturer_lead_time_months = months;
        self
    }

    /// 取得產品線的捲料配置（缺少或無效時為致命錯誤）
    ///
    /// 配置可能未經 [`EngineConfig::from_json`] 直接反序列化，取用時一律再驗證。
    pub fn roll_config(&self, line: ProductLine) -> Result<&RollConfig> {
        let config = self
            .roll_configs
            .iter()
            .find(|config| config.product_line == line)
            .ok_or(CanplanError::RollConfigNotFound(line))?;
        config.validate()?;
        Ok(config)
    }

    /// 驗證所有捲料配置
    pub fn validate(&self) -> Result<()> {
        self.roll_configs.iter().try_for_each(RollConfig::validate)
    }

    /// 從 JSON 載入配置
    ///
    /// ```
    /// # use canplan_core::{EngineConfig, ProductLine};
    /// let json = r#"{
    ///     "roll_configs": [
    ///         { "product_line": "standard", "roll_length_m": "200",
    ///           "bottom_yield": 300, "lid_yield": 300, "pieces_per_meter": null }
    ///     ]
    /// }"#;
    /// let config = EngineConfig::from_json(json).unwrap();
    /// assert_eq!(config.roll_config(ProductLine::Standard).unwrap().bottom_yield, 300);
    /// assert_eq!(config.manufacturer_lead_time_months, 3);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| CanplanError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for EngineConfig {
    /// 標準品與提桶的預設換算配置
    fn default() -> Self {
        Self::new()
            .with_roll_config(RollConfig::standard())
            .with_roll_config(RollConfig::pail())
    }
}

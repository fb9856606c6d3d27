//! 受注模型

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};
use uuid::Uuid;

use crate::{non_negative, Result};

/// 產品線
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductLine {
    /// 標準品：底・蓋由同一種捲料切出，共用單一換算率
    Standard,
    /// 提桶（ペール）：底與蓋各有不同的換算率
    Pail,
}

impl ProductLine {
    /// 所有產品線（固定順序）
    pub const ALL: [ProductLine; 2] = [ProductLine::Standard, ProductLine::Pail];
}

impl fmt::Display for ProductLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductLine::Standard => write!(f, "standard"),
            ProductLine::Pail => write!(f, "pail"),
        }
    }
}

/// 受注狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// 進行中
    Active,
    /// 已出貨完成
    Completed,
    /// 已封存
    Archived,
}

/// 受注
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// 受注ID
    pub id: Uuid,

    /// 產品線
    pub product_line: ProductLine,

    /// 受注番號（僅供顯示）
    pub order_number: String,

    /// 顧客名稱
    pub customer_name: String,

    /// 交期
    pub delivery_date: NaiveDate,

    /// 套數（每套 = 筒身 1 + 底 1）
    pub set_quantity: i64,

    /// 追加蓋數（與套數無關的獨立需求）
    pub additional_lids: i64,

    /// 狀態
    pub status: OrderStatus,

    /// 備註
    pub notes: Option<String>,

    /// 建立時間（同交期時的排序依據）
    pub created_at: DateTime<Utc>,

    /// 更新時間
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// 創建新的受注（預設：標準品、無追加蓋、進行中）
    pub fn new(
        order_number: String,
        customer_name: String,
        delivery_date: NaiveDate,
        set_quantity: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            product_line: ProductLine::Standard,
            order_number,
            customer_name,
            delivery_date,
            set_quantity,
            additional_lids: 0,
            status: OrderStatus::Active,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// 建構器模式：設置產品線
    pub fn with_product_line(mut self, product_line: ProductLine) -> Self {
        self.product_line = product_line;
        self
    }

    /// 建構器模式：設置追加蓋數
    pub fn with_additional_lids(mut self, additional_lids: i64) -> Self {
        self.additional_lids = additional_lids;
        self
    }

    /// 建構器模式：設置狀態
    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = status;
        self
    }

    /// 建構器模式：設置備註
    pub fn with_notes(mut self, notes: String) -> Self {
        self.notes = Some(notes);
        self
    }

    /// 建構器模式：設置建立時間
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = created_at;
        self
    }

    /// 檢查是否為進行中的受注
    pub fn is_active(&self) -> bool {
        self.status == OrderStatus::Active
    }

    /// 檢查交期是否已過（早於基準日）
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.delivery_date < today
    }

    /// 計算各部件的必要數
    ///
    /// 筒身與底隨套數 1:1 增加；蓋僅由追加蓋數決定。
    /// 數量為負時回傳錯誤，不做任何修正。
    pub fn required(&self) -> Result<ComponentQuantities> {
        let sets = non_negative(&format!("{}.set_quantity", self.order_number), self.set_quantity)?;
        let lids = non_negative(
            &format!("{}.additional_lids", self.order_number),
            self.additional_lids,
        )?;

        Ok(ComponentQuantities {
            body: sets,
            bottom: sets,
            lid: lids,
        })
    }
}

/// 部件數量（筒身 / 底 / 蓋）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentQuantities {
    pub body: u64,
    pub bottom: u64,
    pub lid: u64,
}

impl ComponentQuantities {
    pub fn new(body: u64, bottom: u64, lid: u64) -> Self {
        Self { body, bottom, lid }
    }

    /// 底・蓋合計
    pub fn bottom_lid(&self) -> u64 {
        self.bottom + self.lid
    }

    pub fn is_zero(&self) -> bool {
        self.body == 0 && self.bottom == 0 && self.lid == 0
    }
}

impl Add for ComponentQuantities {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            body: self.body + rhs.body,
            bottom: self.bottom + rhs.bottom,
            lid: self.lid + rhs.lid,
        }
    }
}

impl AddAssign for ComponentQuantities {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

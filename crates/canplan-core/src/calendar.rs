//! 計劃期間模型

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{CanplanError, Result};

/// 計劃期間（含起訖日）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningWindow {
    /// 起始日
    pub start: NaiveDate,
    /// 結束日
    pub end: NaiveDate,
}

impl PlanningWindow {
    /// 創建新的計劃期間
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(CanplanError::InvalidDate(format!(
                "期間結束日 {end} 早於起始日 {start}"
            )));
        }
        Ok(Self { start, end })
    }

    /// 今日起至翌月末
    pub fn through_end_of_next_month(today: NaiveDate) -> Result<Self> {
        let next_month = add_months(first_day_of_month(today), 1)?;
        Self::new(today, end_of_month(next_month)?)
    }

    /// 檢查日期是否在期間內
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// 期間天數（含起訖日）
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// 當月第一天
pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// 當月最後一天
pub fn end_of_month(date: NaiveDate) -> Result<NaiveDate> {
    add_months(first_day_of_month(date), 1)?
        .pred_opt()
        .ok_or_else(|| CanplanError::InvalidDate(format!("日期溢出: {date}")))
}

/// 加上月數（月底自動對齊，如 1/31 + 1 個月 = 2/28）
pub fn add_months(date: NaiveDate, months: u32) -> Result<NaiveDate> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| CanplanError::InvalidDate(format!("日期溢出: {date} + {months} 個月")))
}

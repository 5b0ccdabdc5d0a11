//! 月份日曆
//!
//! 推算以曆月為單位前進，每次換月都使用實際天數（含閏年），不以 30 天近似。

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{ReorderError, Result};

/// 曆月（年 + 月）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    /// 1–12
    pub month: u32,
}

impl YearMonth {
    /// 創建曆月，月份必須在 1–12 之間
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(ReorderError::InvalidDate(format!(
                "月份必須介於 1 到 12：{}",
                month
            )));
        }
        Ok(Self { year, month })
    }

    /// 取日期所在的曆月
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// 該月第一天
    pub fn first_day(&self) -> Result<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).ok_or_else(|| {
            ReorderError::InvalidDate(format!("{}-{:02}-01", self.year, self.month))
        })
    }

    /// 下一個曆月（十二月之後進位到隔年一月）
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// 該月實際天數
    pub fn days_in_month(&self) -> Result<i64> {
        let start = self.first_day()?;
        let end = self.next().first_day()?;
        Ok((end - start).num_days())
    }

    /// 從 `today` 到下個月第一天的天數
    pub fn days_until_next_month(today: NaiveDate) -> Result<i64> {
        let next_start = Self::from_date(today).next().first_day()?;
        Ok((next_start - today).num_days())
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

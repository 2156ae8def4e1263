//! Chinese calendar
//!
//! Note: 為方便處理諸多術語，本模塊文檔用中文。
//!
//! 本程序採用預製的農曆年表（1900 至 2100 年）換算農曆日期，見 [`table`]。
//! 月曆視圖經 [`LunarCalendar`] 取用農曆，測試時可換用其他實現。

use crate::date::Date;
use crate::error::{Error, Result};

pub mod fmt;
pub mod table;

/// 月名，`Common` 為平月，`Leap` 為閏月。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Month {
    Common(u32),
    Leap(u32),
}
impl Month {
    /// 取得月序號，無論平閏。
    pub fn num(&self) -> u32 {
        use Month::*;
        *match self {
            Common(v) | Leap(v) => v,
        }
    }
    /// 閏月為 `true`，平月為 `false`
    pub fn is_leap(&self) -> bool {
        matches!(self, Self::Leap(_))
    }
    /// 取得月名的文本形式，十一、十二月稱「冬月」「臘月」。
    pub fn name(&self) -> String {
        fmt::month(*self)
    }
}

/// 農曆日期
///
/// # 用例
///
/// ```
/// use monatvido::Date;
/// use monatvido::chinese::{LunarDay, Month::*};
///
/// let date = Date::from_gregorian(2024, 3, 15).unwrap();
/// let lunar = LunarDay::from_date(date).unwrap();
///
/// assert_eq!((2024, Common(2), 6), (lunar.year(), lunar.month(), lunar.day()));
/// assert_eq!("甲辰年二月初六", lunar.full_name());
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct LunarDay {
    year: i32,
    month: Month,
    day: u32,
}

impl LunarDay {
    /// 以年月日構造農曆日期，不檢查該月是否存在。
    ///
    /// # Panics
    ///
    /// 若日序號不在 `1..=30` 或月序號不在 `1..=12` 間則 panic。
    pub fn new(year: i32, month: Month, day: u32) -> Self {
        assert!((1..=30).contains(&day), "day {} not in 1..=30", day);
        assert!((1..=12).contains(&month.num()), "month {} not in 1..=12", month.num());
        Self { year, month, day }
    }
    /// 取得給定公曆日期對應的農曆日期。
    ///
    /// 年表無該日資料則返回 `None`。
    pub fn from_date(date: Date) -> Option<Self> {
        let year = table::Year::containing(date)?;
        let mut offset = u32::try_from(date - year.start).ok()?;
        for (month, len) in year.months() {
            if offset < len {
                return Some(Self {
                    year: year.year,
                    month,
                    day: offset + 1,
                });
            }
            offset -= len;
        }
        None
    }

    /// 農曆年，以正月所在公元年計。
    pub fn year(&self) -> i32 {
        self.year
    }
    pub fn month(&self) -> Month {
        self.month
    }
    /// 月內日序號，`1..=30`
    pub fn day(&self) -> u32 {
        self.day
    }
    /// 日名，如「初一」「廿五」
    pub fn day_name(&self) -> String {
        fmt::day(self.day)
    }
    /// 月名，如「正月」「閏二月」「臘月」
    pub fn month_name(&self) -> String {
        self.month.name()
    }
    /// 年月日全稱，如「甲辰年二月初六」
    pub fn full_name(&self) -> String {
        fmt::sexagenary(sexagenary_for_year(self.year)) + "年" + &self.month_name() + &self.day_name()
    }
}

/// 農曆換算接口，月曆視圖只經此取用農曆。
pub trait LunarCalendar {
    /// 取得公曆日期對應的農曆日期，無資料則回報 [`Error::OutOfRange`]。
    fn lunar_day(&self, date: Date) -> Result<LunarDay>;
}

/// 依 [`table`] 年表換算的農曆
#[derive(Debug, Copy, Clone, Default)]
pub struct Chinese;

impl LunarCalendar for Chinese {
    fn lunar_day(&self, date: Date) -> Result<LunarDay> {
        LunarDay::from_date(date).ok_or_else(|| Error::OutOfRange(date.iso_gregorian()))
    }
}

/// 取得所給公元年的干支。
///
/// # 用例
///
/// ```
/// use monatvido::chinese::sexagenary_for_year;
///
/// assert_eq!(1, sexagenary_for_year(-2696));
/// ```
pub fn sexagenary_for_year(year: i32) -> u32 {
    (year.rem_euclid(60) as u32 + 2696) % 60 + 1
}

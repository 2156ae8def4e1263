//! 農曆年表數據
//!
//! 每歲一項，涵蓋 1900 至 2100 年，各項編碼如下：
//!
//! - 低 4 位：閏月序號，無閏月為 0
//! - `0x8000` 至 `0x10`：依次為正月至十二月，1 為大月（三十日），0 為小月（廿九日）
//! - `0x10000`：有閏月時，閏月為大月則為 1
//!
//! 1900 年正月初一為公曆 1900-01-31，其後各歲首由各月日數累加而得。

use std::sync::OnceLock;

use super::Month;
use crate::date::Date;

/// 表中首歲
pub const FIRST_YEAR: i32 = 1900;
/// 表中末歲
pub const LAST_YEAR: i32 = 2100;

/// 1900 年正月初一（公曆 1900-01-31）的儒略日數
const FIRST_NEW_YEAR_JDN: u32 = 2415051;

#[rustfmt::skip]
static YEAR_INFO: [u32; (LAST_YEAR - FIRST_YEAR + 1) as usize] = [
    0x04bd8, 0x04ae0, 0x0a570, 0x054d5, 0x0d260, 0x0d950, 0x16554, 0x056a0, 0x09ad0, 0x055d2, // 1900
    0x04ae0, 0x0a5b6, 0x0a4d0, 0x0d250, 0x1d255, 0x0b540, 0x0d6a0, 0x0ada2, 0x095b0, 0x14977, // 1910
    0x04970, 0x0a4b0, 0x0b4b5, 0x06a50, 0x06d40, 0x1ab54, 0x02b60, 0x09570, 0x052f2, 0x04970, // 1920
    0x06566, 0x0d4a0, 0x0ea50, 0x16a95, 0x05ad0, 0x02b60, 0x186e3, 0x092e0, 0x1c8d7, 0x0c950, // 1930
    0x0d4a0, 0x1d8a6, 0x0b550, 0x056a0, 0x1a5b4, 0x025d0, 0x092d0, 0x0d2b2, 0x0a950, 0x0b557, // 1940
    0x06ca0, 0x0b550, 0x15355, 0x04da0, 0x0a5b0, 0x14573, 0x052b0, 0x0a9a8, 0x0e950, 0x06aa0, // 1950
    0x0aea6, 0x0ab50, 0x04b60, 0x0aae4, 0x0a570, 0x05260, 0x0f263, 0x0d950, 0x05b57, 0x056a0, // 1960
    0x096d0, 0x04dd5, 0x04ad0, 0x0a4d0, 0x0d4d4, 0x0d250, 0x0d558, 0x0b540, 0x0b6a0, 0x195a6, // 1970
    0x095b0, 0x049b0, 0x0a974, 0x0a4b0, 0x0b27a, 0x06a50, 0x06d40, 0x0af46, 0x0ab60, 0x09570, // 1980
    0x04af5, 0x04970, 0x064b0, 0x074a3, 0x0ea50, 0x06b58, 0x05ac0, 0x0ab60, 0x096d5, 0x092e0, // 1990
    0x0c960, 0x0d954, 0x0d4a0, 0x0da50, 0x07552, 0x056a0, 0x0abb7, 0x025d0, 0x092d0, 0x0cab5, // 2000
    0x0a950, 0x0b4a0, 0x0baa4, 0x0ad50, 0x055d9, 0x04ba0, 0x0a5b0, 0x15176, 0x052b0, 0x0a930, // 2010
    0x07954, 0x06aa0, 0x0ad50, 0x05b52, 0x04b60, 0x0a6e6, 0x0a4e0, 0x0d260, 0x0ea65, 0x0d530, // 2020
    0x05aa0, 0x076a3, 0x096d0, 0x04afb, 0x04ad0, 0x0a4d0, 0x1d0b6, 0x0d250, 0x0d520, 0x0dd45, // 2030
    0x0b5a0, 0x056d0, 0x055b2, 0x049b0, 0x0a577, 0x0a4b0, 0x0aa50, 0x1b255, 0x06d20, 0x0ada0, // 2040
    0x14b63, 0x09370, 0x049f8, 0x04970, 0x064b0, 0x168a6, 0x0ea50, 0x06b20, 0x1a6c4, 0x0aae0, // 2050
    0x092e0, 0x0d2e3, 0x0c960, 0x0d557, 0x0d4a0, 0x0da50, 0x05d55, 0x056a0, 0x0a6d0, 0x055d4, // 2060
    0x052d0, 0x0a9b8, 0x0a950, 0x0b4a0, 0x0b6a6, 0x0ad50, 0x055a0, 0x0aba4, 0x0a5b0, 0x052b0, // 2070
    0x0b273, 0x06930, 0x07337, 0x06aa0, 0x0ad50, 0x14b55, 0x04b60, 0x0a570, 0x054e4, 0x0d160, // 2080
    0x0e968, 0x0d520, 0x0daa0, 0x16aa6, 0x056d0, 0x04ae0, 0x0a9d4, 0x0a2d0, 0x0d150, 0x0f252, // 2090
    0x0d520, // 2100
];

/// 一歲（正月初一至除夕）的年表信息
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Year {
    /// 公元年份，為正月所在年
    pub year: i32,
    /// 正月初一所在日期
    pub start: Date,
    info: u32,
}

impl Year {
    /// 取得公元 `year` 年對應的農曆年。
    ///
    /// 表中無該年則返回 `None`。
    pub fn get(year: i32) -> Option<Self> {
        let idx = usize::try_from(year - FIRST_YEAR).ok()?;
        let info = *YEAR_INFO.get(idx)?;
        Some(Year {
            year,
            start: starts()[idx],
            info,
        })
    }
    /// 依特定日期取得其所在農曆年。
    ///
    /// 日期早於 1900 年正月初一或晚於 2100 年除夕則返回 `None`。
    pub fn containing(date: Date) -> Option<Self> {
        let starts = starts();
        match starts.partition_point(|start| start <= &date) {
            0 => None,
            i if i == starts.len() => None,
            i => Self::get(FIRST_YEAR + i as i32 - 1),
        }
    }

    /// 閏月序號，無閏月則為 `None`。
    pub fn leap_month(&self) -> Option<u32> {
        match self.info & 0xf {
            0 => None,
            m => Some(m),
        }
    }
    /// 依次列出全年各月及其日數，閏月緊隨同序號的平月。
    pub fn months(self) -> impl Iterator<Item = (Month, u32)> {
        let info = self.info;
        let leap = self.leap_month();
        (1..=12).flat_map(move |m| {
            let common = (Month::Common(m), month_len(info & (0x10000 >> m)));
            let leap = (leap == Some(m)).then(|| (Month::Leap(m), month_len(info & 0x10000)));
            std::iter::once(common).chain(leap)
        })
    }
    /// 全年日數
    pub fn days(&self) -> u32 {
        self.months().map(|(_, len)| len).sum()
    }
}

fn month_len(bit: u32) -> u32 {
    if bit != 0 { 30 } else { 29 }
}

/// 各歲正月初一，末項為 2100 年除夕次日以便標記表尾。
fn starts() -> &'static [Date] {
    static STARTS: OnceLock<Vec<Date>> = OnceLock::new();
    STARTS.get_or_init(|| {
        let mut starts = Vec::with_capacity(YEAR_INFO.len() + 1);
        let mut jdn = FIRST_NEW_YEAR_JDN;
        starts.push(Date::from_jdn(jdn));
        for &info in &YEAR_INFO {
            jdn += (1..=12)
                .map(|m| month_len(info & (0x10000 >> m)))
                .sum::<u32>();
            if info & 0xf != 0 {
                jdn += month_len(info & 0x10000);
            }
            starts.push(Date::from_jdn(jdn));
        }
        starts
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_years() {
        for (year, std) in [
            (1900, "1900-01-31"),
            (1999, "1999-02-16"),
            (2000, "2000-02-05"),
            (2017, "2017-01-28"),
            (2023, "2023-01-22"),
            (2024, "2024-02-10"),
            (2025, "2025-01-29"),
        ] {
            assert_eq!(std, Year::get(year).unwrap().start.iso_gregorian(), "{year}");
        }
    }

    #[test]
    fn leap_months() {
        for (year, std) in [(2017, Some(6)), (2020, Some(4)), (2023, Some(2)), (2024, None)] {
            assert_eq!(std, Year::get(year).unwrap().leap_month(), "{year}");
        }
    }

    #[test]
    fn month_order() {
        let months: Vec<_> = Year::get(2023).unwrap().months().collect();
        assert_eq!(13, months.len());
        assert_eq!(
            [
                (Month::Common(1), 29),
                (Month::Common(2), 30),
                (Month::Leap(2), 29)
            ],
            months[..3]
        );
    }

    #[test]
    fn year_lengths() {
        for year in FIRST_YEAR..=LAST_YEAR {
            let annus = Year::get(year).unwrap();
            let days = annus.days();
            assert!((353..=355).contains(&days) || (383..=385).contains(&days), "{year}");
            assert_eq!(annus.leap_month().is_some(), days > 360, "{year}");
            if let Some(next) = Year::get(year + 1) {
                assert_eq!(days as i32, next.start - annus.start, "{year}");
            }
        }
    }

    #[test]
    fn bounds() {
        assert_eq!(None, Year::get(FIRST_YEAR - 1));
        assert_eq!(None, Year::get(LAST_YEAR + 1));
        let first = Date::from_gregorian(1900, 1, 31).unwrap();
        assert_eq!(None, Year::containing(first + -1));
        assert_eq!(Some(1900), Year::containing(first).map(|y| y.year));
        let last = Year::get(LAST_YEAR).unwrap();
        let eve = last.start + (last.days() as i32 - 1);
        assert_eq!(Some(LAST_YEAR), Year::containing(eve).map(|y| y.year));
        assert_eq!(None, Year::containing(eve + 1));
    }
}

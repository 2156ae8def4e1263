//! Per-day records handed to the render layer.

use chrono::{Datelike, Local};
use serde::Serialize;

use crate::chinese::{LunarCalendar, fmt};
use crate::date::Date;
use crate::error::Result;

/// Julian day number of 0000-12-31, i.e. the day before chrono's day 1 of the
/// common era.
const CE_EPOCH_JDN: i32 = 1721425;

/// The reference "today" every descriptor is compared against.
///
/// Captured once by whoever owns the view and passed down explicitly, so the
/// whole window agrees on which day is highlighted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Today {
    date: Date,
    tz_offset_minutes: i32,
}

impl Today {
    /// `tz_offset_minutes` is how far local time is ahead (east) of UTC; it
    /// positions the midnight every descriptor's timestamp points at.
    pub fn new(date: Date, tz_offset_minutes: i32) -> Self {
        Self {
            date,
            tz_offset_minutes,
        }
    }
    /// Snapshots the local clock.
    pub fn now() -> Self {
        let now = Local::now();
        let jdn = now.date_naive().num_days_from_ce() + CE_EPOCH_JDN;
        Self {
            date: Date::from_jdn(jdn as u32),
            tz_offset_minutes: now.offset().local_minus_utc() / 60,
        }
    }

    pub fn date(&self) -> Date {
        self.date
    }
    pub fn tz_offset_minutes(&self) -> i32 {
        self.tz_offset_minutes
    }
}

/// One calendar day with both its Gregorian and lunar fields filled in.
///
/// `full_name` and `timestamp` are both derived from [`date`](Self::date) at
/// build time and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateDescriptor {
    #[serde(skip)]
    date: Date,
    timestamp: i64,
    is_current_day: bool,
    full_name: String,
    week_num: i32,
    solar_month: i32,
    solar_date: i32,
    lunar_full_name: String,
    lunar_date: u32,
    lunar_date_name: String,
    lunar_month: u32,
    lunar_month_name: String,
}

impl DateDescriptor {
    /// Builds the record for `date`.
    ///
    /// Fails only when `calendar` has no lunar data for the date.
    ///
    /// # Example
    ///
    /// ```
    /// use monatvido::{Date, DateDescriptor, Today};
    /// use monatvido::chinese::Chinese;
    ///
    /// let date = Date::from_gregorian(2024, 3, 15).unwrap();
    /// let today = Today::new(date, 480);
    /// let day = DateDescriptor::build(date, &today, &Chinese).unwrap();
    ///
    /// assert_eq!("2024-03-15", day.full_name());
    /// assert_eq!(5, day.week_num());
    /// assert_eq!("初六", day.lunar_date_name());
    /// assert!(day.is_current_day());
    /// ```
    pub fn build<C>(date: Date, today: &Today, calendar: &C) -> Result<Self>
    where
        C: LunarCalendar + ?Sized,
    {
        let lunar = calendar.lunar_day(date)?;
        let (_, month, day) = date.gregorian();
        Ok(Self {
            date,
            timestamp: date.timestamp_millis(today.tz_offset_minutes),
            is_current_day: date == today.date,
            full_name: date.iso_gregorian(),
            week_num: date.day_of_week(),
            solar_month: month,
            solar_date: day,
            lunar_full_name: lunar.full_name(),
            lunar_date: lunar.day(),
            lunar_date_name: lunar.day_name(),
            lunar_month: lunar.month().num(),
            lunar_month_name: lunar.month_name(),
        })
    }

    pub fn date(&self) -> Date {
        self.date
    }
    /// Milliseconds since the Unix epoch at local midnight.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }
    pub fn is_current_day(&self) -> bool {
        self.is_current_day
    }
    /// `YYYY-MM-DD`
    pub fn full_name(&self) -> &str {
        &self.full_name
    }
    /// ISO weekday, `1..=7` for Monday through Sunday.
    pub fn week_num(&self) -> i32 {
        self.week_num
    }
    pub fn solar_month(&self) -> i32 {
        self.solar_month
    }
    pub fn solar_date(&self) -> i32 {
        self.solar_date
    }
    pub fn lunar_full_name(&self) -> &str {
        &self.lunar_full_name
    }
    pub fn lunar_date(&self) -> u32 {
        self.lunar_date
    }
    pub fn lunar_date_name(&self) -> &str {
        &self.lunar_date_name
    }
    pub fn lunar_month(&self) -> u32 {
        self.lunar_month
    }
    pub fn lunar_month_name(&self) -> &str {
        &self.lunar_month_name
    }

    pub fn is_weekend(&self) -> bool {
        matches!(self.week_num, 6 | 7)
    }
    /// Lunar text shown in the cell: the month name only appears on the
    /// first day of a lunar month.
    pub fn lunar_label(&self) -> String {
        if self.lunar_date == 1 {
            self.lunar_month_name.clone() + &self.lunar_date_name
        } else {
            self.lunar_date_name.clone()
        }
    }
    /// Solar text shown in the cell, see [`fmt::solar`].
    pub fn solar_label(&self) -> String {
        fmt::solar(self.solar_month, self.solar_date)
    }
}

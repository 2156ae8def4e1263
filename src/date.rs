//! Calendar-independant date.

use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use crate::error::Error;

/// Julian day number of 1970-01-01, the Unix epoch.
const UNIX_EPOCH_JDN: i64 = 2440588;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// A calendar-independant date.
///
/// Supported range begins from January 1, 4713 BC, proleptic Julian calendar.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Date {
    jdn: u32,
}

impl Date {
    /// Creates a `Date` with a Julian day number (JDN).
    pub fn from_jdn(jdn: u32) -> Self {
        Self { jdn }
    }
    /// Returns the Julian day number (JDN) of the date.
    pub fn jdn(&self) -> u32 {
        self.jdn
    }

    /// Creates a `Date` with a Gregorian calendar date.
    ///
    /// `year` should be an astronomical year number, i.e. 1 BC is `0`, 2
    /// BC is `-1`, etc. Out-of-range days roll over into the next month, so
    /// callers holding untrusted input should go through [`FromStr`].
    ///
    /// Returns `None` if the result date is out of supported range.
    ///
    /// # Example
    ///
    /// ```
    /// use monatvido::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!(2451545, date.jdn());
    /// ```
    pub fn from_gregorian(year: i32, month: i32, day: i32) -> Option<Self> {
        let (y, m, d) = (year, month, day);
        u32::try_from(
            (1461 * (y + 4800 + (m - 14) / 12)) / 4 + (367 * (m - 2 - 12 * ((m - 14) / 12))) / 12
                - (3 * ((y + 4900 + (m - 14) / 12) / 100)) / 4
                + d
                - 32075,
        )
        .map(Self::from_jdn)
        .ok()
    }
    /// Represents the date in Gregorian calendar.
    ///
    /// Returns in `(year, month, day)` format.
    ///
    /// # Example
    ///
    /// ```
    /// use monatvido::Date;
    ///
    /// let date = Date::from_jdn(2451545);
    /// assert_eq!((2000, 1, 1), date.gregorian());
    /// ```
    pub fn gregorian(&self) -> (i32, i32, i32) {
        let jdn = i32::try_from(self.jdn).expect("jdn >= 2**31 not supported");
        let f = jdn + 1401 + (((4 * jdn + 274277) / 146097) * 3) / 4 - 38;
        let e = 4 * f + 3;
        let g = (e % 1461) / 4;
        let h = 5 * g + 2;
        let day = (h % 153) / 5 + 1;
        let month = (h / 153 + 2) % 12 + 1;
        let year = e / 1461 - 4716 + (12 + 2 - month) / 12;
        (year, month, day)
    }
    /// Formats the date in ISO 8601 format.
    ///
    /// # Example
    ///
    /// ```
    /// use monatvido::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!("2000-01-01", date.iso_gregorian());
    /// ```
    pub fn iso_gregorian(&self) -> String {
        let (y, m, d) = self.gregorian();
        format!("{:04}-{:02}-{:02}", y, m, d)
    }

    /// Returns the day of week of the date, in ISO-8601 numbering (i.e.
    /// `1..=7` for Monday through Sunday)
    ///
    /// # Example
    ///
    /// ```
    /// use monatvido::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!(6, date.day_of_week()); // Saturday
    /// ```
    pub fn day_of_week(&self) -> i32 {
        (self.jdn % 7 + 1) as i32
    }

    /// Returns the Monday of the ISO week containing the date.
    ///
    /// Weeks always start on Monday here, whatever the locale would say.
    ///
    /// # Example
    ///
    /// ```
    /// use monatvido::Date;
    ///
    /// let date = Date::from_gregorian(2024, 3, 1).unwrap();
    /// assert_eq!("2024-02-26", date.start_of_iso_week().iso_gregorian());
    /// ```
    pub fn start_of_iso_week(&self) -> Self {
        *self + (1 - self.day_of_week())
    }
    /// Returns the first day of the Gregorian month containing the date.
    pub fn start_of_month(&self) -> Self {
        let (_, _, d) = self.gregorian();
        *self + (1 - d)
    }

    /// Milliseconds since the Unix epoch at local midnight of the date, in a
    /// timezone ahead (east) of UTC by `tz_offset_minutes` minutes.
    ///
    /// # Example
    ///
    /// ```
    /// use monatvido::Date;
    ///
    /// let date = Date::from_gregorian(1970, 1, 2).unwrap();
    /// assert_eq!(86_400_000, date.timestamp_millis(0));
    /// assert_eq!(57_600_000, date.timestamp_millis(480));
    /// ```
    pub fn timestamp_millis(&self, tz_offset_minutes: i32) -> i64 {
        (self.jdn as i64 - UNIX_EPOCH_JDN) * MILLIS_PER_DAY - tz_offset_minutes as i64 * 60_000
    }
}

impl Add<i32> for Date {
    type Output = Date;
    fn add(self, rhs: i32) -> Self::Output {
        Date::from_jdn(if rhs >= 0 {
            self.jdn + rhs as u32
        } else {
            self.jdn - rhs.wrapping_neg() as u32
        })
    }
}
impl Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> Self::Output {
        self.jdn as i32 - rhs.jdn as i32
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.iso_gregorian())
    }
}

/// Parses a strict `YYYY-MM-DD` Gregorian date.
///
/// ```
/// use monatvido::Date;
///
/// let date: Date = "2024-02-29".parse().unwrap();
/// assert_eq!((2024, 2, 29), date.gregorian());
/// assert!("2023-02-29".parse::<Date>().is_err());
/// ```
impl FromStr for Date {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidDate(s.to_owned());
        let mut it = s.split('-');
        let mut field = |width: usize| -> Result<i32, Error> {
            match it.next() {
                Some(part) if part.len() == width && part.bytes().all(|b| b.is_ascii_digit()) => {
                    part.parse().map_err(|_| invalid())
                }
                _ => Err(invalid()),
            }
        };
        let (y, m, d) = (field(4)?, field(2)?, field(2)?);
        if it.next().is_some() || !(1..=12).contains(&m) {
            return Err(invalid());
        }
        if !(1..=days_in_month(m, YearType::from_gregorian(y))).contains(&d) {
            return Err(invalid());
        }
        Date::from_gregorian(y, m, d).ok_or_else(invalid)
    }
}

/// Indicates whether a year is a leap year or common year.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum YearType {
    Common,
    Leap,
}

impl YearType {
    /// Determines if `year` is a leap year in Gregorian calendar.
    pub fn from_gregorian(year: i32) -> Self {
        if year % 4 == 0 && year % 100 != 0 || year % 400 == 0 {
            Self::Leap
        } else {
            Self::Common
        }
    }
    /// Returns `true` if `self` is `Leap`, otherwise `false`.
    pub fn is_leap(&self) -> bool {
        matches!(self, YearType::Leap)
    }
}

fn days_in_month(month: i32, year_type: YearType) -> i32 {
    match month {
        2 => 28 + year_type.is_leap() as i32,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

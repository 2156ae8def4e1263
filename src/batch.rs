//! Six-week batches of week rows.
//!
//! A batch is always 42 consecutive days starting on a Monday, chunked into
//! six [`WeekRow`]s. Batches are generated either around the current month or
//! directly before/after the week of an anchor day, so that consecutive
//! batches tile the timeline without gaps or overlap.

use log::trace;
use serde::Serialize;

use crate::chinese::LunarCalendar;
use crate::date::Date;
use crate::descriptor::{DateDescriptor, Today};
use crate::error::Result;

/// Days in a week row.
pub const WEEK_DAYS: usize = 7;
/// Week rows in a batch.
pub const BATCH_WEEKS: usize = 6;

const BATCH_DAYS: i32 = (WEEK_DAYS * BATCH_WEEKS) as i32;

/// Seven consecutive days, Monday first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct WeekRow(Vec<DateDescriptor>);

impl WeekRow {
    /// Monday of the row.
    pub fn first(&self) -> &DateDescriptor {
        &self.0[0]
    }
    /// Sunday of the row.
    pub fn last(&self) -> &DateDescriptor {
        &self.0[WEEK_DAYS - 1]
    }
    pub fn days(&self) -> &[DateDescriptor] {
        &self.0
    }
    pub fn iter(&self) -> std::slice::Iter<'_, DateDescriptor> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a WeekRow {
    type Item = &'a DateDescriptor;
    type IntoIter = std::slice::Iter<'a, DateDescriptor>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Six week rows in timeline order.
pub type Batch = Vec<WeekRow>;

/// Generates batches against a fixed calendar and reference day.
///
/// # Example
///
/// ```
/// use monatvido::{Date, Generator, Today};
/// use monatvido::chinese::Chinese;
///
/// let today = Today::new(Date::from_gregorian(2024, 3, 15).unwrap(), 480);
/// let generator = Generator::new(&Chinese, &today);
///
/// let batch = generator.current_month_batch().unwrap();
/// assert_eq!("2024-02-26", batch[0].first().full_name());
/// assert_eq!("2024-04-07", batch[5].last().full_name());
///
/// let before = generator.previous_batch("2024-02-26").unwrap();
/// assert_eq!("2024-01-15", before[0].first().full_name());
/// assert_eq!("2024-02-25", before[5].last().full_name());
/// ```
#[derive(Debug)]
pub struct Generator<'a, C: ?Sized> {
    calendar: &'a C,
    today: &'a Today,
}

impl<C: ?Sized> Clone for Generator<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<C: ?Sized> Copy for Generator<'_, C> {}

impl<'a, C> Generator<'a, C>
where
    C: LunarCalendar + ?Sized,
{
    pub fn new(calendar: &'a C, today: &'a Today) -> Self {
        Self { calendar, today }
    }

    /// The batch covering today's month, starting on the Monday of the week
    /// that contains the 1st. Unless the 1st is itself a Monday, the first
    /// row begins with trailing days of the previous month.
    pub fn current_month_batch(&self) -> Result<Batch> {
        self.batch_from(self.today.date().start_of_month().start_of_iso_week())
    }

    /// The batch ending on the Sunday right before the week of `anchor`
    /// (`YYYY-MM-DD`).
    pub fn previous_batch(&self, anchor: &str) -> Result<Batch> {
        self.previous_batch_of(anchor.parse()?)
    }
    pub fn previous_batch_of(&self, anchor: Date) -> Result<Batch> {
        self.batch_from(anchor.start_of_iso_week() + -BATCH_DAYS)
    }

    /// The batch starting on the Monday right after the week of `anchor`
    /// (`YYYY-MM-DD`).
    pub fn next_batch(&self, anchor: &str) -> Result<Batch> {
        self.next_batch_of(anchor.parse()?)
    }
    pub fn next_batch_of(&self, anchor: Date) -> Result<Batch> {
        self.batch_from(anchor.start_of_iso_week() + WEEK_DAYS as i32)
    }

    fn batch_from(&self, start: Date) -> Result<Batch> {
        trace!("generating batch from {}", start);
        let days = (0..BATCH_DAYS)
            .map(|i| DateDescriptor::build(start + i, self.today, self.calendar))
            .collect::<Result<Vec<_>>>()?;
        let mut days = days.into_iter();
        Ok((0..BATCH_WEEKS)
            .map(|_| WeekRow(days.by_ref().take(WEEK_DAYS).collect()))
            .collect())
    }
}

//! The sliding window of week rows behind the scrolling month view.
//!
//! The window always holds [`WINDOW_WEEKS`] rows: one batch before, one batch
//! around and one batch after what is on screen. Reaching either end of the
//! scroll range slides the window by one batch, overwriting the batch farthest
//! from view, so memory stays constant however far the user scrolls.

use std::time::{Duration, Instant};

use log::{debug, trace, warn};

use crate::batch::{BATCH_WEEKS, Batch, Generator, WeekRow};
use crate::chinese::{Chinese, LunarCalendar};
use crate::config::ViewConfig;
use crate::descriptor::{DateDescriptor, Today};
use crate::error::Result;
use crate::viewport::{Boundary, Layout, Thresholds, Throttle};

/// Week rows held by a [`WeekWindow`].
pub const WINDOW_WEEKS: usize = BATCH_WEEKS * 3;

/// Fixed-capacity ring of week rows, contiguous in time from the logical head.
#[derive(Debug, Clone)]
pub struct WeekWindow {
    rows: Vec<WeekRow>,
    head: usize,
}

impl WeekWindow {
    fn new(previous: Batch, current: Batch, next: Batch) -> Self {
        let mut rows = Vec::with_capacity(WINDOW_WEEKS);
        rows.extend(previous);
        rows.extend(current);
        rows.extend(next);
        Self { rows, head: 0 }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
    /// The `index`-th row in timeline order.
    pub fn get(&self, index: usize) -> Option<&WeekRow> {
        if index >= self.len() {
            return None;
        }
        Some(&self.rows[(self.head + index) % self.len()])
    }
    /// Rows in timeline order.
    pub fn iter(&self) -> impl Iterator<Item = &WeekRow> {
        let (wrapped, from_head) = self.rows.split_at(self.head);
        from_head.iter().chain(wrapped)
    }
    pub fn first_day(&self) -> &DateDescriptor {
        self.rows[self.head].first()
    }
    pub fn last_day(&self) -> &DateDescriptor {
        self.rows[(self.head + self.len() - 1) % self.len()].last()
    }

    /// Overwrites the last `batch.len()` rows and moves them to the front.
    fn prepend(&mut self, batch: Batch) {
        let len = self.len();
        self.head = (self.head + len - batch.len()) % len;
        for (i, row) in batch.into_iter().enumerate() {
            self.rows[(self.head + i) % len] = row;
        }
    }
    /// Overwrites the first `batch.len()` rows and moves them to the back.
    fn append(&mut self, batch: Batch) {
        let len = self.len();
        let shift = batch.len();
        for (i, row) in batch.into_iter().enumerate() {
            self.rows[(self.head + i) % len] = row;
        }
        self.head = (self.head + shift) % len;
    }
}

impl PartialEq for WeekWindow {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}
impl Eq for WeekWindow {}

/// Window manager of the month view.
///
/// Owns the week window, the reference day and the current geometry, and
/// turns scroll offsets reported by the render layer into window slides.
///
/// # Example
///
/// ```
/// use monatvido::{Date, MonthView, Today, ViewConfig};
/// use monatvido::chinese::Chinese;
///
/// let today = Today::new(Date::from_gregorian(2024, 3, 15).unwrap(), 480);
/// let mut view = MonthView::new(Chinese, today, ViewConfig::default()).unwrap();
/// assert_eq!("2024-01-15", view.window().first_day().full_name());
///
/// // no geometry yet
/// assert_eq!(None, view.on_scroll(0.0).unwrap());
///
/// assert_eq!(Some(696.0), view.resize(800.0));
/// assert_eq!(Some(696.0), view.on_scroll(0.0).unwrap());
/// assert_eq!("2023-12-04", view.window().first_day().full_name());
/// assert_eq!(18, view.window().len());
/// ```
#[derive(Debug)]
pub struct MonthView<C = Chinese> {
    calendar: C,
    today: Today,
    config: ViewConfig,
    window: WeekWindow,
    layout: Option<Layout>,
    throttle: Throttle<f64>,
}

impl MonthView<Chinese> {
    /// A view of the current month according to the local clock.
    pub fn open(config: ViewConfig) -> Result<Self> {
        Self::new(Chinese, Today::now(), config)
    }
}

impl<C: LunarCalendar> MonthView<C> {
    pub fn new(calendar: C, today: Today, config: ViewConfig) -> Result<Self> {
        let window = build_window(Generator::new(&calendar, &today))?;
        let throttle = Throttle::new(Duration::from_millis(config.throttle_wait_ms));
        Ok(Self {
            calendar,
            today,
            config,
            window,
            layout: None,
            throttle,
        })
    }

    fn generator(&self) -> Generator<'_, C> {
        Generator::new(&self.calendar, &self.today)
    }

    /// Rebuilds the window around today's month.
    pub fn initialize(&mut self) -> Result<()> {
        self.window = build_window(self.generator())?;
        Ok(())
    }

    /// Slides the window one batch into the past.
    ///
    /// On error the window is left as it was.
    pub fn recycle_previous(&mut self) -> Result<()> {
        let batch = self
            .generator()
            .previous_batch_of(self.window.first_day().date())?;
        self.window.prepend(batch);
        debug!(
            "window slid back to {}..{}",
            self.window.first_day().full_name(),
            self.window.last_day().full_name()
        );
        Ok(())
    }

    /// Slides the window one batch into the future.
    ///
    /// On error the window is left as it was.
    pub fn recycle_next(&mut self) -> Result<()> {
        let batch = self
            .generator()
            .next_batch_of(self.window.last_day().date())?;
        self.window.append(batch);
        debug!(
            "window slid forward to {}..{}",
            self.window.first_day().full_name(),
            self.window.last_day().full_name()
        );
        Ok(())
    }

    /// Re-measures rows for a new viewport height and returns the offset the
    /// render layer should scroll to. The window itself is untouched.
    pub fn resize(&mut self, viewport_height: f64) -> Option<f64> {
        self.layout = Layout::measure(viewport_height, &self.config);
        match &self.layout {
            Some(layout) => debug!("row height is now {}", layout.row_height),
            None => debug!("viewport of {} too small for rows", viewport_height),
        }
        self.rest_offset()
    }

    /// Handles a scroll offset reported by the render layer.
    ///
    /// If the offset reached either end, slides the window and returns the
    /// offset that keeps the same rows on screen. Before the first
    /// [`resize`](Self::resize) there is no geometry and this does nothing.
    pub fn on_scroll(&mut self, offset: f64) -> Result<Option<f64>> {
        let Some(boundary) = self.thresholds().and_then(|t| t.boundary(offset)) else {
            return Ok(None);
        };
        let result = match boundary {
            Boundary::Top => self.recycle_previous(),
            Boundary::Bottom => self.recycle_next(),
        };
        if let Err(e) = result {
            warn!("could not slide window at {:?} boundary: {}", boundary, e);
            return Err(e);
        }
        Ok(self.rest_offset())
    }

    /// [`on_scroll`](Self::on_scroll) behind the scroll throttle. Offsets
    /// swallowed here are released later by [`flush_scroll`](Self::flush_scroll).
    pub fn scroll_event(&mut self, offset: f64, now: Instant) -> Result<Option<f64>> {
        match self.throttle.call(offset, now) {
            Some(offset) => self.on_scroll(offset),
            None => {
                trace!("scroll to {} throttled", offset);
                Ok(None)
            }
        }
    }

    /// Handles the trailing throttled scroll offset once its wait is over.
    pub fn flush_scroll(&mut self, now: Instant) -> Result<Option<f64>> {
        match self.throttle.poll(now) {
            Some(offset) => self.on_scroll(offset),
            None => Ok(None),
        }
    }

    /// Boundaries for the current geometry, if rows have been measured.
    pub fn thresholds(&self) -> Option<Thresholds> {
        self.layout
            .as_ref()
            .map(|layout| Thresholds::new(layout, self.window.len(), self.config.scroll_epsilon))
    }
    /// Offset at which the middle batch starts at the top of the viewport.
    pub fn rest_offset(&self) -> Option<f64> {
        self.layout
            .as_ref()
            .map(|layout| layout.offset_of_row(BATCH_WEEKS))
    }

    pub fn window(&self) -> &WeekWindow {
        &self.window
    }
    pub fn today(&self) -> &Today {
        &self.today
    }
    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }
}

fn build_window<C: LunarCalendar + ?Sized>(generator: Generator<'_, C>) -> Result<WeekWindow> {
    let current = generator.current_month_batch()?;
    let previous = generator.previous_batch_of(current[0].first().date())?;
    let next = generator.next_batch_of(current[BATCH_WEEKS - 1].last().date())?;
    let window = WeekWindow::new(previous, current, next);
    debug!(
        "window initialized to {}..{}",
        window.first_day().full_name(),
        window.last_day().full_name()
    );
    Ok(window)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chinese::LunarDay;
    use crate::date::Date;
    use crate::error::Error;

    fn today(y: i32, m: i32, d: i32) -> Today {
        Today::new(Date::from_gregorian(y, m, d).unwrap(), 480)
    }

    fn view(y: i32, m: i32, d: i32) -> MonthView {
        MonthView::new(Chinese, today(y, m, d), ViewConfig::default()).unwrap()
    }

    fn span(view: &MonthView<impl LunarCalendar>) -> (&str, &str) {
        (
            view.window().first_day().full_name(),
            view.window().last_day().full_name(),
        )
    }

    fn assert_contiguous(window: &WeekWindow) {
        assert_eq!(WINDOW_WEEKS, window.len());
        let rows: Vec<_> = window.iter().collect();
        assert_eq!(WINDOW_WEEKS, rows.len());
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(Some(*row), window.get(i));
            assert_eq!(1, row.first().week_num());
        }
        for pair in rows.windows(2) {
            assert_eq!(1, pair[1].first().date() - pair[0].last().date());
        }
        assert_eq!(None, window.get(WINDOW_WEEKS));
    }

    #[test]
    fn initialize() {
        let mut view = view(2024, 3, 15);
        assert_contiguous(view.window());
        assert_eq!(("2024-01-15", "2024-05-19"), span(&view));
        assert_eq!(
            "2024-02-26",
            view.window().get(BATCH_WEEKS).unwrap().first().full_name()
        );
        let before = view.window().clone();
        view.recycle_next().unwrap();
        view.initialize().unwrap();
        assert_eq!(before, *view.window());
    }

    #[test]
    fn recycle_previous() {
        let mut view = view(2024, 3, 15);
        let before: Vec<_> = view.window().iter().cloned().collect();
        view.recycle_previous().unwrap();
        assert_contiguous(view.window());
        assert_eq!(("2023-12-04", "2024-04-07"), span(&view));
        let after: Vec<_> = view.window().iter().cloned().collect();
        assert_eq!(before[..12], after[6..]);
    }

    #[test]
    fn recycle_next() {
        let mut view = view(2024, 3, 15);
        let before: Vec<_> = view.window().iter().cloned().collect();
        view.recycle_next().unwrap();
        assert_contiguous(view.window());
        assert_eq!(("2024-02-26", "2024-06-30"), span(&view));
        let after: Vec<_> = view.window().iter().cloned().collect();
        assert_eq!(before[6..], after[..12]);
    }

    #[test]
    fn recycling_round_trips() {
        let mut view = view(2024, 3, 15);
        let original = view.window().clone();
        view.recycle_previous().unwrap();
        view.recycle_next().unwrap();
        assert_eq!(original, *view.window());
        view.recycle_next().unwrap();
        view.recycle_next().unwrap();
        view.recycle_previous().unwrap();
        view.recycle_previous().unwrap();
        assert_eq!(original, *view.window());
    }

    #[test]
    fn long_scroll_keeps_window_bounded() {
        let mut view = view(2024, 3, 15);
        let slots = view.window.rows.as_ptr();
        for _ in 0..20 {
            view.recycle_next().unwrap();
            assert_contiguous(view.window());
        }
        assert_eq!(("2026-05-04", "2026-09-06"), span(&view));
        for _ in 0..40 {
            view.recycle_previous().unwrap();
            assert_contiguous(view.window());
        }
        assert_eq!(("2021-09-27", "2022-01-30"), span(&view));
        assert_eq!(slots, view.window.rows.as_ptr());
    }

    #[test]
    fn scroll_without_layout_is_noop() {
        let mut view = view(2024, 3, 15);
        let before = view.window().clone();
        assert_eq!(None, view.thresholds());
        assert_eq!(Ok(None), view.on_scroll(0.0));
        assert_eq!(Ok(None), view.on_scroll(1e9));
        assert_eq!(None, view.resize(50.0));
        assert_eq!(Ok(None), view.on_scroll(0.0));
        assert_eq!(before, *view.window());
    }

    #[test]
    fn scroll_boundaries() {
        let mut view = view(2024, 3, 15);
        assert_eq!(Some(696.0), view.resize(800.0));
        assert_eq!(Ok(None), view.on_scroll(696.0));
        assert_eq!(Ok(None), view.on_scroll(1391.0));
        assert_eq!(("2024-01-15", "2024-05-19"), span(&view));

        assert_eq!(Ok(Some(696.0)), view.on_scroll(1391.8));
        assert_eq!(("2024-02-26", "2024-06-30"), span(&view));
        assert_eq!(Ok(Some(696.0)), view.on_scroll(0.3));
        assert_eq!(("2024-01-15", "2024-05-19"), span(&view));
        assert_eq!(Ok(Some(696.0)), view.on_scroll(-12.0));
        assert_eq!(("2023-12-04", "2024-04-07"), span(&view));
    }

    #[test]
    fn resize_moves_bottom_threshold() {
        let mut view = view(2024, 3, 15);
        view.resize(800.0);
        assert_eq!(1392.0, view.thresholds().unwrap().bottom);
        assert_eq!(Some(900.0), view.resize(1000.0));
        assert_eq!(1800.0, view.thresholds().unwrap().bottom);
        assert_eq!(Ok(None), view.on_scroll(1392.0));
        assert_eq!(("2024-01-15", "2024-05-19"), span(&view));
        assert_eq!(Ok(Some(900.0)), view.on_scroll(1800.0));
        assert_eq!(("2024-02-26", "2024-06-30"), span(&view));
    }

    #[test]
    fn throttled_scroll() {
        let mut view = view(2024, 3, 15);
        view.resize(800.0);
        let start = Instant::now();
        let ms = Duration::from_millis;
        assert_eq!(Ok(None), view.scroll_event(500.0, start));
        assert_eq!(Ok(None), view.scroll_event(0.0, start));
        assert_eq!(("2024-01-15", "2024-05-19"), span(&view));
        assert_eq!(Ok(None), view.flush_scroll(start));
        assert_eq!(Ok(Some(696.0)), view.flush_scroll(start + ms(1)));
        assert_eq!(("2023-12-04", "2024-04-07"), span(&view));
        assert_eq!(Ok(None), view.flush_scroll(start + ms(5)));
        assert_eq!(Ok(Some(696.0)), view.scroll_event(1392.0, start + ms(5)));
        assert_eq!(("2024-01-15", "2024-05-19"), span(&view));
    }

    #[test]
    fn failed_recycle_leaves_window() {
        let mut view = view(1900, 4, 15);
        view.resize(800.0);
        assert_eq!(("1900-02-12", "1900-06-17"), span(&view));
        let before = view.window().clone();
        assert_eq!(
            Err(Error::OutOfRange("1900-01-01".into())),
            view.on_scroll(0.0)
        );
        assert_eq!(before, *view.window());
        assert_eq!(Ok(Some(696.0)), view.on_scroll(1392.0));
    }

    struct Sparse;

    impl LunarCalendar for Sparse {
        fn lunar_day(&self, date: Date) -> Result<LunarDay> {
            if date.gregorian().0 > 2024 {
                return Err(Error::OutOfRange(date.iso_gregorian()));
            }
            Ok(LunarDay::new(2024, crate::chinese::Month::Common(1), 15))
        }
    }

    #[test]
    fn injected_calendar() {
        let mut view = MonthView::new(Sparse, today(2024, 10, 1), ViewConfig::default()).unwrap();
        assert_eq!(("2024-08-19", "2024-12-22"), span(&view));
        assert!(view.window().iter().flatten().all(|day| day.lunar_label() == "十五"));
        assert!(view.recycle_next().is_err());
        assert_eq!(("2024-08-19", "2024-12-22"), span(&view));
        assert!(MonthView::new(Sparse, today(2024, 12, 1), ViewConfig::default()).is_err());
    }
}

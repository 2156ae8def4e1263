//! Scroll geometry: row sizing, boundary detection and event throttling.

use std::time::{Duration, Instant};

use crate::config::ViewConfig;

/// Week rows visible at once.
pub const VISIBLE_WEEKS: usize = 6;

/// Pixel metrics derived from the viewport height.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Layout {
    /// Height of one week row.
    pub row_height: f64,
    /// Space above the weekday titles that whole rows could not fill.
    pub padding_top: f64,
    /// Height of the scrolling area.
    pub content_height: f64,
}

impl Layout {
    /// Sizes rows so that [`VISIBLE_WEEKS`] whole rows fit the viewport.
    ///
    /// Returns `None` while the viewport is too small to hold a row, in which
    /// case the view has no geometry yet.
    ///
    /// ```
    /// use monatvido::ViewConfig;
    /// use monatvido::viewport::Layout;
    ///
    /// let layout = Layout::measure(800.0, &ViewConfig::default()).unwrap();
    /// assert_eq!(116.0, layout.row_height);
    /// assert_eq!(30.0, layout.padding_top);
    /// assert_eq!(696.0, layout.content_height);
    /// ```
    pub fn measure(viewport_height: f64, config: &ViewConfig) -> Option<Self> {
        let rows = VISIBLE_WEEKS as f64;
        let row_height = ((viewport_height - config.reserved_height) / rows).floor();
        if !(row_height > 0.0) {
            return None;
        }
        let padding_top = viewport_height - (row_height * rows + config.chrome_height());
        Some(Self {
            row_height,
            padding_top,
            content_height: viewport_height - config.chrome_height() - padding_top,
        })
    }

    /// Scroll offset at which the `rows`-th row sits at the top.
    pub fn offset_of_row(&self, rows: usize) -> f64 {
        self.row_height * rows as f64
    }
}

/// Which end of the window the scroll position reached.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Boundary {
    Top,
    Bottom,
}

/// Scroll offsets at which the window has to slide.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Thresholds {
    pub top: f64,
    pub bottom: f64,
    epsilon: f64,
}

impl Thresholds {
    /// The bottom is reached once the last [`VISIBLE_WEEKS`] of `total_rows`
    /// rows are fully in view.
    pub fn new(layout: &Layout, total_rows: usize, epsilon: f64) -> Self {
        Self {
            top: 0.0,
            bottom: layout.offset_of_row(total_rows.saturating_sub(VISIBLE_WEEKS)),
            epsilon,
        }
    }

    /// ```
    /// use monatvido::ViewConfig;
    /// use monatvido::viewport::{Boundary, Layout, Thresholds};
    ///
    /// let layout = Layout::measure(800.0, &ViewConfig::default()).unwrap();
    /// let thresholds = Thresholds::new(&layout, 18, 0.5);
    ///
    /// assert_eq!(Some(Boundary::Top), thresholds.boundary(0.2));
    /// assert_eq!(None, thresholds.boundary(600.0));
    /// assert_eq!(Some(Boundary::Bottom), thresholds.boundary(1391.7));
    /// ```
    pub fn boundary(&self, offset: f64) -> Option<Boundary> {
        if offset <= self.top + self.epsilon {
            Some(Boundary::Top)
        } else if offset >= self.bottom - self.epsilon {
            Some(Boundary::Bottom)
        } else {
            None
        }
    }
}

/// Rate limiter for scroll events.
///
/// The first call after a quiet period goes through immediately; calls
/// arriving within `wait` of the last one that went through are collapsed,
/// and only the latest of them is released by [`poll`](Self::poll) once the
/// wait has elapsed.
#[derive(Debug, Clone)]
pub struct Throttle<T> {
    wait: Duration,
    last: Option<Instant>,
    pending: Option<T>,
}

impl<T> Throttle<T> {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            last: None,
            pending: None,
        }
    }

    /// Offers `value` at time `now`; returns it if it may be handled now.
    pub fn call(&mut self, value: T, now: Instant) -> Option<T> {
        match self.last {
            Some(last) if now.saturating_duration_since(last) < self.wait => {
                self.pending = Some(value);
                None
            }
            _ => {
                self.last = Some(now);
                self.pending = None;
                Some(value)
            }
        }
    }

    /// Releases the trailing value, if one is waiting and the wait is over.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let last = self.last?;
        if now.saturating_duration_since(last) < self.wait {
            return None;
        }
        let value = self.pending.take()?;
        self.last = Some(now);
        Some(value)
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout() {
        let config = ViewConfig::default();
        for (height, std) in [(800.0, (116.0, 30.0, 696.0)), (1000.0, (150.0, 26.0, 900.0))] {
            let layout = Layout::measure(height, &config).unwrap();
            assert_eq!(
                std,
                (layout.row_height, layout.padding_top, layout.content_height)
            );
        }
    }

    #[test]
    fn layout_needs_room() {
        let config = ViewConfig::default();
        assert_eq!(None, Layout::measure(0.0, &config));
        assert_eq!(None, Layout::measure(105.0, &config));
        assert_eq!(None, Layout::measure(f64::NAN, &config));
        assert!(Layout::measure(106.0, &config).is_some());
    }

    #[test]
    fn thresholds() {
        let layout = Layout::measure(800.0, &ViewConfig::default()).unwrap();
        let thresholds = Thresholds::new(&layout, 18, 0.5);
        assert_eq!(1392.0, thresholds.bottom);
        for (offset, std) in [
            (-3.0, Some(Boundary::Top)),
            (0.0, Some(Boundary::Top)),
            (0.5, Some(Boundary::Top)),
            (0.6, None),
            (696.0, None),
            (1391.4, None),
            (1391.5, Some(Boundary::Bottom)),
            (1392.0, Some(Boundary::Bottom)),
            (1500.0, Some(Boundary::Bottom)),
        ] {
            assert_eq!(std, thresholds.boundary(offset), "{offset}");
        }
    }

    #[test]
    fn throttle_leading_and_trailing() {
        let start = Instant::now();
        let ms = Duration::from_millis;
        let mut throttle = Throttle::new(ms(10));
        assert_eq!(None, throttle.poll(start));
        assert_eq!(Some(1), throttle.call(1, start));
        assert_eq!(None, throttle.call(2, start + ms(3)));
        assert_eq!(None, throttle.call(3, start + ms(6)));
        assert!(throttle.has_pending());
        assert_eq!(None, throttle.poll(start + ms(9)));
        assert_eq!(Some(3), throttle.poll(start + ms(10)));
        assert_eq!(None, throttle.poll(start + ms(30)));
        assert_eq!(Some(4), throttle.call(4, start + ms(30)));
    }

    #[test]
    fn throttle_new_call_supersedes_pending() {
        let start = Instant::now();
        let ms = Duration::from_millis;
        let mut throttle = Throttle::new(ms(5));
        throttle.call("a", start);
        throttle.call("b", start + ms(1));
        assert_eq!(Some("c"), throttle.call("c", start + ms(7)));
        assert!(!throttle.has_pending());
        assert_eq!(None, throttle.poll(start + ms(20)));
    }
}

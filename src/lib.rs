//! Engine of an infinitely scrollable month calendar showing both Gregorian
//! and Chinese lunisolar dates.
//!
//! The calendar is a vertical list of week rows. Only a window of 18 weeks is
//! ever materialized; when the scroll position reaches either end, six weeks
//! are dropped on the far side and six fresh ones generated on the near side,
//! so memory use does not grow however far one scrolls.
//!
//! Rendering is left to the caller: it reports scroll offsets and viewport
//! sizes, and reads [`DateDescriptor`]s back out of the window.
//!
//! # Examples
//!
//! Generating batches of weeks:
//!
//! ```
//! use monatvido::{Date, Generator, Today};
//! use monatvido::chinese::Chinese;
//!
//! let today = Today::new(Date::from_gregorian(2024, 3, 15).unwrap(), 480);
//! let batch = Generator::new(&Chinese, &today).current_month_batch().unwrap();
//!
//! assert_eq!(6, batch.len());
//! assert_eq!("2024-02-26", batch[0].first().full_name());
//! assert_eq!("正月十七", batch[0].first().lunar_full_name().trim_start_matches("甲辰年"));
//! ```
//!
//! Driving the window from scroll events:
//!
//! ```
//! use monatvido::{Date, MonthView, Today, ViewConfig};
//! use monatvido::chinese::Chinese;
//!
//! let today = Today::new(Date::from_gregorian(2024, 3, 15).unwrap(), 480);
//! let mut view = MonthView::new(Chinese, today, ViewConfig::default()).unwrap();
//! let rest = view.resize(800.0).unwrap();
//!
//! // scrolled to the very bottom: the window slides a batch forward and asks
//! // to be scrolled back to the middle
//! assert_eq!(Some(rest), view.on_scroll(rest * 2.0).unwrap());
//! assert_eq!("2024-06-30", view.window().last_day().full_name());
//! ```

pub mod batch;
pub mod chinese;
pub mod config;
pub mod date;
pub mod descriptor;
pub mod error;
pub mod viewport;
pub mod window;

pub use batch::{Batch, Generator, WeekRow};
pub use config::ViewConfig;
pub use date::{Date, YearType};
pub use descriptor::{DateDescriptor, Today};
pub use error::{Error, Result};
pub use window::{MonthView, WeekWindow};

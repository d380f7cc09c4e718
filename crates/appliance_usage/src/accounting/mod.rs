//! Energy accounting over appliance profiles.
//!
//! - [`usage`]: minutes on within a single period
//! - [`usage_for_day`]: minutes on within one day of a month profile
//! - [`savings`] / [`savings_for_day`]: minutes switched off by the device
//! - [`report_for_day`] / [`month_report`]: both figures per day

mod report;
mod savings;
mod slicer;
mod tracker;
mod usage;

pub use report::month_report;
pub use report::report_for_day;
pub use report::DayReport;
pub use savings::savings;
pub use savings::savings_for_day;
pub use slicer::slice_day;
pub use slicer::usage_for_day;
pub use usage::usage;

pub mod accounting;
pub mod config;
mod error;
pub mod profile;

pub use accounting::month_report;
pub use accounting::report_for_day;
pub use accounting::savings;
pub use accounting::savings_for_day;
pub use accounting::slice_day;
pub use accounting::usage;
pub use accounting::usage_for_day;
pub use accounting::DayReport;
pub use config::Config;
pub use config::LogLevel;
pub use error::Result;
pub use error::UsageError;
pub use profile::Day;
pub use profile::Event;
pub use profile::Minutes;
pub use profile::Profile;
pub use profile::State;
pub use profile::MAX_IN_PERIOD;

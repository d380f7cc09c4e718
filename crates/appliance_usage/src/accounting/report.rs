use std::fmt;
use std::ops::RangeInclusive;

use serde::Serialize;

use super::savings::savings_for_day;
use super::slicer::replay_day;
use super::tracker::OnTime;
use super::usage::usage;
use crate::error::Result;
use crate::profile::Day;
use crate::profile::Event;
use crate::profile::Minutes;
use crate::profile::Profile;

/// Usage and savings for one day of a month profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayReport {
    pub day: u16,
    /// Minutes the appliance was on.
    pub usage: Minutes,
    /// Minutes the appliance was switched off by the device.
    pub savings: Minutes,
}

impl fmt::Display for DayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "day {:>3}: usage {:>4} min, savings {:>4} min",
            self.day, self.usage, self.savings
        )
    }
}

/// Report a single day. The month profile may use the extended model;
/// for usage both kinds of shutoff count as off.
///
/// Both figures start the day in the state left by replaying every earlier
/// event, so they always agree on the state at midnight.
pub fn report_for_day(month: &Profile, day: Day) -> Result<DayReport> {
    let binary = Profile::with_events(
        month.initial.as_binary(),
        month
            .events
            .iter()
            .map(|event| Event::new(event.timestamp, event.state.as_binary())),
    );

    Ok(DayReport {
        day: day.number(),
        usage: usage(&replay_day::<OnTime>(&binary, day)?)?,
        savings: savings_for_day(month, day)?,
    })
}

/// Report every day in `days`, in order.
pub fn month_report(month: &Profile, days: RangeInclusive<Day>) -> Result<Vec<DayReport>> {
    let (first, last) = days.into_inner();
    Day::all()
        .skip_while(|day| *day < first)
        .take_while(|day| *day <= last)
        .map(|day| report_for_day(month, day))
        .collect()
}

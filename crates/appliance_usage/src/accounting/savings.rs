use tracing::debug;

use super::slicer::replay_day;
use super::tracker::accumulate;
use super::tracker::AutoOffTime;
use crate::error::Result;
use crate::profile::Day;
use crate::profile::Minutes;
use crate::profile::Profile;
use crate::profile::MAX_IN_PERIOD;

/// Minutes saved by the energy-saving device during a single period.
///
/// Only time spent switched off by the device counts. An `off` that follows
/// an `auto-off` without an `on` in between repeats the shutoff and leaves
/// the interval attributed to the device; likewise an `auto-off` after a
/// manual `off` is ignored. Each `auto-off` after an `on` opens a new
/// counted interval.
#[tracing::instrument(skip_all, fields(initial = %profile.initial, events = profile.events.len()))]
pub fn savings(profile: &Profile) -> Result<Minutes> {
    let events = profile.sorted_events();
    let total = accumulate::<AutoOffTime>(profile.initial, &events, MAX_IN_PERIOD)?;
    debug!(total, "computed savings");
    Ok(total)
}

/// Minutes saved by the device during `day` of a month profile.
#[tracing::instrument(skip(month), fields(events = month.events.len()))]
pub fn savings_for_day(month: &Profile, day: Day) -> Result<Minutes> {
    savings(&replay_day::<AutoOffTime>(month, day)?)
}

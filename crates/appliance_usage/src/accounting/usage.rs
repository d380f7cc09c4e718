use tracing::debug;

use super::tracker::accumulate;
use super::tracker::OnTime;
use crate::error::Result;
use crate::profile::Minutes;
use crate::profile::Profile;
use crate::profile::MAX_IN_PERIOD;

/// Total minutes the appliance was on during a single period.
///
/// Events may be in any order and may repeat the state already in effect;
/// repeats are ignored. The result lies in `0..=MAX_IN_PERIOD` for events
/// whose timestamps fall inside the period.
///
/// Fails with [`UsageError::InvalidState`](crate::UsageError::InvalidState)
/// if the profile contains `auto-off`.
#[tracing::instrument(skip_all, fields(initial = %profile.initial, events = profile.events.len()))]
pub fn usage(profile: &Profile) -> Result<Minutes> {
    let events = profile.sorted_events();
    let total = accumulate::<OnTime>(profile.initial, &events, MAX_IN_PERIOD)?;
    debug!(total, "computed usage");
    Ok(total)
}

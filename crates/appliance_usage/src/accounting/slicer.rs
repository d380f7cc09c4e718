//! Cutting single days out of a month-long profile.
//!
//! Month timestamps count minutes from the Epoch. A day's profile holds the
//! events inside `[start, start + MAX_IN_PERIOD)`, moved so the day starts at
//! minute 0, and the state in effect when the day begins.

use std::ops::Range;

use tracing::debug;

use super::tracker::Meter;
use super::tracker::Tracker;
use super::usage::usage;
use crate::error::Result;
use crate::profile::Day;
use crate::profile::Event;
use crate::profile::Minutes;
use crate::profile::Profile;
use crate::profile::State;

/// Result of searching the month for the first event at or after a minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
    Found(usize),
    NotFound,
}

impl Boundary {
    fn search(events: &[Event], at: Minutes) -> Self {
        events
            .iter()
            .position(|event| event.timestamp >= at)
            .map_or(Boundary::NotFound, Boundary::Found)
    }
}

/// State of the event just before `index`, or the month's initial state
/// when nothing precedes it.
fn preceding_state(month: &Profile, index: usize) -> State {
    index
        .checked_sub(1)
        .and_then(|i| month.events.get(i))
        .map_or(month.initial, |event| event.state)
}

/// Which month events belong to the day and which state the day starts in.
fn resolve(month: &Profile, first: Boundary, last: Boundary) -> (Range<usize>, State) {
    let events = &month.events;
    match (first, last) {
        (Boundary::Found(first), Boundary::Found(last)) => {
            (first..last, preceding_state(month, first))
        }
        (Boundary::Found(first), Boundary::NotFound) => {
            let range = first..events.len();
            // When the whole log starts inside this day and holds more than
            // one event, the day starts in the first event's own state. A
            // lone event falls back to the month's initial state.
            let initial = if first == 0 && range.len() > 1 {
                events[0].state
            } else {
                preceding_state(month, first)
            };
            (range, initial)
        }
        (Boundary::NotFound, Boundary::Found(_)) => (0..0, month.initial),
        (Boundary::NotFound, Boundary::NotFound) => (
            0..0,
            events.last().map_or(month.initial, |event| event.state),
        ),
    }
}

/// The zero-origin profile of a single day of `month`.
///
/// `month.events` must already be sorted by timestamp; the day boundaries
/// are found by position.
pub fn slice_day(month: &Profile, day: Day) -> Profile {
    let start = day.start();
    let first = Boundary::search(&month.events, start);
    let last = Boundary::search(&month.events, day.end());
    let (range, initial) = resolve(month, first, last);
    debug!(
        %day,
        ?first,
        ?last,
        ?range,
        %initial,
        "resolved day window"
    );

    let events = month
        .events
        .get(range)
        .unwrap_or_default()
        .iter()
        .map(|event| event.rebased(start));
    Profile::with_events(initial, events)
}

/// Like [`slice_day`], but the day's initial state is obtained by feeding
/// every earlier event through a [`Tracker`], so redundant events before
/// the day cannot leak into it.
pub(crate) fn replay_day<M: Meter>(month: &Profile, day: Day) -> Result<Profile> {
    let (start, end) = (day.start(), day.end());
    let mut before = Tracker::<M>::new(month.initial)?;
    let mut events = Vec::new();

    for event in month.sorted_events() {
        if event.timestamp >= end {
            break;
        }
        if event.timestamp < start {
            before.step(event)?;
        } else {
            events.push(event.rebased(start));
        }
    }

    Ok(Profile::with_events(before.current(), events))
}

/// Minutes the appliance was on during `day` of a month profile.
///
/// `month.events` must be sorted by timestamp.
#[tracing::instrument(skip(month), fields(events = month.events.len()))]
pub fn usage_for_day(month: &Profile, day: Day) -> Result<Minutes> {
    usage(&slice_day(month, day))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounting::tracker::AutoOffTime;
    use crate::profile::MAX_IN_PERIOD;

    fn month() -> Profile {
        Profile::new(State::On)
            .event(500, State::Off)
            .event(900, State::On)
            .event(1400, State::Off)
            .event(1700, State::On)
            .event(1900, State::Off)
            .event(2599, State::On)
            .event(2900, State::Off)
            .event(3000, State::On)
            .event(3500, State::Off)
            .event(4000, State::On)
            .event(4420, State::Off)
            .event(4500, State::On)
    }

    fn day(n: i64) -> Day {
        Day::new(n).unwrap()
    }

    #[test]
    fn test_boundary_search() {
        let month = month();
        assert_eq!(Boundary::search(&month.events, 0), Boundary::Found(0));
        assert_eq!(Boundary::search(&month.events, 1440), Boundary::Found(3));
        assert_eq!(Boundary::search(&month.events, 5760), Boundary::NotFound);
        assert_eq!(Boundary::search(&[], 0), Boundary::NotFound);
    }

    #[test]
    fn test_slice_rebases_and_takes_preceding_state() {
        let profile = slice_day(&month(), day(2));
        assert_eq!(
            profile,
            Profile::new(State::Off)
                .event(260, State::On)
                .event(460, State::Off)
                .event(1159, State::On)
        );
    }

    #[test]
    fn test_slice_first_day_uses_month_initial() {
        let profile = slice_day(&month(), day(1));
        assert_eq!(profile.initial, State::On);
        assert_eq!(profile.events.len(), 3);
    }

    #[test]
    fn test_slice_past_end_of_log_uses_last_state() {
        let profile = slice_day(&month(), day(5));
        assert_eq!(profile, Profile::new(State::On));
    }

    #[test]
    fn test_slice_whole_log_in_one_day_starts_in_first_event_state() {
        let month = Profile::new(State::Off)
            .event(100, State::On)
            .event(200, State::Off);
        let profile = slice_day(&month, day(1));
        assert_eq!(profile.initial, State::On);
        // The first event is absorbed as redundant, so the day is on from 0
        assert_eq!(usage(&profile).unwrap(), 200);
    }

    #[test]
    fn test_slice_single_event_log_uses_month_initial() {
        let month = Profile::new(State::Off).event(4500, State::On);
        let profile = slice_day(&month, day(4));
        assert_eq!(profile, Profile::new(State::Off).event(180, State::On));
    }

    #[test]
    fn test_slice_before_log_starts() {
        let month = Profile::new(State::Off).event(4500, State::On);
        assert_eq!(slice_day(&month, day(2)), Profile::new(State::Off));
    }

    #[test]
    fn test_slice_empty_month() {
        let month = Profile::new(State::On);
        assert_eq!(slice_day(&month, day(5)), Profile::new(State::On));
    }

    #[test]
    fn test_usage_for_day() {
        let month = month();
        assert_eq!(usage_for_day(&month, day(1)).unwrap(), 500 + (1400 - 900));
        assert_eq!(
            usage_for_day(&month, day(2)).unwrap(),
            1900 - 1700 + (2880 - 2599)
        );
        assert_eq!(
            usage_for_day(&month, day(3)).unwrap(),
            2900 - 2880 + (3500 - 3000) + (4320 - 4000)
        );
        assert_eq!(
            usage_for_day(&month, day(4)).unwrap(),
            4420 - 4320 + (5760 - 4500)
        );
        assert_eq!(usage_for_day(&month, day(5)).unwrap(), MAX_IN_PERIOD);
    }

    #[test]
    fn test_replay_day_uses_effective_state() {
        // The manual off at 800 repeats a shutoff, so day 2 still starts in
        // the device's auto-off.
        let month = Profile::new(State::On)
            .event(500, State::AutoOff)
            .event(800, State::Off)
            .event(1500, State::On);
        let replayed = replay_day::<AutoOffTime>(&month, day(2)).unwrap();
        assert_eq!(replayed, Profile::new(State::AutoOff).event(60, State::On));
        assert_eq!(slice_day(&month, day(2)).initial, State::Off);
    }

    #[test]
    fn test_resolve_last_found_without_first() {
        let month = month();
        assert_eq!(
            resolve(&month, Boundary::NotFound, Boundary::Found(0)),
            (0..0, month.initial)
        );
    }

    #[test]
    fn test_slice_unsorted_month_does_not_panic() {
        // An event past the day ahead of the in-day events ends the window
        let month = Profile::new(State::Off)
            .event(3000, State::On)
            .event(100, State::Off)
            .event(2000, State::Off);
        assert_eq!(slice_day(&month, day(1)), Profile::new(State::Off));

        let month = Profile::new(State::On)
            .event(100, State::Off)
            .event(1500, State::On)
            .event(3000, State::Off)
            .event(2000, State::On);
        assert_eq!(
            slice_day(&month, day(2)),
            Profile::new(State::Off).event(60, State::On)
        );
    }
}

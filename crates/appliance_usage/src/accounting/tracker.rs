//! Interval accounting over a stream of state-change events.
//!
//! A [`Tracker`] walks events in timestamp order, keeps the state in effect
//! and the minute it took effect, and adds up the time spent in the states
//! its [`Meter`] counts. Which events are real transitions and which
//! intervals count is decided entirely by the meter, so on/off usage and
//! device savings share the same bookkeeping.

use std::marker::PhantomData;

use tracing::trace;

use crate::error::Result;
use crate::error::UsageError;
use crate::profile::Event;
use crate::profile::Minutes;
use crate::profile::State;

/// Transition rules and counting policy for one state model.
pub trait Meter {
    /// Reject states that are not part of this model.
    fn admit(state: State) -> Result<State>;

    /// Whether an event carrying `next` actually changes `current`.
    /// Anything else is a redundant event and is ignored.
    fn is_transition(current: State, next: State) -> Result<bool>;

    /// Whether time spent in `state` is added to the total.
    fn counts(state: State) -> bool;
}

/// Binary on/off model: an event is a transition only if it is the toggle
/// of the current state, and time spent on is counted.
#[derive(Debug)]
pub struct OnTime;

impl Meter for OnTime {
    fn admit(state: State) -> Result<State> {
        state.binary()
    }

    fn is_transition(current: State, next: State) -> Result<bool> {
        Ok(next == current.next_state()?)
    }

    fn counts(state: State) -> bool {
        state.is_on()
    }
}

/// Extended model: the appliance alternates between on and a shutoff, and
/// whichever shutoff arrived first owns the off interval. Time spent in
/// `AutoOff` is counted.
#[derive(Debug)]
pub struct AutoOffTime;

impl Meter for AutoOffTime {
    fn admit(state: State) -> Result<State> {
        Ok(state)
    }

    fn is_transition(current: State, next: State) -> Result<bool> {
        Ok(current.is_on() != next.is_on())
    }

    fn counts(state: State) -> bool {
        state == State::AutoOff
    }
}

#[derive(Debug)]
pub struct Tracker<M> {
    current: State,
    since: Minutes,
    total: Minutes,
    meter: PhantomData<M>,
}

impl<M: Meter> Tracker<M> {
    pub fn new(initial: State) -> Result<Self> {
        Ok(Self {
            current: M::admit(initial)?,
            since: 0,
            total: 0,
            meter: PhantomData,
        })
    }

    /// State currently in effect.
    pub fn current(&self) -> State {
        self.current
    }

    /// Feed the next event. Events must arrive in timestamp order.
    ///
    /// Returns whether the event was a transition.
    pub fn step(&mut self, event: Event) -> Result<bool> {
        let next = M::admit(event.state)?;
        if !M::is_transition(self.current, next)? {
            trace!(
                timestamp = event.timestamp,
                state = %next,
                current = %self.current,
                "ignoring redundant event"
            );
            return Ok(false);
        }

        if M::counts(self.current) {
            self.total = self.add_interval(event.timestamp)?;
        }
        trace!(
            timestamp = event.timestamp,
            from = %self.current,
            to = %next,
            total = self.total,
            "transition"
        );
        self.current = next;
        self.since = event.timestamp;
        Ok(true)
    }

    /// Close the period at minute `end` and return the counted total.
    pub fn finish(self, end: Minutes) -> Result<Minutes> {
        if M::counts(self.current) {
            self.add_interval(end)
        } else {
            Ok(self.total)
        }
    }

    /// Total after counting the interval from the last transition to `until`.
    fn add_interval(&self, until: Minutes) -> Result<Minutes> {
        until
            .checked_sub(self.since)
            .and_then(|elapsed| self.total.checked_add(elapsed))
            .ok_or(UsageError::TimestampOverflow(until))
    }
}

/// Run a tracker over already-sorted events and close it at `end`.
pub fn accumulate<M: Meter>(initial: State, events: &[Event], end: Minutes) -> Result<Minutes> {
    let mut tracker = Tracker::<M>::new(initial)?;
    for event in events {
        tracker.step(*event)?;
    }
    tracker.finish(end)
}

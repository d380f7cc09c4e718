use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use strum::Display;
use strum::EnumIter;
use strum::IntoEnumIterator;
use strum::IntoStaticStr;

use crate::error::Result;
use crate::error::UsageError;

/// State of an appliance at a point in time.
///
/// The base model only knows `On` and `Off`. `AutoOff` belongs to the
/// extended model used for savings, where it marks a shutoff triggered by
/// the energy-saving device rather than by hand.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(try_from = "String", into = "&'static str")]
pub enum State {
    On,
    Off,
    AutoOff,
}

impl State {
    /// The only state a binary appliance can move to from `self`.
    ///
    /// Fails with [`UsageError::InvalidState`] for `AutoOff`, which has no
    /// meaning in the on/off model.
    pub fn next_state(self) -> Result<State> {
        match self {
            State::On => Ok(State::Off),
            State::Off => Ok(State::On),
            State::AutoOff => Err(UsageError::InvalidState(self.to_string())),
        }
    }

    /// Check that `self` is part of the on/off model.
    pub fn binary(self) -> Result<State> {
        self.next_state().map(|_| self)
    }

    /// Collapse the extended model onto the binary one: both kinds of
    /// shutoff leave the appliance off.
    pub fn as_binary(self) -> State {
        match self {
            State::On => State::On,
            State::Off | State::AutoOff => State::Off,
        }
    }

    pub fn is_on(self) -> bool {
        self == State::On
    }
}

impl FromStr for State {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self> {
        State::iter()
            .find(|state| <&'static str>::from(*state) == s)
            .ok_or_else(|| UsageError::InvalidState(s.to_string()))
    }
}

impl TryFrom<String> for State {
    type Error = UsageError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

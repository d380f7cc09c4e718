use serde::Deserialize;
use serde::Serialize;

use super::calendar::Minutes;
use super::state::State;

/// A timestamped state change reported for an appliance.
///
/// Events are raw observations: they can arrive out of order and can repeat
/// the state already in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub timestamp: Minutes,
    pub state: State,
}

impl Event {
    pub fn new(timestamp: Minutes, state: State) -> Self {
        Self { timestamp, state }
    }

    /// The same event moved `offset` minutes earlier.
    ///
    /// Only called with `offset <= timestamp`, so it cannot overflow.
    pub fn rebased(self, offset: Minutes) -> Self {
        Self {
            timestamp: self.timestamp - offset,
            ..self
        }
    }
}

/// Observed history of an appliance over one period or one month.
///
/// A profile is built by the caller for each query; the calculations only
/// borrow it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// State in effect at minute 0.
    pub initial: State,

    #[serde(default)]
    pub events: Vec<Event>,
}

impl Profile {
    pub fn new(initial: State) -> Self {
        Self {
            initial,
            events: Vec::new(),
        }
    }

    pub fn with_events(initial: State, events: impl IntoIterator<Item = Event>) -> Self {
        Self {
            initial,
            events: events.into_iter().collect(),
        }
    }

    /// Append an event, builder style.
    pub fn event(mut self, timestamp: Minutes, state: State) -> Self {
        self.events.push(Event::new(timestamp, state));
        self
    }

    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Events ordered by timestamp. Events sharing a timestamp keep their
    /// relative order. The profile itself is left untouched.
    pub fn sorted_events(&self) -> Vec<Event> {
        let mut events = self.events.clone();
        events.sort_by_key(|event| event.timestamp);
        events
    }

    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_events_is_stable_and_non_mutating() {
        let profile = Profile::new(State::On)
            .event(80, State::Off)
            .event(30, State::On)
            .event(30, State::Off);

        let sorted = profile.sorted_events();
        assert_eq!(
            sorted,
            vec![
                Event::new(30, State::On),
                Event::new(30, State::Off),
                Event::new(80, State::Off),
            ]
        );
        assert_eq!(profile.events[0], Event::new(80, State::Off));
    }

    #[test]
    fn test_rebased() {
        let event = Event::new(1700, State::On).rebased(1440);
        assert_eq!(event, Event::new(260, State::On));
    }

    #[test]
    fn test_parse_toml_profile() {
        let toml = r#"
            initial = "on"

            [[events]]
            timestamp = 126
            state = "off"

            [[events]]
            timestamp = 833
            state = "on"
        "#;

        let profile = Profile::from_toml_str(toml).unwrap();
        assert_eq!(profile.initial, State::On);
        assert_eq!(profile.events.len(), 2);
        assert_eq!(profile.events[1], Event::new(833, State::On));
    }

    #[test]
    fn test_parse_json_profile() {
        let json = r#"{
            "initial": "auto-off",
            "events": [{ "timestamp": 320, "state": "on" }]
        }"#;

        let profile = Profile::from_json_str(json).unwrap();
        assert_eq!(profile, Profile::new(State::AutoOff).event(320, State::On));
    }

    #[test]
    fn test_parse_profile_without_events() {
        let profile = Profile::from_toml_str(r#"initial = "off""#).unwrap();
        assert!(profile.events.is_empty());
    }

    #[test]
    fn test_parse_profile_invalid_state() {
        let err = Profile::from_json_str(r#"{ "initial": "ogn", "events": [] }"#).unwrap_err();
        assert!(err
            .to_string()
            .starts_with(r#"state must be "on" or "off", got "ogn""#));
    }
}

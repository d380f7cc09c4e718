mod calendar;
mod event;
mod state;

pub use calendar::Day;
pub use calendar::Minutes;
pub use calendar::MAX_IN_PERIOD;
pub use event::Event;
pub use event::Profile;
pub use state::State;

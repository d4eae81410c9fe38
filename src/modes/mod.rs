pub mod clock;
pub mod play;

pub use clock::{ClockEvent, GameClock};
pub use play::PlayMode;

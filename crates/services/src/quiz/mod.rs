mod driver;
mod progress;
mod service;
mod ticker;
mod workflow;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use driver::QuizDriver;
pub use progress::QuizProgress;
pub use service::{QuizSession, Submission};
pub use ticker::{DEFAULT_TICK_PERIOD, Tick, Ticker};
pub use workflow::QuizLoopService;

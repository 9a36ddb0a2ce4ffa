#![forbid(unsafe_code)]

pub mod error;
pub mod quiz;

pub use quiz_core::Clock;

pub use error::QuizError;
pub use quiz::{
    QuizDriver, QuizLoopService, QuizProgress, QuizSession, Submission, Tick, Ticker,
    DEFAULT_TICK_PERIOD,
};

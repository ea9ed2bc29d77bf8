#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod session;
pub mod time;

pub use error::Error;
pub use session::{
    Advance, Feedback, QuestionTicket, QuizSession, QuizSnapshot, SessionConfig, SessionPhase,
    SessionState, Tick,
};
pub use time::Clock;

pub mod history;
pub mod sentences;
pub mod speed_test;

pub use history::{HISTORY_CAPACITY, TypingHistory, TypingResult};
pub use speed_test::{CharStatus, Completion, SpeedTest};

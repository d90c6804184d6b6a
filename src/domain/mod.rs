//! Domain layer - wellness computations and journal models

pub mod assessment;
pub mod chakra;
pub mod emotion;
pub mod entry;
pub mod prompts;
pub mod recommend;
pub mod sentiment;
pub mod streak;
pub mod template;
pub mod time_ref;

pub use chakra::{evaluate, Chakra, ChakraProfile, ChakraReading, ChakraStatus};
pub use emotion::{aggregate, EmotionPoint, EmotionReading, EmotionSample, Period};
pub use entry::{EntryTimestamp, JournalEntry};
pub use streak::{ConsistencyBasis, StreakCalculator, StreakSummary};
pub use template::load_template;
pub use time_ref::{resolve_day, TimeReference};

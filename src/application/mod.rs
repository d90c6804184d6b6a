//! Application layer - Use cases and orchestration

pub mod assess;
pub mod emotions;
pub mod guidance;
pub mod init;
pub mod input;
pub mod list_entries;
pub mod manage_config;
pub mod progress;
pub mod report;
pub mod write_entry;

pub use assess::AssessService;
pub use emotions::EmotionService;
pub use guidance::GuidanceService;
pub use list_entries::{list_entries, ListFilter};
pub use manage_config::ConfigService;
pub use progress::{MonthCalendar, ProgressService};
pub use report::ReportService;
pub use write_entry::{WriteEntryService, WriteRequest};

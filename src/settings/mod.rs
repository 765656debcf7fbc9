//! Settings resolution for pbmm2_index.
//!
//! ```text
//! ParsedOptions → thread count, preset lookup, -k/-w checks → IndexSettings
//! ```
//!
//! Resolution never exits the process; callers get a [`SettingsError`] and
//! decide how to terminate.

mod error;
mod level;
mod mode;
mod resolver;
mod threads;

pub use error::{IndexParameter, SettingsError};
pub use level::LogLevel;
pub use mode::{AlignmentMode, SeedingParameters};
pub use resolver::{IndexSettings, USE_PRESET};
pub use threads::{hardware_concurrency, thread_count};

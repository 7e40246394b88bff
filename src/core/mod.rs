// Public modules
pub mod error;
pub mod lookup;
pub mod run;
pub mod talk;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Hint, Result};
pub use lookup::{resolve, Lookup, LookupOutcome};
pub use run::{CommandOutput, Runner};
pub use talk::{Channel, TalkConfig, Talker};

pub mod cli;
pub mod config;
pub mod driver;
pub mod pipeline;
pub mod resolution;
pub mod scenario;

pub use scout_common::error;
pub use scout_common::formatter;
pub use scout_common::protocol;
pub use scout_common::record;

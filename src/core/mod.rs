pub mod config;
pub mod error;
pub mod random;
pub mod types;

pub use config::WorldGenConfig;
pub use error::{HexforgeError, Result};
pub use random::GameRng;

//! Configuration for agentsite services.
//!
//! Every component receives its settings as an explicit struct at
//! construction; nothing reads the process environment after startup. The
//! `from_env` constructors exist for the server binary's boundary only.

pub mod error;
pub mod generator;
pub mod platform;
pub mod server;

pub use error::{ConfigError, ConfigResult};
pub use generator::GeneratorConfig;
pub use platform::PlatformConfig;
pub use server::ServerConfig;

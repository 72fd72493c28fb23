/// Tools for eventgen - configuration loading and validation
pub mod config;

pub use config::{ConfigLoader, GenerationConfig};

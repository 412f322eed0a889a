pub mod activity;
pub mod config;
pub mod error;
pub mod export;
pub mod generator;
pub mod preferences;
pub mod school;
pub mod shell;

pub use activity::ActivityContent;
pub use error::ErrorKind;
pub use generator::{ContentGenerator, Generate, GenerationError};
pub use shell::Shell;

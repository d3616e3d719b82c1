// f90params-cli/src/lib.rs

pub mod cli;

// Re-export commonly used types
pub use cli::{generate, print_tokens, GenerateOptions, Status};

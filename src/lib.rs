//! WOA/WOF bundle assembler for WebObjects and Wonder projects.
//!
//! This library turns a compiled project jar and its resolved dependencies
//! into the deliverables the WebObjects runtime expects:
//! - applications become a `<name>.woa` bundle directory with classpath
//!   files, launch scripts and an Info.plist
//! - frameworks get their resources and Info.plist written into the
//!   compiled jar itself
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};

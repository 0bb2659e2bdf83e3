//! WOA/WOF bundle assembly.
//!
//! This module holds everything needed to turn a compiled WebObjects
//! project into its deliverable form:
//!
//! - [`project`] - the immutable source-project descriptor
//! - [`plist`] - property-list model, serializer, and Info.plist builder
//! - [`templates`] - classpath and launch-script templates
//! - [`platform`] - the application (WOA) and framework (WOF) assemblers
//! - [`utils`] - filesystem and jar plumbing
//! - [`builder`] - the [`Bundler`] dispatching on project kind

pub mod builder;
pub mod error;
pub mod platform;
pub mod plist;
pub mod project;
pub mod templates;
pub mod utils;

pub use builder::Bundler;
pub use error::{Error, Result};
pub use plist::{PlistDict, PlistValue, build_info_plist, serialize};
pub use project::{Dependency, ProjectKind, SourceProject, SourceProjectBuilder};
pub use templates::Templates;

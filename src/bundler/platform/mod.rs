//! Bundle assemblers, one per project kind.

pub mod application;
pub mod framework;
pub mod woa;

pub use woa::Woa;

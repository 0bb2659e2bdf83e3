//! Filesystem and jar utilities shared by the bundle assemblers.

pub mod fs;
pub mod jar;

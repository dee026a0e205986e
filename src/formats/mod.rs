//! Executable container formats.

pub mod xvm;

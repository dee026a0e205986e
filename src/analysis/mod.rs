//! Program analyses over parsed XVM containers.
//!
//! `traverse` implements control-flow-seeded disassembly: it follows
//! statically known direct jumps and calls from the entry point and any
//! additional seeds, producing an address-to-text listing.

pub mod traverse;

pub use traverse::{analyze, analyze_with_config, DisassemblyMap, Traversal, WorkList};

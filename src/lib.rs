//! Disassembler for XVM virtual-machine executables.
//!
//! The crate parses the XVM container (header, symbol table, interleaved
//! section table), decodes its variable-length instruction encoding, and
//! explores reachable code from the entry point by following direct control
//! transfers.
//!
//! ```no_run
//! # fn demo(image: Vec<u8>) -> xvmdis::Result<()> {
//! let program = xvmdis::XvmProgram::from_bytes(image)?;
//! let seeds = program.code_symbol_addresses();
//! let listing = xvmdis::analyze(&program, seeds)?;
//! for (address, text) in listing.iter() {
//!     println!("{:#010x}  {}", address, text);
//! }
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod config;
pub mod disasm;
pub mod error;
pub mod formats;
pub mod logging;

pub use analysis::{analyze, analyze_with_config, DisassemblyMap, Traversal};
pub use config::{AnalysisConfig, LogFormat, LoggingConfig, TraversalConfig};
pub use disasm::{decode_instruction, DecodedInstruction, Disassembler, XvmDisassembler};
pub use error::{EncodingFault, Result, XvmError};
pub use formats::xvm::{Header, Protection, Section, Symbol, XvmProgram};

//! Control-flow-seeded traversal.
//!
//! Starting from the entry point and any caller-supplied seeds, decode
//! linearly until a path ends, queueing the literal targets of direct jumps
//! and calls. Every address is decoded at most once per run, which bounds
//! the work and breaks cycles formed by backward edges.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::TraversalConfig;
use crate::disasm::{Disassembler, Flow, XvmDisassembler};
use crate::error::{Result, XvmError};
use crate::formats::xvm::XvmProgram;

/// Virtual address to rendered instruction text for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisassemblyMap {
    lines: BTreeMap<u32, String>,
}

impl DisassemblyMap {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, address: u32, text: String) {
        let previous = self.lines.insert(address, text);
        debug_assert!(previous.is_none(), "address {:#x} decoded twice", address);
    }

    pub fn get(&self, address: u32) -> Option<&str> {
        self.lines.get(&address).map(String::as_str)
    }

    pub fn contains(&self, address: u32) -> bool {
        self.lines.contains_key(&address)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines in ascending address order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.lines.iter().map(|(a, t)| (*a, t.as_str()))
    }

    pub fn addresses(&self) -> impl Iterator<Item = u32> + '_ {
        self.lines.keys().copied()
    }

    pub fn into_inner(self) -> BTreeMap<u32, String> {
        self.lines
    }
}

/// Pending seed addresses. Last pushed is explored first.
#[derive(Debug, Clone, Default)]
pub struct WorkList {
    stack: Vec<u32>,
}

impl WorkList {
    /// Entry first, then the additional seeds in order.
    pub fn seeded(entry: u32, additional: impl IntoIterator<Item = u32>) -> Self {
        let mut stack = vec![entry];
        stack.extend(additional);
        Self { stack }
    }

    pub fn push(&mut self, address: u32) {
        self.stack.push(address);
    }

    /// Pop seeds until one not yet present in `visited`.
    pub fn next_unvisited(&mut self, visited: &DisassemblyMap) -> Option<u32> {
        while let Some(address) = self.stack.pop() {
            if visited.contains(address) {
                trace!(address, "seed already explored");
                continue;
            }
            return Some(address);
        }
        None
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

/// One traversal over a program.
pub struct Traversal<'p, D: Disassembler = XvmDisassembler> {
    program: &'p XvmProgram,
    decoder: D,
    config: TraversalConfig,
    decoded: usize,
}

impl<'p> Traversal<'p, XvmDisassembler> {
    pub fn new(program: &'p XvmProgram) -> Self {
        Self::with_decoder(program, XvmDisassembler)
    }
}

impl<'p, D: Disassembler> Traversal<'p, D> {
    pub fn with_decoder(program: &'p XvmProgram, decoder: D) -> Self {
        Self {
            program,
            decoder,
            config: TraversalConfig::default(),
            decoded: 0,
        }
    }

    pub fn with_config(mut self, config: TraversalConfig) -> Self {
        self.config = config;
        self
    }

    /// Instructions decoded so far.
    pub fn decoded(&self) -> usize {
        self.decoded
    }

    /// Explore from the entry point plus `additional` seeds.
    pub fn run(&mut self, additional: impl IntoIterator<Item = u32>) -> Result<DisassemblyMap> {
        let mut map = DisassemblyMap::new();
        let mut work = WorkList::seeded(self.program.entry(), additional);

        while let Some(seed) = work.next_unvisited(&map) {
            debug!(seed, pending = work.len(), "exploring seed");
            self.walk(seed, &mut map, &mut work)?;
        }

        debug!(
            lines = map.len(),
            decoded = self.decoded,
            decoder = self.decoder.name(),
            "traversal complete"
        );
        Ok(map)
    }

    /// Decode linearly from `seed` until the path ends or joins explored
    /// code, recording lines in `map` and queueing direct targets on `work`.
    pub fn walk(
        &mut self,
        seed: u32,
        map: &mut DisassemblyMap,
        work: &mut WorkList,
    ) -> Result<()> {
        let data = self.program.data();
        let mut address = seed;

        loop {
            let offset = self.program.translate(address)?;

            if let Some(limit) = self.config.max_instructions {
                if self.decoded >= limit {
                    return Err(XvmError::BudgetExceeded { limit });
                }
            }

            let ins = self.decoder.decode(data, offset)?;
            self.decoded += 1;
            trace!(address, offset, text = %ins.text, "decoded");

            let length = ins.length;
            let flow = ins.flow;
            let target = ins.branch_target();
            map.insert(address, ins.text);

            match flow {
                Flow::Terminal => break,
                Flow::Jump | Flow::Branch => {
                    if let Some(target) = target {
                        debug!(from = address, target, "queueing direct target");
                        work.push(target);
                    }
                    if flow == Flow::Jump {
                        break;
                    }
                }
                Flow::Sequential => {}
            }

            address = address
                .checked_add(length as u32)
                .ok_or(XvmError::UnmappedAddress {
                    address: address as u64 + length as u64,
                })?;
            if map.contains(address) {
                trace!(address, "joined explored code");
                break;
            }
        }
        Ok(())
    }
}

/// Disassemble reachable code with the default configuration.
pub fn analyze(
    program: &XvmProgram,
    additional: impl IntoIterator<Item = u32>,
) -> Result<DisassemblyMap> {
    Traversal::new(program).run(additional)
}

/// Disassemble reachable code under `config`.
pub fn analyze_with_config(
    program: &XvmProgram,
    additional: impl IntoIterator<Item = u32>,
    config: &TraversalConfig,
) -> Result<DisassemblyMap> {
    Traversal::new(program)
        .with_config(config.clone())
        .run(additional)
}

//! VM state: program counter, stacks, and memory regions.

use crate::error::RuntimeError;
use crate::syscall::Host;
use silt_common::{Program, Value};

/// Number of addressable local memory regions (one per 10-bit tag).
pub const LOCAL_REGIONS: usize = 1024;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The program ran off the end of the stream or issued a top-level
    /// `ret`.
    Completed,
    /// The program issued an `exit` syscall with this status.
    Exit(i32),
}

/// The silt virtual machine.
///
/// Owns all mutable execution state for one program; build a fresh VM
/// per program. The word stream and the host bridge are borrowed.
pub struct Vm<'a> {
    /// The immutable word stream.
    code: &'a [u16],
    /// Program counter, in words.
    pub(crate) pc: u128,
    /// Operand stack.
    stack: Vec<Value>,
    /// Return positions pushed by `call`.
    call_stack: Vec<u128>,
    /// Global memory cells, grown on write.
    global: Vec<Value>,
    /// Local regions, created lazily per tag.
    local: Vec<Vec<Value>>,
    /// Destination for effectful syscalls.
    host: &'a mut dyn Host,
}

impl<'a> Vm<'a> {
    /// Create a VM for the given program and host bridge.
    pub fn new(program: &'a Program, host: &'a mut dyn Host) -> Self {
        Self {
            code: &program.words,
            pc: 0,
            stack: Vec::new(),
            call_stack: Vec::new(),
            global: Vec::new(),
            local: Vec::new(),
            host,
        }
    }

    /// The operand stack, bottom first.
    pub fn stack(&self) -> &[Value] {
        &self.stack
    }

    /// Global memory as grown so far.
    pub fn global(&self) -> &[Value] {
        &self.global
    }

    /// A local region's cells; empty if nothing was stored under `tag`.
    pub fn local(&self, tag: u16) -> &[Value] {
        self.local.get(tag as usize).map_or(&[][..], Vec::as_slice)
    }

    pub(crate) fn host_mut(&mut self) -> &mut dyn Host {
        &mut *self.host
    }

    pub(crate) fn push(&mut self, value: Value) {
        self.stack.push(value);
    }

    pub(crate) fn pop(&mut self, at: u128) -> Result<Value, RuntimeError> {
        self.stack.pop().ok_or(RuntimeError::StackUnderflow { at })
    }

    pub(crate) fn top(&self, at: u128) -> Result<Value, RuntimeError> {
        self.stack
            .last()
            .copied()
            .ok_or(RuntimeError::StackUnderflow { at })
    }

    pub(crate) fn push_return(&mut self, pc: u128) {
        self.call_stack.push(pc);
    }

    pub(crate) fn pop_return(&mut self) -> Option<u128> {
        self.call_stack.pop()
    }

    /// True while the pc still points into the stream.
    pub(crate) fn in_code(&self) -> bool {
        self.pc < self.code.len() as u128
    }

    /// Fetch the word at the pc and advance past it.
    pub(crate) fn fetch(&mut self) -> u16 {
        let word = self.code[self.pc as usize];
        self.pc += 1;
        word
    }

    /// Read a wide immediate of `halves` little-endian 16-bit words and
    /// advance past it.
    pub(crate) fn read_wide(&mut self, at: u128, halves: usize) -> Result<u128, RuntimeError> {
        if self.pc + halves as u128 > self.code.len() as u128 {
            return Err(RuntimeError::TruncatedImmediate { at });
        }
        let mut value: u128 = 0;
        for k in 0..halves {
            value |= (self.code[self.pc as usize + k] as u128) << (16 * k);
        }
        self.pc += halves as u128;
        Ok(value)
    }

    /// Load a global cell; reads past the current length are fatal.
    pub(crate) fn global_load(&self, at: u128, address: u128) -> Result<Value, RuntimeError> {
        usize::try_from(address)
            .ok()
            .and_then(|idx| self.global.get(idx))
            .copied()
            .ok_or(RuntimeError::GlobalLoadOutOfRange {
                at,
                address,
                len: self.global.len(),
            })
    }

    /// Store a global cell, growing the region and zero-filling gaps.
    pub(crate) fn global_store(
        &mut self,
        at: u128,
        address: u128,
        value: Value,
    ) -> Result<(), RuntimeError> {
        let idx = usize::try_from(address)
            .ok()
            .ok_or(RuntimeError::AddressTooLarge { at, address })?;
        if idx >= self.global.len() {
            self.global.resize(idx + 1, Value::zero());
        }
        self.global[idx] = value;
        Ok(())
    }

    /// Load from a tagged region; missing regions and short reads are fatal.
    pub(crate) fn local_load(
        &self,
        at: u128,
        tag: u16,
        address: u128,
    ) -> Result<Value, RuntimeError> {
        let region = self.local.get(tag as usize).map_or(&[][..], Vec::as_slice);
        usize::try_from(address)
            .ok()
            .and_then(|idx| region.get(idx))
            .copied()
            .ok_or(RuntimeError::LocalLoadOutOfRange {
                at,
                tag,
                address,
                len: region.len(),
            })
    }

    /// Store into a tagged region, creating it and zero-filling gaps.
    pub(crate) fn local_store(
        &mut self,
        at: u128,
        tag: u16,
        address: u128,
        value: Value,
    ) -> Result<(), RuntimeError> {
        debug_assert!((tag as usize) < LOCAL_REGIONS, "tag is a 10-bit field");
        let idx = usize::try_from(address)
            .ok()
            .ok_or(RuntimeError::AddressTooLarge { at, address })?;
        if tag as usize >= self.local.len() {
            self.local.resize(tag as usize + 1, Vec::new());
        }
        let region = &mut self.local[tag as usize];
        if idx >= region.len() {
            region.resize(idx + 1, Value::zero());
        }
        region[idx] = value;
        Ok(())
    }
}

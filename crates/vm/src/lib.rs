//! silt virtual machine — executes 16-bit word streams.
//!
//! The VM is a stack machine with:
//! - An operand stack of tagged 128-bit values
//! - A call stack of return positions (`call`/`ret`)
//! - Global memory and 1024 tagged local regions, all grow-on-write
//! - A host bridge for `syscall` instructions
//!
//! Execution is single-threaded and synchronous; build a fresh VM per
//! program.
//!
//! # Usage
//!
//! ```
//! use silt_common::Program;
//! use silt_vm::{run, Outcome};
//!
//! // pushd16 10; pushd16 5; add
//! let program = Program::new(vec![0x5400, 10, 0x5400, 5, 0x0400]);
//! assert_eq!(run(&program).unwrap(), Outcome::Completed);
//! ```

pub mod error;
pub mod execute;
pub mod machine;
pub mod syscall;

pub use error::RuntimeError;
pub use machine::{Outcome, Vm};
pub use syscall::{Host, SystemHost, SYS_EXIT, SYS_READ, SYS_WRITE};

use silt_common::Program;

/// Execute a program against the process's real file descriptors.
///
/// This is the primary entry point. It runs until the program
/// completes, issues an `exit` syscall, or fails with a
/// [`RuntimeError`]. Embedders that need to intercept syscalls or
/// inspect VM state afterwards should construct a [`Vm`] directly.
pub fn run(program: &Program) -> Result<Outcome, RuntimeError> {
    let mut host = SystemHost;
    let mut vm = Vm::new(program, &mut host);
    vm.execute()
}

//! Main execution loop and opcode dispatch for the silt VM.

use crate::error::RuntimeError;
use crate::machine::{Outcome, Vm};
use silt_common::opcode::inline_operand;
use silt_common::{Opcode, Value, Width};

impl<'a> Vm<'a> {
    /// Execute until the program completes, exits, or fails.
    ///
    /// Execution completes normally when the pc runs off the end of the
    /// stream or a `ret` finds the call stack empty.
    pub fn execute(&mut self) -> Result<Outcome, RuntimeError> {
        while self.in_code() {
            let at = self.pc;
            let word = self.fetch();
            let opcode = Opcode::from_word(word).map_err(|_| RuntimeError::UnknownOpcode {
                at,
                opcode: (word >> silt_common::opcode::OPCODE_SHIFT) as u8,
            })?;

            match opcode {
                Opcode::Add => self.binary(at, Value::wrapping_add)?,
                Opcode::Sub => self.binary(at, Value::wrapping_sub)?,
                Opcode::Mul => self.binary(at, Value::wrapping_mul)?,
                Opcode::Div => {
                    let b = self.pop(at)?;
                    let a = self.pop(at)?;
                    let quotient = a
                        .checked_div(b)
                        .ok_or(RuntimeError::DivisionByZero { at })?;
                    self.push(quotient);
                }

                Opcode::Pop => {
                    self.pop(at)?;
                }
                Opcode::Dup => {
                    let value = self.top(at)?;
                    self.push(value);
                }

                Opcode::Jmp => {
                    self.pc = self.read_wide(at, 8)?;
                }
                Opcode::Jz => {
                    let dest = self.read_wide(at, 8)?;
                    if self.pop(at)?.bits() == 0 {
                        self.pc = dest;
                    }
                }
                Opcode::Jnz => {
                    let dest = self.read_wide(at, 8)?;
                    if self.pop(at)?.bits() != 0 {
                        self.pc = dest;
                    }
                }
                Opcode::Call => {
                    let dest = self.read_wide(at, 8)?;
                    self.push_return(self.pc);
                    self.pc = dest;
                }
                Opcode::Ret => match self.pop_return() {
                    Some(pc) => self.pc = pc,
                    // Top-level ret: the program is done.
                    None => return Ok(Outcome::Completed),
                },

                Opcode::Eq => self.compare(at, |a, b| a == b)?,
                Opcode::Lt => self.compare(at, |a, b| a < b)?,
                Opcode::Gt => self.compare(at, |a, b| a > b)?,

                Opcode::Gload => {
                    let address = self.pop(at)?.bits();
                    let value = self.global_load(at, address)?;
                    self.push(value);
                }
                Opcode::Gstore => {
                    let address = self.pop(at)?.bits();
                    let value = self.pop(at)?;
                    self.global_store(at, address, value)?;
                }
                Opcode::Lload => {
                    let tag = inline_operand(word);
                    let address = self.pop(at)?.bits();
                    let value = self.local_load(at, tag, address)?;
                    self.push(value);
                }
                Opcode::Lstore => {
                    let tag = inline_operand(word);
                    let address = self.pop(at)?.bits();
                    let value = self.pop(at)?;
                    self.local_store(at, tag, address, value)?;
                }

                Opcode::Pushd8 => {
                    let data = self.read_wide(at, 1)?;
                    self.push(Value::new(Width::B8, data & 0xFF));
                }
                Opcode::Pushd16 => {
                    let data = self.read_wide(at, 1)?;
                    self.push(Value::new(Width::B16, data));
                }
                Opcode::Pushd32 => {
                    let data = self.read_wide(at, 2)?;
                    self.push(Value::new(Width::B32, data));
                }
                Opcode::Pushd64 => {
                    let data = self.read_wide(at, 4)?;
                    self.push(Value::new(Width::B64, data));
                }
                Opcode::Pushd128 => {
                    let data = self.read_wide(at, 8)?;
                    self.push(Value::new(Width::B128, data));
                }

                Opcode::Syscall => {
                    if let Some(status) = self.handle_syscall(at, inline_operand(word))? {
                        return Ok(Outcome::Exit(status));
                    }
                }
            }
        }

        Ok(Outcome::Completed)
    }

    /// Pop b, pop a, push op(a, b). The result carries a's width.
    fn binary(
        &mut self,
        at: u128,
        op: fn(Value, Value) -> Value,
    ) -> Result<(), RuntimeError> {
        let b = self.pop(at)?;
        let a = self.pop(at)?;
        self.push(op(a, b));
        Ok(())
    }

    /// Pop b, pop a, push the unsigned comparison as an 8-bit 0 or 1.
    fn compare(&mut self, at: u128, op: fn(u128, u128) -> bool) -> Result<(), RuntimeError> {
        let b = self.pop(at)?;
        let a = self.pop(at)?;
        let r = op(a.bits(), b.bits());
        self.push(Value::new(Width::B8, r as u128));
        Ok(())
    }
}

//! CLI command implementations.

use std::fs;
use std::process;

use silt_common::Program;
use silt_vm::Outcome;

/// Assemble a source file and write the word stream to `output`.
pub fn assemble(input: &str, output: &str) -> Result<(), i32> {
    let program = assemble_file(input)?;
    let bytes = program.to_bytes();

    fs::write(output, &bytes).map_err(|e| {
        eprintln!("error: cannot write '{output}': {e}");
        1
    })?;

    eprintln!(
        "assembled {} words ({} bytes) -> {output}",
        program.len(),
        bytes.len()
    );
    Ok(())
}

/// Run a bytecode file.
pub fn run(input: &str) -> Result<(), i32> {
    let bytes = fs::read(input).map_err(|e| {
        eprintln!("error: cannot read '{input}': {e}");
        1
    })?;
    execute(&Program::from_bytes(&bytes))
}

/// Assemble a source file and run it without writing bytecode to disk.
pub fn assemble_run(input: &str) -> Result<(), i32> {
    let program = assemble_file(input)?;
    execute(&program)
}

fn assemble_file(input: &str) -> Result<Program, i32> {
    let text = fs::read_to_string(input).map_err(|e| {
        eprintln!("error: cannot read '{input}': {e}");
        1
    })?;

    silt_assembler::assemble(&text).map_err(|e| {
        eprintln!("error: {e}");
        1
    })
}

fn execute(program: &Program) -> Result<(), i32> {
    match silt_vm::run(program) {
        Ok(Outcome::Completed) => Ok(()),
        // The program asked to exit; its status becomes ours.
        Ok(Outcome::Exit(status)) => process::exit(status),
        Err(e) => {
            eprintln!("runtime error: {e}");
            Err(1)
        }
    }
}

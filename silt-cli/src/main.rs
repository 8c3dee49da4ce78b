//! silt CLI — assemble and run word-stream programs.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Usage, I/O, assembly, or runtime error
//! - n: The program issued an `exit` syscall with status n

mod commands;

use std::process;

enum Mode {
    Assemble,
    Run,
    AssembleRun,
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut mode: Option<Mode> = None;
    let mut input: Option<String> = None;
    let mut output = String::from("a.out");

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                return;
            }
            "-a" | "--assemble" => mode = Some(Mode::Assemble),
            "-r" | "--run" => mode = Some(Mode::Run),
            "-ar" | "--assemble-run" => mode = Some(Mode::AssembleRun),
            "-o" => {
                if i + 1 < args.len() {
                    i += 1;
                    output = args[i].clone();
                } else {
                    eprintln!("error: -o requires an argument");
                    process::exit(1);
                }
            }
            other if other.starts_with('-') => {
                eprintln!("error: unknown option '{other}'");
                eprintln!();
                print_usage();
                process::exit(1);
            }
            other => {
                if input.is_some() {
                    eprintln!("error: multiple input files specified");
                    process::exit(1);
                }
                input = Some(other.to_string());
            }
        }
        i += 1;
    }

    let Some(input) = input else {
        eprintln!("error: no input file specified");
        eprintln!();
        print_usage();
        process::exit(1);
    };
    let Some(mode) = mode else {
        eprintln!("error: no mode specified; use -a, -r, or -ar");
        eprintln!();
        print_usage();
        process::exit(1);
    };

    let result = match mode {
        Mode::Assemble => commands::assemble(&input, &output),
        Mode::Run => commands::run(&input),
        Mode::AssembleRun => commands::assemble_run(&input),
    };

    if let Err(code) = result {
        process::exit(code);
    }
}

fn print_usage() {
    eprintln!("Usage: silt [options] <input-file>");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -a, --assemble       Assemble the input file (output: a.out, or -o <file>)");
    eprintln!("  -r, --run            Run the input bytecode file");
    eprintln!("  -ar, --assemble-run  Assemble and immediately run the input file");
    eprintln!("  -o <file>            Output path for -a");
    eprintln!("  -h, --help           Show this message");
}

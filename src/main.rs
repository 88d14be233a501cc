use std::{collections::HashMap, fs};

use clap::Parser;
use gencalc::{compile_str, compiler::render, evaluate_str};

/// gencalc is an expression calculator that can also compile
/// assignment-bearing formulas into flat statement sequences.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells gencalc to look at a file instead of an inline expression.
    #[arg(short, long)]
    file: bool,

    /// Emit compiled statements instead of evaluating.
    #[arg(short, long)]
    emit: bool,

    contents: String,
}

fn main() {
    let args = Args::parse();

    let script = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        })
    } else {
        args.contents
    };

    if let Err(e) = run(&script, args.emit) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

/// Runs every non-empty line of the script through the selected backend.
///
/// Evaluation shares one binding store across lines and prints each
/// produced value; emit mode appends every line's compilation to one
/// buffer and prints the rendered program at the end.
fn run(script: &str, emit: bool) -> Result<(), Box<dyn std::error::Error>> {
    let lines = script.lines().filter(|line| !line.trim().is_empty());

    if emit {
        let mut code = Vec::new();
        for line in lines {
            compile_str(line, &mut code)?;
        }
        if !code.is_empty() {
            println!("{}", render(&code));
        }
    } else {
        let mut bindings = HashMap::new();
        for line in lines {
            if let Some(value) = evaluate_str(line, &mut bindings)? {
                println!("{value}");
            }
        }
    }

    Ok(())
}

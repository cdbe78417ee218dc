//! Console front end for the Qirkat engine
//!
//! Reads commands from an optional script file and then from standard
//! input, and plays the game on a text board.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use qirkat::game::{Session, TextReporter};
use qirkat::search::minimax::MAX_DEPTH;

#[derive(Parser, Debug)]
#[command(name = "qirkat", about = "Play Qirkat (Alquerque) against an AI", version)]
struct Args {
    /// Maximum AI search depth
    #[arg(long, default_value_t = MAX_DEPTH)]
    depth: u32,

    /// Print the board after every change
    #[arg(long)]
    display: bool,

    /// Commands to run before reading from standard input
    script: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let stdin = io::stdin();
    let mut input: Box<dyn BufRead> = match &args.script {
        Some(path) => match File::open(path) {
            Ok(file) => Box::new(BufReader::new(file.chain(stdin.lock()))),
            Err(err) => {
                eprintln!("cannot open {}: {err}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => Box::new(stdin.lock()),
    };

    let mut session = Session::new(args.depth, args.display, Box::new(TextReporter));
    match session.run(&mut input) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

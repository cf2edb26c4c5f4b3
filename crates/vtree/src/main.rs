//! Command-line driver for the virtual namespace tree
//!
//! Usage:
//!   vtree --demo        run the sample scenario
//!   vtree [--ascii]     read commands from stdin, one per line
//!
//! Set `RUST_LOG=debug` to trace every mutation.

use anyhow::{Context, Result};
use log::{info, warn};
use std::env;
use std::io::{self, BufRead, Write};
use vtree::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let ascii = args.iter().any(|a| a == "--ascii");
    let mut shell = Shell::with_options(RenderOptions::new().ascii(ascii));

    if args.iter().any(|a| a == "--demo") {
        print!("{}", shell.run_demo()?);
        return Ok(());
    }

    info!("reading commands from stdin");
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        match shell.run_line(&line) {
            Ok(output) => write!(stdout, "{}", output)?,
            Err(err) => {
                warn!("command failed: {:#}", err);
                writeln!(stdout, "error: {:#}", err)?;
            }
        }
        stdout.flush()?;
    }

    info!("session finished with {} nodes", shell.namespace().node_count());
    Ok(())
}

//! Interactive command loop
//!
//! Reads one command per line, dispatches it against the [`Session`] and
//! prints the outcome. Errors from a command are printed and the loop
//! carries on; only `quit` or end of input stop it.

pub mod command;
pub mod display;

pub use command::{Command, HELP};
pub use display::{format_hex_dump, format_regions, format_results};

use crate::config::ScannerConfig;
use crate::memory::MemoryAccess;
use crate::process::Session;
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Output settings for the loop
#[derive(Debug, Clone, Copy)]
pub struct ConsoleOptions {
    pub print_limit: usize,
    pub preview_bytes: usize,
}

impl From<&ScannerConfig> for ConsoleOptions {
    fn from(config: &ScannerConfig) -> Self {
        ConsoleOptions {
            print_limit: config.print_limit,
            preview_bytes: config.preview_bytes,
        }
    }
}

/// Whether the loop should keep reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

fn print_results<M: MemoryAccess, W: Write>(
    session: &Session<M>,
    out: &mut W,
    options: ConsoleOptions,
) -> io::Result<()> {
    let text = format_results(session.results(), options.print_limit, |address| {
        session
            .read_raw(address, options.preview_bytes)
            .unwrap_or_default()
    });
    out.write_all(text.as_bytes())
}

/// Runs one command against the session
pub fn execute<M: MemoryAccess, W: Write>(
    session: &mut Session<M>,
    command: Command,
    out: &mut W,
    options: ConsoleOptions,
) -> io::Result<Flow> {
    debug!(?command, "executing");

    match command {
        Command::Help => out.write_all(HELP.as_bytes())?,
        Command::Quit => {
            writeln!(out, "bye")?;
            return Ok(Flow::Quit);
        }
        Command::Clear => {
            session.clear_results();
            writeln!(out, "success")?;
        }
        Command::Print => print_results(session, out, options)?,
        Command::Regions => out.write_all(format_regions(session.regions()).as_bytes())?,
        Command::Reload => match session.reload_regions() {
            Ok(count) => writeln!(out, "{count} regions")?,
            Err(e) => writeln!(out, "reload failed: {e}")?,
        },
        Command::Dump { address, length } => match session.read_raw(address, length) {
            Ok(bytes) => out.write_all(format_hex_dump(address, &bytes).as_bytes())?,
            Err(e) => writeln!(out, "read failed: {e}")?,
        },
        Command::SetWidth(bits) => {
            // anything but 8/16/32/64 leaves the width alone
            if let Ok(bits) = bits.parse::<u32>() {
                session.set_width(bits);
            }
        }
        Command::Find(value) => match session.scan(&value) {
            Ok(_) => print_results(session, out, options)?,
            Err(e) => writeln!(out, "scan failed: {e}")?,
        },
        Command::Write { index, value } => match session.patch(index, &value) {
            Ok(written) => writeln!(
                out,
                "write success {} {:?}",
                written.bytes().len(),
                written.bytes()
            )?,
            Err(e) => writeln!(out, "write failed: {e}")?,
        },
        Command::Invalid(reason) => {
            writeln!(out, "{reason}")?;
            out.write_all(HELP.as_bytes())?;
        }
    }

    Ok(Flow::Continue)
}

/// Runs the prompt loop until `quit` or end of input
pub fn run<M: MemoryAccess, R: BufRead, W: Write>(
    session: &mut Session<M>,
    input: R,
    out: &mut W,
    options: ConsoleOptions,
) -> io::Result<()> {
    let mut lines = input.lines();

    loop {
        write!(out, "({} {} {}) ", session.name(), session.pid(), session.width())?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            return Ok(());
        };

        let Some(command) = Command::parse(&line?) else {
            continue;
        };

        if execute(session, command, out, options)? == Flow::Quit {
            return Ok(());
        }
    }
}

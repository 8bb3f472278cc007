use anyhow::Result;
use is_terminal::IsTerminal;
use std::io;
use std::process::ExitCode;
use terminal_size::{terminal_size, Width};

const DEFAULT_WIDTH: usize = 80;

fn main() -> Result<ExitCode> {
    let config = numset::args::parsed();

    numset::install_logger(config.log_level)?;

    let stdout = io::stdout();
    let passed = if stdout.is_terminal() {
        let width = terminal_size().map_or(DEFAULT_WIDTH, |(Width(w), _)| usize::from(w));
        numset::run(&config, width, stdout.lock())?
    } else {
        numset::run(&config, DEFAULT_WIDTH, io::BufWriter::new(stdout.lock()))?
    };
    Ok(if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

use std::io::{self, BufRead, Write};

use crate::cli::{execute, parse_line, CliError, Commands};
use crate::core::error::FfxError;

pub fn run(ffmpeg: &str) -> Result<(), CliError> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();
    let mut line = String::new();

    loop {
        line.clear();
        print!("ffcmd> ");
        stdout.flush().map_err(FfxError::from)?;

        if input.read_line(&mut line).map_err(FfxError::from)? == 0 {
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
            break;
        }

        match parse_line(trimmed) {
            Ok(Commands::Repl) => eprintln!("Already in REPL."),
            Ok(command) => {
                if let Err(err) = execute(ffmpeg, command) {
                    eprintln!("{err}");
                }
            }
            Err(err) => eprintln!("{err}"),
        }
    }

    Ok(())
}

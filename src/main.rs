//! spritepad - command-line tool for .ssp sprite animation files

use std::process::ExitCode;

use spritepad::cli;

fn main() -> ExitCode {
    cli::run()
}

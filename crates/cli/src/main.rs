use std::process::ExitCode;

use clap::Parser;

use subcalc_cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    subcalc_observability::init(cli.log_format());

    let mut stdout = std::io::stdout().lock();
    match subcalc_cli::run(&cli, &mut stdout) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

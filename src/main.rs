use anyhow::{Context, Result};
use bats::cli::Cli;
use bats::config::Config;
use bats::report::{self, Selection, Summary};
use bats::sysfs::PowerSupplyDir;
use clap::Parser;
use colored::Colorize;
use std::io::Write;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env();
    let selection = Selection::from_args(cli.args, &config.verbose_flag);
    bats::logging::init(selection.verbose);

    let ps = PowerSupplyDir::new(&config.power_supply_dir);
    let summary = report::summarize(&ps, &config, selection)?;
    print_summary(&summary).context("failed to write to stdout")
}

/// Status bytes go out as read, so write bytes rather than `println!`.
fn print_summary(summary: &Summary) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&summary.to_bytes())?;
    stdout.write_all(b"\n")?;
    stdout.flush()
}

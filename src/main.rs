mod cli;
mod commands;
mod config;
mod manifest;
mod ui;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Command};
use log::LevelFilter;
use std::io;

/// Output flags shared by every command
pub struct Context {
    pub verbose: u8,
    pub quiet: bool,
}

/// `-q` wins over `-v`; each `-v` lowers the threshold one step
fn log_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn init_logging(ctx: &Context) {
    // RUST_LOG refines the flag-derived level, e.g. `RUST_LOG=ureq=warn`.
    env_logger::Builder::new()
        .filter_level(log_level(ctx.verbose, ctx.quiet))
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let ctx = Context {
        verbose: cli.verbose,
        quiet: cli.quiet,
    };
    init_logging(&ctx);

    match cli.command {
        Command::Apply(args) => commands::apply::run(&ctx, args),
        Command::Validate { manifest } => commands::validate::run(&ctx, &manifest),
        Command::Completions { shell } => {
            generate(shell, &mut Cli::command(), "sentry-converge", &mut io::stdout());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_from_flags() {
        assert_eq!(log_level(0, false), LevelFilter::Warn);
        assert_eq!(log_level(1, false), LevelFilter::Info);
        assert_eq!(log_level(2, false), LevelFilter::Debug);
        assert_eq!(log_level(5, false), LevelFilter::Trace);
    }

    #[test]
    fn test_quiet_overrides_verbose() {
        assert_eq!(log_level(3, true), LevelFilter::Error);
    }
}

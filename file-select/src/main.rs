use anyhow::Context;
use clap::Parser;
use el_file_select::Cli;
use el_file_select::Launch;
use el_file_select::StdinPrompt;
use el_file_select::TerminalPresenter;
use el_file_select::run_main;
use std::process::Command;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    if let Some(dir) = &cli.cwd {
        std::env::set_current_dir(dir)
            .with_context(|| format!("cannot change to {}", dir.display()))?;
    }

    let dry_run = cli.dry_run;
    match run_main(cli, &TerminalPresenter, &mut StdinPrompt)? {
        Launch::Abort => Ok(()),
        Launch::Exec(argv) if dry_run => {
            println!("{}", serde_json::to_string(&argv)?);
            Ok(())
        }
        Launch::Exec(argv) => launch(&argv),
    }
}

fn init_tracing() {
    let default_level = "error";
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(env_filter);

    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}

/// Hands `argv` to the OS directly; nothing is interpreted by a shell.
fn launch(argv: &[String]) -> anyhow::Result<()> {
    let Some((program, args)) = argv.split_first() else {
        anyhow::bail!("nothing to run");
    };
    tracing::info!(?argv, "launching");
    exec(program, args)
}

#[cfg(unix)]
fn exec(program: &str, args: &[String]) -> anyhow::Result<()> {
    use std::os::unix::process::CommandExt;

    // Only returns on failure.
    let err = Command::new(program).args(args).exec();
    Err(err).with_context(|| format!("failed to run `{program}`"))
}

#[cfg(not(unix))]
fn exec(program: &str, args: &[String]) -> anyhow::Result<()> {
    let status = Command::new(program)
        .args(args)
        .status()
        .with_context(|| format!("failed to run `{program}`"))?;
    std::process::exit(status.code().unwrap_or(1));
}

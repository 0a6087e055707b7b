//! Taskflow - Natural language task tracker

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use taskflow::cli::{self, Cli, Commands};
use taskflow::config::Config;
use taskflow::tui;

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::var("TASKFLOW_DEBUG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter("taskflow=debug")
            .init();
    }

    let cli = Cli::parse();

    // Completion generation needs no app data and must work in
    // read-only environments.
    if let Some(Commands::Completion { shell }) = cli.command {
        generate(shell, &mut Cli::command(), "taskflow", &mut std::io::stdout());
        return Ok(());
    }

    let profile = match cli.profile {
        Some(profile) => profile,
        None => Config::load()?.default_profile,
    };

    match cli.command {
        Some(Commands::Add(args)) => cli::add::run(&profile, args).await,
        Some(Commands::Parse(args)) => cli::parse::run(&profile, args).await,
        Some(Commands::List(args)) => cli::list::run(&profile, args).await,
        Some(Commands::Done(args)) => cli::done::run(&profile, args).await,
        Some(Commands::Remove(args)) => cli::remove::run(&profile, args).await,
        Some(Commands::Clear) => cli::clear::run(&profile).await,
        Some(Commands::Completion { .. }) => unreachable!(),
        None => tui::run(&profile).await,
    }
}

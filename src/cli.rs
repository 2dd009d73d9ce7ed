use std::path::{Path, PathBuf};

mod init;
mod inquiries;
mod session;
mod terminal;

use clap::ArgAction;
use init::Init;
use inquiries::Inquiries;
use session::Run;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the gender vocabulary config file
    #[arg(short, long, default_value = "relief.toml", global = true)]
    config: PathBuf,

    /// The path to the SQLite inquiry log
    #[arg(short, long, default_value = "inquiries.db", global = true)]
    db: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command
            .unwrap_or_else(|| Command::Run(Run::default()))
            .run(&self.config, &self.db)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Run an interactive registry session (default)
    Run(Run),

    /// Write the default configuration file
    Init(Init),

    /// List the stored inquirer call log
    Inquiries(Inquiries),
}

impl Command {
    fn run(self, config: &Path, db: &Path) -> anyhow::Result<()> {
        match self {
            Self::Run(command) => command.run(config, db)?,
            Self::Init(command) => command.run(config)?,
            Self::Inquiries(command) => command.run(db)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser as _;

    use super::*;

    #[test]
    fn defaults_to_an_interactive_session() {
        let cli = Cli::try_parse_from(["relief"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.config, PathBuf::from("relief.toml"));
        assert_eq!(cli.db, PathBuf::from("inquiries.db"));
    }

    #[test]
    fn global_flags_reach_subcommands() {
        let cli = Cli::try_parse_from(["relief", "inquiries", "--db", "calls.db", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.db, PathBuf::from("calls.db"));
        assert!(matches!(cli.command, Some(Command::Inquiries(_))));
    }

    #[test]
    fn rejects_unknown_subcommands() {
        assert!(Cli::try_parse_from(["relief", "restock"]).is_err());
    }
}

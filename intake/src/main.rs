use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use intake::commands::serve::serve;
use intake_config::SentryConfig;
use intake_utils::intake_version;
use sentry::integrations::tracing::EventFilter;
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Command::Completion { shell } = cli.command {
        clap_complete::generate(
            shell,
            &mut Cli::command(),
            env!("CARGO_BIN_NAME"),
            &mut std::io::stdout(),
        );
        return Ok(());
    }

    init_tracing();

    let config = intake_config::load().context("Failed to load config")?;

    let _sentry_guard = config.sentry.as_ref().map(init_sentry);

    match cli.command {
        Command::Serve => serve(config).await?,
        Command::CheckConfig { verbose } => {
            if verbose {
                println!("{config:#?}");
            }
        }
        Command::Completion { .. } => unreachable!(),
    }

    Ok(())
}

#[derive(Debug, Parser)]
#[command(version = intake_version())]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the REST API server accepting submissions
    #[command(aliases(["run", "start", "s"]))]
    Serve,
    /// Validate configuration
    CheckConfig {
        /// Print a debug representation of the config
        #[arg(short, long)]
        verbose: bool,
    },
    /// Generate shell completions
    Completion {
        /// The shell to generate completions for
        #[clap(value_enum)]
        shell: Shell,
    },
}

/// Log to stderr, filtered by `RUST_LOG`, and forward events to sentry.
fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    #[cfg(tracing_pretty)]
    let fmt_layer = fmt_layer.pretty();

    let sentry_layer = sentry::integrations::tracing::layer()
        .event_filter(|meta| sentry_event_filter(*meta.level()));

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(EnvFilter::from_default_env()))
        .with(sentry_layer)
        .init();
}

fn sentry_event_filter(level: Level) -> EventFilter {
    match level {
        Level::ERROR => EventFilter::Exception,
        Level::WARN => EventFilter::Event,
        Level::INFO | Level::DEBUG => EventFilter::Breadcrumb,
        Level::TRACE => EventFilter::Ignore,
    }
}

fn init_sentry(config: &SentryConfig) -> sentry::ClientInitGuard {
    sentry::init((
        config.dsn.as_str(),
        sentry::ClientOptions {
            release: Some(intake_version().into()),
            attach_stacktrace: true,
            ..Default::default()
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_aliases() {
        for alias in ["serve", "run", "start", "s"] {
            let cli = Cli::try_parse_from(["intake", alias]).unwrap();
            assert!(matches!(cli.command, Command::Serve));
        }
    }

    #[test]
    fn sentry_levels() {
        assert!(matches!(
            sentry_event_filter(Level::ERROR),
            EventFilter::Exception
        ));
        assert!(matches!(sentry_event_filter(Level::WARN), EventFilter::Event));
        assert!(matches!(
            sentry_event_filter(Level::INFO),
            EventFilter::Breadcrumb
        ));
        assert!(matches!(sentry_event_filter(Level::TRACE), EventFilter::Ignore));
    }

    #[test]
    fn check_config_verbose() {
        let cli = Cli::try_parse_from(["intake", "check-config", "-v"]).unwrap();
        assert!(matches!(cli.command, Command::CheckConfig { verbose: true }));
    }
}

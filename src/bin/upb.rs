//! uPB command-line browser.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use upb::network::{self, Association, AssociationOptions};
use upb::session::{self, Flow, Session};
use upb::{BrowserConfig, Command};
use upb_services::Services;

/// uPB: browse public JSON services from the terminal.
#[derive(Parser)]
#[command(name = "upb", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Initial encyclopedia term shown by `reload`.
    #[arg(short, long)]
    term: Option<String>,

    /// Do not try to join the configured wireless network.
    #[arg(long)]
    skip_network: bool,

    /// Commands to run in order, then exit (e.g. `upb "xkcd 353" hn`).
    commands: Vec<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with results.
    // Override with RUST_LOG=debug.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("upb=warn,upb_services=warn")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = BrowserConfig::load(cli.config.as_deref())?;
    if let Some(term) = cli.term {
        config.session.default_term = term;
    }

    let mut stdout = io::stdout();

    if !cli.skip_network {
        let iface = network::create_interface();
        let outcome = network::associate(
            iface.as_deref(),
            &config.network,
            AssociationOptions::from_config(&config.network),
            &mut stdout,
        )
        .await?;
        if let Association::Failed(reason) = &outcome {
            eprintln!("WiFi unavailable: {reason}");
        }
    }

    let services = Services::new(config.services)?;
    let mut session = Session::new(services, config.session.default_term);

    if !cli.commands.is_empty() {
        for line in &cli.commands {
            if session.execute(Command::parse(line), &mut stdout).await? == Flow::Quit {
                break;
            }
        }
        stdout.flush()?;
        return Ok(());
    }

    session::write_banner(&mut stdout)?;
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    session.run(stdin, &mut stdout).await?;
    stdout.flush()?;

    Ok(())
}

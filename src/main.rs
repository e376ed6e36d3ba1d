mod cli;
mod error;
mod model;
mod service;
mod session;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, Level};

use cli::Args;
use service::{ExternalIpResolver, GeoService, Throttle};
use session::Session;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let settings = Args::parse().merge_with_config()?;

    // Logs go to stderr so they never interleave with the prompt
    tracing_subscriber::fmt()
        .with_max_level(if settings.verbose { Level::DEBUG } else { Level::WARN })
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    debug!(
        "Config: geo_url={}, lookup_timeout={:?}, echo_timeout={:?}, throttle={:?}, echo_services={}",
        settings.geo_url,
        settings.lookup_timeout,
        settings.echo_timeout,
        settings.throttle,
        settings.echo_services.len()
    );

    let resolver = ExternalIpResolver::from_services(&settings.echo_services, settings.echo_timeout)
        .context("Failed to build echo service client")?;
    let geo = GeoService::new(&settings.geo_url, settings.lookup_timeout)
        .context("Failed to build geolocation client")?;
    let mut session = Session::new(resolver, geo, Throttle::new(settings.throttle));

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    session.run(stdin, &mut stdout).await?;

    if settings.verbose {
        session.metrics().print_summary();
    }

    Ok(())
}

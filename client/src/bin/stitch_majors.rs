//! Choose a major on the Stitch platform from the terminal.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use stitch_client::ClientSettings;
use stitch_client::domain::ports::{FixtureMajorCatalog, FixtureUserDirectory};
use stitch_client::inbound::cli::{CliArgs, run_command};
use stitch_client::outbound::cache::SessionCacheSlot;
use stitch_client::outbound::http::{HttpMajorCatalog, HttpUserDirectory, StitchApi};
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();
    init_tracing(args.log_json);

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build stitch-majors runtime")?;
    runtime.block_on(async_main(args))
}

async fn async_main(args: CliArgs) -> Result<()> {
    let loaded = ClientSettings::load_from_iter([OsString::from("stitch-majors")])
        .map_err(|error| eyre!("failed to load settings: {error}"))?;
    let settings = args.apply_to(loaded);

    let cache = Arc::new(
        SessionCacheSlot::from_path(settings.cache_path()).wrap_err("failed to open user cache")?,
    );

    let output = if args.offline {
        info!("using offline sample data");
        run_command(
            Arc::new(FixtureUserDirectory),
            Arc::new(FixtureMajorCatalog),
            cache,
            &args.command,
        )
        .await?
    } else {
        let server_url = settings.server_url().wrap_err("invalid server URL")?;
        info!(%server_url, "using Stitch API");
        let api = Arc::new(
            StitchApi::new(server_url, settings.api_options())
                .wrap_err("failed to build Stitch API client")?,
        );
        run_command(
            Arc::new(HttpUserDirectory::new(Arc::clone(&api))),
            Arc::new(HttpMajorCatalog::new(api)),
            cache,
            &args.command,
        )
        .await?
    };

    println!("{output}");
    Ok(())
}

fn init_tracing(json: bool) {
    let builder = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}

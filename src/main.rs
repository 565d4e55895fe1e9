use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::{error, info};
use maimai_b50::{
    api::{ProberClient, QueryError},
    config::{self, Config},
    describe::describe_report,
    fs_json_util::write_json,
    maimai::best::RatingReport,
};
use url::Url;

#[derive(Parser)]
#[command(about = "Recomputes the DX rating of a player from the best 50 charts on the prober")]
struct Opts {
    /// Path to the config file [default: ignore/maimai-b50.toml, if it exists]
    #[arg(long)]
    config_path: Option<PathBuf>,
    #[arg(long, conflicts_with = "qq")]
    username: Option<String>,
    #[arg(long)]
    qq: Option<String>,
    #[arg(long)]
    endpoint: Option<Url>,
    /// Number of charts counted from older versions
    #[arg(long)]
    legacy_count: Option<usize>,
    /// Number of charts counted from the current version
    #[arg(long)]
    current_count: Option<usize>,
    /// Print the result as JSON instead of text
    #[arg(long)]
    json: bool,
    /// Save the fetched player record so that it can be rated again with `rate_from_file`
    #[arg(long)]
    save_response: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opts = Opts::parse();

    let config = Config::load(opts.config_path.as_deref())?;
    let user = match config::user_identifier(opts.username, opts.qq)? {
        Some(user) => user,
        None => config
            .user_identifier()?
            .context("No player was given.  Specify --username or --qq, or set it in the config")?,
    };
    let endpoint = opts
        .endpoint
        .or_else(|| config.endpoint().clone())
        .unwrap_or_else(ProberClient::default_endpoint);
    let pool_sizes = config
        .pool_sizes()
        .with_overrides(opts.legacy_count, opts.current_count);

    let client = ProberClient::new(endpoint)?;
    let record = match client.fetch_player(&user).await {
        Ok(record) => record,
        Err(e @ (QueryError::UserNotFound(_) | QueryError::PrivacyRestricted(_))) => {
            error!("{e}");
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };
    if let Some(path) = &opts.save_response {
        write_json(path, &record)?;
        info!("Saved the player record to {path:?}.");
    }

    let report = RatingReport::compute(&record, pool_sizes);
    if opts.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", describe_report(&report));
    }
    Ok(())
}

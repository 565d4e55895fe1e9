use std::path::PathBuf;

use clap::Parser;
use maimai_b50::{
    describe::describe_report,
    fs_json_util::read_json,
    maimai::{
        best::{PoolSizes, RatingReport},
        schema::PlayerRecord,
    },
};

/// Rates a player record saved with `--save-response`, or any response of the prober.
#[derive(Parser)]
struct Opts {
    input: PathBuf,
    #[arg(long)]
    legacy_count: Option<usize>,
    #[arg(long)]
    current_count: Option<usize>,
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opts = Opts::parse();

    let record: PlayerRecord = read_json(&opts.input)?;
    let pool_sizes = PoolSizes::default().with_overrides(opts.legacy_count, opts.current_count);
    let report = RatingReport::compute(&record, pool_sizes);
    if opts.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", describe_report(&report));
    }
    Ok(())
}

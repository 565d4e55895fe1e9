use std::fmt::Display;

use anyhow::anyhow;
use clap::Parser;
use lazy_format::lazy_format;
use maimai_b50::maimai::{
    rating::{rank_coef, single_song_rating, ScoreConstant},
    schema::AchievementValue,
};

/// Prints the achievement ranges that yield the given single song rating.
#[derive(Parser)]
struct Opts {
    /// Difficulty constant, e.g. 13.7
    constant: f64,
    rating: u16,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opts = Opts::parse();

    let level = (opts.constant * 10.).round() as u8;
    let level = ScoreConstant::try_from(level).map_err(|v| anyhow!("Invalid level: {v}"))?;
    let mut start = None;
    let mut found = false;
    for a in 0..101_0001 {
        let ok = match AchievementValue::try_from(a) {
            Ok(a) => single_song_rating(level, a, rank_coef(a)).get() == opts.rating,
            _ => false,
        };
        if ok {
            start.get_or_insert(a);
        } else if let Some(start) = start.take() {
            println!("[{}, {})", show_achievement(start), show_achievement(a));
            found = true;
        }
    }
    if let Some(start) = start {
        println!("[{}, {}]", show_achievement(start), show_achievement(101_0000));
        found = true;
    }
    if !found {
        println!("No achievement yields rating {} at {level}", opts.rating);
    }
    Ok(())
}

fn show_achievement(a: u32) -> impl Display {
    lazy_format!("{}.{:04}", a / 10000, a % 10000)
}

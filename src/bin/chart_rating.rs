use clap::Parser;
use maimai_b50::maimai::{
    rating::{
        rank_coef, single_song_rating, single_song_rating_precise, ScoreConstant,
        PRECISE_RATING_DENOMINATOR,
    },
    schema::AchievementValue,
};

#[derive(Parser)]
struct Opts {
    /// Difficulty constant, e.g. 13.7
    constant: f64,
    /// Achievement in percent, e.g. 100.5
    achievement: f64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opts = Opts::parse();

    let level = ScoreConstant::saturating_from_f64(opts.constant);
    let achievement = AchievementValue::saturating_from_percent(opts.achievement);
    let coef = rank_coef(achievement);
    let res = single_song_rating_precise(level, achievement, coef);
    let factor = PRECISE_RATING_DENOMINATOR;
    println!("Constant {level}, achievement {achievement}, coefficient {coef}");
    println!(
        "Rating: {} ({}.{:08})",
        single_song_rating(level, achievement, coef),
        res / factor,
        res % factor
    );
    Ok(())
}

use std::fmt::{Display, Write};

use derive_more::From;
use serde::{Deserialize, Serialize};
use smol_str::SmolStrBuilder;

use super::schema::{AchievementValue, RatingValue};

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, From, Serialize, Deserialize)]
pub struct RankCoefficient(pub u64);

impl Display for RankCoefficient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let x = self.0 / 10;
        let y = self.0 % 10;
        write!(f, "{}.{:01}", x, y)
    }
}

// https://gamerch.com/maimai/entry/533647#content_2_1
// https://silentblue.remywiki.com/maimai_DX:Rating
pub fn rank_coef(achievement_value: AchievementValue) -> RankCoefficient {
    #[allow(clippy::mistyped_literal_suffixes)]
    #[allow(clippy::inconsistent_digit_grouping)]
    #[allow(clippy::zero_prefixed_literal)]
    let ret = match achievement_value.get() {
        100_5000.. => 22_4,
        100_4999.. => 22_2,
        100_0000.. => 21_6,
        99_9999.. => 21_4,
        99_5000.. => 21_1,
        99_0000.. => 20_8,
        98_9999.. => 20_6,
        98_0000.. => 20_3,
        97_0000.. => 20_0,
        96_9999.. => 17_6,
        94_0000.. => 16_8,
        90_0000.. => 15_2,
        80_0000.. => 13_6,
        79_9999.. => 12_8,
        75_0000.. => 12_0,
        70_0000.. => 11_2,
        60_0000.. => 9_6,
        50_0000.. => 8_0,
        40_0000.. => 6_4,
        30_0000.. => 4_8,
        20_0000.. => 3_2,
        10_0000.. => 1_6,
        0_0000.. => 0_0,
    };
    ret.into()
}

/// Difficulty constant in units of 0.1.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct ScoreConstant(u8);

impl TryFrom<u8> for ScoreConstant {
    type Error = u8;

    fn try_from(v: u8) -> Result<Self, u8> {
        #[allow(clippy::inconsistent_digit_grouping)]
        match v {
            1_0..=15_0 => Ok(Self(v)),
            _ => Err(v),
        }
    }
}

impl From<ScoreConstant> for u8 {
    fn from(value: ScoreConstant) -> Self {
        value.0
    }
}

impl Display for ScoreConstant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let x = self.0 / 10;
        let y = self.0 % 10;
        let mut buffer = SmolStrBuilder::new();
        write!(buffer, "{}.{:01}", x, y)?;
        f.pad(buffer.finish().as_str())
    }
}

impl ScoreConstant {
    /// Rounds to the nearest tenth.  Negative values and NaN become zero,
    /// and values beyond 25.5 saturate at 25.5.
    /// Unlike `try_from`, constants outside the range of in-game charts are accepted.
    pub fn saturating_from_f64(value: f64) -> Self {
        let scaled = (value * 10.).round();
        if scaled.is_nan() || scaled <= 0. {
            Self(0)
        } else {
            Self(scaled.min(u8::MAX as f64) as u8)
        }
    }

    pub fn candidates() -> impl DoubleEndedIterator<Item = Self> {
        #[allow(clippy::inconsistent_digit_grouping)]
        (1_0..=15_0).map(Self)
    }
}

/// Denominator of [`single_song_rating_precise`]:
/// 10 for the constant, 100_0000 for the achievement and 10 for the coefficient.
pub const PRECISE_RATING_DENOMINATOR: u64 = 10 * 100_0000 * 10;

pub fn single_song_rating_precise(
    score_const: ScoreConstant,
    achievement_value: AchievementValue,
    rank_coef: RankCoefficient,
) -> u64 {
    let achievement_value_clamped = achievement_value.get().min(100_5000);
    score_const.0 as u64 * achievement_value_clamped as u64 * rank_coef.0
}

pub fn single_song_rating(
    score_const: ScoreConstant,
    achievement_value: AchievementValue,
    rank_coef: RankCoefficient,
) -> RatingValue {
    let prod = single_song_rating_precise(score_const, achievement_value, rank_coef);
    RatingValue::from((prod / PRECISE_RATING_DENOMINATOR) as u16)
}

/// Rating of a single chart, given its difficulty constant and achievement in percent.
/// Out-of-range inputs are clamped, so this never fails.
pub fn chart_rating(ds: f64, achievement: f64) -> RatingValue {
    let score_const = ScoreConstant::saturating_from_f64(ds);
    let achievement_value = AchievementValue::saturating_from_percent(achievement);
    single_song_rating(score_const, achievement_value, rank_coef(achievement_value))
}

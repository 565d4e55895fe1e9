use std::fmt::{Display, Write};

use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};
use smol_str::SmolStrBuilder;
use strum::EnumIter;
use typed_builder::TypedBuilder;

/// A player record as returned by the score prober.
#[derive(Clone, PartialEq, Debug, TypedBuilder, Getters, CopyGetters, Serialize, Deserialize)]
pub struct PlayerRecord {
    #[getset(get = "pub")]
    nickname: PlayerName,
    /// The rating reported by the prober, computed with the old algorithm.
    #[serde(rename = "rating")]
    #[getset(get_copy = "pub")]
    old_rating: u32,
    #[getset(get = "pub")]
    charts: ChartPools,
}

#[derive(
    Clone,
    PartialEq,
    Eq,
    Debug,
    derive_more::From,
    derive_more::Display,
    Serialize,
    Deserialize,
)]
pub struct PlayerName(String);

impl PlayerName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Debug, Default, TypedBuilder, Getters, Serialize, Deserialize)]
#[getset(get = "pub")]
pub struct ChartPools {
    /// Charts from older versions.
    #[serde(default)]
    #[builder(default)]
    sd: Vec<ChartPerformance>,
    /// Charts from the current version.
    #[serde(default)]
    #[builder(default)]
    dx: Vec<ChartPerformance>,
}

#[derive(Clone, PartialEq, Debug, TypedBuilder, Getters, CopyGetters, Serialize, Deserialize)]
pub struct ChartPerformance {
    #[getset(get = "pub")]
    title: SongName,
    #[serde(rename = "type")]
    #[getset(get_copy = "pub")]
    generation: ScoreGeneration,
    #[serde(rename = "level_label")]
    #[getset(get_copy = "pub")]
    difficulty: ScoreDifficulty,
    #[getset(get = "pub")]
    level: LevelLabel,
    /// Difficulty constant, e.g. `13.7`.
    #[getset(get_copy = "pub")]
    ds: f64,
    /// Achievement in percent, e.g. `100.5`.
    #[serde(rename = "achievements")]
    #[getset(get_copy = "pub")]
    achievement: f64,
    #[serde(rename = "fc", default)]
    #[builder(default)]
    #[getset(get_copy = "pub")]
    full_combo_kind: FullComboKind,
    #[serde(rename = "fs", default)]
    #[builder(default)]
    #[getset(get_copy = "pub")]
    full_sync_kind: FullSyncKind,
    #[serde(rename = "rate")]
    #[getset(get_copy = "pub")]
    rank: AchievementRank,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    #[getset(get_copy = "pub")]
    song_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    #[getset(get_copy = "pub")]
    level_index: Option<u8>,
    #[serde(rename = "dxScore", default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    #[getset(get_copy = "pub")]
    deluxscore: Option<u32>,
    /// The single song rating as computed by the prober itself.
    /// Only kept for comparison; never used in place of our own value.
    #[serde(rename = "ra", default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    #[getset(get_copy = "pub")]
    reported_rating: Option<u16>,
}

#[derive(
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Debug,
    derive_more::From,
    derive_more::Display,
    Serialize,
    Deserialize,
)]
pub struct SongName(String);

impl SongName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SongName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Displayed level such as `13+`.  Not used for any computation.
#[derive(
    Clone,
    PartialEq,
    Eq,
    Debug,
    derive_more::From,
    derive_more::Display,
    Serialize,
    Deserialize,
)]
pub struct LevelLabel(String);

impl LevelLabel {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LevelLabel {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum ScoreGeneration {
    #[serde(rename = "SD")]
    Standard,
    #[serde(rename = "DX")]
    Deluxe,
}

#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize, EnumIter,
)]
pub enum ScoreDifficulty {
    Basic,
    Advanced,
    Expert,
    Master,
    #[serde(rename = "Re:MASTER")]
    ReMaster,
}

#[derive(Clone, Copy, Default, PartialEq, Eq, Debug, Serialize, Deserialize, EnumIter)]
pub enum FullComboKind {
    #[default]
    #[serde(rename = "")]
    Nothing,
    #[serde(rename = "fc")]
    FullCombo,
    #[serde(rename = "fcp")]
    FullComboPlus,
    #[serde(rename = "ap")]
    AllPerfect,
    #[serde(rename = "app")]
    AllPerfectPlus,
}

#[derive(Clone, Copy, Default, PartialEq, Eq, Debug, Serialize, Deserialize, EnumIter)]
pub enum FullSyncKind {
    #[default]
    #[serde(rename = "")]
    Nothing,
    #[serde(rename = "sync")]
    SyncPlay,
    #[serde(rename = "fs")]
    FullSync,
    #[serde(rename = "fsp")]
    FullSyncPlus,
    #[serde(rename = "fsd")]
    FullSyncDx,
    #[serde(rename = "fsdp")]
    FullSyncDxPlus,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize, EnumIter)]
pub enum AchievementRank {
    #[serde(rename = "sssp")]
    SSSPlus,
    #[serde(rename = "sss")]
    SSS,
    #[serde(rename = "ssp")]
    SSPlus,
    #[serde(rename = "ss")]
    SS,
    #[serde(rename = "sp")]
    SPlus,
    #[serde(rename = "s")]
    S,
    #[serde(rename = "aaa")]
    AAA,
    #[serde(rename = "aa")]
    AA,
    #[serde(rename = "a")]
    A,
    #[serde(rename = "bbb")]
    BBB,
    #[serde(rename = "bb")]
    BB,
    #[serde(rename = "b")]
    B,
    #[serde(rename = "c")]
    C,
    #[serde(rename = "d")]
    D,
}

/// Achievement in units of 0.0001%.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct AchievementValue(u32);

impl TryFrom<u32> for AchievementValue {
    type Error = u32;

    fn try_from(v: u32) -> Result<Self, u32> {
        match v {
            0..=101_0000 => Ok(Self(v)),
            _ => Err(v),
        }
    }
}

impl Display for AchievementValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let x = self.0 / 10000;
        let y = self.0 % 10000;
        let mut buffer = SmolStrBuilder::new();
        write!(buffer, "{}.{:04}%", x, y)?;
        f.pad(buffer.finish().as_str())
    }
}

impl AchievementValue {
    pub fn get(self) -> u32 {
        self.0
    }

    /// Converts a percentage into the fixed point representation.
    /// Negative and NaN inputs become 0%, and inputs beyond 101% become 101%.
    pub fn saturating_from_percent(percent: f64) -> Self {
        let scaled = (percent * 10000.).round();
        if scaled.is_nan() || scaled <= 0. {
            Self(0)
        } else {
            Self(scaled.min(101_0000.) as u32)
        }
    }
}

#[derive(
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Debug,
    derive_more::From,
    derive_more::Display,
    Serialize,
    Deserialize,
)]
pub struct RatingValue(u16);

impl RatingValue {
    pub fn get(self) -> u16 {
        self.0
    }
}

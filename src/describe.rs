use std::fmt::Display;

use itertools::Itertools;
use lazy_format::lazy_format;
use serde::Serialize;

use crate::maimai::{
    best::{BestSelection, RatedChart, RatingReport},
    schema::{AchievementRank, FullComboKind, FullSyncKind, ScoreDifficulty, ScoreGeneration},
};

pub const RAINBOW_RATING: u32 = 15000;
const SEPARATOR: &str = "--------------------------------";

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub enum RatingBorderColor {
    White,
    Blue,
    Green,
    Yellow,
    Red,
    Purple,
    Bronze,
    Silver,
    Gold,
    Platinum,
    Rainbow,
}

impl RatingBorderColor {
    pub fn for_rating(rating: u32) -> Self {
        use RatingBorderColor::*;
        match rating {
            15000.. => Rainbow,
            14500.. => Platinum,
            14000.. => Gold,
            13000.. => Silver,
            12000.. => Bronze,
            10000.. => Purple,
            7000.. => Red,
            4000.. => Yellow,
            2000.. => Green,
            1000.. => Blue,
            ..=999 => White,
        }
    }
}

pub fn rank_label(rank: AchievementRank) -> &'static str {
    use AchievementRank::*;
    match rank {
        D => "D",
        C => "C",
        B => "B",
        BB => "BB",
        BBB => "BBB",
        A => "A",
        AA => "AA",
        AAA => "AAA",
        S => "S",
        SPlus => "S+",
        SS => "SS",
        SSPlus => "SS+",
        SSS => "SSS",
        SSSPlus => "SSS+",
    }
}

pub fn full_combo_label(kind: FullComboKind) -> Option<&'static str> {
    use FullComboKind::*;
    Some(match kind {
        Nothing => return None,
        FullCombo => "[FULL COMBO]",
        FullComboPlus => "[FULL COMBO+]",
        AllPerfect => "[ALL PERFECT]",
        AllPerfectPlus => "[ALL PERFECT+]",
    })
}

pub fn full_sync_label(kind: FullSyncKind) -> Option<&'static str> {
    use FullSyncKind::*;
    Some(match kind {
        Nothing => return None,
        SyncPlay => "[SYNC PLAY]",
        FullSync => "[FULL SYNC]",
        FullSyncPlus => "[FULL SYNC+]",
        FullSyncDx => "[FULL SYNC DX]",
        FullSyncDxPlus => "[FULL SYNC DX+]",
    })
}

pub fn generation_label(generation: ScoreGeneration) -> &'static str {
    match generation {
        ScoreGeneration::Standard => "STD",
        ScoreGeneration::Deluxe => "DX",
    }
}

pub fn difficulty_label(difficulty: ScoreDifficulty) -> &'static str {
    use ScoreDifficulty::*;
    match difficulty {
        Basic => "Basic",
        Advanced => "Advanced",
        Expert => "Expert",
        Master => "Master",
        ReMaster => "Re:MASTER",
    }
}

pub fn describe_chart(rated: &RatedChart) -> impl Display + '_ {
    let chart = rated.chart();
    let badges = [
        full_combo_label(chart.full_combo_kind()),
        full_sync_label(chart.full_sync_kind()),
    ]
    .into_iter()
    .flatten()
    .join(" ");
    let badges = if badges.is_empty() {
        "-".to_owned()
    } else {
        badges
    };
    lazy_format!(
        "[{gen}] {title}\n\
        Level: {dif} Lv.{level} | Constant: {ds:.1}\n\
        Achievement: {ach:.4}% {rank} -> Rating: {rating}\n\
        Badges: {badges}\n",
        gen = generation_label(chart.generation()),
        title = chart.title(),
        dif = difficulty_label(chart.difficulty()),
        level = chart.level(),
        ds = chart.ds(),
        ach = chart.achievement(),
        rank = rank_label(chart.rank()),
        rating = rated.rating(),
    )
}

fn describe_selection<'a>(heading: &'a str, selection: &'a BestSelection) -> impl Display + 'a {
    let charts = selection
        .selected()
        .iter()
        .map(|chart| format!("{}{SEPARATOR}\n", describe_chart(chart)))
        .collect::<String>();
    lazy_format!(
        "========== {heading} (best {limit}) ==========\n{SEPARATOR}\n{charts}",
        limit = selection.limit(),
    )
}

pub fn describe_report(report: &RatingReport) -> impl Display + '_ {
    let legacy = describe_selection("Old charts", report.legacy());
    let current = describe_selection("New charts", report.current());
    let total = report.total();
    let to_rainbow = RAINBOW_RATING.saturating_sub(total);
    let remaining = lazy_format!(
        if to_rainbow > 0 => "{to_rainbow} more rating to reach Rainbow\n"
        else => ""
    );
    lazy_format!(
        "Player: {player}\n\
        Rating (old algorithm): {old}\n\
        \n\
        {legacy}\n\
        {current}\n\
        ========== Summary ==========\n\
        Rating: {legacy_total} (old charts) + {current_total} (new charts) = {total}\n\
        Rating color: {color:?}\n\
        {remaining}",
        player = report.player(),
        old = report.old_rating(),
        legacy_total = report.legacy().total(),
        current_total = report.current().total(),
        color = RatingBorderColor::for_rating(total),
    )
}

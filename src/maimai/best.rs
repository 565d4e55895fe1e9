use std::cmp::Reverse;

use getset::{CopyGetters, Getters};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use super::{
    rating::chart_rating,
    schema::{ChartPerformance, PlayerName, PlayerRecord, RatingValue},
};

/// A chart together with the rating recomputed from its constant and achievement.
#[derive(Clone, PartialEq, Debug, Getters, CopyGetters, Serialize)]
pub struct RatedChart {
    #[serde(flatten)]
    #[getset(get = "pub")]
    chart: ChartPerformance,
    #[getset(get_copy = "pub")]
    rating: RatingValue,
}

impl RatedChart {
    pub fn new(chart: ChartPerformance) -> Self {
        let rating = chart_rating(chart.ds(), chart.achievement());
        if let Some(reported) = chart.reported_rating() {
            if reported != rating.get() {
                debug!(
                    "Rating of {} ({:?} {:?}) differs: reported {reported}, computed {rating}",
                    chart.title(),
                    chart.generation(),
                    chart.difficulty(),
                );
            }
        }
        Self { chart, rating }
    }
}

/// Best-first list of rated charts and the sum of their ratings.
#[derive(Clone, PartialEq, Debug, Default, Getters, CopyGetters, Serialize)]
pub struct BestSelection {
    #[getset(get_copy = "pub")]
    limit: usize,
    #[getset(get = "pub")]
    selected: Vec<RatedChart>,
    #[getset(get_copy = "pub")]
    total: u32,
}

/// Rates every chart, and keeps the `n` charts with the highest rating.
/// Charts with the same rating keep their relative order in `charts`.
pub fn select_best<'a>(
    charts: impl IntoIterator<Item = &'a ChartPerformance>,
    n: usize,
) -> BestSelection {
    let mut rated: Vec<_> = charts.into_iter().cloned().map(RatedChart::new).collect();
    // `sort_by_key` is stable
    rated.sort_by_key(|chart| Reverse(chart.rating()));
    rated.truncate(n);
    let total = rated.iter().map(|chart| chart.rating().get() as u32).sum();
    trace!("Selected {} charts (limit {n}), total {total}", rated.len());
    BestSelection {
        limit: n,
        selected: rated,
        total,
    }
}

/// How many charts count towards the rating from each pool.
#[derive(Clone, Copy, PartialEq, Eq, Debug, CopyGetters, Serialize, Deserialize)]
#[getset(get_copy = "pub")]
#[serde(default, deny_unknown_fields)]
pub struct PoolSizes {
    legacy: usize,
    current: usize,
}

impl Default for PoolSizes {
    fn default() -> Self {
        Self {
            legacy: 35,
            current: 15,
        }
    }
}

impl PoolSizes {
    pub fn new(legacy: usize, current: usize) -> Self {
        Self { legacy, current }
    }

    pub fn with_overrides(self, legacy: Option<usize>, current: Option<usize>) -> Self {
        Self {
            legacy: legacy.unwrap_or(self.legacy),
            current: current.unwrap_or(self.current),
        }
    }
}

#[derive(Clone, PartialEq, Debug, Getters, CopyGetters, Serialize)]
pub struct RatingReport {
    #[getset(get = "pub")]
    player: PlayerName,
    #[getset(get_copy = "pub")]
    old_rating: u32,
    #[getset(get = "pub")]
    legacy: BestSelection,
    #[getset(get = "pub")]
    current: BestSelection,
    #[getset(get_copy = "pub")]
    total: u32,
}

impl RatingReport {
    pub fn compute(record: &PlayerRecord, pool_sizes: PoolSizes) -> Self {
        let legacy = select_best(record.charts().sd(), pool_sizes.legacy());
        let current = select_best(record.charts().dx(), pool_sizes.current());
        let total = legacy.total() + current.total();
        Self {
            player: record.nickname().clone(),
            old_rating: record.old_rating(),
            legacy,
            current,
            total,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use itertools::Itertools;
    use rand::{seq::SliceRandom, thread_rng, Rng};
    use serde_json::json;

    use crate::maimai::{
        rating::{chart_rating, ScoreConstant},
        schema::{
            AchievementRank, ChartPerformance, ChartPools, PlayerRecord, ScoreDifficulty,
            ScoreGeneration,
        },
    };

    use super::{select_best, PoolSizes, RatingReport};

    pub fn chart(title: &str, ds: f64, achievement: f64) -> ChartPerformance {
        ChartPerformance::builder()
            .title(title.into())
            .generation(ScoreGeneration::Deluxe)
            .difficulty(ScoreDifficulty::Master)
            .level("13".into())
            .ds(ds)
            .achievement(achievement)
            .rank(AchievementRank::SSS)
            .build()
    }

    /// Finds a chart whose rating is exactly `rating`.
    pub fn chart_with_rating(title: &str, rating: u16) -> ChartPerformance {
        let (ds, achievement) = ScoreConstant::candidates()
            .find_map(|ds| {
                let ds = u8::from(ds) as f64 / 10.;
                (0..=100_5000)
                    .step_by(100)
                    .map(|a| a as f64 / 10000.)
                    .find(|&a| chart_rating(ds, a).get() == rating)
                    .map(|a| (ds, a))
            })
            .unwrap_or_else(|| panic!("No chart has rating {rating}"));
        chart(title, ds, achievement)
    }

    fn titles(selection: &super::BestSelection) -> Vec<&str> {
        selection
            .selected()
            .iter()
            .map(|c| c.chart().title().as_str())
            .collect()
    }

    #[test]
    fn empty_input() {
        let res = select_best(&Vec::new(), 35);
        assert!(res.selected().is_empty());
        assert_eq!(res.total(), 0);
        assert_eq!(res.limit(), 35);
    }

    #[test]
    fn fewer_than_limit() {
        let charts = [chart("a", 12.0, 97.0), chart("b", 13.0, 100.5)];
        let res = select_best(&charts, 35);
        assert_eq!(titles(&res), ["b", "a"]);
        assert_eq!(res.total(), 292 + 232);
    }

    #[test]
    fn forty_distinct_ratings() {
        let mut charts = (1..=40)
            .map(|r| chart_with_rating(&r.to_string(), r))
            .collect_vec();
        charts.shuffle(&mut thread_rng());

        let res = select_best(&charts, 35);
        let got = res
            .selected()
            .iter()
            .map(|c| c.rating().get())
            .collect_vec();
        assert_eq!(got, (6..=40).rev().collect_vec());
        assert_eq!(res.total(), (6..=40).sum::<u32>());
        assert_eq!(res.total(), 805);
    }

    #[test]
    fn tie_with_equal_rating() {
        let charts = [chart_with_rating("A", 200), chart_with_rating("B", 200)];
        assert_eq!(titles(&select_best(&charts, 1)), ["A"]);
    }

    #[test]
    fn tie_keeps_input_order() {
        let charts = [chart("A", 13.0, 100.5), chart("B", 13.0, 100.5)];
        assert_eq!(titles(&select_best(&charts, 1)), ["A"]);
        let charts = [chart("B", 13.0, 100.5), chart("A", 13.0, 100.5)];
        assert_eq!(titles(&select_best(&charts, 1)), ["B"]);

        // Different inputs, same rating
        let charts = [
            chart("low", 10.0, 80.0),
            chart("A", 13.0, 100.5),
            chart("mid", 12.0, 99.0),
            chart("B", 13.0, 100.5001),
        ];
        let res = select_best(&charts, 3);
        assert_eq!(titles(&res), ["A", "B", "mid"]);
    }

    #[test]
    fn input_is_not_mutated() {
        let charts = vec![chart("a", 12.0, 97.0), chart("b", 13.0, 100.5)];
        let copy = charts.clone();
        let res = select_best(&charts, 1);
        assert_eq!(charts, copy);
        assert_eq!(res.selected()[0].chart(), &copy[1]);
    }

    #[test]
    fn zero_limit() {
        let charts = [chart("a", 12.0, 97.0)];
        let res = select_best(&charts, 0);
        assert!(res.selected().is_empty());
        assert_eq!(res.total(), 0);
    }

    #[test]
    fn random_properties() {
        let mut rng = thread_rng();
        for _ in 0..1000 {
            let len = rng.gen_range(0..60);
            let charts = (0..len)
                .map(|i| {
                    // Few distinct values so that ties are frequent
                    let ds = rng.gen_range(120..=125) as f64 / 10.;
                    let achievement = [97.0, 99.0, 100.0, 100.5][rng.gen_range(0..4)];
                    chart(&i.to_string(), ds, achievement)
                })
                .collect_vec();
            let n = rng.gen_range(0..50);
            let res = select_best(&charts, n);

            assert_eq!(res.selected().len(), n.min(charts.len()));
            assert_eq!(
                res.total(),
                res.selected()
                    .iter()
                    .map(|c| c.rating().get() as u32)
                    .sum::<u32>()
            );
            for (x, y) in res.selected().iter().tuple_windows() {
                assert!(x.rating() >= y.rating());
                if x.rating() == y.rating() {
                    let [x, y] = [x, y].map(|c| {
                        let title = c.chart().title().as_str();
                        title.parse::<usize>().unwrap()
                    });
                    assert!(x < y, "Tie broken out of order: {x} after {y}");
                }
            }

            let again = select_best(res.selected().iter().map(|c| c.chart()), n);
            assert_eq!(again, res);
        }
    }

    #[test]
    fn reference_ratings_are_ignored() {
        let json = r#"{
            "achievements": 100.5, "ds": 13.0, "fc": "", "fs": "",
            "level": "13", "level_label": "Master", "rate": "sssp", "ra": 999,
            "title": "A", "type": "DX"
        }"#;
        let chart: ChartPerformance = serde_json::from_str(json).unwrap();
        let res = select_best([&chart], 15);
        assert_eq!(res.total(), 292);
    }

    #[test]
    fn report_sums_both_pools() {
        let record = PlayerRecord::builder()
            .nickname("PLAYER".to_owned().into())
            .old_rating(12000)
            .charts(
                ChartPools::builder()
                    .sd(vec![
                        chart("s1", 13.0, 100.5),
                        chart("s2", 13.0, 100.0),
                        chart("s3", 12.0, 97.0),
                    ])
                    .dx(vec![chart("d1", 14.0, 99.5), chart("d2", 7.0, 80.0)])
                    .build(),
            )
            .build();
        let report = RatingReport::compute(&record, PoolSizes::new(2, 1));
        assert_eq!(report.player().as_str(), "PLAYER");
        assert_eq!(report.old_rating(), 12000);
        assert_eq!(report.legacy().total(), 292 + 280);
        assert_eq!(report.current().total(), 293);
        assert_eq!(report.total(), 292 + 280 + 293);
        assert_eq!(report.legacy().limit(), 2);
        assert_eq!(report.current().limit(), 1);
    }

    #[test]
    fn pool_sizes_from_toml() {
        let sizes: PoolSizes = toml::from_str("current = 20").unwrap();
        assert_eq!(sizes, PoolSizes::new(35, 20));
        assert_eq!(
            PoolSizes::default().with_overrides(None, Some(5)),
            PoolSizes::new(35, 5)
        );
        assert!(toml::from_str::<PoolSizes>("legcy = 30").is_err());
    }

    #[test]
    fn report_json_shape() {
        let record = PlayerRecord::builder()
            .nickname("PLAYER".to_owned().into())
            .old_rating(500)
            .charts(
                ChartPools::builder()
                    .sd(vec![chart("Old", 13.0, 100.0)])
                    .dx(vec![chart("New", 13.0, 100.5)])
                    .build(),
            )
            .build();
        let report = RatingReport::compute(&record, PoolSizes::default());
        let value = serde_json::to_value(&report).unwrap();
        let rated = |title: &str, achievements: f64, rating: u16| {
            json!({
                "title": title,
                "type": "DX",
                "level_label": "Master",
                "level": "13",
                "ds": 13.0,
                "achievements": achievements,
                "fc": "",
                "fs": "",
                "rate": "sss",
                "rating": rating,
            })
        };
        assert_eq!(
            value,
            json!({
                "player": "PLAYER",
                "old_rating": 500,
                "legacy": {
                    "limit": 35,
                    "selected": [rated("Old", 100.0, 280)],
                    "total": 280,
                },
                "current": {
                    "limit": 15,
                    "selected": [rated("New", 100.5, 292)],
                    "total": 292,
                },
                "total": 572,
            })
        );

        // A selected chart still reads as a prober record.
        let chart: ChartPerformance =
            serde_json::from_value(value["current"]["selected"][0].clone()).unwrap();
        assert_eq!(&chart, report.current().selected()[0].chart());
    }
}

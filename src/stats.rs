// src/stats.rs
//
// Descriptive statistics over a consolidated result set: per-field summary,
// performance bands, rankings, top/bottom segments, histograms and a
// previous-vs-current comparison. Everything here is pure.

use std::fmt;

use crate::results::{Field, ResultSet, ScoredStudent};

/* ---------------- Field summary ---------------- */

#[derive(Clone, Debug, PartialEq)]
pub struct FieldStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub mode: f64,
    /// Sample standard deviation (n − 1); 0 for a single value.
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub p25: f64,
    pub p75: f64,
    pub range: f64,
    /// std / mean · 100; 0 when the mean is 0.
    pub cv: f64,
}

impl FieldStats {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() { return None; }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len() as f64;
        let mean = sorted.iter().sum::<f64>() / n;
        let std_dev = if sorted.len() > 1 {
            (sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt()
        } else {
            0.0
        };
        let (min, max) = (sorted[0], sorted[sorted.len() - 1]);

        Some(Self {
            count: sorted.len(),
            mean,
            median: quantile_sorted(&sorted, 0.5),
            mode: mode_sorted(&sorted),
            std_dev,
            min,
            max,
            p25: quantile_sorted(&sorted, 0.25),
            p75: quantile_sorted(&sorted, 0.75),
            range: max - min,
            cv: if mean == 0.0 { 0.0 } else { std_dev / mean * 100.0 },
        })
    }
}

/// Linear interpolation between closest ranks: position q·(n−1).
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() { return None; }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Some(quantile_sorted(&sorted, q))
}

fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let (lo, hi) = (pos.floor() as usize, pos.ceil() as usize);
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

// Smallest of the most frequent values.
fn mode_sorted(sorted: &[f64]) -> f64 {
    let mut best = (sorted[0], 0usize);
    let mut i = 0;
    while i < sorted.len() {
        let run = sorted[i..].iter().take_while(|v| **v == sorted[i]).count();
        if run > best.1 {
            best = (sorted[i], run);
        }
        i += run;
    }
    best.0
}

/* ---------------- Performance bands ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScoreBand {
    Bajo,
    Medio,
    Alto,
    Superior,
    SinDatos,
}

impl ScoreBand {
    pub const ALL: [ScoreBand; 5] = [
        ScoreBand::Bajo, ScoreBand::Medio, ScoreBand::Alto, ScoreBand::Superior, ScoreBand::SinDatos,
    ];

    pub fn of(global: Option<f64>) -> Self {
        match global {
            None => ScoreBand::SinDatos,
            Some(g) if g <= 200.0 => ScoreBand::Bajo,
            Some(g) if g <= 300.0 => ScoreBand::Medio,
            Some(g) if g <= 400.0 => ScoreBand::Alto,
            Some(_) => ScoreBand::Superior,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Bajo => "Bajo (0-200)",
            ScoreBand::Medio => "Medio (201-300)",
            ScoreBand::Alto => "Alto (301-400)",
            ScoreBand::Superior => "Superior (401-500)",
            ScoreBand::SinDatos => "Sin datos",
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandCount {
    pub band: ScoreBand,
    pub count: usize,
    pub percent: f64,
}

/// Every band in order, zero counts included.
pub fn band_distribution(set: &ResultSet) -> Vec<BandCount> {
    let total = set.len();
    ScoreBand::ALL
        .iter()
        .map(|&band| {
            let count = set.students.iter().filter(|s| ScoreBand::of(s.global) == band).count();
            let percent = if total == 0 { 0.0 } else { count as f64 / total as f64 * 100.0 };
            BandCount { band, count, percent }
        })
        .collect()
}

/* ---------------- Ranking ---------------- */

#[derive(Clone, Debug, PartialEq)]
pub struct RankEntry {
    /// 1-based; ties share the rank (count of strictly greater + 1).
    pub rank: usize,
    pub percentile: f64,
    pub score: f64,
    pub student: ScoredStudent,
}

/// Students with a value for `field`, best first. Equal scores keep
/// roster order.
pub fn ranking(set: &ResultSet, field: Field) -> Vec<RankEntry> {
    let mut scored: Vec<(f64, &ScoredStudent)> = set.students
        .iter()
        .filter_map(|s| s.score(field).map(|v| (v, s)))
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));

    let n = scored.len();
    scored
        .iter()
        .map(|&(score, st)| {
            let rank = scored.iter().filter(|(v, _)| *v > score).count() + 1;
            RankEntry {
                rank,
                percentile: (n - rank + 1) as f64 / n as f64 * 100.0,
                score,
                student: st.clone(),
            }
        })
        .collect()
}

/* ---------------- Segments ---------------- */

/// Students whose global score is at or above the `q` quantile.
pub fn top_segment(set: &ResultSet, q: f64) -> (f64, Vec<ScoredStudent>) {
    segment(set, q, |g, cut| g >= cut)
}

/// Students whose global score is at or below the `q` quantile.
pub fn bottom_segment(set: &ResultSet, q: f64) -> (f64, Vec<ScoredStudent>) {
    segment(set, q, |g, cut| g <= cut)
}

fn segment(set: &ResultSet, q: f64, keep: impl Fn(f64, f64) -> bool) -> (f64, Vec<ScoredStudent>) {
    let Some(cut) = quantile(&set.values(Field::Global), q) else {
        return (0.0, Vec::new());
    };
    let mut picked: Vec<ScoredStudent> = set.students
        .iter()
        .filter(|s| s.global.is_some_and(|g| keep(g, cut)))
        .cloned()
        .collect();
    picked.sort_by(|a, b| b.global.unwrap_or(0.0).total_cmp(&a.global.unwrap_or(0.0)));
    (cut, picked)
}

/* ---------------- Histogram ---------------- */

#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    /// `bins + 1` ascending edges.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Equal-width bins over [min, max]; the last bin is closed. All values
    /// equal → one bin holding everything.
    pub fn new(values: &[f64], bins: usize) -> Option<Self> {
        if values.is_empty() || bins == 0 { return None; }
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if max == min {
            return Some(Self { edges: vec![min, max], counts: vec![values.len()] });
        }

        let width = (max - min) / bins as f64;
        let edges = (0..=bins).map(|i| min + width * i as f64).collect();
        let mut counts = vec![0; bins];
        for v in values {
            let ix = (((v - min) / width) as usize).min(bins - 1);
            counts[ix] += 1;
        }
        Some(Self { edges, counts })
    }

    pub fn total(&self) -> usize { self.counts.iter().sum() }
}

/* ---------------- Year-over-year comparison ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trend {
    Positive,
    Negative,
    Stable,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Trend::Positive => "positive",
            Trend::Negative => "negative",
            Trend::Stable => "stable",
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldChange {
    pub field: String,
    pub previous: f64,
    pub current: f64,
    pub change: f64,
    /// change / previous · 100; 0 when previous is 0.
    pub change_percent: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Comparison {
    pub fields: Vec<FieldChange>,
    pub mean_change: f64,
    pub trend: Trend,
}

/// Mean per field, previous vs current. Fields without data on either side
/// are left out.
pub fn compare(previous: &ResultSet, current: &ResultSet) -> Comparison {
    let fields: Vec<FieldChange> = current
        .fields()
        .into_iter()
        .filter_map(|field| {
            let prev = FieldStats::from_values(&previous.values(field))?.mean;
            let cur = FieldStats::from_values(&current.values(field))?.mean;
            let change = cur - prev;
            Some(FieldChange {
                field: s!(current.field_name(field)),
                previous: prev,
                current: cur,
                change,
                change_percent: if prev == 0.0 { 0.0 } else { change / prev * 100.0 },
            })
        })
        .collect();

    let mean_change = if fields.is_empty() {
        0.0
    } else {
        fields.iter().map(|f| f.change).sum::<f64>() / fields.len() as f64
    };
    let trend = if mean_change > 0.0 {
        Trend::Positive
    } else if mean_change < 0.0 {
        Trend::Negative
    } else {
        Trend::Stable
    };

    Comparison { fields, mean_change, trend }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantile_interpolates() {
        let v = [10.0, 20.0, 30.0, 40.0];
        assert_eq!(quantile(&v, 0.5), Some(25.0));
        assert_eq!(quantile(&v, 0.25), Some(17.5));
        assert_eq!(quantile(&v, 1.0), Some(40.0));
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[test]
    fn mode_prefers_smallest_on_tie() {
        assert_eq!(mode_sorted(&[1.0, 2.0, 2.0, 3.0, 3.0]), 2.0);
        assert_eq!(mode_sorted(&[5.0]), 5.0);
    }

    #[test]
    fn band_edges() {
        assert_eq!(ScoreBand::of(Some(200.0)), ScoreBand::Bajo);
        assert_eq!(ScoreBand::of(Some(200.5)), ScoreBand::Medio);
        assert_eq!(ScoreBand::of(Some(400.0)), ScoreBand::Alto);
        assert_eq!(ScoreBand::of(Some(401.0)), ScoreBand::Superior);
        assert_eq!(ScoreBand::of(None), ScoreBand::SinDatos);
    }

    #[test]
    fn histogram_closes_last_bin() {
        let h = Histogram::new(&[0.0, 5.0, 10.0], 2).expect("values");
        assert_eq!(h.counts, vec![1, 2]);
        assert_eq!(h.edges, vec![0.0, 5.0, 10.0]);

        let flat = Histogram::new(&[7.0, 7.0], 4).expect("values");
        assert_eq!(flat.counts, vec![2]);
    }
}

//! Simple post-hoc pattern detectors over recorded statistics.
//!
//! These are deliberately coarse: batch analyses re-derive anything finer
//! from the event log.  All three are pure functions of recorded data.

use ew_core::NodeId;

use crate::stats::SimulationStats;

/// Nodes whose entity count meets `threshold`, ascending by id.
pub fn clusters(stats: &SimulationStats, threshold: u32) -> Vec<NodeId> {
    let mut nodes: Vec<NodeId> = stats
        .spatial_distribution
        .iter()
        .filter(|&(_, &count)| count >= threshold)
        .map(|(&node, _)| node)
        .collect();
    nodes.sort_unstable();
    nodes
}

/// Dominant period of `series` by autocorrelation peak over lags
/// `2..=max_lag`.  Returns `None` for flat or aperiodic series (peak
/// correlation below 0.3) or when the series is too short.
pub fn dominant_period(series: &[usize], max_lag: usize) -> Option<usize> {
    if series.len() < 8 || max_lag < 2 {
        return None;
    }
    let n = series.len();
    let mean = series.iter().sum::<usize>() as f64 / n as f64;
    let centered: Vec<f64> = series.iter().map(|&v| v as f64 - mean).collect();
    let variance: f64 = centered.iter().map(|c| c * c).sum();
    if variance <= f64::EPSILON {
        return None;
    }

    let mut best: Option<(usize, f64)> = None;
    for lag in 2..=max_lag.min(n / 2) {
        let corr: f64 = centered[..n - lag]
            .iter()
            .zip(&centered[lag..])
            .map(|(a, b)| a * b)
            .sum::<f64>()
            / variance;
        if best.is_none_or(|(_, b)| corr > b) {
            best = Some((lag, corr));
        }
    }
    best.filter(|&(_, corr)| corr > 0.3).map(|(lag, _)| lag)
}

/// Direction of a rolling-window comparison.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Trend {
    Rising,
    Falling,
    Flat,
}

/// Compare the mean of the last `window` samples against the preceding
/// window; 5% tolerance counts as flat.  Short series read as flat.
pub fn trend(series: &[usize], window: usize) -> Trend {
    if window == 0 || series.len() < window * 2 {
        return Trend::Flat;
    }
    let recent = &series[series.len() - window..];
    let earlier = &series[series.len() - window * 2..series.len() - window];
    let recent_mean = recent.iter().sum::<usize>() as f64 / window as f64;
    let earlier_mean = earlier.iter().sum::<usize>() as f64 / window as f64;

    let tolerance = earlier_mean.abs().max(1.0) * 0.05;
    if recent_mean > earlier_mean + tolerance {
        Trend::Rising
    } else if recent_mean < earlier_mean - tolerance {
        Trend::Falling
    } else {
        Trend::Flat
    }
}

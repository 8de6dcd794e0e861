use crate::types::kpi::KpiTrend;

/// Minimum prior periods before a trend can be stated at all: the recent
/// window needs three entries and the older window at least one.
const MIN_HISTORY: usize = 4;
const RECENT_WINDOW: usize = 3;

/// Classify a trend from prior overall scores, oldest first. The mean of
/// the three most recent periods is compared against the mean of the up
/// to three periods before those; a gap beyond `threshold` in either
/// direction breaks "stable". With fewer than four prior periods the
/// trend is omitted rather than guessed.
pub fn classify(prior_overall: &[f64], threshold: f64) -> Option<KpiTrend> {
    if prior_overall.len() < MIN_HISTORY {
        return None;
    }

    let split = prior_overall.len() - RECENT_WINDOW;
    let older_start = split.saturating_sub(RECENT_WINDOW);
    let recent = &prior_overall[split..];
    let older = &prior_overall[older_start..split];

    let delta = mean(recent) - mean(older);
    if delta > threshold {
        Some(KpiTrend::Improving)
    } else if delta < -threshold {
        Some(KpiTrend::Declining)
    } else {
        Some(KpiTrend::Stable)
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

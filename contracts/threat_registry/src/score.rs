//! Read-only aggregates over a target's report list.

use soroban_sdk::{Env, Vec};

use crate::{ThreatReport, ThreatStats, REVIEW_UPVOTE_THRESHOLD, VERIFIED_SCORE_WEIGHT};

/// Severity-weighted mean across all reports for a target.
///
/// Verified reports carry [`VERIFIED_SCORE_WEIGHT`]× the weight of
/// unverified ones; the result is integer-truncated. Returns 0 when the
/// target has no reports.
pub fn weighted_score(reports: &Vec<ThreatReport>) -> u32 {
    let mut weighted_sum: u64 = 0;
    let mut weight_total: u64 = 0;
    for report in reports.iter() {
        let weight = if report.verified { VERIFIED_SCORE_WEIGHT } else { 1 };
        weighted_sum += u64::from(report.threat_level) * weight;
        weight_total += weight;
    }
    if weight_total == 0 {
        return 0;
    }
    (weighted_sum / weight_total) as u32
}

/// Unweighted summary counters for a target.
pub fn summarize(reports: &Vec<ThreatReport>) -> ThreatStats {
    let mut verified_reports: u32 = 0;
    let mut level_sum: u64 = 0;
    let mut total_upvotes: u32 = 0;
    for report in reports.iter() {
        if report.verified {
            verified_reports += 1;
        }
        level_sum += u64::from(report.threat_level);
        total_upvotes += report.upvotes;
    }

    let total_reports = reports.len();
    let average_level = if total_reports == 0 {
        0
    } else {
        (level_sum / u64::from(total_reports)) as u32
    };

    ThreatStats {
        total_reports,
        verified_reports,
        average_level,
        total_upvotes,
    }
}

/// Indices of reports the community has flagged for reviewer attention:
/// at least [`REVIEW_UPVOTE_THRESHOLD`] upvotes and still unverified.
pub fn review_candidates(env: &Env, reports: &Vec<ThreatReport>) -> Vec<u32> {
    let mut candidates = Vec::new(env);
    for (index, report) in reports.iter().enumerate() {
        if report.upvotes >= REVIEW_UPVOTE_THRESHOLD && !report.verified {
            candidates.push_back(index as u32);
        }
    }
    candidates
}

//! Report storage and per-target bookkeeping.
//!
//! Reports for a target live in one append-ordered `Vec` under a persistent
//! key; the duplicate-report and upvote guards are individual persistent
//! flags so they can be probed without loading the whole report list. The
//! verified-report counter backs the derived per-target threat flag: the
//! flag is defined as `verified_count > 0`, and every verified-flag
//! transition must adjust the counter in the same call.

use soroban_sdk::{symbol_short, Address, Env, Symbol, Vec};

use crate::ThreatReport;

const REPORTS: Symbol = symbol_short!("REPORTS");
const REPORTED: Symbol = symbol_short!("REPORTED");
const VOTED: Symbol = symbol_short!("VOTED");
const VER_CNT: Symbol = symbol_short!("VER_CNT");

pub fn load(env: &Env, target: &Address) -> Vec<ThreatReport> {
    env.storage()
        .persistent()
        .get(&(REPORTS, target.clone()))
        .unwrap_or_else(|| Vec::new(env))
}

pub fn store(env: &Env, target: &Address, reports: &Vec<ThreatReport>) {
    env.storage().persistent().set(&(REPORTS, target.clone()), reports);
}

// ── Duplicate-report guard ───────────────────────────────────────────────────

pub fn has_reported(env: &Env, target: &Address, reporter: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&(REPORTED, target.clone(), reporter.clone()))
        .unwrap_or(false)
}

pub fn set_reported(env: &Env, target: &Address, reporter: &Address) {
    env.storage()
        .persistent()
        .set(&(REPORTED, target.clone(), reporter.clone()), &true);
}

/// Cleared only when the reporter's report is removed, re-opening the
/// one-report-per-reporter slot.
pub fn clear_reported(env: &Env, target: &Address, reporter: &Address) {
    env.storage()
        .persistent()
        .remove(&(REPORTED, target.clone(), reporter.clone()));
}

// ── Upvote guard ─────────────────────────────────────────────────────────────

// Vote guards are keyed by slot index, not by report identity. After a
// swap-pop removal the report moved into the freed slot inherits that
// slot's guards; see `swap_pop` for the index-reassignment hazard.

pub fn has_upvoted(env: &Env, target: &Address, index: u32, voter: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&(VOTED, target.clone(), index, voter.clone()))
        .unwrap_or(false)
}

pub fn set_upvoted(env: &Env, target: &Address, index: u32, voter: &Address) {
    env.storage()
        .persistent()
        .set(&(VOTED, target.clone(), index, voter.clone()), &true);
}

// ── Verified-report counter ──────────────────────────────────────────────────

pub fn verified_count(env: &Env, target: &Address) -> u32 {
    env.storage()
        .persistent()
        .get(&(VER_CNT, target.clone()))
        .unwrap_or(0)
}

pub fn set_verified_count(env: &Env, target: &Address, count: u32) {
    env.storage().persistent().set(&(VER_CNT, target.clone()), &count);
}

// ── Removal ──────────────────────────────────────────────────────────────────

/// Remove the report at `index` by swapping the last slot into its place and
/// shrinking the list. Returns the removed report, or `None` when `index` is
/// out of range.
///
/// Indices are **not stable** across this call: the former last report takes
/// over `index`, so externally cached indices may silently point at a
/// different report afterwards.
pub fn swap_pop(reports: &mut Vec<ThreatReport>, index: u32) -> Option<ThreatReport> {
    let removed = reports.get(index)?;
    let last_index = reports.len() - 1;
    if index != last_index {
        if let Some(last) = reports.get(last_index) {
            reports.set(index, last);
        }
    }
    reports.pop_back();
    Some(removed)
}

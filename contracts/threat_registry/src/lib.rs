//! Community threat registry.
//!
//! Collects reports about malicious addresses, tracks their verification
//! state, and derives a per-target threat flag plus weighted severity
//! aggregates. Reports are index-addressed per target; removal uses swap-pop,
//! so indices are only stable between removals.

#![no_std]

pub mod events;
pub mod reports;
pub mod score;


use common::roles;
use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, symbol_short, Address, Env, String,
    Symbol, Vec,
};

// ── Policy constants ─────────────────────────────────────────────────────────

/// Reports at or above this severity are verified at creation time.
pub const AUTO_VERIFY_THRESHOLD: u32 = 90;
/// Severity ceiling; levels are 0–100.
pub const MAX_THREAT_LEVEL: u32 = 100;
/// Upvote count at which an unverified report becomes a review candidate.
pub const REVIEW_UPVOTE_THRESHOLD: u32 = 5;
/// Weight multiplier for verified reports in the aggregate score.
pub const VERIFIED_SCORE_WEIGHT: u64 = 3;

// ── Storage keys ─────────────────────────────────────────────────────────────

const INIT: Symbol = symbol_short!("INIT");
const OWNER: Symbol = symbol_short!("OWNER");
const VERIFIER: Symbol = symbol_short!("VERIFIER");

// ── Types ────────────────────────────────────────────────────────────────────

/// One community report against a target address.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ThreatReport {
    pub reporter: Address,
    pub timestamp: u64,
    pub threat_level: u32,
    pub threat_type: String,
    pub evidence: String,
    pub verified: bool,
    pub upvotes: u32,
}

/// Unweighted summary counters for a target.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ThreatStats {
    pub total_reports: u32,
    pub verified_reports: u32,
    pub average_level: u32,
    pub total_upvotes: u32,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum RegistryError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 10,
    ReportNotFound = 20,
    InvalidThreatLevel = 30,
    MissingThreatType = 31,
    LengthMismatch = 32,
    AlreadyReported = 40,
    AlreadyUpvoted = 41,
    SelfUpvote = 42,
    AlreadyVerified = 43,
    NotVerified = 44,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct ThreatRegistryContract;

#[contractimpl]
impl ThreatRegistryContract {
    /// Initialize the registry with its owner and the delegated verifier.
    pub fn initialize(env: Env, owner: Address, verifier: Address) -> Result<(), RegistryError> {
        if env.storage().instance().has(&INIT) {
            return Err(RegistryError::AlreadyInitialized);
        }
        owner.require_auth();

        roles::set(&env, OWNER, &owner);
        roles::set(&env, VERIFIER, &verifier);
        env.storage().instance().set(&INIT, &true);

        events::emit_initialized(&env, owner, verifier);
        Ok(())
    }

    /// Submit a report against `target`. At most one open report per
    /// (target, reporter) pair; the slot re-opens only when the report is
    /// removed. Returns the new report's index.
    pub fn submit_report(
        env: Env,
        reporter: Address,
        target: Address,
        threat_level: u32,
        threat_type: String,
        evidence: String,
    ) -> Result<u32, RegistryError> {
        Self::require_init(&env)?;
        reporter.require_auth();

        if threat_level > MAX_THREAT_LEVEL {
            return Err(RegistryError::InvalidThreatLevel);
        }
        if threat_type.len() == 0 {
            return Err(RegistryError::MissingThreatType);
        }
        if reports::has_reported(&env, &target, &reporter) {
            return Err(RegistryError::AlreadyReported);
        }

        let auto_verified = threat_level >= AUTO_VERIFY_THRESHOLD;
        let report = ThreatReport {
            reporter: reporter.clone(),
            timestamp: env.ledger().timestamp(),
            threat_level,
            threat_type: threat_type.clone(),
            evidence,
            verified: auto_verified,
            upvotes: 0,
        };

        let mut list = reports::load(&env, &target);
        let index = list.len();
        list.push_back(report);
        reports::store(&env, &target, &list);
        reports::set_reported(&env, &target, &reporter);

        if auto_verified {
            Self::bump_verified(&env, &target);
        }

        events::emit_report_submitted(
            &env,
            target,
            reporter,
            index,
            threat_level,
            threat_type,
            auto_verified,
        );
        Ok(index)
    }

    /// Upvote the report at `index`. One vote per (target, report, voter);
    /// reporters cannot vote on their own reports.
    pub fn upvote_report(
        env: Env,
        voter: Address,
        target: Address,
        index: u32,
    ) -> Result<u32, RegistryError> {
        Self::require_init(&env)?;
        voter.require_auth();

        let mut list = reports::load(&env, &target);
        let mut report = list.get(index).ok_or(RegistryError::ReportNotFound)?;
        if report.reporter == voter {
            return Err(RegistryError::SelfUpvote);
        }
        if reports::has_upvoted(&env, &target, index, &voter) {
            return Err(RegistryError::AlreadyUpvoted);
        }

        report.upvotes += 1;
        let upvotes = report.upvotes;
        list.set(index, report);
        reports::store(&env, &target, &list);
        reports::set_upvoted(&env, &target, index, &voter);

        events::emit_report_upvoted(&env, target, index, voter, upvotes);
        Ok(upvotes)
    }

    /// Mark the report at `index` verified. Verifier or owner only.
    pub fn verify_report(
        env: Env,
        caller: Address,
        target: Address,
        index: u32,
    ) -> Result<(), RegistryError> {
        Self::require_init(&env)?;
        caller.require_auth();
        Self::require_reviewer(&env, &caller)?;

        let mut list = reports::load(&env, &target);
        let mut report = list.get(index).ok_or(RegistryError::ReportNotFound)?;
        if report.verified {
            return Err(RegistryError::AlreadyVerified);
        }

        report.verified = true;
        list.set(index, report);
        reports::store(&env, &target, &list);
        Self::bump_verified(&env, &target);

        events::emit_report_verified(&env, target, index, caller);
        Ok(())
    }

    /// Revert the report at `index` to unverified. Verifier or owner only.
    pub fn unverify_report(
        env: Env,
        caller: Address,
        target: Address,
        index: u32,
    ) -> Result<(), RegistryError> {
        Self::require_init(&env)?;
        caller.require_auth();
        Self::require_reviewer(&env, &caller)?;

        let mut list = reports::load(&env, &target);
        let mut report = list.get(index).ok_or(RegistryError::ReportNotFound)?;
        if !report.verified {
            return Err(RegistryError::NotVerified);
        }

        report.verified = false;
        list.set(index, report);
        reports::store(&env, &target, &list);
        Self::drop_verified(&env, &target);

        events::emit_report_unverified(&env, target, index, caller);
        Ok(())
    }

    /// Verify a batch of (target, index) pairs. The length requirement is
    /// strict, but infeasible items — out-of-range indices and reports that
    /// are already verified — are skipped rather than failing the batch.
    /// Returns the number of reports actually verified.
    pub fn batch_verify(
        env: Env,
        caller: Address,
        targets: Vec<Address>,
        indexes: Vec<u32>,
    ) -> Result<u32, RegistryError> {
        Self::require_init(&env)?;
        caller.require_auth();
        Self::require_reviewer(&env, &caller)?;

        if targets.len() != indexes.len() {
            return Err(RegistryError::LengthMismatch);
        }

        let mut applied: u32 = 0;
        for (target, index) in targets.iter().zip(indexes.iter()) {
            // Reload per item: the batch may name the same target twice.
            let mut list = reports::load(&env, &target);
            let Some(mut report) = list.get(index) else {
                continue;
            };
            if report.verified {
                continue;
            }

            report.verified = true;
            list.set(index, report);
            reports::store(&env, &target, &list);
            Self::bump_verified(&env, &target);

            events::emit_report_verified(&env, target, index, caller.clone());
            applied += 1;
        }
        Ok(applied)
    }

    /// Overwrite a report's severity in place. Verifier or owner only.
    /// Does not re-trigger auto-verification or touch the threat flag.
    pub fn update_threat_level(
        env: Env,
        caller: Address,
        target: Address,
        index: u32,
        new_level: u32,
    ) -> Result<(), RegistryError> {
        Self::require_init(&env)?;
        caller.require_auth();
        Self::require_reviewer(&env, &caller)?;

        if new_level > MAX_THREAT_LEVEL {
            return Err(RegistryError::InvalidThreatLevel);
        }

        let mut list = reports::load(&env, &target);
        let mut report = list.get(index).ok_or(RegistryError::ReportNotFound)?;
        let previous_level = report.threat_level;
        report.threat_level = new_level;
        list.set(index, report);
        reports::store(&env, &target, &list);

        events::emit_threat_level_updated(&env, target, index, previous_level, new_level, caller);
        Ok(())
    }

    /// Remove the report at `index` (owner only). Swap-pop: the last report
    /// takes over the freed index, so cached indices are invalidated. The
    /// reporter's duplicate-report slot re-opens.
    pub fn remove_report(
        env: Env,
        caller: Address,
        target: Address,
        index: u32,
    ) -> Result<(), RegistryError> {
        Self::require_init(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        let mut list = reports::load(&env, &target);
        let removed = reports::swap_pop(&mut list, index).ok_or(RegistryError::ReportNotFound)?;
        reports::store(&env, &target, &list);
        reports::clear_reported(&env, &target, &removed.reporter);

        if removed.verified {
            Self::drop_verified(&env, &target);
        }

        events::emit_report_removed(&env, target, index, removed.reporter);
        Ok(())
    }

    /// Replace the delegated verifier. Owner only.
    pub fn set_verifier(
        env: Env,
        caller: Address,
        new_verifier: Address,
    ) -> Result<(), RegistryError> {
        Self::require_init(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        let previous = roles::set(&env, VERIFIER, &new_verifier);
        events::emit_verifier_changed(&env, previous, new_verifier, caller);
        Ok(())
    }

    // ── Read-only interface ──────────────────────────────────────────────────

    pub fn get_report(env: Env, target: Address, index: u32) -> Result<ThreatReport, RegistryError> {
        reports::load(&env, &target)
            .get(index)
            .ok_or(RegistryError::ReportNotFound)
    }

    pub fn get_reports(env: Env, target: Address) -> Vec<ThreatReport> {
        reports::load(&env, &target)
    }

    pub fn get_report_count(env: Env, target: Address) -> u32 {
        reports::load(&env, &target).len()
    }

    /// Derived flag: `true` iff at least one report for `target` is verified.
    pub fn is_verified_threat(env: Env, target: Address) -> bool {
        reports::verified_count(&env, &target) > 0
    }

    /// Indices of unverified reports with at least
    /// [`REVIEW_UPVOTE_THRESHOLD`] upvotes.
    pub fn get_review_candidates(env: Env, target: Address) -> Vec<u32> {
        score::review_candidates(&env, &reports::load(&env, &target))
    }

    /// Severity-weighted mean across all reports; verified reports weighted
    /// [`VERIFIED_SCORE_WEIGHT`]×.
    pub fn get_threat_score(env: Env, target: Address) -> u32 {
        score::weighted_score(&reports::load(&env, &target))
    }

    pub fn get_stats(env: Env, target: Address) -> ThreatStats {
        score::summarize(&reports::load(&env, &target))
    }

    /// Guard probe: whether `reporter` currently has an open report.
    pub fn has_reported(env: Env, target: Address, reporter: Address) -> bool {
        reports::has_reported(&env, &target, &reporter)
    }

    /// Guard probe: whether `voter` already upvoted the report at `index`.
    pub fn has_upvoted(env: Env, target: Address, index: u32, voter: Address) -> bool {
        reports::has_upvoted(&env, &target, index, &voter)
    }

    pub fn get_owner(env: Env) -> Result<Address, RegistryError> {
        roles::get(&env, OWNER).ok_or(RegistryError::NotInitialized)
    }

    pub fn get_verifier(env: Env) -> Result<Address, RegistryError> {
        roles::get(&env, VERIFIER).ok_or(RegistryError::NotInitialized)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn require_init(env: &Env) -> Result<(), RegistryError> {
        if !env.storage().instance().has(&INIT) {
            return Err(RegistryError::NotInitialized);
        }
        Ok(())
    }

    fn require_owner(env: &Env, caller: &Address) -> Result<(), RegistryError> {
        roles::require(env, OWNER, caller).map_err(|_| RegistryError::Unauthorized)
    }

    fn require_reviewer(env: &Env, caller: &Address) -> Result<(), RegistryError> {
        roles::require_either(env, VERIFIER, OWNER, caller).map_err(|_| RegistryError::Unauthorized)
    }

    /// Count one more verified report; flips the derived flag on the 0→1
    /// transition.
    fn bump_verified(env: &Env, target: &Address) {
        let before = reports::verified_count(env, target);
        reports::set_verified_count(env, target, before + 1);
        if before == 0 {
            events::emit_threat_status_changed(env, target.clone(), true);
        }
    }

    /// Count one fewer verified report; flips the derived flag on the 1→0
    /// transition.
    fn drop_verified(env: &Env, target: &Address) {
        let before = reports::verified_count(env, target);
        let after = before.saturating_sub(1);
        reports::set_verified_count(env, target, after);
        if before == 1 {
            events::emit_threat_status_changed(env, target.clone(), false);
        }
    }
}

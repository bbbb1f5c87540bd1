//! Ledger invariant definitions & verification.
//!
//! Invariants are checked against harness snapshots after every applied
//! operation. Each check is O(n) in the number of tracked reports or wallets.

extern crate std;

use std::string::String;

use super::{CustodySnapshot, RegistrySnapshot};

// ── Invariant Trait ──────────────────────────────────────────────────────────

/// A named invariant that can be verified against a state snapshot.
pub trait Invariant<S> {
    /// Human-readable name for error messages.
    fn name(&self) -> &str;

    /// Check the invariant. Returns `Ok(())` on success, `Err(description)`
    /// on violation.
    fn check(&self, snapshot: &S) -> Result<(), String>;
}

// ── Registry Invariants ──────────────────────────────────────────────────────

/// **Derived Flag Consistency**: `is_verified_threat == OR(report.verified)`.
///
/// The flag is a cached aggregate; a violation means some verified-flag
/// transition (verify, unverify, batch-verify, removal, auto-verify) failed
/// to maintain it.
pub struct VerifiedFlagConsistency;

impl Invariant<RegistrySnapshot> for VerifiedFlagConsistency {
    fn name(&self) -> &str {
        "is_verified_threat == any(report.verified)"
    }

    fn check(&self, snapshot: &RegistrySnapshot) -> Result<(), String> {
        let expected = snapshot.any_verified();
        if snapshot.flagged != expected {
            return Err(std::format!(
                "flag is {} but stored reports say {} (verified flags: {:?})",
                snapshot.flagged,
                expected,
                snapshot.verified_flags
            ));
        }
        Ok(())
    }
}

// ── Custody Invariants ───────────────────────────────────────────────────────

/// **Total Custody Consistency**: `total_protected == Σ(wallet balances)`.
///
/// The most critical financial invariant: a violation means tokens are being
/// created or destroyed by protect/withdraw bookkeeping.
pub struct CustodyTotalConsistency;

impl Invariant<CustodySnapshot> for CustodyTotalConsistency {
    fn name(&self) -> &str {
        "total_protected == sum(wallet balances)"
    }

    fn check(&self, snapshot: &CustodySnapshot) -> Result<(), String> {
        let sum = snapshot.sum_balances();
        if snapshot.total_protected != sum {
            return Err(std::format!(
                "total_protected ({}) != sum of wallet balances ({})",
                snapshot.total_protected,
                sum
            ));
        }
        Ok(())
    }
}

/// **Non-Negative Custody**: every wallet balance must be ≥ 0.
///
/// Prevents underflow from incorrect subtraction when withdrawing.
pub struct NonNegativeCustody;

impl Invariant<CustodySnapshot> for NonNegativeCustody {
    fn name(&self) -> &str {
        "all wallet balances >= 0"
    }

    fn check(&self, snapshot: &CustodySnapshot) -> Result<(), String> {
        for (index, balance) in snapshot.balances.iter().enumerate() {
            if *balance < 0 {
                return Err(std::format!(
                    "wallet {} holds negative custody balance {}",
                    index,
                    balance
                ));
            }
        }
        Ok(())
    }
}

/// Verify a set of invariants against one snapshot, collecting violations.
pub fn check_all<S>(invariants: &[&dyn Invariant<S>], snapshot: &S) -> std::vec::Vec<String> {
    invariants
        .iter()
        .filter_map(|invariant| {
            invariant
                .check(snapshot)
                .err()
                .map(|violation| std::format!("{}: {}", invariant.name(), violation))
        })
        .collect()
}

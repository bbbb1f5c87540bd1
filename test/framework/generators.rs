//! Property-based operation generators.
//!
//! Generated indices and amounts deliberately overshoot the feasible range
//! (out-of-range report indices, zero and over-balance amounts, sub-threshold
//! threat levels) so sequences exercise the rejection paths as well as the
//! happy paths. The harnesses apply operations through `try_` clients, so an
//! infeasible operation behaves like a reverted transaction.

extern crate std;

use proptest::prelude::*;

// ── Registry operations ──────────────────────────────────────────────────────

/// One randomly generated registry mutation against the harness target.
#[derive(Debug, Clone)]
pub enum RegistryOp {
    Submit { level: u32 },
    Verify { index: u32 },
    Unverify { index: u32 },
    Remove { index: u32 },
    BatchVerify { indexes: std::vec::Vec<u32> },
}

/// Full severity range, crossing the auto-verify threshold.
pub fn threat_level_strategy() -> impl Strategy<Value = u32> {
    0u32..=100
}

/// Report indices up to a small bound; most sequences keep fewer reports, so
/// a share of generated indices is out of range on purpose.
fn report_index_strategy() -> impl Strategy<Value = u32> {
    0u32..8
}

pub fn registry_op_strategy() -> impl Strategy<Value = RegistryOp> {
    prop_oneof![
        3 => threat_level_strategy().prop_map(|level| RegistryOp::Submit { level }),
        2 => report_index_strategy().prop_map(|index| RegistryOp::Verify { index }),
        2 => report_index_strategy().prop_map(|index| RegistryOp::Unverify { index }),
        1 => report_index_strategy().prop_map(|index| RegistryOp::Remove { index }),
        1 => prop::collection::vec(report_index_strategy(), 1..4)
            .prop_map(|indexes| RegistryOp::BatchVerify { indexes }),
    ]
}

pub fn registry_ops_strategy(max_len: usize) -> impl Strategy<Value = std::vec::Vec<RegistryOp>> {
    prop::collection::vec(registry_op_strategy(), 1..max_len)
}

// ── Custody operations ───────────────────────────────────────────────────────

/// One randomly generated vault mutation. `wallet` is reduced modulo the
/// harness wallet count.
#[derive(Debug, Clone)]
pub enum CustodyOp {
    Protect {
        wallet: usize,
        amount: i128,
        threat_level: u32,
    },
    Withdraw { wallet: usize, amount: i128 },
    WithdrawAll { wallet: usize },
    AdvanceTime { secs: u64 },
}

/// Amounts spanning zero (rejected) through typical pull sizes.
fn custody_amount_strategy() -> impl Strategy<Value = i128> {
    0i128..=2_000
}

pub fn custody_op_strategy(wallet_count: usize) -> impl Strategy<Value = CustodyOp> {
    let wallet = 0..wallet_count.max(1);
    prop_oneof![
        3 => (wallet.clone(), custody_amount_strategy(), threat_level_strategy()).prop_map(
            |(wallet, amount, threat_level)| CustodyOp::Protect {
                wallet,
                amount,
                threat_level,
            }
        ),
        2 => (wallet.clone(), custody_amount_strategy())
            .prop_map(|(wallet, amount)| CustodyOp::Withdraw { wallet, amount }),
        1 => wallet.prop_map(|wallet| CustodyOp::WithdrawAll { wallet }),
        // Jumps both short of and past the 300 s custody cooldown.
        2 => (0u64..=400).prop_map(|secs| CustodyOp::AdvanceTime { secs }),
    ]
}

pub fn custody_ops_strategy(
    wallet_count: usize,
    max_len: usize,
) -> impl Strategy<Value = std::vec::Vec<CustodyOp>> {
    prop::collection::vec(custody_op_strategy(wallet_count), 1..max_len)
}

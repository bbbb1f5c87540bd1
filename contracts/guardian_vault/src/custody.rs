//! Custody balance and cooldown bookkeeping.
//!
//! Per-(wallet, token) balances plus a per-token running total; the total
//! must equal the sum of the wallet balances after every mutation, which is
//! why [`credit`] and [`debit`] adjust both sides in one place. The last-pull
//! timestamp drives the custody cooldown; a pair with no recorded pull has no
//! cooldown.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::PROTECTION_COOLDOWN_SECS;

const PROT: Symbol = symbol_short!("PROT");
const BALANCE: Symbol = symbol_short!("BALANCE");
const TOTAL: Symbol = symbol_short!("TOTAL");
const LAST_PULL: Symbol = symbol_short!("LASTPULL");

/// Per-wallet protection opt-in state.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProtectionStatus {
    pub enabled: bool,
    pub enabled_at: u64,
}

pub fn protection(env: &Env, wallet: &Address) -> ProtectionStatus {
    env.storage()
        .persistent()
        .get(&(PROT, wallet.clone()))
        .unwrap_or(ProtectionStatus {
            enabled: false,
            enabled_at: 0,
        })
}

pub fn set_protection(env: &Env, wallet: &Address, status: &ProtectionStatus) {
    env.storage().persistent().set(&(PROT, wallet.clone()), status);
}

pub fn is_protected(env: &Env, wallet: &Address) -> bool {
    protection(env, wallet).enabled
}

// ── Balances ─────────────────────────────────────────────────────────────────

pub fn balance(env: &Env, wallet: &Address, token: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&(BALANCE, wallet.clone(), token.clone()))
        .unwrap_or(0)
}

pub fn total(env: &Env, token: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&(TOTAL, token.clone()))
        .unwrap_or(0)
}

/// Add `amount` to the wallet's custody balance and the token total.
pub fn credit(env: &Env, wallet: &Address, token: &Address, amount: i128) {
    let new_balance = balance(env, wallet, token) + amount;
    env.storage()
        .persistent()
        .set(&(BALANCE, wallet.clone(), token.clone()), &new_balance);

    let new_total = total(env, token) + amount;
    env.storage().persistent().set(&(TOTAL, token.clone()), &new_total);
}

/// Subtract `amount` from the wallet's custody balance and the token total.
/// Callers must have checked the balance covers `amount`.
pub fn debit(env: &Env, wallet: &Address, token: &Address, amount: i128) {
    let new_balance = balance(env, wallet, token) - amount;
    env.storage()
        .persistent()
        .set(&(BALANCE, wallet.clone(), token.clone()), &new_balance);

    let new_total = total(env, token) - amount;
    env.storage().persistent().set(&(TOTAL, token.clone()), &new_total);
}

// ── Cooldown clock ───────────────────────────────────────────────────────────

pub fn last_pull(env: &Env, wallet: &Address, token: &Address) -> Option<u64> {
    env.storage()
        .persistent()
        .get(&(LAST_PULL, wallet.clone(), token.clone()))
}

pub fn record_pull(env: &Env, wallet: &Address, token: &Address, now: u64) {
    env.storage()
        .persistent()
        .set(&(LAST_PULL, wallet.clone(), token.clone()), &now);
}

/// `true` when a new pull is allowed: no pull yet, or the cooldown window
/// has fully elapsed (boundary inclusive).
pub fn cooldown_elapsed(env: &Env, wallet: &Address, token: &Address, now: u64) -> bool {
    match last_pull(env, wallet, token) {
        None => true,
        Some(last) => now >= last.saturating_add(PROTECTION_COOLDOWN_SECS),
    }
}

/// Seconds until the next pull is allowed; 0 when none is pending.
pub fn cooldown_remaining(env: &Env, wallet: &Address, token: &Address, now: u64) -> u64 {
    match last_pull(env, wallet, token) {
        None => 0,
        Some(last) => last.saturating_add(PROTECTION_COOLDOWN_SECS).saturating_sub(now),
    }
}

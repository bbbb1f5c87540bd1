//! Structured event emitting for the guardian vault.
//!
//! One payload per state-changing entry point, published under a
//! `(STREAM, tag)` topic with a ledger timestamp. Role mutations record the
//! previous holder alongside the new one so the stream doubles as an audit
//! trail for authority changes.

#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

/// Which withdrawal entry point moved the funds. `Full` and `Emergency`
/// behave identically; the tag exists for off-chain triage.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum WithdrawMode {
    Partial,
    Full,
    Emergency,
}

// ── Event payloads ───────────────────────────────────────────────────────────

/// Fired once when the contract is initialized.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub guardian: Address,
    pub timestamp: u64,
}

/// Fired when a wallet opts in to protection.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProtectionEnabledEvent {
    pub wallet: Address,
    pub timestamp: u64,
}

/// Fired when a wallet opts out. Custodied balances are unaffected.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProtectionDisabledEvent {
    pub wallet: Address,
    pub timestamp: u64,
}

/// Fired for every custody pull, recording the guardian's stated trigger.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ThreatDetectedEvent {
    pub wallet: Address,
    pub token: Address,
    pub threat_level: u32,
    pub reason: String,
    pub timestamp: u64,
}

/// Fired when tokens enter custody.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokensProtectedEvent {
    pub wallet: Address,
    pub token: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when a wallet reclaims custodied tokens.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokensWithdrawnEvent {
    pub wallet: Address,
    pub token: Address,
    pub amount: i128,
    pub mode: WithdrawMode,
    pub timestamp: u64,
}

/// Before/after audit record for guardian replacement.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GuardianChangedEvent {
    pub previous: Option<Address>,
    pub new_guardian: Address,
    pub changed_by: Address,
    pub timestamp: u64,
}

/// Fired when the owner clears the guardian slot, halting custody pulls.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GuardianPausedEvent {
    pub previous: Option<Address>,
    pub paused_by: Address,
    pub timestamp: u64,
}

/// Before/after audit record for the per-pull cap.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MaxProtectionChangedEvent {
    pub previous: i128,
    pub new_max: i128,
    pub changed_by: Address,
    pub timestamp: u64,
}

// ── Publishers ───────────────────────────────────────────────────────────────

pub fn emit_initialized(env: &Env, owner: Address, guardian: Address) {
    env.events().publish(
        (symbol_short!("STREAM"), symbol_short!("GV_INIT")),
        InitializedEvent {
            owner,
            guardian,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_protection_enabled(env: &Env, wallet: Address) {
    env.events().publish(
        (symbol_short!("STREAM"), symbol_short!("GV_PON")),
        ProtectionEnabledEvent {
            wallet,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_protection_disabled(env: &Env, wallet: Address) {
    env.events().publish(
        (symbol_short!("STREAM"), symbol_short!("GV_POFF")),
        ProtectionDisabledEvent {
            wallet,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_threat_detected(
    env: &Env,
    wallet: Address,
    token: Address,
    threat_level: u32,
    reason: String,
) {
    env.events().publish(
        (symbol_short!("STREAM"), symbol_short!("GV_THRT")),
        ThreatDetectedEvent {
            wallet,
            token,
            threat_level,
            reason,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_tokens_protected(env: &Env, wallet: Address, token: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("STREAM"), symbol_short!("GV_PROT")),
        TokensProtectedEvent {
            wallet,
            token,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_tokens_withdrawn(
    env: &Env,
    wallet: Address,
    token: Address,
    amount: i128,
    mode: WithdrawMode,
) {
    env.events().publish(
        (symbol_short!("STREAM"), symbol_short!("GV_WDRW")),
        TokensWithdrawnEvent {
            wallet,
            token,
            amount,
            mode,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_guardian_changed(
    env: &Env,
    previous: Option<Address>,
    new_guardian: Address,
    changed_by: Address,
) {
    env.events().publish(
        (symbol_short!("STREAM"), symbol_short!("GV_ROLE")),
        GuardianChangedEvent {
            previous,
            new_guardian,
            changed_by,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_guardian_paused(env: &Env, previous: Option<Address>, paused_by: Address) {
    env.events().publish(
        (symbol_short!("STREAM"), symbol_short!("GV_PAUSE")),
        GuardianPausedEvent {
            previous,
            paused_by,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_max_protection_changed(env: &Env, previous: i128, new_max: i128, changed_by: Address) {
    env.events().publish(
        (symbol_short!("STREAM"), symbol_short!("GV_CAP")),
        MaxProtectionChangedEvent {
            previous,
            new_max,
            changed_by,
            timestamp: env.ledger().timestamp(),
        },
    );
}

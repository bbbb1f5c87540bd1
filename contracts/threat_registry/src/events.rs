//! Structured event emitting for the threat registry.
//!
//! Every state-changing entry point publishes one of these payloads under a
//! hierarchical `(STREAM, tag)` topic so off-chain monitors can
//! wildcard-filter the registry's stream. Events are the sole durable audit
//! trail: tolerant batch operations emit one event per applied item.

#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

// ── Event payloads ───────────────────────────────────────────────────────────

/// Fired once when the contract is initialized.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub verifier: Address,
    pub timestamp: u64,
}

/// Fired for every accepted report submission.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReportSubmittedEvent {
    pub target: Address,
    pub reporter: Address,
    pub index: u32,
    pub threat_level: u32,
    pub threat_type: String,
    pub auto_verified: bool,
    pub timestamp: u64,
}

/// Fired when a target's derived threat flag flips in either direction.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ThreatStatusChangedEvent {
    pub target: Address,
    pub flagged: bool,
    pub timestamp: u64,
}

/// Fired for every accepted upvote.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReportUpvotedEvent {
    pub target: Address,
    pub index: u32,
    pub voter: Address,
    pub upvotes: u32,
    pub timestamp: u64,
}

/// Fired when a report transitions to verified.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReportVerifiedEvent {
    pub target: Address,
    pub index: u32,
    pub verified_by: Address,
    pub timestamp: u64,
}

/// Fired when a report transitions back to unverified.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReportUnverifiedEvent {
    pub target: Address,
    pub index: u32,
    pub unverified_by: Address,
    pub timestamp: u64,
}

/// Fired when a reviewer overwrites a report's severity in place.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ThreatLevelUpdatedEvent {
    pub target: Address,
    pub index: u32,
    pub previous_level: u32,
    pub new_level: u32,
    pub updated_by: Address,
    pub timestamp: u64,
}

/// Fired when the owner removes a report.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReportRemovedEvent {
    pub target: Address,
    pub index: u32,
    pub reporter: Address,
    pub timestamp: u64,
}

/// Before/after audit record for verifier replacement.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VerifierChangedEvent {
    pub previous: Option<Address>,
    pub new_verifier: Address,
    pub changed_by: Address,
    pub timestamp: u64,
}

// ── Publishers ───────────────────────────────────────────────────────────────

pub fn emit_initialized(env: &Env, owner: Address, verifier: Address) {
    env.events().publish(
        (symbol_short!("STREAM"), symbol_short!("TR_INIT")),
        InitializedEvent {
            owner,
            verifier,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_report_submitted(
    env: &Env,
    target: Address,
    reporter: Address,
    index: u32,
    threat_level: u32,
    threat_type: String,
    auto_verified: bool,
) {
    env.events().publish(
        (symbol_short!("STREAM"), symbol_short!("TR_RPT")),
        ReportSubmittedEvent {
            target,
            reporter,
            index,
            threat_level,
            threat_type,
            auto_verified,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_threat_status_changed(env: &Env, target: Address, flagged: bool) {
    env.events().publish(
        (symbol_short!("STREAM"), symbol_short!("TR_STAT")),
        ThreatStatusChangedEvent {
            target,
            flagged,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_report_upvoted(env: &Env, target: Address, index: u32, voter: Address, upvotes: u32) {
    env.events().publish(
        (symbol_short!("STREAM"), symbol_short!("TR_UPVT")),
        ReportUpvotedEvent {
            target,
            index,
            voter,
            upvotes,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_report_verified(env: &Env, target: Address, index: u32, verified_by: Address) {
    env.events().publish(
        (symbol_short!("STREAM"), symbol_short!("TR_VRFY")),
        ReportVerifiedEvent {
            target,
            index,
            verified_by,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_report_unverified(env: &Env, target: Address, index: u32, unverified_by: Address) {
    env.events().publish(
        (symbol_short!("STREAM"), symbol_short!("TR_UNVF")),
        ReportUnverifiedEvent {
            target,
            index,
            unverified_by,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_threat_level_updated(
    env: &Env,
    target: Address,
    index: u32,
    previous_level: u32,
    new_level: u32,
    updated_by: Address,
) {
    env.events().publish(
        (symbol_short!("STREAM"), symbol_short!("TR_LVL")),
        ThreatLevelUpdatedEvent {
            target,
            index,
            previous_level,
            new_level,
            updated_by,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_report_removed(env: &Env, target: Address, index: u32, reporter: Address) {
    env.events().publish(
        (symbol_short!("STREAM"), symbol_short!("TR_RMV")),
        ReportRemovedEvent {
            target,
            index,
            reporter,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_verifier_changed(
    env: &Env,
    previous: Option<Address>,
    new_verifier: Address,
    changed_by: Address,
) {
    env.events().publish(
        (symbol_short!("STREAM"), symbol_short!("TR_ROLE")),
        VerifierChangedEvent {
            previous,
            new_verifier,
            changed_by,
            timestamp: env.ledger().timestamp(),
        },
    );
}

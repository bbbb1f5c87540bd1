//! Guardian-operated custody vault.
//!
//! Wallets opt in to protection; a single guardian identity may then pull
//! at-risk token balances into escrow when it detects a sufficiently severe
//! threat, subject to a per-(wallet, token) cooldown and a per-pull cap.
//! Withdrawal back to the owning wallet is unconditional self-service — the
//! guardian can add to custody but never block or move a wallet's exit.
//!
//! Every balance-mutating entry point holds the call-scoped reentrancy lock
//! and finishes its own bookkeeping before touching the token contract.

#![no_std]
#![allow(clippy::too_many_arguments)]

pub mod custody;
pub mod events;


use common::{reentrancy, roles};
use soroban_sdk::{
    contract, contracterror, contractimpl, symbol_short, token, Address, Env, String, Symbol, Vec,
};

pub use custody::ProtectionStatus;
pub use events::WithdrawMode;

// ── Policy constants ─────────────────────────────────────────────────────────

/// Minimum gap between successive custody pulls for one (wallet, token).
pub const PROTECTION_COOLDOWN_SECS: u64 = 300;
/// Threat level below which a custody pull is not actionable.
pub const MIN_PROTECTION_LEVEL: u32 = 75;

// ── Storage keys ─────────────────────────────────────────────────────────────

const INIT: Symbol = symbol_short!("INIT");
const OWNER: Symbol = symbol_short!("OWNER");
const GUARDIAN: Symbol = symbol_short!("GUARDIAN");
const MAX_PULL: Symbol = symbol_short!("MAX_PULL");

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum VaultError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 10,
    InvalidAmount = 30,
    AmountAboveCap = 31,
    LengthMismatch = 32,
    ThreatLevelTooLow = 33,
    ProtectionDisabled = 40,
    CooldownActive = 41,
    InsufficientBalance = 42,
    ReentrantCall = 43,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct GuardianVaultContract;

#[contractimpl]
impl GuardianVaultContract {
    /// Initialize the vault with its owner and the custody guardian. The
    /// per-pull cap starts at the maximum representable amount.
    pub fn initialize(env: Env, owner: Address, guardian: Address) -> Result<(), VaultError> {
        if env.storage().instance().has(&INIT) {
            return Err(VaultError::AlreadyInitialized);
        }
        owner.require_auth();

        roles::set(&env, OWNER, &owner);
        roles::set(&env, GUARDIAN, &guardian);
        env.storage().instance().set(&MAX_PULL, &i128::MAX);
        env.storage().instance().set(&INIT, &true);

        events::emit_initialized(&env, owner, guardian);
        Ok(())
    }

    // ── Protection opt-in ────────────────────────────────────────────────────

    /// Opt the calling wallet in to guardian protection.
    pub fn enable_protection(env: Env, wallet: Address) -> Result<(), VaultError> {
        Self::require_init(&env)?;
        wallet.require_auth();

        custody::set_protection(
            &env,
            &wallet,
            &ProtectionStatus {
                enabled: true,
                enabled_at: env.ledger().timestamp(),
            },
        );
        events::emit_protection_enabled(&env, wallet);
        Ok(())
    }

    /// Opt out. Already-custodied balances stay in the vault until the
    /// wallet withdraws them — opt-in and custody are independent axes.
    pub fn disable_protection(env: Env, wallet: Address) -> Result<(), VaultError> {
        Self::require_init(&env)?;
        wallet.require_auth();

        let status = custody::protection(&env, &wallet);
        custody::set_protection(
            &env,
            &wallet,
            &ProtectionStatus {
                enabled: false,
                enabled_at: status.enabled_at,
            },
        );
        events::emit_protection_disabled(&env, wallet);
        Ok(())
    }

    // ── Custody pulls (guardian) ─────────────────────────────────────────────

    /// Pull `amount` of `token` from `wallet` into custody. Guardian only;
    /// requires opt-in, a positive amount within the per-pull cap, a threat
    /// level of at least [`MIN_PROTECTION_LEVEL`], and an elapsed cooldown.
    /// Cooldown and balance bookkeeping commit before the token transfer,
    /// and the wallet must have approved the vault as a spender beforehand.
    pub fn protect_tokens(
        env: Env,
        caller: Address,
        wallet: Address,
        token: Address,
        amount: i128,
        threat_level: u32,
        reason: String,
    ) -> Result<(), VaultError> {
        Self::require_init(&env)?;
        caller.require_auth();
        Self::require_guardian(&env, &caller)?;
        reentrancy::enter(&env).map_err(|_| VaultError::ReentrantCall)?;

        let now = env.ledger().timestamp();
        Self::check_pull(&env, &wallet, &token, amount, threat_level, now)?;

        custody::record_pull(&env, &wallet, &token, now);
        custody::credit(&env, &wallet, &token, amount);
        Self::pull_from_wallet(&env, &token, &wallet, amount);

        events::emit_threat_detected(&env, wallet.clone(), token.clone(), threat_level, reason);
        events::emit_tokens_protected(&env, wallet, token, amount);

        reentrancy::exit(&env);
        Ok(())
    }

    /// Pull several tokens for one wallet in a single call. The four arrays
    /// must be equal length and the wallet must be opted in (strict), but
    /// items failing the amount, cap, threat-level, or cooldown checks are
    /// skipped rather than failing the batch. Returns the number of pulls
    /// applied.
    pub fn batch_protect_tokens(
        env: Env,
        caller: Address,
        wallet: Address,
        tokens: Vec<Address>,
        amounts: Vec<i128>,
        threat_levels: Vec<u32>,
        reasons: Vec<String>,
    ) -> Result<u32, VaultError> {
        Self::require_init(&env)?;
        caller.require_auth();
        Self::require_guardian(&env, &caller)?;
        reentrancy::enter(&env).map_err(|_| VaultError::ReentrantCall)?;

        let len = tokens.len();
        if amounts.len() != len || threat_levels.len() != len || reasons.len() != len {
            return Err(VaultError::LengthMismatch);
        }
        if !custody::is_protected(&env, &wallet) {
            return Err(VaultError::ProtectionDisabled);
        }

        let now = env.ledger().timestamp();
        let mut applied: u32 = 0;
        for i in 0..len {
            let (Some(token), Some(amount), Some(threat_level), Some(reason)) = (
                tokens.get(i),
                amounts.get(i),
                threat_levels.get(i),
                reasons.get(i),
            ) else {
                continue;
            };
            if Self::check_pull(&env, &wallet, &token, amount, threat_level, now).is_err() {
                continue;
            }

            custody::record_pull(&env, &wallet, &token, now);
            custody::credit(&env, &wallet, &token, amount);
            Self::pull_from_wallet(&env, &token, &wallet, amount);

            events::emit_threat_detected(&env, wallet.clone(), token.clone(), threat_level, reason);
            events::emit_tokens_protected(&env, wallet.clone(), token, amount);
            applied += 1;
        }

        reentrancy::exit(&env);
        Ok(applied)
    }

    // ── Withdrawals (wallet) ─────────────────────────────────────────────────

    /// Reclaim part of the calling wallet's custodied balance.
    pub fn withdraw(
        env: Env,
        wallet: Address,
        token: Address,
        amount: i128,
    ) -> Result<(), VaultError> {
        Self::require_init(&env)?;
        wallet.require_auth();
        reentrancy::enter(&env).map_err(|_| VaultError::ReentrantCall)?;

        if amount <= 0 {
            return Err(VaultError::InvalidAmount);
        }
        if custody::balance(&env, &wallet, &token) < amount {
            return Err(VaultError::InsufficientBalance);
        }

        custody::debit(&env, &wallet, &token, amount);
        Self::push_to_wallet(&env, &token, &wallet, amount);
        events::emit_tokens_withdrawn(&env, wallet, token, amount, WithdrawMode::Partial);

        reentrancy::exit(&env);
        Ok(())
    }

    /// Reclaim the calling wallet's whole custodied balance for `token`.
    pub fn withdraw_all(env: Env, wallet: Address, token: Address) -> Result<i128, VaultError> {
        Self::drain(env, wallet, token, WithdrawMode::Full)
    }

    /// Same as [`Self::withdraw_all`] apart from the event tag; kept as a
    /// separate entry point for off-chain triage of panic exits.
    pub fn emergency_withdraw(
        env: Env,
        wallet: Address,
        token: Address,
    ) -> Result<i128, VaultError> {
        Self::drain(env, wallet, token, WithdrawMode::Emergency)
    }

    // ── Administration (owner) ───────────────────────────────────────────────

    /// Replace the guardian. Owner only.
    pub fn set_guardian(env: Env, caller: Address, new_guardian: Address) -> Result<(), VaultError> {
        Self::require_init(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        let previous = roles::set(&env, GUARDIAN, &new_guardian);
        events::emit_guardian_changed(&env, previous, new_guardian, caller);
        Ok(())
    }

    /// Clear the guardian slot. Every subsequent custody pull fails
    /// authorization until [`Self::set_guardian`] installs a replacement.
    pub fn pause_guardian(env: Env, caller: Address) -> Result<(), VaultError> {
        Self::require_init(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        let previous = roles::clear(&env, GUARDIAN);
        events::emit_guardian_paused(&env, previous, caller);
        Ok(())
    }

    /// Cap the size of a single custody pull. Owner only.
    pub fn set_max_protection_amount(
        env: Env,
        caller: Address,
        new_max: i128,
    ) -> Result<(), VaultError> {
        Self::require_init(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        if new_max <= 0 {
            return Err(VaultError::InvalidAmount);
        }

        let previous = Self::max_pull(&env)?;
        env.storage().instance().set(&MAX_PULL, &new_max);
        events::emit_max_protection_changed(&env, previous, new_max, caller);
        Ok(())
    }

    // ── Read-only interface ──────────────────────────────────────────────────

    pub fn get_protected_balance(env: Env, wallet: Address, token: Address) -> i128 {
        custody::balance(&env, &wallet, &token)
    }

    /// Sum of every wallet's custodied balance for `token`.
    pub fn get_total_protected(env: Env, token: Address) -> i128 {
        custody::total(&env, &token)
    }

    pub fn is_protected(env: Env, wallet: Address) -> bool {
        custody::is_protected(&env, &wallet)
    }

    pub fn get_protection(env: Env, wallet: Address) -> ProtectionStatus {
        custody::protection(&env, &wallet)
    }

    /// Seconds until the next pull is allowed for (wallet, token); 0 when
    /// no cooldown is pending.
    pub fn get_cooldown_remaining(env: Env, wallet: Address, token: Address) -> u64 {
        custody::cooldown_remaining(&env, &wallet, &token, env.ledger().timestamp())
    }

    /// `None` while the guardian is paused.
    pub fn get_guardian(env: Env) -> Option<Address> {
        roles::get(&env, GUARDIAN)
    }

    pub fn get_max_protection_amount(env: Env) -> Result<i128, VaultError> {
        Self::max_pull(&env)
    }

    pub fn get_owner(env: Env) -> Result<Address, VaultError> {
        roles::get(&env, OWNER).ok_or(VaultError::NotInitialized)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn require_init(env: &Env) -> Result<(), VaultError> {
        if !env.storage().instance().has(&INIT) {
            return Err(VaultError::NotInitialized);
        }
        Ok(())
    }

    fn require_owner(env: &Env, caller: &Address) -> Result<(), VaultError> {
        roles::require(env, OWNER, caller).map_err(|_| VaultError::Unauthorized)
    }

    fn require_guardian(env: &Env, caller: &Address) -> Result<(), VaultError> {
        roles::require(env, GUARDIAN, caller).map_err(|_| VaultError::Unauthorized)
    }

    fn max_pull(env: &Env) -> Result<i128, VaultError> {
        env.storage()
            .instance()
            .get(&MAX_PULL)
            .ok_or(VaultError::NotInitialized)
    }

    /// Preconditions shared by single and batch pulls. The single entry
    /// point propagates the error; the batch skips the item.
    fn check_pull(
        env: &Env,
        wallet: &Address,
        token: &Address,
        amount: i128,
        threat_level: u32,
        now: u64,
    ) -> Result<(), VaultError> {
        if !custody::is_protected(env, wallet) {
            return Err(VaultError::ProtectionDisabled);
        }
        if amount <= 0 {
            return Err(VaultError::InvalidAmount);
        }
        if amount > Self::max_pull(env)? {
            return Err(VaultError::AmountAboveCap);
        }
        if threat_level < MIN_PROTECTION_LEVEL {
            return Err(VaultError::ThreatLevelTooLow);
        }
        if !custody::cooldown_elapsed(env, wallet, token, now) {
            return Err(VaultError::CooldownActive);
        }
        Ok(())
    }

    fn drain(env: Env, wallet: Address, token: Address, mode: WithdrawMode) -> Result<i128, VaultError> {
        Self::require_init(&env)?;
        wallet.require_auth();
        reentrancy::enter(&env).map_err(|_| VaultError::ReentrantCall)?;

        let amount = custody::balance(&env, &wallet, &token);
        if amount <= 0 {
            return Err(VaultError::InsufficientBalance);
        }

        custody::debit(&env, &wallet, &token, amount);
        Self::push_to_wallet(&env, &token, &wallet, amount);
        events::emit_tokens_withdrawn(&env, wallet, token, amount, mode);

        reentrancy::exit(&env);
        Ok(amount)
    }

    /// Pull via the wallet's prior spender approval of the vault.
    fn pull_from_wallet(env: &Env, token: &Address, wallet: &Address, amount: i128) {
        let vault = env.current_contract_address();
        token::Client::new(env, token).transfer_from(&vault, wallet, &vault, &amount);
    }

    fn push_to_wallet(env: &Env, token: &Address, wallet: &Address, amount: i128) {
        let vault = env.current_contract_address();
        token::Client::new(env, token).transfer(&vault, wallet, &amount);
    }
}

//! # Warden Contract Testing Framework
//!
//! Host-side harnesses for the threat registry and guardian vault, used by
//! the property-based integration tests:
//!
//! ```text
//! test/framework/
//! ├── mod.rs         — TestEnv, contract harnesses, state snapshots
//! ├── generators.rs  — Property-based operation generators
//! └── invariants.rs  — Ledger invariant definitions & verification
//! ```
//!
//! The harnesses drive the contracts through their public clients only, and
//! apply randomly generated operations through the `try_` client variants so
//! infeasible operations (cooldowns, out-of-range indices, state-precondition
//! rejections) become no-ops instead of aborting a sequence — exactly the
//! behavior an adversarial caller mix produces on a live ledger.

extern crate std;

pub mod generators;
pub mod invariants;

use guardian_vault::{GuardianVaultContract, GuardianVaultContractClient};
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    vec, Address, Env, String, Vec,
};
use threat_registry::{ThreatRegistryContract, ThreatRegistryContractClient};

use crate::generators::{CustodyOp, RegistryOp};

// ── Core Test Environment ────────────────────────────────────────────────────

/// Wraps the Soroban `Env` with auth mocking, time control, and token
/// deployment helpers shared by both harnesses.
pub struct TestEnv {
    pub env: Env,
}

impl TestEnv {
    /// Create a new test environment with all auth mocked.
    pub fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();
        Self { env }
    }

    /// Set the ledger timestamp.
    pub fn set_timestamp(&self, ts: u64) {
        self.env.ledger().set_timestamp(ts);
    }

    /// Advance the ledger timestamp by `delta` seconds.
    pub fn advance_time(&self, delta: u64) {
        let current = self.env.ledger().timestamp();
        self.env.ledger().set_timestamp(current.saturating_add(delta));
    }

    /// Current ledger timestamp.
    pub fn timestamp(&self) -> u64 {
        self.env.ledger().timestamp()
    }

    /// Deploy a SAC token contract and return its address.
    pub fn deploy_token(&self) -> Address {
        self.env
            .register_stellar_asset_contract_v2(Address::generate(&self.env))
            .address()
    }

    /// Mint tokens from a SAC token to a recipient.
    pub fn mint_tokens(&self, token: &Address, recipient: &Address, amount: i128) {
        StellarAssetClient::new(&self.env, token).mint(recipient, &amount);
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

// ── Registry Harness ─────────────────────────────────────────────────────────

/// Pre-wired threat registry fixture tracking a single reported target.
pub struct RegistryHarness {
    pub env: Env,
    pub client: ThreatRegistryContractClient<'static>,
    pub owner: Address,
    pub verifier: Address,
    pub target: Address,
}

impl RegistryHarness {
    pub fn new(test_env: &TestEnv) -> Self {
        let env = test_env.env.clone();
        let contract_id = env.register(ThreatRegistryContract, ());
        let client = ThreatRegistryContractClient::new(&env, &contract_id);

        let owner = Address::generate(&env);
        let verifier = Address::generate(&env);
        client.initialize(&owner, &verifier);

        let target = Address::generate(&env);
        Self {
            env,
            client,
            owner,
            verifier,
            target,
        }
    }

    /// Apply one generated operation; infeasible operations are dropped the
    /// way a reverted transaction would be.
    pub fn apply(&self, op: &RegistryOp) {
        match op {
            RegistryOp::Submit { level } => {
                let reporter = Address::generate(&self.env);
                let _ = self.client.try_submit_report(
                    &reporter,
                    &self.target,
                    level,
                    &String::from_str(&self.env, "generated"),
                    &String::from_str(&self.env, "generated evidence"),
                );
            }
            RegistryOp::Verify { index } => {
                let _ = self.client.try_verify_report(&self.verifier, &self.target, index);
            }
            RegistryOp::Unverify { index } => {
                let _ = self
                    .client
                    .try_unverify_report(&self.verifier, &self.target, index);
            }
            RegistryOp::Remove { index } => {
                let _ = self.client.try_remove_report(&self.owner, &self.target, index);
            }
            RegistryOp::BatchVerify { indexes } => {
                let mut targets: Vec<Address> = vec![&self.env];
                let mut batch_indexes: Vec<u32> = vec![&self.env];
                for index in indexes {
                    targets.push_back(self.target.clone());
                    batch_indexes.push_back(*index);
                }
                let _ = self
                    .client
                    .try_batch_verify(&self.verifier, &targets, &batch_indexes);
            }
        }
    }

    /// Snapshot of all observable registry state for invariant checking.
    pub fn snapshot(&self) -> RegistrySnapshot {
        let reports = self.client.get_reports(&self.target);
        RegistrySnapshot {
            flagged: self.client.is_verified_threat(&self.target),
            verified_flags: reports.iter().map(|r| r.verified).collect(),
        }
    }
}

/// Immutable snapshot of one target's registry state.
#[derive(Debug, Clone)]
pub struct RegistrySnapshot {
    pub flagged: bool,
    pub verified_flags: std::vec::Vec<bool>,
}

impl RegistrySnapshot {
    /// True when at least one stored report is verified.
    pub fn any_verified(&self) -> bool {
        self.verified_flags.iter().any(|v| *v)
    }
}

// ── Vault Harness ────────────────────────────────────────────────────────────

/// Pre-wired guardian vault fixture with one token and a set of funded,
/// opted-in wallets that have approved the vault as spender.
pub struct VaultHarness {
    pub env: Env,
    pub client: GuardianVaultContractClient<'static>,
    pub vault_id: Address,
    pub owner: Address,
    pub guardian: Address,
    pub token_id: Address,
    pub wallets: std::vec::Vec<Address>,
}

impl VaultHarness {
    const WALLET_FUNDS: i128 = 10_000_000;

    pub fn new(test_env: &TestEnv, wallet_count: usize) -> Self {
        let env = test_env.env.clone();
        let vault_id = env.register(GuardianVaultContract, ());
        let client = GuardianVaultContractClient::new(&env, &vault_id);

        let owner = Address::generate(&env);
        let guardian = Address::generate(&env);
        client.initialize(&owner, &guardian);

        let token_id = test_env.deploy_token();
        let token = TokenClient::new(&env, &token_id);

        let wallets: std::vec::Vec<Address> = (0..wallet_count)
            .map(|_| {
                let wallet = Address::generate(&env);
                test_env.mint_tokens(&token_id, &wallet, Self::WALLET_FUNDS);
                client.enable_protection(&wallet);
                token.approve(&wallet, &vault_id, &Self::WALLET_FUNDS, &100_000);
                wallet
            })
            .collect();

        Self {
            env,
            client,
            vault_id,
            owner,
            guardian,
            token_id,
            wallets,
        }
    }

    /// Apply one generated operation; infeasible operations are dropped the
    /// way a reverted transaction would be.
    pub fn apply(&self, op: &CustodyOp) {
        match op {
            CustodyOp::Protect {
                wallet,
                amount,
                threat_level,
            } => {
                let wallet = &self.wallets[wallet % self.wallets.len()];
                let _ = self.client.try_protect_tokens(
                    &self.guardian,
                    wallet,
                    &self.token_id,
                    amount,
                    threat_level,
                    &String::from_str(&self.env, "generated detection"),
                );
            }
            CustodyOp::Withdraw { wallet, amount } => {
                let wallet = &self.wallets[wallet % self.wallets.len()];
                let _ = self.client.try_withdraw(wallet, &self.token_id, amount);
            }
            CustodyOp::WithdrawAll { wallet } => {
                let wallet = &self.wallets[wallet % self.wallets.len()];
                let _ = self.client.try_withdraw_all(wallet, &self.token_id);
            }
            CustodyOp::AdvanceTime { secs } => {
                let current = self.env.ledger().timestamp();
                self.env.ledger().set_timestamp(current.saturating_add(*secs));
            }
        }
    }

    /// Snapshot of all observable custody state for invariant checking.
    pub fn snapshot(&self) -> CustodySnapshot {
        CustodySnapshot {
            total_protected: self.client.get_total_protected(&self.token_id),
            balances: self
                .wallets
                .iter()
                .map(|w| self.client.get_protected_balance(w, &self.token_id))
                .collect(),
        }
    }
}

/// Immutable snapshot of one token's custody state across all wallets.
#[derive(Debug, Clone)]
pub struct CustodySnapshot {
    pub total_protected: i128,
    pub balances: std::vec::Vec<i128>,
}

impl CustodySnapshot {
    /// Sum of all individual wallet custody balances.
    pub fn sum_balances(&self) -> i128 {
        self.balances.iter().sum()
    }
}

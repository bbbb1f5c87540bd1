//! Call-scoped reentrancy lock.
//!
//! Entry points that move tokens call out to an external contract whose
//! transfer hook could invoke the vault again within the same transaction.
//! The lock flag lives in instance storage: [`enter`] at the top of the
//! entry point, [`exit`] after the external call. A failed invocation rolls
//! back its storage writes, so the flag never survives an aborted call.

use soroban_sdk::{symbol_short, Env, Symbol};

use crate::CommonError;

const LOCKED: Symbol = symbol_short!("LOCKED");

/// Acquire the lock, failing with `CommonError::ReentrantCall` when it is
/// already held by an enclosing invocation.
pub fn enter(env: &Env) -> Result<(), CommonError> {
    if env.storage().instance().get(&LOCKED).unwrap_or(false) {
        return Err(CommonError::ReentrantCall);
    }
    env.storage().instance().set(&LOCKED, &true);
    Ok(())
}

/// Release the lock. Must be paired with a successful [`enter`].
pub fn exit(env: &Env) {
    env.storage().instance().set(&LOCKED, &false);
}

/// `true` while a guarded entry point is executing.
pub fn is_locked(env: &Env) -> bool {
    env.storage().instance().get(&LOCKED).unwrap_or(false)
}

//! Storage-backed role slots.
//!
//! A role slot is a single privileged identity (owner, verifier, guardian)
//! stored in instance storage under a caller-supplied key. The module only
//! manages storage; callers decide what an empty or mismatched slot *means*
//! (which error to return, which `require_auth` to demand) and are
//! responsible for emitting their own before/after audit events on updates.

use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::CommonError;

const ROLE: Symbol = symbol_short!("ROLE");

/// Assign `holder` to the role slot `key`, replacing any previous holder.
///
/// Returns the previous holder so the caller can include it in an audit
/// event.
pub fn set(env: &Env, key: Symbol, holder: &Address) -> Option<Address> {
    let previous = get(env, key.clone());
    env.storage().instance().set(&(ROLE, key), holder);
    previous
}

/// Current holder of the role slot `key`, if any.
pub fn get(env: &Env, key: Symbol) -> Option<Address> {
    env.storage().instance().get(&(ROLE, key))
}

/// Empty the role slot `key`, returning the evicted holder.
///
/// An empty slot fails every subsequent [`holds`]/[`require`] check until
/// the slot is re-assigned.
pub fn clear(env: &Env, key: Symbol) -> Option<Address> {
    let previous = get(env, key.clone());
    env.storage().instance().remove(&(ROLE, key));
    previous
}

/// `true` when `candidate` is the current holder of `key`.
pub fn holds(env: &Env, key: Symbol, candidate: &Address) -> bool {
    match get(env, key) {
        Some(holder) => holder == *candidate,
        None => false,
    }
}

/// Guard — returns `CommonError::AccessDenied` unless `candidate` holds `key`.
pub fn require(env: &Env, key: Symbol, candidate: &Address) -> Result<(), CommonError> {
    if !holds(env, key, candidate) {
        return Err(CommonError::AccessDenied);
    }
    Ok(())
}

/// Guard — passes when `candidate` holds *any* of the two slots.
///
/// Covers the owner-or-delegate pattern where the contract owner retains
/// every privilege granted to a delegated role.
pub fn require_either(
    env: &Env,
    primary: Symbol,
    fallback: Symbol,
    candidate: &Address,
) -> Result<(), CommonError> {
    if holds(env, primary, candidate) || holds(env, fallback, candidate) {
        return Ok(());
    }
    Err(CommonError::AccessDenied)
}

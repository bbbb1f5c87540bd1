//! Shared utilities and error types for the Warden contract suite.
//!
//! This crate provides:
//! - [`CommonError`] — standardised error codes for all contracts.
//! - [`roles`] — storage-backed role slots (owner, verifier, guardian) with
//!   the authorization *decision* left to the calling contract.
//! - [`reentrancy`] — a call-scoped lock for entry points that make external
//!   token-transfer calls.
//!
//! Contract-specific errors can extend the range starting at code **100** and
//! above, ensuring no collisions with the common set.

#![no_std]

use soroban_sdk::contracterror;

pub mod reentrancy;
pub mod roles;

/// Standardised error codes shared by every Warden contract.
///
/// # Code ranges
/// | Range   | Purpose                       |
/// |---------|-------------------------------|
/// | 1 – 9   | Lifecycle / initialisation    |
/// | 10 – 19 | Authentication & authorisation|
/// | 20 – 29 | Resource not found            |
/// | 30 – 39 | Validation / input            |
/// | 40 – 49 | Contract state                |
/// | 100+    | Reserved for contract-specific|
#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum CommonError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    AccessDenied = 10,
    RecordNotFound = 20,
    InvalidInput = 30,
    /// An entry point guarded by the [`reentrancy`] lock was re-entered.
    ReentrantCall = 40,
}

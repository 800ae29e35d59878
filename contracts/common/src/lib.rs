//! Shared helpers for the staking-pool contract suite.
//!
//! This crate provides:
//! - [`ownable`]: a single-owner role record stored in the calling
//!   contract's instance storage (set, read, transfer, renounce).
//!
//! Helpers here never authenticate callers themselves; contracts call
//! `require_auth()` before delegating to them.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod ownable;

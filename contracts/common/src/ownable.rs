use soroban_sdk::{symbol_short, Address, Env, Symbol};

// ── Storage Keys ─────────────────────────────────────────────────────────────

const OWNER: Symbol = symbol_short!("OWNER");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

// ── Storage Helpers ──────────────────────────────────────────────────────────

fn extend_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Core Functions ───────────────────────────────────────────────────────────

/// Records `owner` as the single holder of the owner role.
///
/// Only callable internally; callers must verify authorization beforehand.
pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&OWNER, owner);
    extend_ttl(env);
}

/// Returns the current owner, or `None` once ownership has been renounced
/// (or was never set).
pub fn get_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&OWNER)
}

/// Returns true if `caller` currently holds the owner role.
pub fn is_owner(env: &Env, caller: &Address) -> bool {
    match get_owner(env) {
        Some(owner) => owner == *caller,
        None => false,
    }
}

/// Hands the owner role from `caller` to `new_owner`.
///
/// The caller must have already been authenticated via `require_auth()`.
///
/// Returns `false` (and changes nothing) if `caller` is not the owner.
pub fn transfer_ownership(env: &Env, caller: &Address, new_owner: &Address) -> bool {
    if !is_owner(env, caller) {
        return false;
    }
    set_owner(env, new_owner);
    true
}

/// Drops the owner role entirely. Every owner-gated operation fails
/// afterwards; there is no way to restore an owner.
///
/// Returns `false` (and changes nothing) if `caller` is not the owner.
pub fn renounce_ownership(env: &Env, caller: &Address) -> bool {
    if !is_owner(env, caller) {
        return false;
    }
    env.storage().instance().remove(&OWNER);
    true
}

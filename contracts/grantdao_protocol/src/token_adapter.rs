//! Value Transfer Adapter.
//!
//! The only place the contract talks to token contracts. Both the value token
//! and every reward token are driven through the standard token interface;
//! the contract never mints, it only moves custody.
//!
//! A failed transfer (insufficient balance, missing authorization, a token
//! contract that traps) aborts the whole invocation with
//! [`Error::TransferFailed`], which rolls back every write made before it.
//! Callers therefore update their own state *before* calling into here.

use soroban_sdk::{panic_with_error, token, Address, Env};

use crate::Error;

/// Move `amount` of `asset` from `from` into contract custody.
pub fn pull(env: &Env, asset: &Address, from: &Address, amount: i128) {
    let client = token::Client::new(env, asset);
    let custody = env.current_contract_address();
    match client.try_transfer(from, &custody, &amount) {
        Ok(Ok(())) => {}
        _ => panic_with_error!(env, Error::TransferFailed),
    }
}

/// Move `amount` of `asset` out of contract custody to `to`.
pub fn push(env: &Env, asset: &Address, to: &Address, amount: i128) {
    let client = token::Client::new(env, asset);
    let custody = env.current_contract_address();
    match client.try_transfer(&custody, to, &amount) {
        Ok(Ok(())) => {}
        _ => panic_with_error!(env, Error::TransferFailed),
    }
}

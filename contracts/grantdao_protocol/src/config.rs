//! # Configuration
//!
//! One-shot contract configuration written by `init`:
//!
//! - the privileged **operator** (administrative only, never touches project funds),
//! - the **value token** every grant is denominated in,
//! - the [`ExecutionPolicy`] governing when proposals may unlock funds.
//!
//! Entry points that move value tokens or evaluate proposals call [`load`],
//! which rejects with `NotInitialized` until `init` has run.

use soroban_sdk::{panic_with_error, Address, Env};

use crate::events;
use crate::storage;
use crate::types::{Config, ExecutionPolicy};
use crate::Error;

/// Store the configuration. Panics with `AlreadyInitialized` on a second call.
pub fn init(env: &Env, operator: Address, value_token: Address, policy: ExecutionPolicy) {
    if storage::has_config(env) {
        panic_with_error!(env, Error::AlreadyInitialized);
    }
    storage::save_config(
        env,
        &Config {
            operator,
            value_token,
            policy,
        },
    );
}

pub fn load(env: &Env) -> Config {
    let Some(config) = storage::load_config(env) else {
        panic_with_error!(env, Error::NotInitialized)
    };
    config
}

/// Hand the operator role to `new_operator`.
///
/// The current operator must authorize.
pub fn set_operator(env: &Env, new_operator: Address) {
    let mut config = load(env);
    config.operator.require_auth();

    let previous = config.operator.clone();
    config.operator = new_operator.clone();
    storage::save_config(env, &config);

    events::publish_operator_changed(env, previous, new_operator);
}

use crate::access::{AccessControl, AccessControlTrait};
use crate::errors::AccessControlError;
use crate::role::Role;
use soroban_sdk::{panic_with_error, Address, Env};

// Fee setters and fee claims accept either admin role.
pub fn require_pool_manager(e: &Env, address: &Address) {
    let access_control = AccessControl::new(e);
    let is_manager = [Role::Admin, Role::OperationsAdmin]
        .iter()
        .any(|role| access_control.address_has_role(address, role));
    if !is_manager {
        panic_with_error!(e, AccessControlError::Unauthorized);
    }
}

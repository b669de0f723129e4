use crate::errors::AccessControlError;
use crate::role::Role;
use soroban_sdk::{contracttype, panic_with_error, Address, Env};
use utils::bump::bump_instance;

#[derive(Clone)]
#[contracttype]
enum DataKey {
    Admin,
    OperationsAdmin,
}

#[derive(Clone)]
pub struct AccessControl(Env);

impl AccessControl {
    pub fn new(env: &Env) -> AccessControl {
        AccessControl(env.clone())
    }

    fn get_key(&self, role: &Role) -> DataKey {
        match role {
            Role::Admin => DataKey::Admin,
            Role::OperationsAdmin => DataKey::OperationsAdmin,
        }
    }
}

pub trait AccessControlTrait {
    fn get_role_safe(&self, role: &Role) -> Option<Address>;
    fn get_role(&self, role: &Role) -> Address;
    fn set_role_address(&self, role: &Role, address: &Address);
    fn address_has_role(&self, address: &Address, role: &Role) -> bool;
    fn assert_address_has_role(&self, address: &Address, role: &Role);
}

impl AccessControlTrait for AccessControl {
    fn get_role_safe(&self, role: &Role) -> Option<Address> {
        bump_instance(&self.0);
        self.0.storage().instance().get(&self.get_key(role))
    }

    fn get_role(&self, role: &Role) -> Address {
        match self.get_role_safe(role) {
            Some(address) => address,
            None => panic_with_error!(&self.0, AccessControlError::RoleNotFound),
        }
    }

    fn set_role_address(&self, role: &Role, address: &Address) {
        // admin is set once, ownership transfer is not supported
        if let Role::Admin = role {
            if self.get_role_safe(role).is_some() {
                panic_with_error!(&self.0, AccessControlError::AdminAlreadySet);
            }
        }
        bump_instance(&self.0);
        self.0.storage().instance().set(&self.get_key(role), address);
    }

    fn address_has_role(&self, address: &Address, role: &Role) -> bool {
        match self.get_role_safe(role) {
            Some(role_address) => role_address == *address,
            None => false,
        }
    }

    fn assert_address_has_role(&self, address: &Address, role: &Role) {
        if !self.address_has_role(address, role) {
            panic_with_error!(&self.0, AccessControlError::Unauthorized);
        }
    }
}

use soroban_sdk::{contracttype, xdr::ToXdr, Address, Bytes, BytesN, Env, Map, Vec};
use utils::bump::bump_persistent;

#[derive(Clone)]
#[contracttype]
enum DataKey {
    TokensPools(BytesN<32>),
}

// Key of a token set: sha256 over the XDR of every token, in order.
pub fn get_tokens_salt(e: &Env, tokens: &Vec<Address>) -> BytesN<32> {
    let mut salt = Bytes::new(e);
    for token in tokens.iter() {
        salt.append(&token.to_xdr(e));
    }
    e.crypto().sha256(&salt).to_bytes()
}

pub(crate) fn get_pools(e: &Env, salt: &BytesN<32>) -> Map<u32, Address> {
    let key = DataKey::TokensPools(salt.clone());
    match e.storage().persistent().get(&key) {
        Some(value) => {
            bump_persistent(e, &key);
            value
        }
        None => Map::new(e),
    }
}

pub(crate) fn put_pools(e: &Env, salt: &BytesN<32>, pools: &Map<u32, Address>) {
    let key = DataKey::TokensPools(salt.clone());
    if pools.is_empty() {
        e.storage().persistent().remove(&key);
        return;
    }
    e.storage().persistent().set(&key, pools);
    bump_persistent(e, &key);
}

#![cfg_attr(not(any(test, feature = "export-abi")), no_main)]
extern crate alloc;

use alloy_primitives::{Address, U256};
use stylus_sdk::prelude::*;

sol_storage! {
    #[entrypoint]
    pub struct Erc721 {
        mapping(uint256 => address) owners;
        mapping(address => uint256) balances;
        uint256 next_token_id;
    }
}

#[public]
impl Erc721 {
    pub fn owner_of(&self, token_id: U256) -> Address {
        self.owners.get(token_id)
    }

    pub fn balance_of(&self, owner: Address) -> U256 {
        self.balances.get(owner)
    }

    pub fn mint(&mut self) -> U256 {
        let sender = self.vm().msg_sender();
        let token_id = self.next_token_id.get();
        self.owners.setter(token_id).set(sender);
        let balance = self.balances.get(sender);
        self.balances.setter(sender).set(balance + U256::from(1));
        self.next_token_id.set(token_id + U256::from(1));
        token_id
    }
}

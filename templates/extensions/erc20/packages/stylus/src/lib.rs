#![cfg_attr(not(any(test, feature = "export-abi")), no_main)]
extern crate alloc;

use alloy_primitives::{Address, U256};
use stylus_sdk::prelude::*;

sol_storage! {
    #[entrypoint]
    pub struct Erc20 {
        mapping(address => uint256) balances;
        uint256 total_supply;
    }
}

#[public]
impl Erc20 {
    pub fn total_supply(&self) -> U256 {
        self.total_supply.get()
    }

    pub fn balance_of(&self, owner: Address) -> U256 {
        self.balances.get(owner)
    }

    pub fn mint(&mut self, amount: U256) {
        let sender = self.vm().msg_sender();
        let balance = self.balances.get(sender);
        self.balances.setter(sender).set(balance + amount);
        let supply = self.total_supply.get();
        self.total_supply.set(supply + amount);
    }
}

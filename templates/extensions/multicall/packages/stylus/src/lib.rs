#![cfg_attr(not(any(test, feature = "export-abi")), no_main)]
extern crate alloc;

use alloc::vec::Vec;
use alloy_primitives::{Address, Bytes};
use stylus_sdk::{call::RawCall, prelude::*};

sol_storage! {
    #[entrypoint]
    pub struct Multicall {}
}

#[public]
impl Multicall {
    pub fn multicall(&mut self, targets: Vec<Address>, data: Vec<Bytes>) -> Vec<Bytes> {
        targets
            .into_iter()
            .zip(data)
            .map(|(target, calldata)| {
                RawCall::new(self.vm())
                    .call(target, &calldata)
                    .map(Bytes::from)
                    .unwrap_or_default()
            })
            .collect()
    }
}

#![no_std]

mod contract;
mod errors;
mod ledger;
mod storage;
mod types;
mod whitelist;


pub use contract::{CrowdsaleContract, CrowdsaleContractClient};
pub use errors::Error;
pub use types::{SaleConfig, SaleStatus, MAX_PURCHASE, MIN_PURCHASE};

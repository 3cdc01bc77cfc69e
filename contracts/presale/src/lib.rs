#![no_std]

mod contract;
mod errors;
mod events;
mod storage;
mod types;


pub use contract::{PresaleContract, PresaleContractClient};
pub use errors::Error;
pub use types::{SaleConfig, SaleParams, SaleState};

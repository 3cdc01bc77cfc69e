use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    InvalidConfig = 3,
    Unauthorized = 4,
    InvalidState = 5,
    InvalidAmount = 6,
    ExceedsFundingGoal = 7,
    InvalidPurchase = 8,
    TransferFailed = 9,
    Overflow = 10,
}

pub mod network;
pub mod unit;

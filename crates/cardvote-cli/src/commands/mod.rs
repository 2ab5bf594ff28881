pub mod account;
pub mod review;

pub mod books;
pub mod catalog;
pub mod checkout;
pub mod core;
pub mod gateway;
pub mod policy;
pub mod reports;
pub mod utils;

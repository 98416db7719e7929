pub mod budget;
pub mod payment;

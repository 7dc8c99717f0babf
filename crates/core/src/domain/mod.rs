pub mod audit;
pub mod employee;
pub mod month;
pub mod sale;

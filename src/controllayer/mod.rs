pub mod cars;
pub mod countries;
pub mod health;
pub mod helper;
pub mod universities;

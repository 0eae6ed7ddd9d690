pub mod cars;
pub mod countries;
pub mod health;
pub mod request;
pub mod universities;

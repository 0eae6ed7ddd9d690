pub mod cars_handler;

pub mod countries_handler;

pub mod universities_handler;

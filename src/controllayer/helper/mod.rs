pub mod forbidden;
pub mod responses;
pub mod validation;

pub mod binding;

pub use binding::{bind_query, fetch_all_as, fetch_one_as, fetch_optional_as};

pub mod cars;
pub mod countries;
pub mod helper;
pub mod memory;
pub mod sql_generator;
pub mod types;
pub mod universities;

pub use cars::{CarStore, PgCarStore};
pub use countries::{CountryStore, PgCountryStore};
pub use memory::MemoryStore;
pub use universities::{PgUniversityStore, UniversityStore};

pub mod constants;
pub mod types;

pub use constants::{
    FORBIDDEN_CAR_IDS, FORBIDDEN_COUNTRY_IDS, FORBIDDEN_UNIVERSITY_IDS, SEED_CARS,
    SEED_COUNTRIES, SEED_UNIVERSITIES, URL,
};
pub use types::DbConfig;

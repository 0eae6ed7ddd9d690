use sea_query::Iden;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[allow(non_snake_case)]
pub mod DBTables {
    pub const CAR: &str = "car";
    pub const COUNTRY: &str = "country";
    pub const UNIVERSITY: &str = "university";
    pub const USER_UNIVERSITY: &str = "user_university";

    pub const ALL: [&str; 4] = [CAR, COUNTRY, UNIVERSITY, USER_UNIVERSITY];
}

#[derive(Iden)]
pub enum Cars {
    #[iden = "car"]
    Table,
    CarId,
    CarName,
}

#[derive(Iden)]
pub enum Countries {
    #[iden = "country"]
    Table,
    CountryId,
    CountryName,
    CountryCode,
}

#[derive(Iden)]
pub enum Universities {
    #[iden = "university"]
    Table,
    UniversityId,
    UniversityName,
}

#[derive(Iden)]
pub enum UserUniversities {
    #[iden = "user_university"]
    Table,
    UserId,
    UniversityId,
}

/// Row of the `car` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CarRow {
    pub car_id: i32,
    pub car_name: String,
}

/// Row of the `country` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CountryRow {
    pub country_id: i32,
    pub country_name: String,
    pub country_code: String,
}

/// Row of the `university` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UniversityRow {
    pub university_id: i32,
    pub university_name: String,
}

// ===== External shapes =====

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub id: i32,
    pub name: String,
    pub code: String,
}

/// Fields of a country that does not exist yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCountry {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct University {
    pub id: i32,
    pub name: String,
}

impl From<CarRow> for Car {
    fn from(row: CarRow) -> Self {
        Self {
            id: row.car_id,
            name: row.car_name,
        }
    }
}

impl From<CountryRow> for Country {
    fn from(row: CountryRow) -> Self {
        Self {
            id: row.country_id,
            name: row.country_name,
            code: row.country_code,
        }
    }
}

impl From<UniversityRow> for University {
    fn from(row: UniversityRow) -> Self {
        Self {
            id: row.university_id,
            name: row.university_name,
        }
    }
}

/// Target of a delete: one id, or several resolved from a list body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdSelector {
    Single(i32),
    Many(Vec<i32>),
}

impl IdSelector {
    pub fn ids(&self) -> &[i32] {
        match self {
            IdSelector::Single(id) => std::slice::from_ref(id),
            IdSelector::Many(ids) => ids,
        }
    }

    pub fn contains(&self, id: i32) -> bool {
        self.ids().contains(&id)
    }
}

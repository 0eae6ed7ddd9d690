//! Process-local backend implementing every store trait.
//!
//! Ids are drawn from per-table counters and never reused, matching a SERIAL
//! column. Deleting a university drops its user links like the
//! `ON DELETE CASCADE` on `user_university`.

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

use crate::datalayer::CRUD::cars::CarStore;
use crate::datalayer::CRUD::countries::CountryStore;
use crate::datalayer::CRUD::types::{
    Car, CarRow, Country, CountryRow, IdSelector, NewCountry, University, UniversityRow,
};
use crate::datalayer::CRUD::universities::UniversityStore;
use crate::datalayer::db_ops::constants::{SEED_CARS, SEED_COUNTRIES, SEED_UNIVERSITIES};
use crate::errors::errors::{ServiceError, ServiceResult};

struct Table<R> {
    rows: BTreeMap<i32, R>,
    next_id: i32,
}

impl<R: Clone> Table<R> {
    fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    fn insert_with_id(&mut self, id: i32, row: R) {
        self.rows.insert(id, row);
        self.next_id = self.next_id.max(id.saturating_add(1));
    }

    fn allocate_id(&mut self) -> i32 {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    fn all(&self) -> Vec<R> {
        self.rows.values().cloned().collect()
    }

    fn get(&self, id: i32) -> Option<R> {
        self.rows.get(&id).cloned()
    }

    fn remove(&mut self, ids: &IdSelector) -> Vec<R> {
        let mut removed: Vec<(i32, R)> = ids
            .ids()
            .iter()
            .filter_map(|id| self.rows.remove(id).map(|row| (*id, row)))
            .collect();
        removed.sort_by_key(|(id, _)| *id);
        removed.into_iter().map(|(_, row)| row).collect()
    }
}

struct Tables {
    cars: Table<CarRow>,
    countries: Table<CountryRow>,
    universities: Table<UniversityRow>,
    // (user_id, university_id)
    user_universities: BTreeSet<(i32, i32)>,
}

pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Empty store
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables {
                cars: Table::new(),
                countries: Table::new(),
                universities: Table::new(),
                user_universities: BTreeSet::new(),
            }),
        }
    }

    /// Store holding the protected seed records
    pub fn seeded() -> Self {
        let store = Self::new();
        if let Ok(mut tables) = store.tables.write() {
            for (id, name) in SEED_CARS {
                tables.cars.insert_with_id(
                    *id,
                    CarRow {
                        car_id: *id,
                        car_name: name.to_string(),
                    },
                );
            }
            for (id, name, code) in SEED_COUNTRIES {
                tables.countries.insert_with_id(
                    *id,
                    CountryRow {
                        country_id: *id,
                        country_name: name.to_string(),
                        country_code: code.to_string(),
                    },
                );
            }
            for (id, name) in SEED_UNIVERSITIES {
                tables.universities.insert_with_id(
                    *id,
                    UniversityRow {
                        university_id: *id,
                        university_name: name.to_string(),
                    },
                );
            }
        }
        store
    }

    /// Associate a user with a university
    pub fn link_user(&self, user_id: i32, university_id: i32) -> ServiceResult<()> {
        let mut tables = self.write()?;
        if !tables.universities.rows.contains_key(&university_id) {
            return Err(ServiceError::DatabaseError(format!(
                "university {} does not exist",
                university_id
            )));
        }
        tables.user_universities.insert((user_id, university_id));
        Ok(())
    }

    fn read(&self) -> ServiceResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| ServiceError::DatabaseError("in-memory store lock poisoned".to_string()))
    }

    fn write(&self) -> ServiceResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| ServiceError::DatabaseError("in-memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl CarStore for MemoryStore {
    async fn find_all(&self) -> ServiceResult<Vec<CarRow>> {
        Ok(self.read()?.cars.all())
    }

    async fn find_by_id(&self, id: i32) -> ServiceResult<Option<CarRow>> {
        Ok(self.read()?.cars.get(id))
    }

    async fn create(&self, name: &str) -> ServiceResult<CarRow> {
        let mut tables = self.write()?;
        let car_id = tables.cars.allocate_id();
        let row = CarRow {
            car_id,
            car_name: name.to_string(),
        };
        tables.cars.rows.insert(car_id, row.clone());
        debug!(car_id, "Car created in memory");
        Ok(row)
    }

    async fn update(&self, car: &Car) -> ServiceResult<Option<CarRow>> {
        let mut tables = self.write()?;
        Ok(tables.cars.rows.get_mut(&car.id).map(|row| {
            row.car_name = car.name.clone();
            row.clone()
        }))
    }

    async fn delete(&self, ids: &IdSelector) -> ServiceResult<Vec<CarRow>> {
        Ok(self.write()?.cars.remove(ids))
    }
}

#[async_trait]
impl CountryStore for MemoryStore {
    async fn find_all(&self) -> ServiceResult<Vec<CountryRow>> {
        Ok(self.read()?.countries.all())
    }

    async fn find_by_id(&self, id: i32) -> ServiceResult<Option<CountryRow>> {
        Ok(self.read()?.countries.get(id))
    }

    async fn create(&self, country: &NewCountry) -> ServiceResult<CountryRow> {
        let mut tables = self.write()?;
        let country_id = tables.countries.allocate_id();
        let row = CountryRow {
            country_id,
            country_name: country.name.clone(),
            country_code: country.code.clone(),
        };
        tables.countries.rows.insert(country_id, row.clone());
        debug!(country_id, "Country created in memory");
        Ok(row)
    }

    async fn update(&self, country: &Country) -> ServiceResult<Option<CountryRow>> {
        let mut tables = self.write()?;
        Ok(tables.countries.rows.get_mut(&country.id).map(|row| {
            row.country_name = country.name.clone();
            row.country_code = country.code.clone();
            row.clone()
        }))
    }

    async fn delete(&self, ids: &IdSelector) -> ServiceResult<Vec<CountryRow>> {
        Ok(self.write()?.countries.remove(ids))
    }
}

#[async_trait]
impl UniversityStore for MemoryStore {
    async fn find_all(&self) -> ServiceResult<Vec<UniversityRow>> {
        Ok(self.read()?.universities.all())
    }

    async fn find_by_id(&self, id: i32) -> ServiceResult<Option<UniversityRow>> {
        Ok(self.read()?.universities.get(id))
    }

    async fn find_by_user_id(&self, user_id: i32) -> ServiceResult<Vec<UniversityRow>> {
        let tables = self.read()?;
        Ok(tables
            .user_universities
            .range((user_id, i32::MIN)..=(user_id, i32::MAX))
            .filter_map(|(_, university_id)| tables.universities.get(*university_id))
            .collect())
    }

    async fn create(&self, name: &str) -> ServiceResult<UniversityRow> {
        let mut tables = self.write()?;
        let university_id = tables.universities.allocate_id();
        let row = UniversityRow {
            university_id,
            university_name: name.to_string(),
        };
        tables.universities.rows.insert(university_id, row.clone());
        debug!(university_id, "University created in memory");
        Ok(row)
    }

    async fn update(&self, university: &University) -> ServiceResult<Option<UniversityRow>> {
        let mut tables = self.write()?;
        Ok(tables.universities.rows.get_mut(&university.id).map(|row| {
            row.university_name = university.name.clone();
            row.clone()
        }))
    }

    async fn delete(&self, ids: &IdSelector) -> ServiceResult<Vec<UniversityRow>> {
        let mut tables = self.write()?;
        let removed = tables.universities.remove(ids);
        tables
            .user_universities
            .retain(|(_, university_id)| !ids.contains(*university_id));
        Ok(removed)
    }
}

use std::collections::BTreeSet;
use std::fmt;

use crate::datalayer::db_ops::constants::{
    FORBIDDEN_CAR_IDS, FORBIDDEN_COUNTRY_IDS, FORBIDDEN_UNIVERSITY_IDS,
};
use crate::errors::errors::{ServiceError, ServiceResult};

/// Ids of protected seed records that update and delete must never target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForbiddenSet(BTreeSet<i32>);

impl ForbiddenSet {
    pub fn new(ids: impl IntoIterator<Item = i32>) -> Self {
        Self(ids.into_iter().collect())
    }

    pub fn contains(&self, id: i32) -> bool {
        self.0.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.0.iter().copied()
    }

    /// Parse a comma separated list such as `"1, 2,3"`. Blank entries are skipped.
    pub fn parse(raw: &str) -> ServiceResult<Self> {
        raw.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<i32>().map_err(|_| {
                    ServiceError::ConfigurationError(format!("invalid forbidden id '{}'", part))
                })
            })
            .collect::<ServiceResult<BTreeSet<i32>>>()
            .map(Self)
    }
}

impl fmt::Display for ForbiddenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<String> = self.0.iter().map(i32::to_string).collect();
        write!(f, "{}", ids.join(","))
    }
}

/// Forbidden sets for every entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForbiddenIds {
    pub cars: ForbiddenSet,
    pub countries: ForbiddenSet,
    pub universities: ForbiddenSet,
}

impl Default for ForbiddenIds {
    fn default() -> Self {
        Self {
            cars: ForbiddenSet::new(FORBIDDEN_CAR_IDS.iter().copied()),
            countries: ForbiddenSet::new(FORBIDDEN_COUNTRY_IDS.iter().copied()),
            universities: ForbiddenSet::new(FORBIDDEN_UNIVERSITY_IDS.iter().copied()),
        }
    }
}

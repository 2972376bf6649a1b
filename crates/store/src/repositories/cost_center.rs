//! Cost center repository.
//!
//! Enforces the storage-boundary constraints: code and name uniqueness.
//! Everything else (limits, rosters, code casing) is the core validation,
//! run here on every write so no invalid center is ever stored.

use std::collections::HashMap;

use centavo_shared::types::CostCenterId;

use centavo_core::cost_center::types::CostCenter;

use crate::error::{StoreError, StoreResult};

/// In-memory cost center store.
#[derive(Debug, Default)]
pub struct CostCenterRepository {
    centers: HashMap<CostCenterId, CostCenter>,
}

impl CostCenterRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new center after normalizing, validating, and checking
    /// uniqueness of code and name.
    pub fn create(&mut self, mut center: CostCenter) -> StoreResult<CostCenterId> {
        center.normalize_code();
        center.validate()?;
        self.check_unique(&center, None)?;

        let id = center.id;
        tracing::info!(code = %center.code, name = %center.name, "cost center created");
        self.centers.insert(id, center);
        Ok(id)
    }

    /// Replaces an existing center, with the same normalization and checks
    /// as `create`.
    pub fn update(&mut self, mut center: CostCenter) -> StoreResult<()> {
        if !self.centers.contains_key(&center.id) {
            return Err(StoreError::not_found("cost center", center.id));
        }
        center.normalize_code();
        center.validate()?;
        self.check_unique(&center, Some(center.id))?;

        tracing::info!(code = %center.code, "cost center updated");
        self.centers.insert(center.id, center);
        Ok(())
    }

    /// Fetches a center by id.
    pub fn get(&self, id: CostCenterId) -> StoreResult<&CostCenter> {
        self.centers
            .get(&id)
            .ok_or_else(|| StoreError::not_found("cost center", id))
    }

    /// Looks a center up by code, case-insensitively.
    #[must_use]
    pub fn find_by_code(&self, code: &str) -> Option<&CostCenter> {
        let code = code.to_uppercase();
        self.centers.values().find(|center| center.code == code)
    }

    /// Iterates all stored centers.
    pub fn iter(&self) -> impl Iterator<Item = &CostCenter> {
        self.centers.values()
    }

    fn check_unique(&self, center: &CostCenter, except: Option<CostCenterId>) -> StoreResult<()> {
        for existing in self.centers.values() {
            if Some(existing.id) == except {
                continue;
            }
            if existing.code == center.code {
                return Err(StoreError::Duplicate {
                    entity: "cost center",
                    field: "code",
                    value: center.code.clone(),
                });
            }
            if existing.name == center.name {
                return Err(StoreError::Duplicate {
                    entity: "cost center",
                    field: "name",
                    value: center.name.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    use centavo_shared::types::UserId;

    use centavo_core::cost_center::error::CostCenterError;
    use centavo_core::cost_center::types::RosterMember;

    fn valid_center(code: &str, name: &str) -> CostCenter {
        let mut center = CostCenter::new(code, name, dec!(1000), dec!(2000));
        center.tier1_roster = vec![RosterMember::new(UserId::new(), "Ana")];
        center
    }

    #[test]
    fn test_create_uppercases_code() {
        let mut repo = CostCenterRepository::new();
        let mut center = valid_center("ADMIN", "Administration");
        center.code = "admin".to_string();
        let id = repo.create(center).unwrap();
        assert_eq!(repo.get(id).unwrap().code, "ADMIN");
    }

    #[test]
    fn test_create_rejects_invalid_center() {
        let mut repo = CostCenterRepository::new();
        let mut center = valid_center("ALM", "Warehouse");
        center.tier1_limit = dec!(2000);
        center.tier2_limit = dec!(1000);
        let err = repo.create(center).unwrap_err();
        assert!(matches!(
            err,
            StoreError::CostCenter(CostCenterError::LimitsOutOfOrder { .. })
        ));
        assert!(err.to_string().contains("Warehouse"));
    }

    #[test]
    fn test_create_enforces_code_uniqueness_across_casing() {
        let mut repo = CostCenterRepository::new();
        repo.create(valid_center("ADMIN", "Administration")).unwrap();
        let err = repo.create(valid_center("admin", "Back office")).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Duplicate { field: "code", .. }
        ));
    }

    #[test]
    fn test_create_enforces_name_uniqueness() {
        let mut repo = CostCenterRepository::new();
        repo.create(valid_center("ADMIN", "Administration")).unwrap();
        let err = repo
            .create(valid_center("ADM2", "Administration"))
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Duplicate { field: "name", .. }
        ));
    }

    #[test]
    fn test_update_keeps_own_code() {
        let mut repo = CostCenterRepository::new();
        let id = repo.create(valid_center("ADMIN", "Administration")).unwrap();
        let mut center = repo.get(id).unwrap().clone();
        center.tier2_limit = dec!(3000);
        repo.update(center).unwrap();
        assert_eq!(repo.get(id).unwrap().tier2_limit, dec!(3000));
    }

    #[test]
    fn test_update_unknown_center_fails() {
        let mut repo = CostCenterRepository::new();
        let err = repo.update(valid_center("ADMIN", "Administration")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_find_by_code_is_case_insensitive() {
        let mut repo = CostCenterRepository::new();
        repo.create(valid_center("ADMIN", "Administration")).unwrap();
        assert!(repo.find_by_code("admin").is_some());
        assert!(repo.find_by_code("ADMIN").is_some());
        assert!(repo.find_by_code("ALM").is_none());
    }
}

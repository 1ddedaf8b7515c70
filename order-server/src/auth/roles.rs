//! Staff role directory
//!
//! One super-admin id is authorized for every action; the sales set holds
//! the decision-capable role (approve/reject only). Anyone else is a plain
//! submitter.

use shared::models::StaffRole;
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct StaffDirectory {
    super_admin: i64,
    sales: HashSet<i64>,
}

impl StaffDirectory {
    pub fn new(super_admin: i64, sales: impl IntoIterator<Item = i64>) -> Self {
        Self {
            super_admin,
            sales: sales.into_iter().collect(),
        }
    }

    /// The staff role of an actor, if any
    pub fn role_of(&self, actor_id: i64) -> Option<StaffRole> {
        if actor_id == self.super_admin {
            Some(StaffRole::SuperAdmin)
        } else if self.sales.contains(&actor_id) {
            Some(StaffRole::Sales)
        } else {
            None
        }
    }

    /// Whether the actor may perform actions gated on `required`
    ///
    /// The super-admin passes every gate; a sales member passes only the
    /// sales gate.
    pub fn has_permission(&self, actor_id: i64, required: StaffRole) -> bool {
        if actor_id == self.super_admin {
            return true;
        }
        match required {
            StaffRole::SuperAdmin => false,
            StaffRole::Sales => self.sales.contains(&actor_id),
        }
    }

    /// Staff members are exempt from inbound rate limiting
    pub fn is_staff(&self, actor_id: i64) -> bool {
        self.role_of(actor_id).is_some()
    }

    /// Role label for staff-facing confirmations
    pub fn display_name(&self, actor_id: i64) -> String {
        match self.role_of(actor_id) {
            Some(role) => role.display_name().to_string(),
            None => format!("Админ {actor_id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> StaffDirectory {
        StaffDirectory::new(100, [200, 201])
    }

    #[test]
    fn test_super_admin_passes_all_gates() {
        let dir = directory();
        assert!(dir.has_permission(100, StaffRole::SuperAdmin));
        assert!(dir.has_permission(100, StaffRole::Sales));
    }

    #[test]
    fn test_sales_only_decides() {
        let dir = directory();
        assert!(dir.has_permission(200, StaffRole::Sales));
        assert!(!dir.has_permission(200, StaffRole::SuperAdmin));
    }

    #[test]
    fn test_plain_submitter_denied() {
        let dir = directory();
        assert!(!dir.has_permission(42, StaffRole::Sales));
        assert!(!dir.has_permission(42, StaffRole::SuperAdmin));
        assert!(!dir.is_staff(42));
        assert_eq!(dir.role_of(42), None);
    }

    #[test]
    fn test_display_names() {
        let dir = directory();
        assert_eq!(dir.display_name(100), "Супер-админ");
        assert_eq!(dir.display_name(201), "Отдел продаж");
        assert_eq!(dir.display_name(7), "Админ 7");
    }
}

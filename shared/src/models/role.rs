//! Staff Role Model

use serde::{Deserialize, Serialize};

/// Staff role
///
/// `SuperAdmin` is authorized for every action. `Sales` is the
/// decision-capable role: approve/reject only. Everyone else is a
/// plain submitter with no staff capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    SuperAdmin,
    Sales,
}

impl StaffRole {
    /// Role label used in staff-facing confirmations
    pub fn display_name(&self) -> &'static str {
        match self {
            StaffRole::SuperAdmin => "Супер-админ",
            StaffRole::Sales => "Отдел продаж",
        }
    }
}

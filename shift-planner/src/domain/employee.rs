use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::Deserialize;
#[cfg(feature = "serde")]
use serde::Serialize;

use super::RoleId;

/// A member of staff who can be assigned to slots.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Employee {
    pub id: String,
    /// Hourly cost.
    pub wage: f64,
    pub max_hours_per_week: f64,
    /// The longest run of consecutive working slots; zero means the employee cannot work.
    #[cfg_attr(feature = "serde", serde(default = "unlimited"))]
    pub max_consec_slots: u32,
    /// The preferred number of hours over the horizon. Deviations are penalised, never
    /// forbidden.
    #[cfg_attr(feature = "serde", serde(default))]
    pub pref_hours: f64,
    /// The roles the employee may fill. May be empty.
    #[cfg_attr(feature = "serde", serde(default))]
    pub role_eligibility: BTreeSet<RoleId>,
}

#[cfg(feature = "serde")]
fn unlimited() -> u32 {
    u32::MAX
}

impl Employee {
    pub fn new(id: impl Into<String>, wage: f64, max_hours_per_week: f64) -> Employee {
        Employee {
            id: id.into(),
            wage,
            max_hours_per_week,
            max_consec_slots: u32::MAX,
            pref_hours: 0.0,
            role_eligibility: BTreeSet::new(),
        }
    }

    pub fn with_max_consec_slots(mut self, max_consec_slots: u32) -> Employee {
        self.max_consec_slots = max_consec_slots;
        self
    }

    pub fn with_pref_hours(mut self, pref_hours: f64) -> Employee {
        self.pref_hours = pref_hours;
        self
    }

    pub fn eligible_for(mut self, role: impl Into<RoleId>) -> Employee {
        let _ = self.role_eligibility.insert(role.into());
        self
    }

    pub fn is_eligible(&self, role: &RoleId) -> bool {
        self.role_eligibility.contains(role)
    }
}

use std::fmt::Display;
use std::fmt::Formatter;

#[cfg(feature = "serde")]
use serde::Deserialize;
#[cfg(feature = "serde")]
use serde::Serialize;

/// The identifier of a [`Role`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct RoleId(String);

impl RoleId {
    pub fn new(id: impl Into<String>) -> RoleId {
        RoleId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RoleId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RoleId {
    fn from(value: &str) -> Self {
        RoleId(value.to_owned())
    }
}

impl From<String> for RoleId {
    fn from(value: String) -> Self {
        RoleId(value)
    }
}

/// A function an employee can fill during a slot, e.g. a cook or a cashier.
///
/// A producing role turns staffed hours into items at `items_per_hour` per staff member. A role
/// that does not produce can still demand staffing through `min_present`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Role {
    pub id: RoleId,
    pub producing: bool,
    pub items_per_hour: f64,
    /// The minimum number of staff present in every slot where the role is staffed at all.
    #[cfg_attr(feature = "serde", serde(default))]
    pub min_present: u32,
    /// Whether the output of the role is independent of any production chain.
    #[cfg_attr(feature = "serde", serde(default = "independent_by_default"))]
    pub is_independent: bool,
}

#[cfg(feature = "serde")]
fn independent_by_default() -> bool {
    true
}

impl Role {
    /// A role which produces `items_per_hour` items for every staff member.
    pub fn producing(id: impl Into<RoleId>, items_per_hour: f64) -> Role {
        Role {
            id: id.into(),
            producing: true,
            items_per_hour,
            min_present: 0,
            is_independent: true,
        }
    }

    /// A role which produces nothing itself, e.g. a supervisor.
    pub fn support(id: impl Into<RoleId>) -> Role {
        Role {
            id: id.into(),
            producing: false,
            items_per_hour: 0.0,
            min_present: 0,
            is_independent: true,
        }
    }

    pub fn with_min_present(mut self, min_present: u32) -> Role {
        self.min_present = min_present;
        self
    }

    /// Mark the role as dependent on the output of upstream roles.
    pub fn dependent(mut self) -> Role {
        self.is_independent = false;
        self
    }
}

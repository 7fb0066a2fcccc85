use itertools::Itertools;
#[cfg(feature = "serde")]
use serde::Deserialize;
#[cfg(feature = "serde")]
use serde::Serialize;

use super::input_profile::RoleCapacity;
use super::input_profile::RATIO_EPSILON;
use crate::domain::RoleId;
use crate::options::InsightOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HiringPriority {
    /// The role can cover less than half of what is required of it.
    Critical,
    Moderate,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HiringRecommendation {
    pub role: RoleId,
    pub priority: HiringPriority,
    pub current_ratio: f64,
    pub additional_hours: f64,
    pub recommended_hires: u32,
    /// What the hires would change, in words.
    pub impact: String,
}

/// Recommend hires for every role whose capacity falls short, the worst covered role first.
pub(crate) fn recommend_hires(
    capacity: &[RoleCapacity],
    options: &InsightOptions,
) -> Vec<HiringRecommendation> {
    capacity
        .iter()
        .filter_map(|role| {
            let ratio = role.capacity_ratio?;
            (ratio < 1.0 - RATIO_EPSILON).then_some((role, ratio))
        })
        .sorted_by(|(_, left), (_, right)| left.total_cmp(right))
        .map(|(role, ratio)| {
            let additional_hours = role.hours_shortfall();
            let recommended_hires = if options.hire_weekly_hours > 0.0 {
                ((additional_hours / options.hire_weekly_hours).ceil() as u32).max(1)
            } else {
                1
            };
            let new_ratio = projected_ratio(role, recommended_hires, options.hire_weekly_hours);

            HiringRecommendation {
                role: role.role.clone(),
                priority: if ratio < 0.5 {
                    HiringPriority::Critical
                } else {
                    HiringPriority::Moderate
                },
                current_ratio: ratio,
                additional_hours,
                recommended_hires,
                impact: format!(
                    "hiring {recommended_hires} for {} raises its capacity ratio from {:.0}% to {:.0}%",
                    role.role,
                    ratio * 100.0,
                    new_ratio * 100.0
                ),
            }
        })
        .collect()
}

fn projected_ratio(role: &RoleCapacity, hires: u32, hire_weekly_hours: f64) -> f64 {
    if role.required_hours <= 0.0 {
        return role.capacity_ratio.unwrap_or(1.0);
    }
    let hours = role.total_available_hours + f64::from(hires) * hire_weekly_hours;
    hours / role.required_hours
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capacity(role: &str, available: f64, required: f64) -> RoleCapacity {
        RoleCapacity {
            role: RoleId::from(role),
            producing: true,
            eligible_employees: 1,
            total_available_hours: available,
            potential_output: available * 10.0,
            chain_capped_output: available * 10.0,
            role_demand: required * 10.0,
            required_hours: required,
            capacity_ratio: (required > 0.0).then(|| available / required),
            is_sufficient: available >= required,
        }
    }

    #[test]
    fn shortfalls_are_sized_in_whole_hires() {
        let roles = [
            capacity("cook", 30.0, 100.0),
            capacity("server", 60.0, 80.0),
            capacity("host", 10.0, 10.0),
            capacity("cleaner", 0.0, 0.0),
        ];

        let recommendations = recommend_hires(&roles, &InsightOptions::default());

        assert_eq!(recommendations.len(), 2);

        let cook = &recommendations[0];
        assert_eq!(cook.role, RoleId::from("cook"));
        assert_eq!(cook.priority, HiringPriority::Critical);
        assert_eq!(cook.additional_hours, 70.0);
        assert_eq!(cook.recommended_hires, 2);
        assert!(cook.impact.contains("30% to 110%"));

        let server = &recommendations[1];
        assert_eq!(server.priority, HiringPriority::Moderate);
        assert_eq!(server.recommended_hires, 1);
    }

    #[test]
    fn a_shortfall_always_recommends_a_hire() {
        let roles = [capacity("cook", 9.0, 10.0)];
        let options = InsightOptions {
            hire_weekly_hours: 0.0,
            ..Default::default()
        };

        let recommendations = recommend_hires(&roles, &options);

        assert_eq!(recommendations[0].recommended_hires, 1);
    }
}

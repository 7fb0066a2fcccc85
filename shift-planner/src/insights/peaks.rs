use itertools::Itertools;
#[cfg(feature = "serde")]
use serde::Deserialize;
#[cfg(feature = "serde")]
use serde::Serialize;

use super::input_profile::InputProfile;
use crate::domain::RoleId;
use crate::domain::RosterIndex;
use crate::options::InsightOptions;

/// A slot whose demand is well above the mean.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PeakPeriod {
    pub day: u32,
    pub slot: u32,
    pub demand: f64,
    /// How far the demand lies above the mean, as a fraction of the mean.
    pub above_mean: f64,
    pub suggested_staffing: Vec<StaffingSuggestion>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StaffingSuggestion {
    pub role: RoleId,
    pub staff: u32,
}

pub(crate) fn find_peaks(
    roster: &RosterIndex<'_>,
    profile: &InputProfile,
    options: &InsightOptions,
) -> Vec<PeakPeriod> {
    if profile.mean_demand <= 0.0 {
        return Vec::new();
    }

    let threshold = profile.mean_demand * (1.0 + options.peak_threshold);
    let grid = roster.grid();

    roster
        .demand_per_slot()
        .iter()
        .enumerate()
        .filter(|&(_, &demand)| demand > threshold)
        .map(|(index, &demand)| (grid.slot_ref(index), demand))
        .sorted_by(|(left_slot, left), (right_slot, right)| {
            right
                .total_cmp(left)
                .then_with(|| left_slot.cmp(right_slot))
        })
        .take(options.max_peak_periods)
        .map(|(slot_ref, demand)| PeakPeriod {
            day: slot_ref.day,
            slot: slot_ref.slot,
            demand,
            above_mean: demand / profile.mean_demand - 1.0,
            suggested_staffing: suggest_staffing(roster, demand),
        })
        .collect()
}

/// The staff each role needs to serve `demand` in one slot.
fn suggest_staffing(roster: &RosterIndex<'_>, demand: f64) -> Vec<StaffingSuggestion> {
    let slot_len_hour = roster.input().slot_len_hour;

    (0..roster.num_roles())
        .filter_map(|role| {
            let role_data = roster.role(role);
            let per_staff = role_data.items_per_hour * slot_len_hour;
            let needed = if role_data.producing && per_staff > 0.0 {
                (demand * roster.requirement_share(role) / per_staff).ceil() as u32
            } else {
                0
            };
            let staff = needed.max(role_data.min_present);

            (staff > 0).then(|| StaffingSuggestion {
                role: role_data.id.clone(),
                staff,
            })
        })
        .collect()
}

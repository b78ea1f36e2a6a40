//! View-model derivation for the ingredient profile page
//!
//! Pure, synchronous functions re-run on every render of the nine-circle
//! overview and the temperature diagram. Nothing here is persisted and
//! nothing here validates stored data; validation happens at the write
//! boundary.

use crate::contract::{GroupProfile, TemperaturePhase, MAX_TEMP_C, TRIGEMINAL_SLOT};
use std::collections::BTreeSet;

/// Horizontal placement of one group's temperature bar, in percent of the
/// fixed 0-170 degree axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarPlacement {
    pub left_pct: f64,
    pub width_pct: f64,
}

/// Temperature bar for one group slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupBar {
    pub slot: u8,
    pub placement: BarPlacement,
}

/// Vertical marker at a phase boundary
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryMark {
    pub temp_c: i32,
    pub offset_pct: f64,
}

/// Label centered over a phase's sub-range
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseLabel {
    pub phase_name: String,
    pub center_pct: f64,
}

/// Everything the profile page derives from an ingredient's raw data
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileView {
    /// Active slot numbers, ascending
    pub active_slots: Vec<u8>,
    /// One bar per group that has molecules, ordered by slot
    pub bars: Vec<GroupBar>,
    /// Deduplicated phase boundaries, ascending by temperature
    pub boundary_marks: Vec<BoundaryMark>,
    pub phase_labels: Vec<PhaseLabel>,
}

fn percent_of_axis(temp_c: i32) -> f64 {
    f64::from(temp_c) / f64::from(MAX_TEMP_C) * 100.0
}

/// Compute which of the nine slots render as active.
///
/// A slot is active iff its molecule list is non-empty. Additionally, slot 9
/// is activated when any molecule in slots 1-8 carries the trigeminal flag;
/// slot 9's own molecules never participate in that trigger check, and the
/// rule only ever adds activity.
pub fn active_slots(groups: &[GroupProfile]) -> BTreeSet<u8> {
    let mut active: BTreeSet<u8> = groups
        .iter()
        .filter(|g| !g.molecules.is_empty())
        .map(|g| g.group.slot)
        .collect();

    let trigeminal_triggered = groups
        .iter()
        .filter(|g| g.group.slot < TRIGEMINAL_SLOT)
        .any(|g| {
            g.molecules
                .iter()
                .any(|m| m.flags.has_trigeminal_activation)
        });

    if trigeminal_triggered {
        active.insert(TRIGEMINAL_SLOT);
    }

    active
}

/// Placement for a group's bar. A group with molecules but no stored range
/// spans the whole axis.
pub fn bar_placement(start_c: Option<i32>, end_c: Option<i32>) -> BarPlacement {
    let start = start_c.unwrap_or(0);
    let end = end_c.unwrap_or(MAX_TEMP_C);
    BarPlacement {
        left_pct: percent_of_axis(start),
        width_pct: percent_of_axis(end - start),
    }
}

/// Distinct phase boundaries, ascending. Boundaries shared by adjacent
/// phases collapse to one mark.
pub fn phase_boundaries(phases: &[TemperaturePhase]) -> Vec<BoundaryMark> {
    let temps: BTreeSet<i32> = phases
        .iter()
        .flat_map(|p| [p.temp_start_c, p.temp_end_c])
        .collect();

    temps
        .into_iter()
        .map(|temp_c| BoundaryMark {
            temp_c,
            offset_pct: percent_of_axis(temp_c),
        })
        .collect()
}

/// Label position, centered at the midpoint of the phase's range.
pub fn phase_label(phase: &TemperaturePhase) -> PhaseLabel {
    let center = f64::from(phase.temp_start_c + phase.temp_end_c) / 2.0;
    PhaseLabel {
        phase_name: phase.phase_name.clone(),
        center_pct: center / f64::from(MAX_TEMP_C) * 100.0,
    }
}

/// Derive the complete view-model for one ingredient's profile page.
pub fn derive_view(groups: &[GroupProfile], phases: &[TemperaturePhase]) -> ProfileView {
    let active = active_slots(groups);

    let bars = groups
        .iter()
        .filter(|g| !g.molecules.is_empty())
        .map(|g| GroupBar {
            slot: g.group.slot,
            placement: bar_placement(
                g.temperature.as_ref().map(|t| t.temp_start_c),
                g.temperature.as_ref().map(|t| t.temp_end_c),
            ),
        })
        .collect();

    ProfileView {
        active_slots: active.into_iter().collect(),
        bars,
        boundary_marks: phase_boundaries(phases),
        phase_labels: phases.iter().map(phase_label).collect(),
    }
}

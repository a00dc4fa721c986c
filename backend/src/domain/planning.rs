//! Budget estimation arithmetic and milestone planning.
//!
//! Estimation is pure computation: nothing here touches the store. The
//! planning screen feeds user-entered component costs through `estimate`
//! and compares the result against a project's target budget.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::error::ValidationError;

/// User-entered cost components for one estimation pass.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EstimateInputs {
    /// Cement and binding materials.
    pub cement: f64,
    /// Steel and structural materials.
    pub steel: f64,
    /// Sand and aggregates.
    pub sand: f64,
    /// Remaining materials.
    pub misc_materials: f64,
    /// Skilled and unskilled labour.
    pub labour: f64,
    /// Consultancy and architects.
    pub consultancy: f64,
    /// Safety and security.
    pub safety: f64,
    /// Contingency buffer percentage, 0 to 100.
    pub contingency_percent: f64,
}

/// Computed totals for one estimation pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimateSummary {
    /// Sum of the four material components.
    pub material_total: f64,
    /// Sum of labour, consultancy, and safety.
    pub indirect_total: f64,
    /// Buffer applied on top of the subtotal.
    pub contingency_amount: f64,
    /// Subtotal plus contingency.
    pub grand_total: f64,
}

impl EstimateSummary {
    /// Headroom left in `target_budget` after this estimate; negative when
    /// the estimate overshoots.
    #[must_use]
    pub fn variance_against(&self, target_budget: f64) -> f64 {
        target_budget - self.grand_total
    }
}

/// Compute an estimation summary from entered components.
///
/// Every component must be non-negative and the contingency percentage must
/// lie in 0..=100; anything else is rejected before any arithmetic.
pub fn estimate(inputs: EstimateInputs) -> Result<EstimateSummary, ValidationError> {
    let components = [
        ("cement", inputs.cement),
        ("steel", inputs.steel),
        ("sand", inputs.sand),
        ("misc_materials", inputs.misc_materials),
        ("labour", inputs.labour),
        ("consultancy", inputs.consultancy),
        ("safety", inputs.safety),
    ];
    for (field, value) in components {
        if value < 0.0 {
            return Err(ValidationError::out_of_range(
                field,
                "must not be negative",
            ));
        }
    }
    if !(0.0..=100.0).contains(&inputs.contingency_percent) {
        return Err(ValidationError::out_of_range(
            "contingency_percent",
            "must be between 0 and 100",
        ));
    }

    let material_total = inputs.cement + inputs.steel + inputs.sand + inputs.misc_materials;
    let indirect_total = inputs.labour + inputs.consultancy + inputs.safety;
    let sub_total = material_total + indirect_total;
    let contingency_amount = sub_total * (inputs.contingency_percent / 100.0);

    Ok(EstimateSummary {
        material_total,
        indirect_total,
        contingency_amount,
        grand_total: sub_total + contingency_amount,
    })
}

/// One phase in the standard build timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// Phase name.
    pub task: &'static str,
    /// Phase start.
    pub start: NaiveDate,
    /// Phase length in days.
    pub duration_days: u64,
}

/// The standard four-phase plan derived from a project start date.
///
/// Phases follow each other with fixed offsets: site cleanup for a week,
/// then foundation, structure, and finishing.
#[must_use]
pub fn milestone_plan(project_start: NaiveDate) -> Vec<Milestone> {
    const PHASES: [(&str, u64, u64); 4] = [
        ("Site Cleanup", 0, 7),
        ("Foundation", 7, 30),
        ("Structure", 37, 90),
        ("Finishing", 127, 60),
    ];

    PHASES
        .iter()
        .filter_map(|&(task, offset, duration_days)| {
            project_start
                .checked_add_days(Days::new(offset))
                .map(|start| Milestone {
                    task,
                    start,
                    duration_days,
                })
        })
        .collect()
}

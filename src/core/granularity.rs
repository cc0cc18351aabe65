// Default granularity policy

use crate::core::constants::{CATALOGUE, DISPLAY_BUDGET};
use crate::core::format::GranularityOption;

/// Largest sample count an option can display within the point budget.
pub fn threshold_for(option: &GranularityOption) -> usize {
    DISPLAY_BUDGET.saturating_mul(option.bucket_size)
}

/// First option, finest to coarsest, whose threshold covers `sample_count`.
/// Falls back to the coarsest entry; `None` only for an empty catalogue.
pub fn recommend(
    sample_count: usize,
    catalogue: &[GranularityOption],
) -> Option<GranularityOption> {
    catalogue
        .iter()
        .find(|option| sample_count <= threshold_for(option))
        .or_else(|| catalogue.last())
        .copied()
}

pub fn option_by_label(label: &str) -> Option<GranularityOption> {
    CATALOGUE.iter().find(|o| o.label == label).copied()
}

pub fn finest() -> GranularityOption {
    CATALOGUE[0]
}

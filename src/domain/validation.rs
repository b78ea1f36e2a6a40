//! Write-boundary validation
//!
//! Every rule here runs before a write is issued to storage; a failure means
//! the write never happens.

use crate::contract::{AromaError, TasteProfile, MAX_TEMP_C};
use uuid::Uuid;

/// Validate a group temperature range or a phase range: both ends multiples
/// of 10 within [0, 170], start strictly below end.
pub fn validate_temperature_range(start_c: i32, end_c: i32) -> Result<(), AromaError> {
    for temp in [start_c, end_c] {
        if !(0..=MAX_TEMP_C).contains(&temp) {
            return Err(AromaError::validation(format!(
                "temperature {temp} is outside 0..={MAX_TEMP_C}"
            )));
        }
        if temp % 10 != 0 {
            return Err(AromaError::validation(format!(
                "temperature {temp} is not a multiple of 10"
            )));
        }
    }
    if start_c >= end_c {
        return Err(AromaError::validation(format!(
            "start temperature {start_c} must be below end temperature {end_c}"
        )));
    }
    Ok(())
}

/// A flavor match must pair two distinct ingredients.
pub fn validate_flavor_match(source_id: Uuid, target_id: Uuid) -> Result<(), AromaError> {
    if source_id == target_id {
        return Err(AromaError::validation(
            "an ingredient cannot be matched with itself",
        ));
    }
    Ok(())
}

/// Taste scores are 0-3 when present.
pub fn validate_taste_profile(taste: &TasteProfile) -> Result<(), AromaError> {
    for score in taste.scores().into_iter().flatten() {
        if score > 3 {
            return Err(AromaError::validation(format!(
                "taste score {score} is outside 0..=3"
            )));
        }
    }
    Ok(())
}

/// Display names must not be empty or blank.
pub fn validate_name(name: &str) -> Result<(), AromaError> {
    if name.trim().is_empty() {
        return Err(AromaError::validation("name must not be empty"));
    }
    Ok(())
}

/// Phase names are single letters A-F.
pub fn validate_phase_name(phase_name: &str) -> Result<(), AromaError> {
    let mut chars = phase_name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if ('A'..='F').contains(&c) => Ok(()),
        _ => Err(AromaError::validation(format!(
            "phase name '{phase_name}' must be a single letter A-F"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_with_non_multiple_of_10_is_rejected() {
        assert!(validate_temperature_range(45, 90).is_err());
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert!(validate_temperature_range(90, 40).is_err());
        assert!(validate_temperature_range(40, 40).is_err());
    }

    #[test]
    fn range_outside_axis_is_rejected() {
        assert!(validate_temperature_range(-10, 40).is_err());
        assert!(validate_temperature_range(0, 180).is_err());
    }

    #[test]
    fn full_axis_range_is_accepted() {
        assert!(validate_temperature_range(0, 170).is_ok());
        assert!(validate_temperature_range(40, 90).is_ok());
    }

    #[test]
    fn self_match_is_rejected() {
        let id = Uuid::new_v4();
        assert!(validate_flavor_match(id, id).is_err());
        assert!(validate_flavor_match(id, Uuid::new_v4()).is_ok());
    }

    #[test]
    fn taste_scores_above_3_are_rejected() {
        let mut taste = TasteProfile::default();
        assert!(validate_taste_profile(&taste).is_ok());
        taste.sweet = Some(3);
        assert!(validate_taste_profile(&taste).is_ok());
        taste.umami = Some(4);
        assert!(validate_taste_profile(&taste).is_err());
    }

    #[test]
    fn blank_names_are_rejected() {
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name("Zimt").is_ok());
    }

    #[test]
    fn phase_names_are_single_letters_a_to_f() {
        for name in ["A", "B", "F"] {
            assert!(validate_phase_name(name).is_ok());
        }
        for name in ["", "G", "a", "AB"] {
            assert!(validate_phase_name(name).is_err());
        }
    }
}

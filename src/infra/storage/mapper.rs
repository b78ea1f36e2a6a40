//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models.

use super::entity;
use crate::contract::{
    AromaGroup, Ingredient, MatchRecord, Molecule, MoleculeFlags, TasteProfile, TemperaturePhase,
    TemperatureRange, Variation,
};
use sea_orm::ActiveValue::Set;

fn score(raw: Option<i16>) -> Option<u8> {
    raw.and_then(|v| u8::try_from(v).ok())
}

// ===== Ingredient Conversions =====

impl From<entity::ingredient::Model> for Ingredient {
    fn from(entity: entity::ingredient::Model) -> Self {
        Self {
            id: entity.id,
            name_de: entity.name_de,
            taste: TasteProfile {
                sweet: score(entity.taste_sweet),
                sour: score(entity.taste_sour),
                salty: score(entity.taste_salty),
                bitter: score(entity.taste_bitter),
                umami: score(entity.taste_umami),
            },
            taste_description_de: entity.taste_description_de,
            created_at: entity.created_at,
        }
    }
}

impl From<&Ingredient> for entity::ingredient::ActiveModel {
    fn from(model: &Ingredient) -> Self {
        Self {
            id: Set(model.id),
            name_de: Set(model.name_de.clone()),
            taste_sweet: Set(model.taste.sweet.map(i16::from)),
            taste_sour: Set(model.taste.sour.map(i16::from)),
            taste_salty: Set(model.taste.salty.map(i16::from)),
            taste_bitter: Set(model.taste.bitter.map(i16::from)),
            taste_umami: Set(model.taste.umami.map(i16::from)),
            taste_description_de: Set(model.taste_description_de.clone()),
            created_at: Set(model.created_at),
        }
    }
}

// ===== Aroma Group Conversions =====

impl From<entity::aroma_group::Model> for AromaGroup {
    fn from(entity: entity::aroma_group::Model) -> Self {
        Self {
            id: entity.id,
            slot: u8::try_from(entity.slot).unwrap_or_default(),
            name_de: entity.name_de,
            descriptor_de: entity.descriptor_de,
            color_hex: entity.color_hex,
        }
    }
}

// ===== Molecule Conversions =====

impl From<entity::molecule::Model> for Molecule {
    fn from(entity: entity::molecule::Model) -> Self {
        let variation = entity.parent_id.map(|parent_id| Variation {
            parent_id,
            label: entity.variation_label.clone().unwrap_or_default(),
        });
        Self {
            id: entity.id,
            group_id: entity.group_id,
            name_de: entity.name_de,
            descriptors_de: entity.descriptors_de,
            solubility_de: entity.solubility_de,
            variation,
        }
    }
}

impl From<&Molecule> for entity::molecule::ActiveModel {
    fn from(model: &Molecule) -> Self {
        Self {
            id: Set(model.id),
            group_id: Set(model.group_id),
            name_de: Set(model.name_de.clone()),
            descriptors_de: Set(model.descriptors_de.clone()),
            solubility_de: Set(model.solubility_de.clone()),
            parent_id: Set(model.variation.as_ref().map(|v| v.parent_id)),
            variation_label: Set(model.variation.as_ref().map(|v| v.label.clone())),
        }
    }
}

impl From<entity::ingredient_molecule::Model> for MoleculeFlags {
    fn from(entity: entity::ingredient_molecule::Model) -> Self {
        Self {
            is_key: entity.is_key,
            is_tracked: entity.is_tracked,
            has_trigeminal_activation: entity.has_trigeminal_activation,
        }
    }
}

// ===== Temperature Conversions =====

impl From<entity::group_temperature::Model> for TemperatureRange {
    fn from(entity: entity::group_temperature::Model) -> Self {
        Self {
            temp_start_c: entity.temp_start_c,
            temp_end_c: entity.temp_end_c,
            behavior_description_de: entity.behavior_description_de,
        }
    }
}

impl From<entity::temperature_phase::Model> for TemperaturePhase {
    fn from(entity: entity::temperature_phase::Model) -> Self {
        Self {
            id: entity.id,
            ingredient_id: entity.ingredient_id,
            phase_name: entity.phase_name,
            temp_start_c: entity.temp_start_c,
            temp_end_c: entity.temp_end_c,
            description_de: entity.description_de,
        }
    }
}

impl From<&TemperaturePhase> for entity::temperature_phase::ActiveModel {
    fn from(model: &TemperaturePhase) -> Self {
        Self {
            id: Set(model.id),
            ingredient_id: Set(model.ingredient_id),
            phase_name: Set(model.phase_name.clone()),
            temp_start_c: Set(model.temp_start_c),
            temp_end_c: Set(model.temp_end_c),
            description_de: Set(model.description_de.clone()),
        }
    }
}

// ===== Match Conversions =====

impl From<entity::ingredient_match::Model> for MatchRecord {
    fn from(entity: entity::ingredient_match::Model) -> Self {
        Self {
            id: entity.id,
            source_ingredient_id: entity.source_ingredient_id,
            target_ingredient_id: entity.target_ingredient_id,
            note: entity.note,
            created_at: entity.created_at,
        }
    }
}

impl From<&MatchRecord> for entity::ingredient_match::ActiveModel {
    fn from(model: &MatchRecord) -> Self {
        Self {
            id: Set(model.id),
            source_ingredient_id: Set(model.source_ingredient_id),
            target_ingredient_id: Set(model.target_ingredient_id),
            note: Set(model.note.clone()),
            created_at: Set(model.created_at),
        }
    }
}

//! Conversions between REST DTOs and contract models

use super::dto::{
    AromaGroupDto, AttachMoleculeRequest, BoundaryMarkDto, FlavorMatchDto, GroupBarDto,
    GroupProfileDto, IngredientDto, IngredientRefDto, MatchRecordDto, MoleculeDto,
    MoleculeWithFlagsDto, PhaseLabelDto, ProfilePageResponse, ProfileViewDto,
    TemperaturePhaseDto, TemperatureRangeDto, UpdateFlagsRequest, UpdateTasteRequest,
};
use crate::contract::{
    AromaError, AromaGroup, FlavorMatch, GroupProfile, Ingredient, IngredientRef, MatchRecord,
    Molecule, MoleculeFlags, MoleculeWithFlags, TasteProfile, TemperaturePhase,
    TemperatureRange, Variation,
};
use crate::domain::profile::{BoundaryMark, GroupBar, PhaseLabel, ProfileView};
use crate::domain::{AttachMolecule, ProfilePage};

impl From<IngredientRef> for IngredientRefDto {
    fn from(r: IngredientRef) -> Self {
        Self {
            id: r.id,
            name_de: r.name_de,
        }
    }
}

impl From<Ingredient> for IngredientDto {
    fn from(i: Ingredient) -> Self {
        Self {
            id: i.id,
            name_de: i.name_de,
            taste_sweet: i.taste.sweet,
            taste_sour: i.taste.sour,
            taste_salty: i.taste.salty,
            taste_bitter: i.taste.bitter,
            taste_umami: i.taste.umami,
            taste_description_de: i.taste_description_de,
            created_at: i.created_at,
        }
    }
}

impl From<&UpdateTasteRequest> for TasteProfile {
    fn from(req: &UpdateTasteRequest) -> Self {
        Self {
            sweet: req.taste_sweet,
            sour: req.taste_sour,
            salty: req.taste_salty,
            bitter: req.taste_bitter,
            umami: req.taste_umami,
        }
    }
}

impl From<AromaGroup> for AromaGroupDto {
    fn from(g: AromaGroup) -> Self {
        Self {
            id: g.id,
            slot: g.slot,
            name_de: g.name_de,
            descriptor_de: g.descriptor_de,
            color_hex: g.color_hex,
        }
    }
}

impl From<Molecule> for MoleculeDto {
    fn from(m: Molecule) -> Self {
        let (parent_id, variation_label) = match m.variation {
            Some(v) => (Some(v.parent_id), Some(v.label)),
            None => (None, None),
        };
        Self {
            id: m.id,
            group_id: m.group_id,
            name_de: m.name_de,
            descriptors_de: m.descriptors_de,
            solubility_de: m.solubility_de,
            parent_id,
            variation_label,
        }
    }
}

impl From<MoleculeWithFlags> for MoleculeWithFlagsDto {
    fn from(mwf: MoleculeWithFlags) -> Self {
        let (parent_id, variation_label) = match mwf.molecule.variation {
            Some(v) => (Some(v.parent_id), Some(v.label)),
            None => (None, None),
        };
        Self {
            id: mwf.molecule.id,
            group_id: mwf.molecule.group_id,
            name_de: mwf.molecule.name_de,
            descriptors_de: mwf.molecule.descriptors_de,
            solubility_de: mwf.molecule.solubility_de,
            parent_id,
            variation_label,
            is_key: mwf.flags.is_key,
            is_tracked: mwf.flags.is_tracked,
            has_trigeminal_activation: mwf.flags.has_trigeminal_activation,
        }
    }
}

impl From<&UpdateFlagsRequest> for MoleculeFlags {
    fn from(req: &UpdateFlagsRequest) -> Self {
        Self {
            is_key: req.is_key,
            is_tracked: req.is_tracked,
            has_trigeminal_activation: req.has_trigeminal_activation,
        }
    }
}

impl From<TemperatureRange> for TemperatureRangeDto {
    fn from(r: TemperatureRange) -> Self {
        Self {
            temp_start_c: r.temp_start_c,
            temp_end_c: r.temp_end_c,
            behavior_description_de: r.behavior_description_de,
        }
    }
}

impl From<TemperaturePhase> for TemperaturePhaseDto {
    fn from(p: TemperaturePhase) -> Self {
        Self {
            id: p.id,
            ingredient_id: p.ingredient_id,
            phase_name: p.phase_name,
            temp_start_c: p.temp_start_c,
            temp_end_c: p.temp_end_c,
            description_de: p.description_de,
        }
    }
}

impl From<GroupProfile> for GroupProfileDto {
    fn from(gp: GroupProfile) -> Self {
        Self {
            id: gp.group.id,
            slot: gp.group.slot,
            name_de: gp.group.name_de,
            descriptor_de: gp.group.descriptor_de,
            color_hex: gp.group.color_hex,
            molecules: gp.molecules.into_iter().map(Into::into).collect(),
            temperature: gp.temperature.map(Into::into),
        }
    }
}

impl From<GroupBar> for GroupBarDto {
    fn from(b: GroupBar) -> Self {
        Self {
            slot: b.slot,
            left_pct: b.placement.left_pct,
            width_pct: b.placement.width_pct,
        }
    }
}

impl From<BoundaryMark> for BoundaryMarkDto {
    fn from(m: BoundaryMark) -> Self {
        Self {
            temp_c: m.temp_c,
            offset_pct: m.offset_pct,
        }
    }
}

impl From<PhaseLabel> for PhaseLabelDto {
    fn from(l: PhaseLabel) -> Self {
        Self {
            phase_name: l.phase_name,
            center_pct: l.center_pct,
        }
    }
}

impl From<ProfileView> for ProfileViewDto {
    fn from(v: ProfileView) -> Self {
        Self {
            active_slots: v.active_slots,
            bars: v.bars.into_iter().map(Into::into).collect(),
            boundary_marks: v.boundary_marks.into_iter().map(Into::into).collect(),
            phase_labels: v.phase_labels.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<ProfilePage> for ProfilePageResponse {
    fn from(page: ProfilePage) -> Self {
        Self {
            ingredient: page.profile.ingredient.into(),
            groups: page.profile.groups.into_iter().map(Into::into).collect(),
            temperature_phases: page.phases.into_iter().map(Into::into).collect(),
            view: page.view.into(),
        }
    }
}

impl From<FlavorMatch> for FlavorMatchDto {
    fn from(m: FlavorMatch) -> Self {
        Self {
            id: m.id,
            note: m.note,
            target: m.target.into(),
            target_active_slots: m.target_active_slots,
        }
    }
}

impl From<MatchRecord> for MatchRecordDto {
    fn from(r: MatchRecord) -> Self {
        Self {
            id: r.id,
            source_ingredient_id: r.source_ingredient_id,
            target_ingredient_id: r.target_ingredient_id,
            note: r.note,
        }
    }
}

impl TryFrom<&AttachMoleculeRequest> for AttachMolecule {
    type Error = AromaError;

    fn try_from(req: &AttachMoleculeRequest) -> Result<Self, Self::Error> {
        if let Some(molecule_id) = req.molecule_id {
            return Ok(AttachMolecule::Existing { molecule_id });
        }
        let group_id = req
            .group_id
            .ok_or_else(|| AromaError::validation("either molecule_id or group_id is required"))?;
        let name_de = req
            .name_de
            .clone()
            .ok_or_else(|| AromaError::validation("name_de is required for a new molecule"))?;
        let variation = match (req.parent_id, req.variation_label.clone()) {
            (Some(parent_id), Some(label)) => Some(Variation { parent_id, label }),
            (None, None) => None,
            _ => {
                return Err(AromaError::validation(
                    "parent_id and variation_label must be set together",
                ))
            }
        };
        Ok(AttachMolecule::New {
            group_id,
            name_de,
            descriptors_de: req.descriptors_de.clone(),
            solubility_de: req.solubility_de.clone(),
            variation,
        })
    }
}

impl From<&AttachMoleculeRequest> for MoleculeFlags {
    fn from(req: &AttachMoleculeRequest) -> Self {
        Self {
            is_key: req.is_key,
            is_tracked: req.is_tracked,
            has_trigeminal_activation: req.has_trigeminal_activation,
        }
    }
}

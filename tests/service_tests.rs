//! Integration tests for the aroma domain service
#![allow(clippy::unwrap_used)]

use aroma_explorer::contract::*;
use aroma_explorer::domain::repository::{
    GroupRepository, IngredientRepository, MatchRepository, MoleculeRepository,
    TemperatureRepository,
};
use aroma_explorer::domain::{AttachMolecule, Service};
use std::sync::Arc;
use uuid::Uuid;

mod common;
use common::TestGroups;

// Mock repository implementations for testing
pub mod mocks {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;
    use parking_lot::RwLock;
    use std::collections::HashMap;

    #[derive(Clone, Default)]
    pub struct MockIngredientRepo {
        pub data: Arc<RwLock<HashMap<Uuid, Ingredient>>>,
    }

    #[async_trait]
    impl IngredientRepository for MockIngredientRepo {
        async fn create(&self, ingredient: &Ingredient) -> Result<()> {
            self.data.write().insert(ingredient.id, ingredient.clone());
            Ok(())
        }

        async fn rename(&self, id: Uuid, name_de: &str) -> Result<bool> {
            Ok(match self.data.write().get_mut(&id) {
                Some(row) => {
                    row.name_de = name_de.to_string();
                    true
                }
                None => false,
            })
        }

        async fn update_taste(
            &self,
            id: Uuid,
            taste: &TasteProfile,
            description_de: Option<&str>,
        ) -> Result<bool> {
            Ok(match self.data.write().get_mut(&id) {
                Some(row) => {
                    row.taste = *taste;
                    row.taste_description_de = description_de.map(str::to_string);
                    true
                }
                None => false,
            })
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Ingredient>> {
            Ok(self.data.read().get(&id).cloned())
        }

        async fn list_all(&self) -> Result<Vec<IngredientRef>> {
            let mut refs: Vec<IngredientRef> = self
                .data
                .read()
                .values()
                .map(|i| IngredientRef {
                    id: i.id,
                    name_de: i.name_de.clone(),
                })
                .collect();
            refs.sort_by(|a, b| a.name_de.cmp(&b.name_de));
            Ok(refs)
        }
    }

    #[derive(Clone)]
    pub struct MockGroupRepo {
        pub groups: Vec<AromaGroup>,
    }

    #[async_trait]
    impl GroupRepository for MockGroupRepo {
        async fn list_all(&self) -> Result<Vec<AromaGroup>> {
            Ok(self.groups.clone())
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<AromaGroup>> {
            Ok(self.groups.iter().find(|g| g.id == id).cloned())
        }
    }

    #[derive(Clone, Default)]
    pub struct MockMoleculeRepo {
        pub molecules: Arc<RwLock<HashMap<Uuid, Molecule>>>,
        pub links: Arc<RwLock<HashMap<(Uuid, Uuid), MoleculeFlags>>>,
    }

    #[async_trait]
    impl MoleculeRepository for MockMoleculeRepo {
        async fn create(&self, molecule: &Molecule) -> Result<()> {
            self.molecules.write().insert(molecule.id, molecule.clone());
            Ok(())
        }

        async fn update(
            &self,
            id: Uuid,
            descriptors_de: &str,
            solubility_de: &str,
            variation: Option<&Variation>,
        ) -> Result<bool> {
            Ok(match self.molecules.write().get_mut(&id) {
                Some(row) => {
                    row.descriptors_de = descriptors_de.to_string();
                    row.solubility_de = solubility_de.to_string();
                    row.variation = variation.cloned();
                    true
                }
                None => false,
            })
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Molecule>> {
            Ok(self.molecules.read().get(&id).cloned())
        }

        async fn search_by_group(
            &self,
            group_id: Uuid,
            query: Option<&str>,
        ) -> Result<Vec<Molecule>> {
            let needle = query.map(str::to_lowercase);
            let mut found: Vec<Molecule> = self
                .molecules
                .read()
                .values()
                .filter(|m| m.group_id == group_id)
                .filter(|m| match &needle {
                    Some(needle) => m.name_de.to_lowercase().contains(needle),
                    None => true,
                })
                .cloned()
                .collect();
            found.sort_by(|a, b| a.name_de.cmp(&b.name_de));
            Ok(found)
        }

        async fn link_exists(&self, ingredient_id: Uuid, molecule_id: Uuid) -> Result<bool> {
            Ok(self.links.read().contains_key(&(ingredient_id, molecule_id)))
        }

        async fn add_link(
            &self,
            ingredient_id: Uuid,
            molecule_id: Uuid,
            flags: MoleculeFlags,
        ) -> Result<()> {
            self.links.write().insert((ingredient_id, molecule_id), flags);
            Ok(())
        }

        async fn update_link(
            &self,
            ingredient_id: Uuid,
            molecule_id: Uuid,
            flags: MoleculeFlags,
        ) -> Result<bool> {
            Ok(match self.links.write().get_mut(&(ingredient_id, molecule_id)) {
                Some(row) => {
                    *row = flags;
                    true
                }
                None => false,
            })
        }

        async fn remove_link(&self, ingredient_id: Uuid, molecule_id: Uuid) -> Result<bool> {
            Ok(self.links.write().remove(&(ingredient_id, molecule_id)).is_some())
        }

        async fn molecules_for_ingredient(
            &self,
            ingredient_id: Uuid,
        ) -> Result<Vec<MoleculeWithFlags>> {
            let molecules = self.molecules.read();
            let mut found: Vec<MoleculeWithFlags> = self
                .links
                .read()
                .iter()
                .filter(|((iid, _), _)| *iid == ingredient_id)
                .filter_map(|((_, mid), flags)| {
                    molecules.get(mid).map(|m| MoleculeWithFlags {
                        molecule: m.clone(),
                        flags: *flags,
                    })
                })
                .collect();
            found.sort_by(|a, b| a.molecule.name_de.cmp(&b.molecule.name_de));
            Ok(found)
        }
    }

    #[derive(Clone, Default)]
    pub struct MockTemperatureRepo {
        pub ranges: Arc<RwLock<HashMap<(Uuid, Uuid), TemperatureRange>>>,
        pub phases: Arc<RwLock<HashMap<Uuid, TemperaturePhase>>>,
    }

    #[async_trait]
    impl TemperatureRepository for MockTemperatureRepo {
        async fn ranges_for_ingredient(
            &self,
            ingredient_id: Uuid,
        ) -> Result<Vec<(Uuid, TemperatureRange)>> {
            Ok(self
                .ranges
                .read()
                .iter()
                .filter(|((iid, _), _)| *iid == ingredient_id)
                .map(|((_, gid), range)| (*gid, range.clone()))
                .collect())
        }

        async fn upsert_range(
            &self,
            ingredient_id: Uuid,
            group_id: Uuid,
            range: &TemperatureRange,
        ) -> Result<()> {
            self.ranges
                .write()
                .insert((ingredient_id, group_id), range.clone());
            Ok(())
        }

        async fn delete_range(&self, ingredient_id: Uuid, group_id: Uuid) -> Result<bool> {
            Ok(self
                .ranges
                .write()
                .remove(&(ingredient_id, group_id))
                .is_some())
        }

        async fn phases_for_ingredient(
            &self,
            ingredient_id: Uuid,
        ) -> Result<Vec<TemperaturePhase>> {
            let mut found: Vec<TemperaturePhase> = self
                .phases
                .read()
                .values()
                .filter(|p| p.ingredient_id == ingredient_id)
                .cloned()
                .collect();
            found.sort_by_key(|p| p.temp_start_c);
            Ok(found)
        }

        async fn upsert_phase(&self, phase: &TemperaturePhase) -> Result<()> {
            self.phases.write().insert(phase.id, phase.clone());
            Ok(())
        }

        async fn delete_phase(&self, phase_id: Uuid) -> Result<bool> {
            Ok(self.phases.write().remove(&phase_id).is_some())
        }
    }

    #[derive(Clone, Default)]
    pub struct MockMatchRepo {
        pub records: Arc<RwLock<Vec<MatchRecord>>>,
    }

    #[async_trait]
    impl MatchRepository for MockMatchRepo {
        async fn create(&self, record: &MatchRecord) -> Result<()> {
            self.records.write().push(record.clone());
            Ok(())
        }

        async fn delete(&self, id: Uuid) -> Result<bool> {
            let mut records = self.records.write();
            let before = records.len();
            records.retain(|r| r.id != id);
            Ok(records.len() < before)
        }

        async fn find_by_source(&self, source_ingredient_id: Uuid) -> Result<Vec<MatchRecord>> {
            Ok(self
                .records
                .read()
                .iter()
                .filter(|r| r.source_ingredient_id == source_ingredient_id)
                .cloned()
                .collect())
        }
    }
}

use mocks::*;

/// Service wired to fresh mocks plus handles to inspect them
struct Harness {
    service: Service,
    groups: TestGroups,
    ingredients: MockIngredientRepo,
    molecules: MockMoleculeRepo,
    temperatures: MockTemperatureRepo,
    matches: MockMatchRepo,
}

impl Harness {
    fn new() -> Self {
        let groups = TestGroups::new();
        let ingredients = MockIngredientRepo::default();
        let molecules = MockMoleculeRepo::default();
        let temperatures = MockTemperatureRepo::default();
        let matches = MockMatchRepo::default();
        let service = Service::new(
            Arc::new(ingredients.clone()),
            Arc::new(MockGroupRepo {
                groups: groups.groups.clone(),
            }),
            Arc::new(molecules.clone()),
            Arc::new(temperatures.clone()),
            Arc::new(matches.clone()),
        );
        Self {
            service,
            groups,
            ingredients,
            molecules,
            temperatures,
            matches,
        }
    }

    async fn create_ingredient(&self, name: &str) -> Ingredient {
        self.service
            .create_ingredient(&AuthContext::admin(None), name)
            .await
            .unwrap()
    }

    async fn attach_new_molecule(
        &self,
        ingredient_id: Uuid,
        slot: u8,
        name: &str,
        flags: MoleculeFlags,
    ) -> Molecule {
        self.service
            .attach_molecule(
                &AuthContext::admin(None),
                ingredient_id,
                AttachMolecule::New {
                    group_id: self.groups.id_for_slot(slot),
                    name_de: name.to_string(),
                    descriptors_de: String::new(),
                    solubility_de: String::new(),
                    variation: None,
                },
                flags,
            )
            .await
            .unwrap()
    }
}

fn admin() -> AuthContext {
    AuthContext::admin(None)
}

#[tokio::test]
async fn profile_always_returns_all_nine_groups_ordered_by_slot() {
    let h = Harness::new();
    let ingredient = h.create_ingredient("Zimt").await;

    let page = h.service.ingredient_profile(ingredient.id).await.unwrap();

    assert_eq!(page.profile.groups.len(), 9);
    let slots: Vec<u8> = page.profile.groups.iter().map(|g| g.group.slot).collect();
    assert_eq!(slots, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
    assert!(page.view.active_slots.is_empty());
}

#[tokio::test]
async fn viewer_cannot_write_and_repo_stays_untouched() {
    let h = Harness::new();

    let err = h
        .service
        .create_ingredient(&AuthContext::viewer(), "Zimt")
        .await
        .unwrap_err();

    assert_eq!(err, AromaError::Forbidden);
    assert!(h.ingredients.data.read().is_empty());
}

#[tokio::test]
async fn trigeminal_flag_in_lower_slot_activates_slot_nine() {
    let h = Harness::new();
    let ingredient = h.create_ingredient("Chili").await;

    h.attach_new_molecule(
        ingredient.id,
        5,
        "Capsaicin",
        MoleculeFlags {
            is_key: true,
            is_tracked: false,
            has_trigeminal_activation: true,
        },
    )
    .await;

    let page = h.service.ingredient_profile(ingredient.id).await.unwrap();
    assert_eq!(page.view.active_slots, vec![5, 9]);
}

#[tokio::test]
async fn trigeminal_flag_in_slot_nine_does_not_self_trigger() {
    let h = Harness::new();
    let ingredient = h.create_ingredient("Pfeffer").await;

    // Slot 9 is active through its own molecule, not through the trigger
    h.attach_new_molecule(
        ingredient.id,
        9,
        "Piperin",
        MoleculeFlags {
            is_key: false,
            is_tracked: false,
            has_trigeminal_activation: true,
        },
    )
    .await;

    let page = h.service.ingredient_profile(ingredient.id).await.unwrap();
    assert_eq!(page.view.active_slots, vec![9]);
}

#[tokio::test]
async fn invalid_temperature_range_rejected_before_storage() {
    let h = Harness::new();
    let ingredient = h.create_ingredient("Zimt").await;
    let group_id = h.groups.id_for_slot(1);

    // 45 is not a multiple of 10
    let err = h
        .service
        .upsert_temperature_range(
            &admin(),
            ingredient.id,
            group_id,
            TemperatureRange {
                temp_start_c: 45,
                temp_end_c: 90,
                behavior_description_de: None,
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AromaError::Validation { .. }));
    assert!(h.temperatures.ranges.read().is_empty());
}

#[tokio::test]
async fn inverted_temperature_range_rejected() {
    let h = Harness::new();
    let ingredient = h.create_ingredient("Zimt").await;

    let err = h
        .service
        .upsert_temperature_range(
            &admin(),
            ingredient.id,
            h.groups.id_for_slot(2),
            TemperatureRange {
                temp_start_c: 90,
                temp_end_c: 40,
                behavior_description_de: None,
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AromaError::Validation { .. }));
}

#[tokio::test]
async fn profile_places_bars_on_the_fixed_axis() {
    let h = Harness::new();
    let ingredient = h.create_ingredient("Zimt").await;

    h.attach_new_molecule(ingredient.id, 1, "Zimtaldehyd", MoleculeFlags::default())
        .await;
    h.service
        .upsert_temperature_range(
            &admin(),
            ingredient.id,
            h.groups.id_for_slot(1),
            TemperatureRange {
                temp_start_c: 40,
                temp_end_c: 90,
                behavior_description_de: None,
            },
        )
        .await
        .unwrap();

    let page = h.service.ingredient_profile(ingredient.id).await.unwrap();
    assert_eq!(page.view.bars.len(), 1);
    let bar = &page.view.bars[0];
    assert_eq!(bar.slot, 1);
    assert!((bar.placement.left_pct - 40.0 / 170.0 * 100.0).abs() < 1e-9);
    assert!((bar.placement.width_pct - 50.0 / 170.0 * 100.0).abs() < 1e-9);
}

#[tokio::test]
async fn group_without_stored_range_spans_the_whole_axis() {
    let h = Harness::new();
    let ingredient = h.create_ingredient("Vanille").await;

    h.attach_new_molecule(ingredient.id, 7, "Vanillin", MoleculeFlags::default())
        .await;

    let page = h.service.ingredient_profile(ingredient.id).await.unwrap();
    let bar = &page.view.bars[0];
    assert!((bar.placement.left_pct - 0.0).abs() < 1e-9);
    assert!((bar.placement.width_pct - 100.0).abs() < 1e-9);
}

#[tokio::test]
async fn duplicate_phase_name_is_a_conflict() {
    let h = Harness::new();
    let ingredient = h.create_ingredient("Zimt").await;

    h.service
        .upsert_temperature_phase(&admin(), ingredient.id, None, "A", 0, 60, None)
        .await
        .unwrap();

    let err = h
        .service
        .upsert_temperature_phase(&admin(), ingredient.id, None, "A", 60, 120, None)
        .await
        .unwrap_err();

    assert!(matches!(err, AromaError::Conflict { .. }));
    assert_eq!(h.temperatures.phases.read().len(), 1);
}

#[tokio::test]
async fn phase_update_keeps_its_own_name() {
    let h = Harness::new();
    let ingredient = h.create_ingredient("Zimt").await;

    let phase = h
        .service
        .upsert_temperature_phase(&admin(), ingredient.id, None, "A", 0, 60, None)
        .await
        .unwrap();

    // Re-upserting the same phase under its own id is not a clash
    let updated = h
        .service
        .upsert_temperature_phase(
            &admin(),
            ingredient.id,
            Some(phase.id),
            "A",
            0,
            80,
            Some("Aufbau".to_string()),
        )
        .await
        .unwrap();

    assert_eq!(updated.id, phase.id);
    assert_eq!(updated.temp_end_c, 80);
}

#[tokio::test]
async fn shared_phase_boundaries_deduplicate_in_the_view() {
    let h = Harness::new();
    let ingredient = h.create_ingredient("Zimt").await;

    h.service
        .upsert_temperature_phase(&admin(), ingredient.id, None, "A", 0, 60, None)
        .await
        .unwrap();
    h.service
        .upsert_temperature_phase(&admin(), ingredient.id, None, "B", 60, 170, None)
        .await
        .unwrap();

    let page = h.service.ingredient_profile(ingredient.id).await.unwrap();
    let temps: Vec<i32> = page.view.boundary_marks.iter().map(|m| m.temp_c).collect();
    assert_eq!(temps, vec![0, 60, 170]);

    let labels: Vec<&str> = page
        .view
        .phase_labels
        .iter()
        .map(|l| l.phase_name.as_str())
        .collect();
    assert_eq!(labels, vec!["A", "B"]);
}

#[tokio::test]
async fn self_match_is_rejected() {
    let h = Harness::new();
    let ingredient = h.create_ingredient("Zimt").await;

    let err = h
        .service
        .create_flavor_match(&admin(), ingredient.id, ingredient.id, None)
        .await
        .unwrap_err();

    assert!(matches!(err, AromaError::Validation { .. }));
    assert!(h.matches.records.read().is_empty());
}

#[tokio::test]
async fn flavor_matches_resolve_target_active_slots() {
    let h = Harness::new();
    let source = h.create_ingredient("Apfel").await;
    let target = h.create_ingredient("Zimt").await;

    h.attach_new_molecule(target.id, 1, "Zimtaldehyd", MoleculeFlags::default())
        .await;
    h.attach_new_molecule(
        target.id,
        5,
        "Eugenol",
        MoleculeFlags {
            is_key: false,
            is_tracked: true,
            has_trigeminal_activation: true,
        },
    )
    .await;

    h.service
        .create_flavor_match(&admin(), source.id, target.id, Some("klassisch".to_string()))
        .await
        .unwrap();

    let matches = h.service.flavor_matches(source.id).await.unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].target.name_de, "Zimt");
    assert_eq!(matches[0].target_active_slots, vec![1, 5, 9]);
}

#[tokio::test]
async fn matches_stay_one_directional() {
    let h = Harness::new();
    let source = h.create_ingredient("Apfel").await;
    let target = h.create_ingredient("Zimt").await;

    h.service
        .create_flavor_match(&admin(), source.id, target.id, None)
        .await
        .unwrap();

    assert_eq!(h.service.flavor_matches(source.id).await.unwrap().len(), 1);
    assert!(h.service.flavor_matches(target.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn variation_parent_must_share_the_group() {
    let h = Harness::new();
    let ingredient = h.create_ingredient("Zitrone").await;
    let parent = h
        .attach_new_molecule(ingredient.id, 4, "Citral", MoleculeFlags::default())
        .await;

    let err = h
        .service
        .attach_molecule(
            &admin(),
            ingredient.id,
            AttachMolecule::New {
                group_id: h.groups.id_for_slot(1),
                name_de: "Neral".to_string(),
                descriptors_de: String::new(),
                solubility_de: String::new(),
                variation: Some(Variation {
                    parent_id: parent.id,
                    label: "cis".to_string(),
                }),
            },
            MoleculeFlags::default(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AromaError::Validation { .. }));
}

#[tokio::test]
async fn attaching_the_same_molecule_twice_is_a_conflict() {
    let h = Harness::new();
    let ingredient = h.create_ingredient("Zimt").await;
    let molecule = h
        .attach_new_molecule(ingredient.id, 1, "Zimtaldehyd", MoleculeFlags::default())
        .await;

    let err = h
        .service
        .attach_molecule(
            &admin(),
            ingredient.id,
            AttachMolecule::Existing {
                molecule_id: molecule.id,
            },
            MoleculeFlags::default(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AromaError::Conflict { .. }));
}

#[tokio::test]
async fn detaching_keeps_the_molecule_itself() {
    let h = Harness::new();
    let ingredient = h.create_ingredient("Zimt").await;
    let molecule = h
        .attach_new_molecule(ingredient.id, 1, "Zimtaldehyd", MoleculeFlags::default())
        .await;

    h.service
        .detach_molecule(&admin(), ingredient.id, molecule.id)
        .await
        .unwrap();

    assert!(h.molecules.links.read().is_empty());
    assert!(h.molecules.molecules.read().contains_key(&molecule.id));

    let page = h.service.ingredient_profile(ingredient.id).await.unwrap();
    assert!(page.view.active_slots.is_empty());
}

#[tokio::test]
async fn unknown_ingredient_rename_is_not_found() {
    let h = Harness::new();

    let err = h
        .service
        .rename_ingredient(&admin(), Uuid::new_v4(), "Neu")
        .await
        .unwrap_err();

    assert!(matches!(err, AromaError::NotFound { .. }));
}

#[tokio::test]
async fn taste_score_above_three_is_rejected() {
    let h = Harness::new();
    let ingredient = h.create_ingredient("Zimt").await;

    let err = h
        .service
        .update_taste_profile(
            &admin(),
            ingredient.id,
            TasteProfile {
                sweet: Some(4),
                ..TasteProfile::default()
            },
            None,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AromaError::Validation { .. }));
}

#[tokio::test]
async fn molecule_search_filters_by_substring() {
    let h = Harness::new();
    let ingredient = h.create_ingredient("Zitrone").await;
    h.attach_new_molecule(ingredient.id, 4, "Citral", MoleculeFlags::default())
        .await;
    h.attach_new_molecule(ingredient.id, 4, "Limonen", MoleculeFlags::default())
        .await;

    let group_id = h.groups.id_for_slot(4);
    let all = h.service.search_molecules(group_id, None).await.unwrap();
    assert_eq!(all.len(), 2);

    let filtered = h
        .service
        .search_molecules(group_id, Some("cit"))
        .await
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].name_de, "Citral");
}

#[tokio::test]
async fn dangling_match_target_is_skipped_not_fatal() {
    let h = Harness::new();
    let source = h.create_ingredient("Apfel").await;
    let target = h.create_ingredient("Zimt").await;

    h.service
        .create_flavor_match(&admin(), source.id, target.id, None)
        .await
        .unwrap();
    // Simulate the target disappearing underneath the match
    h.ingredients.data.write().remove(&target.id);

    let matches = h.service.flavor_matches(source.id).await.unwrap();
    assert!(matches.is_empty());
}

#[tokio::test]
async fn deleting_a_phase_removes_its_marks() {
    let h = Harness::new();
    let ingredient = h.create_ingredient("Zimt").await;

    let phase = h
        .service
        .upsert_temperature_phase(&admin(), ingredient.id, None, "A", 0, 60, None)
        .await
        .unwrap();
    h.service
        .delete_temperature_phase(&admin(), phase.id)
        .await
        .unwrap();

    let page = h.service.ingredient_profile(ingredient.id).await.unwrap();
    assert!(page.view.boundary_marks.is_empty());
    assert!(page.view.phase_labels.is_empty());
}

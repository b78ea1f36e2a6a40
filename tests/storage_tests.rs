//! Storage-layer tests against an in-memory sqlite database
#![allow(clippy::unwrap_used)]

use aroma_explorer::contract::{Ingredient, Molecule, TasteProfile};
use aroma_explorer::domain::repository::{
    GroupRepository, IngredientRepository, MoleculeRepository,
};
use aroma_explorer::infra::storage::migrations::Migrator;
use aroma_explorer::infra::storage::repositories::{
    SeaOrmGroupRepository, SeaOrmIngredientRepository, SeaOrmMoleculeRepository,
};
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;
use uuid::Uuid;

async fn fresh_db() -> Arc<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    Arc::new(db)
}

#[tokio::test]
async fn all_migrations_apply_on_a_fresh_database() {
    let db = fresh_db().await;

    // A second run must see nothing pending
    Migrator::up(&*db, None).await.unwrap();

    let groups = SeaOrmGroupRepository::new(db).list_all().await.unwrap();
    assert_eq!(groups.len(), 9);
    let slots: Vec<u8> = groups.iter().map(|g| g.slot).collect();
    assert_eq!(slots, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
    assert_eq!(groups[0].name_de, "Fruchtig");
    assert_eq!(groups[8].name_de, "Trigeminal");
}

#[tokio::test]
async fn ingredient_roundtrip_through_sqlite() {
    let db = fresh_db().await;
    let repo = SeaOrmIngredientRepository::new(db);

    let ingredient = Ingredient {
        id: Uuid::new_v4(),
        name_de: "Zimt".to_string(),
        taste: TasteProfile {
            sweet: Some(2),
            ..TasteProfile::default()
        },
        taste_description_de: Some("warm".to_string()),
        created_at: chrono::Utc::now(),
    };
    repo.create(&ingredient).await.unwrap();

    let found = repo.find_by_id(ingredient.id).await.unwrap().unwrap();
    assert_eq!(found.name_de, "Zimt");
    assert_eq!(found.taste.sweet, Some(2));
}

#[tokio::test]
async fn molecule_search_ignores_case_for_non_ascii_names() {
    let db = fresh_db().await;
    let groups = SeaOrmGroupRepository::new(db.clone())
        .list_all()
        .await
        .unwrap();
    let group_id = groups[0].id;

    let repo = SeaOrmMoleculeRepository::new(db);
    repo.create(&Molecule {
        id: Uuid::new_v4(),
        group_id,
        name_de: "Ölsäure".to_string(),
        descriptors_de: String::new(),
        solubility_de: String::new(),
        variation: None,
    })
    .await
    .unwrap();
    repo.create(&Molecule {
        id: Uuid::new_v4(),
        group_id,
        name_de: "Zimtaldehyd".to_string(),
        descriptors_de: String::new(),
        solubility_de: String::new(),
        variation: None,
    })
    .await
    .unwrap();

    let umlaut = repo.search_by_group(group_id, Some("öl")).await.unwrap();
    assert_eq!(umlaut.len(), 1);
    assert_eq!(umlaut[0].name_de, "Ölsäure");

    let upper = repo.search_by_group(group_id, Some("ZIMT")).await.unwrap();
    assert_eq!(upper.len(), 1);
    assert_eq!(upper[0].name_de, "Zimtaldehyd");

    let all = repo.search_by_group(group_id, None).await.unwrap();
    assert_eq!(all.len(), 2);
}

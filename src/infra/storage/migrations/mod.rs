//! Database migrations for the aroma explorer

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250612_000001_create_ingredients::Migration),
            Box::new(m20250612_000002_create_aroma_groups::Migration),
            Box::new(m20250612_000003_create_molecules::Migration),
            Box::new(m20250612_000004_create_ingredient_molecules::Migration),
            Box::new(m20250612_000005_create_temperature_tables::Migration),
            Box::new(m20250612_000006_create_ingredient_matches::Migration),
            Box::new(m20250612_000007_seed_aroma_groups::Migration),
        ]
    }
}

#[derive(DeriveIden)]
enum Ingredients {
    Table,
    Id,
    NameDe,
    TasteSweet,
    TasteSour,
    TasteSalty,
    TasteBitter,
    TasteUmami,
    TasteDescriptionDe,
    CreatedAt,
}

#[derive(DeriveIden)]
enum AromaGroups {
    Table,
    Id,
    Slot,
    NameDe,
    DescriptorDe,
    ColorHex,
}

#[derive(DeriveIden)]
enum Molecules {
    Table,
    Id,
    GroupId,
    NameDe,
    DescriptorsDe,
    SolubilityDe,
    ParentId,
    VariationLabel,
}

#[derive(DeriveIden)]
enum IngredientMolecules {
    Table,
    IngredientId,
    MoleculeId,
    IsKey,
    IsTracked,
    HasTrigeminalActivation,
}

#[derive(DeriveIden)]
enum IngredientGroupTemperature {
    Table,
    IngredientId,
    GroupId,
    TempStartC,
    TempEndC,
    BehaviorDescriptionDe,
}

#[derive(DeriveIden)]
enum IngredientTemperaturePhases {
    Table,
    Id,
    IngredientId,
    PhaseName,
    TempStartC,
    TempEndC,
    DescriptionDe,
}

#[derive(DeriveIden)]
enum IngredientMatches {
    Table,
    Id,
    SourceIngredientId,
    TargetIngredientId,
    Note,
    CreatedAt,
}

mod m20250612_000001_create_ingredients {
    use super::*;

    pub struct Migration;

    // DeriveMigrationName takes the file stem, which for inline modules
    // would collapse every migration to the same version string.
    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250612_000001_create_ingredients"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Ingredients::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Ingredients::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Ingredients::NameDe).string().not_null())
                        .col(ColumnDef::new(Ingredients::TasteSweet).small_integer())
                        .col(ColumnDef::new(Ingredients::TasteSour).small_integer())
                        .col(ColumnDef::new(Ingredients::TasteSalty).small_integer())
                        .col(ColumnDef::new(Ingredients::TasteBitter).small_integer())
                        .col(ColumnDef::new(Ingredients::TasteUmami).small_integer())
                        .col(ColumnDef::new(Ingredients::TasteDescriptionDe).text())
                        .col(
                            ColumnDef::new(Ingredients::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Ingredients::Table).to_owned())
                .await
        }
    }
}

mod m20250612_000002_create_aroma_groups {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250612_000002_create_aroma_groups"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(AromaGroups::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(AromaGroups::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(AromaGroups::Slot)
                                .small_integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(AromaGroups::NameDe).string().not_null())
                        .col(
                            ColumnDef::new(AromaGroups::DescriptorDe)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(AromaGroups::ColorHex).string().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_aroma_groups_slot")
                        .table(AromaGroups::Table)
                        .col(AromaGroups::Slot)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(AromaGroups::Table).to_owned())
                .await
        }
    }
}

mod m20250612_000003_create_molecules {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250612_000003_create_molecules"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Molecules::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Molecules::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Molecules::GroupId).uuid().not_null())
                        .col(ColumnDef::new(Molecules::NameDe).string().not_null())
                        .col(
                            ColumnDef::new(Molecules::DescriptorsDe)
                                .text()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Molecules::SolubilityDe).text().not_null())
                        .col(ColumnDef::new(Molecules::ParentId).uuid())
                        .col(ColumnDef::new(Molecules::VariationLabel).string())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_molecules_group")
                                .from(Molecules::Table, Molecules::GroupId)
                                .to(AromaGroups::Table, AromaGroups::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_molecules_parent")
                                .from(Molecules::Table, Molecules::ParentId)
                                .to(Molecules::Table, Molecules::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_molecules_group_id")
                        .table(Molecules::Table)
                        .col(Molecules::GroupId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Molecules::Table).to_owned())
                .await
        }
    }
}

mod m20250612_000004_create_ingredient_molecules {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250612_000004_create_ingredient_molecules"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(IngredientMolecules::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(IngredientMolecules::IngredientId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(IngredientMolecules::MoleculeId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(IngredientMolecules::IsKey)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(IngredientMolecules::IsTracked)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(IngredientMolecules::HasTrigeminalActivation)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .primary_key(
                            Index::create()
                                .col(IngredientMolecules::IngredientId)
                                .col(IngredientMolecules::MoleculeId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_ingredient_molecules_ingredient")
                                .from(
                                    IngredientMolecules::Table,
                                    IngredientMolecules::IngredientId,
                                )
                                .to(Ingredients::Table, Ingredients::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_ingredient_molecules_molecule")
                                .from(IngredientMolecules::Table, IngredientMolecules::MoleculeId)
                                .to(Molecules::Table, Molecules::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_ingredient_molecules_ingredient_id")
                        .table(IngredientMolecules::Table)
                        .col(IngredientMolecules::IngredientId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(IngredientMolecules::Table).to_owned())
                .await
        }
    }
}

mod m20250612_000005_create_temperature_tables {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250612_000005_create_temperature_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(IngredientGroupTemperature::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(IngredientGroupTemperature::IngredientId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(IngredientGroupTemperature::GroupId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(IngredientGroupTemperature::TempStartC)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(IngredientGroupTemperature::TempEndC)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(IngredientGroupTemperature::BehaviorDescriptionDe)
                                .text(),
                        )
                        .primary_key(
                            Index::create()
                                .col(IngredientGroupTemperature::IngredientId)
                                .col(IngredientGroupTemperature::GroupId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_group_temperature_ingredient")
                                .from(
                                    IngredientGroupTemperature::Table,
                                    IngredientGroupTemperature::IngredientId,
                                )
                                .to(Ingredients::Table, Ingredients::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_group_temperature_group")
                                .from(
                                    IngredientGroupTemperature::Table,
                                    IngredientGroupTemperature::GroupId,
                                )
                                .to(AromaGroups::Table, AromaGroups::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(IngredientTemperaturePhases::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(IngredientTemperaturePhases::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(IngredientTemperaturePhases::IngredientId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(IngredientTemperaturePhases::PhaseName)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(IngredientTemperaturePhases::TempStartC)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(IngredientTemperaturePhases::TempEndC)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(IngredientTemperaturePhases::DescriptionDe).text())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_temperature_phases_ingredient")
                                .from(
                                    IngredientTemperaturePhases::Table,
                                    IngredientTemperaturePhases::IngredientId,
                                )
                                .to(Ingredients::Table, Ingredients::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            // Phase names are also checked in the domain service; the index
            // backstops concurrent writers.
            manager
                .create_index(
                    Index::create()
                        .name("idx_temperature_phases_ingredient_name")
                        .table(IngredientTemperaturePhases::Table)
                        .col(IngredientTemperaturePhases::IngredientId)
                        .col(IngredientTemperaturePhases::PhaseName)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(
                    Table::drop()
                        .table(IngredientTemperaturePhases::Table)
                        .to_owned(),
                )
                .await?;
            manager
                .drop_table(
                    Table::drop()
                        .table(IngredientGroupTemperature::Table)
                        .to_owned(),
                )
                .await
        }
    }
}

mod m20250612_000006_create_ingredient_matches {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250612_000006_create_ingredient_matches"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(IngredientMatches::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(IngredientMatches::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(IngredientMatches::SourceIngredientId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(IngredientMatches::TargetIngredientId)
                                .uuid()
                                .not_null(),
                        )
                        .col(ColumnDef::new(IngredientMatches::Note).text())
                        .col(
                            ColumnDef::new(IngredientMatches::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_matches_source")
                                .from(
                                    IngredientMatches::Table,
                                    IngredientMatches::SourceIngredientId,
                                )
                                .to(Ingredients::Table, Ingredients::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_matches_target")
                                .from(
                                    IngredientMatches::Table,
                                    IngredientMatches::TargetIngredientId,
                                )
                                .to(Ingredients::Table, Ingredients::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_matches_source_ingredient_id")
                        .table(IngredientMatches::Table)
                        .col(IngredientMatches::SourceIngredientId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(IngredientMatches::Table).to_owned())
                .await
        }
    }
}

mod m20250612_000007_seed_aroma_groups {
    use super::*;
    use uuid::Uuid;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250612_000007_seed_aroma_groups"
        }
    }

    const GROUPS: [(i16, &str, &str, &str); 9] = [
        (1, "Fruchtig", "Apfel, Beere, Steinobst", "#E4572E"),
        (2, "Blumig", "Rose, Veilchen, Jasmin", "#D81E5B"),
        (3, "Grün", "Gras, Blatt, Gurke", "#7CB518"),
        (4, "Zitrisch", "Zitrone, Limette, Orangenschale", "#F5BB00"),
        (5, "Würzig", "Nelke, Zimt, Pfeffer", "#A4303F"),
        (6, "Röstig", "Kaffee, Brotkruste, Kakao", "#6B4226"),
        (7, "Karamellig", "Karamell, Honig, Vanille", "#D9972F"),
        (8, "Erdig", "Pilz, Waldboden, Holz", "#6E5F46"),
        (9, "Trigeminal", "Schärfe, Kühle, Prickeln", "#3D5A80"),
    ];

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            let mut insert = Query::insert()
                .into_table(AromaGroups::Table)
                .columns([
                    AromaGroups::Id,
                    AromaGroups::Slot,
                    AromaGroups::NameDe,
                    AromaGroups::DescriptorDe,
                    AromaGroups::ColorHex,
                ])
                .to_owned();

            for (slot, name, descriptor, color) in GROUPS {
                insert.values_panic([
                    Uuid::new_v4().into(),
                    slot.into(),
                    name.into(),
                    descriptor.into(),
                    color.into(),
                ]);
            }

            manager.exec_stmt(insert).await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .exec_stmt(Query::delete().from_table(AromaGroups::Table).to_owned())
                .await
        }
    }
}

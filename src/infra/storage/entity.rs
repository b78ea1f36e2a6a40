//! SeaORM entities for database tables

/// Ingredients table
pub mod ingredient {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "ingredients")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        /// German display name
        pub name_de: String,

        /// Taste-intensity scores, 0-3 or absent
        pub taste_sweet: Option<i16>,
        pub taste_sour: Option<i16>,
        pub taste_salty: Option<i16>,
        pub taste_bitter: Option<i16>,
        pub taste_umami: Option<i16>,

        /// Free-text taste description
        pub taste_description_de: Option<String>,

        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::ingredient_molecule::Entity")]
        IngredientMolecules,
        #[sea_orm(has_many = "super::temperature_phase::Entity")]
        TemperaturePhases,
    }

    impl Related<super::ingredient_molecule::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::IngredientMolecules.def()
        }
    }

    impl Related<super::temperature_phase::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::TemperaturePhases.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// The nine static aroma group rows
pub mod aroma_group {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "aroma_groups")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        /// Slot number 1-9, unique; slot 9 is the trigeminal group
        pub slot: i16,

        pub name_de: String,
        pub descriptor_de: String,
        pub color_hex: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::molecule::Entity")]
        Molecules,
    }

    impl Related<super::molecule::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Molecules.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Molecules table; global entities shared across ingredients
pub mod molecule {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "molecules")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        /// Owning aroma group
        pub group_id: Uuid,

        pub name_de: String,
        pub descriptors_de: String,
        pub solubility_de: String,

        /// Parent molecule when this row is a named variation; same group
        pub parent_id: Option<Uuid>,
        pub variation_label: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::aroma_group::Entity",
            from = "Column::GroupId",
            to = "super::aroma_group::Column::Id"
        )]
        AromaGroup,
    }

    impl Related<super::aroma_group::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::AromaGroup.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Many-to-many link between ingredients and molecules, with per-pairing
/// flags
pub mod ingredient_molecule {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "ingredient_molecules")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub ingredient_id: Uuid,

        #[sea_orm(primary_key, auto_increment = false)]
        pub molecule_id: Uuid,

        pub is_key: bool,
        pub is_tracked: bool,
        pub has_trigeminal_activation: bool,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::ingredient::Entity",
            from = "Column::IngredientId",
            to = "super::ingredient::Column::Id"
        )]
        Ingredient,
        #[sea_orm(
            belongs_to = "super::molecule::Entity",
            from = "Column::MoleculeId",
            to = "super::molecule::Column::Id"
        )]
        Molecule,
    }

    impl Related<super::ingredient::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Ingredient.def()
        }
    }

    impl Related<super::molecule::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Molecule.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// At most one temperature range per (ingredient, group) pair
pub mod group_temperature {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "ingredient_group_temperature")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub ingredient_id: Uuid,

        #[sea_orm(primary_key, auto_increment = false)]
        pub group_id: Uuid,

        /// Degrees Celsius, multiples of 10 within [0, 170]
        pub temp_start_c: i32,
        pub temp_end_c: i32,

        pub behavior_description_de: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Named phases annotating an ingredient's temperature axis
pub mod temperature_phase {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "ingredient_temperature_phases")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        pub ingredient_id: Uuid,

        /// Single letter A-F, unique per ingredient
        pub phase_name: String,

        pub temp_start_c: i32,
        pub temp_end_c: i32,

        pub description_de: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::ingredient::Entity",
            from = "Column::IngredientId",
            to = "super::ingredient::Column::Id"
        )]
        Ingredient,
    }

    impl Related<super::ingredient::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Ingredient.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Directed flavor matches between ingredients
pub mod ingredient_match {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "ingredient_matches")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        pub source_ingredient_id: Uuid,
        pub target_ingredient_id: Uuid,

        pub note: Option<String>,

        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

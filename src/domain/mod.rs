//! Domain layer - business logic and services

pub mod profile;
pub mod repository;
pub mod service;
pub mod validation;

pub use profile::{BarPlacement, BoundaryMark, GroupBar, PhaseLabel, ProfileView};
pub use repository::{
    GroupRepository, IngredientRepository, MatchRepository, MoleculeRepository,
    TemperatureRepository,
};
pub use service::{AttachMolecule, ProfilePage, Service};

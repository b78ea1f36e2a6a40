//! Common test fixtures

use aroma_explorer::contract::AromaGroup;
use uuid::Uuid;

/// The nine static aroma groups, seeded the way migrations seed them
#[derive(Debug, Clone)]
pub struct TestGroups {
    pub groups: Vec<AromaGroup>,
}

impl TestGroups {
    pub fn new() -> Self {
        let names = [
            ("Fruchtig", "#E4572E"),
            ("Blumig", "#D81E5B"),
            ("Grün", "#7CB518"),
            ("Zitrisch", "#F5BB00"),
            ("Würzig", "#A4303F"),
            ("Röstig", "#6B4226"),
            ("Karamellig", "#D9972F"),
            ("Erdig", "#6E5F46"),
            ("Trigeminal", "#3D5A80"),
        ];
        let groups = names
            .iter()
            .enumerate()
            .map(|(i, (name, color))| AromaGroup {
                id: Uuid::new_v4(),
                slot: i as u8 + 1,
                name_de: (*name).to_string(),
                descriptor_de: format!("{name} Deskriptor"),
                color_hex: (*color).to_string(),
            })
            .collect();
        Self { groups }
    }

    /// Group id for a slot number, 1-9
    pub fn id_for_slot(&self, slot: u8) -> Uuid {
        self.groups
            .iter()
            .find(|g| g.slot == slot)
            .map(|g| g.id)
            .unwrap_or_else(|| panic!("no group for slot {slot}"))
    }
}

impl Default for TestGroups {
    fn default() -> Self {
        Self::new()
    }
}

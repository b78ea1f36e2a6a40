//! Bulk CSV importer for master data
//!
//! One ingredient per row in a wide layout: ingredient columns, up to nine
//! per-slot temperature columns, up to twenty molecule column quartets and
//! up to six phase column quartets. Failed rows are logged and skipped so a
//! bad row never aborts the whole file.

use crate::contract::{
    AuthContext, MoleculeFlags, TasteProfile, TemperatureRange, SLOT_COUNT,
};
use crate::domain::{AttachMolecule, Service};
use anyhow::Context;
use std::collections::HashMap;
use std::path::Path;
use uuid::Uuid;

/// Maximum molecule column quartets per row.
const MOLECULE_COLUMNS: usize = 20;

/// Phase letters the wide layout can carry.
const PHASE_LETTERS: [char; 6] = ['a', 'b', 'c', 'd', 'e', 'f'];

/// Column indexes of one group slot's temperature triple.
#[derive(Debug, Clone, Copy, Default)]
struct GroupColumns {
    temp_start: Option<usize>,
    temp_end: Option<usize>,
    behavior: Option<usize>,
}

/// Column indexes of one molecule quartet.
#[derive(Debug, Clone, Copy, Default)]
struct MoleculeColumns {
    name: Option<usize>,
    group: Option<usize>,
    descriptors: Option<usize>,
    solubility: Option<usize>,
}

/// Column indexes of one phase quartet.
#[derive(Debug, Clone, Copy, Default)]
struct PhaseColumns {
    name: Option<usize>,
    start: Option<usize>,
    end: Option<usize>,
    desc: Option<usize>,
}

/// Resolved header layout of the wide CSV. All repeated sections are
/// fixed-size arrays indexed by slot or column number, so a header like
/// `group_12_temp_start` is rejected up front instead of indexing out of
/// bounds.
#[derive(Debug)]
struct RowLayout {
    name: usize,
    taste: [Option<usize>; 5],
    taste_description: Option<usize>,
    groups: [GroupColumns; SLOT_COUNT as usize],
    molecules: [MoleculeColumns; MOLECULE_COLUMNS],
    phases: [PhaseColumns; PHASE_LETTERS.len()],
}

impl RowLayout {
    fn from_headers(headers: &csv::StringRecord) -> anyhow::Result<Self> {
        let mut name = None;
        let mut taste = [None; 5];
        let mut taste_description = None;
        let mut groups = [GroupColumns::default(); SLOT_COUNT as usize];
        let mut molecules = [MoleculeColumns::default(); MOLECULE_COLUMNS];
        let mut phases = [PhaseColumns::default(); PHASE_LETTERS.len()];

        for (idx, header) in headers.iter().enumerate() {
            match header {
                "ingredient_name_de" => name = Some(idx),
                "taste_sweet" => taste[0] = Some(idx),
                "taste_sour" => taste[1] = Some(idx),
                "taste_salty" => taste[2] = Some(idx),
                "taste_bitter" => taste[3] = Some(idx),
                "taste_umami" => taste[4] = Some(idx),
                "taste_description" => taste_description = Some(idx),
                _ => {
                    if let Some(rest) = header.strip_prefix("group_") {
                        let (slot, field) = split_numbered(rest)
                            .with_context(|| format!("malformed header '{header}'"))?;
                        let entry = groups
                            .get_mut(slot.checked_sub(1).unwrap_or(usize::MAX))
                            .with_context(|| format!("group slot out of range in '{header}'"))?;
                        match field {
                            "temp_start" => entry.temp_start = Some(idx),
                            "temp_end" => entry.temp_end = Some(idx),
                            "behavior" => entry.behavior = Some(idx),
                            _ => anyhow::bail!("unknown group column '{header}'"),
                        }
                    } else if let Some(rest) = header.strip_prefix("molecule_") {
                        let (n, field) = split_numbered(rest)
                            .with_context(|| format!("malformed header '{header}'"))?;
                        let entry = molecules
                            .get_mut(n.checked_sub(1).unwrap_or(usize::MAX))
                            .with_context(|| {
                                format!("molecule column out of range in '{header}'")
                            })?;
                        match field {
                            "name" => entry.name = Some(idx),
                            "group" => entry.group = Some(idx),
                            "descriptors" => entry.descriptors = Some(idx),
                            "solubility" => entry.solubility = Some(idx),
                            _ => anyhow::bail!("unknown molecule column '{header}'"),
                        }
                    } else if let Some(rest) = header.strip_prefix("phase_") {
                        let mut parts = rest.splitn(2, '_');
                        let letter = parts.next().unwrap_or_default();
                        let field = parts.next().unwrap_or_default();
                        let pos = PHASE_LETTERS
                            .iter()
                            .position(|l| letter.len() == 1 && letter.starts_with(*l))
                            .with_context(|| format!("unknown phase letter in '{header}'"))?;
                        let entry = &mut phases[pos];
                        match field {
                            "name" => entry.name = Some(idx),
                            "start" => entry.start = Some(idx),
                            "end" => entry.end = Some(idx),
                            "desc" => entry.desc = Some(idx),
                            _ => anyhow::bail!("unknown phase column '{header}'"),
                        }
                    }
                    // Unrecognized headers are ignored
                }
            }
        }

        Ok(Self {
            name: name.context("missing required column 'ingredient_name_de'")?,
            taste,
            taste_description,
            groups,
            molecules,
            phases,
        })
    }
}

/// Split a `<number>_<field>` suffix, e.g. `3_temp_start`.
fn split_numbered(rest: &str) -> anyhow::Result<(usize, &str)> {
    let mut parts = rest.splitn(2, '_');
    let number: usize = parts
        .next()
        .unwrap_or_default()
        .parse()
        .context("expected a column number")?;
    let field = parts.next().context("expected a field suffix")?;
    Ok((number, field))
}

fn field<'a>(record: &'a csv::StringRecord, idx: Option<usize>) -> Option<&'a str> {
    idx.and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn parse_i32(record: &csv::StringRecord, idx: Option<usize>) -> anyhow::Result<Option<i32>> {
    field(record, idx)
        .map(|s| s.parse::<i32>().with_context(|| format!("not a number: '{s}'")))
        .transpose()
}

fn parse_score(record: &csv::StringRecord, idx: Option<usize>) -> anyhow::Result<Option<u8>> {
    field(record, idx)
        .map(|s| s.parse::<u8>().with_context(|| format!("not a score: '{s}'")))
        .transpose()
}

/// Import a master-data CSV, replaying the same write operations the REST
/// API performs, with the same validation.
pub async fn run(service: &Service, path: &Path) -> anyhow::Result<()> {
    let ctx = AuthContext::admin(Some("import".to_string()));
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let layout = RowLayout::from_headers(reader.headers()?)?;

    // Slot number to group id, from the seeded static groups
    let slot_to_group: HashMap<u8, Uuid> = service
        .list_groups()
        .await?
        .into_iter()
        .map(|g| (g.slot, g.id))
        .collect();

    let mut imported = 0usize;
    let mut failed = 0usize;
    for (row_number, record) in reader.records().enumerate() {
        let record = record?;
        let name = match field(&record, Some(layout.name)) {
            Some(name) => name.to_string(),
            None => {
                tracing::warn!(row = row_number + 2, "skipping row without ingredient name");
                failed += 1;
                continue;
            }
        };

        match import_row(service, &ctx, &layout, &slot_to_group, &record).await {
            Ok(()) => {
                tracing::info!(row = row_number + 2, ingredient = %name, "row imported");
                imported += 1;
            }
            Err(err) => {
                tracing::warn!(row = row_number + 2, ingredient = %name, error = %err, "row skipped");
                failed += 1;
            }
        }
    }

    tracing::info!(imported, failed, "import finished");
    Ok(())
}

async fn import_row(
    service: &Service,
    ctx: &AuthContext,
    layout: &RowLayout,
    slot_to_group: &HashMap<u8, Uuid>,
    record: &csv::StringRecord,
) -> anyhow::Result<()> {
    let name = field(record, Some(layout.name)).context("missing ingredient name")?;
    let ingredient = service.create_ingredient(ctx, name).await?;

    let taste = TasteProfile {
        sweet: parse_score(record, layout.taste[0])?,
        sour: parse_score(record, layout.taste[1])?,
        salty: parse_score(record, layout.taste[2])?,
        bitter: parse_score(record, layout.taste[3])?,
        umami: parse_score(record, layout.taste[4])?,
    };
    let description = field(record, layout.taste_description);
    if taste != TasteProfile::default() || description.is_some() {
        service
            .update_taste_profile(ctx, ingredient.id, taste, description)
            .await?;
    }

    for (slot_index, columns) in layout.groups.iter().enumerate() {
        let slot = slot_index as u8 + 1;
        let (Some(start), Some(end)) = (
            parse_i32(record, columns.temp_start)?,
            parse_i32(record, columns.temp_end)?,
        ) else {
            continue;
        };
        let group_id = *slot_to_group
            .get(&slot)
            .with_context(|| format!("no aroma group for slot {slot}"))?;
        service
            .upsert_temperature_range(
                ctx,
                ingredient.id,
                group_id,
                TemperatureRange {
                    temp_start_c: start,
                    temp_end_c: end,
                    behavior_description_de: field(record, columns.behavior)
                        .map(str::to_string),
                },
            )
            .await?;
    }

    for columns in &layout.molecules {
        let Some(molecule_name) = field(record, columns.name) else {
            continue;
        };
        let slot: u8 = field(record, columns.group)
            .context("molecule without a group slot")?
            .parse()
            .context("molecule group slot is not a number")?;
        let group_id = *slot_to_group
            .get(&slot)
            .with_context(|| format!("no aroma group for slot {slot}"))?;
        service
            .attach_molecule(
                ctx,
                ingredient.id,
                AttachMolecule::New {
                    group_id,
                    name_de: molecule_name.to_string(),
                    descriptors_de: field(record, columns.descriptors)
                        .unwrap_or_default()
                        .to_string(),
                    solubility_de: field(record, columns.solubility)
                        .unwrap_or_default()
                        .to_string(),
                    variation: None,
                },
                MoleculeFlags::default(),
            )
            .await?;
    }

    for columns in &layout.phases {
        let Some(phase_name) = field(record, columns.name) else {
            continue;
        };
        let start = parse_i32(record, columns.start)?.context("phase without a start")?;
        let end = parse_i32(record, columns.end)?.context("phase without an end")?;
        service
            .upsert_temperature_phase(
                ctx,
                ingredient.id,
                None,
                phase_name,
                start,
                end,
                field(record, columns.desc).map(str::to_string),
            )
            .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(cols: &[&str]) -> csv::StringRecord {
        csv::StringRecord::from(cols.to_vec())
    }

    #[test]
    fn layout_resolves_numbered_sections() {
        let layout = RowLayout::from_headers(&headers(&[
            "ingredient_name_de",
            "taste_sweet",
            "group_3_temp_start",
            "group_3_temp_end",
            "molecule_1_name",
            "molecule_1_group",
            "phase_a_name",
            "phase_a_start",
            "phase_a_end",
        ]))
        .unwrap();

        assert_eq!(layout.name, 0);
        assert_eq!(layout.taste[0], Some(1));
        assert_eq!(layout.groups[2].temp_start, Some(2));
        assert_eq!(layout.molecules[0].name, Some(4));
        assert_eq!(layout.phases[0].start, Some(7));
    }

    #[test]
    fn group_slot_out_of_range_is_rejected() {
        let result =
            RowLayout::from_headers(&headers(&["ingredient_name_de", "group_12_temp_start"]));
        assert!(result.is_err());
    }

    #[test]
    fn molecule_column_zero_is_rejected() {
        let result = RowLayout::from_headers(&headers(&["ingredient_name_de", "molecule_0_name"]));
        assert!(result.is_err());
    }

    #[test]
    fn missing_name_column_is_rejected() {
        let result = RowLayout::from_headers(&headers(&["taste_sweet"]));
        assert!(result.is_err());
    }

    #[test]
    fn unknown_phase_letter_is_rejected() {
        let result = RowLayout::from_headers(&headers(&["ingredient_name_de", "phase_g_name"]));
        assert!(result.is_err());
    }
}

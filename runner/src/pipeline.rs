//! Turns one parsed match into the full set of output tables.

/// Rows for one named output table.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: &'static str,
    pub rows: Vec<serde_json::Map<String, serde_json::Value>>,
}

/// Every table produced for a single match, in the order they are stored.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchTables {
    pub match_id: String,
    pub tables: Vec<Table>,
}

#[derive(Debug)]
pub enum PipelineError {
    Rounds(transform::rounds::TeamSampleError),
    Serialize(serde_json::Error),
}

impl From<transform::rounds::TeamSampleError> for PipelineError {
    fn from(err: transform::rounds::TeamSampleError) -> Self {
        Self::Rounds(err)
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialize(err)
    }
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rounds(err) => write!(f, "Enriching rounds: {}", err),
            Self::Serialize(err) => write!(f, "Encoding rows: {}", err),
        }
    }
}

impl std::error::Error for PipelineError {}

/// Runs every per-match transform and shapes the results into tables.
///
/// Raw event tables pass through with their configured columns removed,
/// derived tables come from the transforms. Every row of every table except
/// `matches` gets the match id appended as its last column.
#[tracing::instrument(skip(parsed, drops))]
pub fn process_match(
    parsed: &crate::extract::ParsedMatch,
    drops: &crate::config::DropColumns,
) -> Result<MatchTables, PipelineError> {
    let data = &parsed.data;

    let rounds = transform::rounds::enrich_rounds(&data.rounds, &data.ticks, &data.bomb_plants)?;
    let game_state = transform::gamestate::reconstruct(&data.kills, &data.rounds);
    let entry_kills = transform::entrykill::extract(&data.rounds, &data.kills);
    let shots = transform::shots::enrich(&data.weapon_fires, &data.damages, &data.player_states);
    let he_grenades =
        transform::grenades::he_grenades(&data.he_detonations, &data.damages, &data.smokes);
    let flashbangs = transform::grenades::flashbangs(&data.flash_detonations);

    let mut tables = vec![
        Table {
            name: "matches",
            rows: object_rows(std::slice::from_ref(&parsed.matches_row))?,
        },
        Table {
            name: "rounds",
            rows: object_rows(&rounds)?,
        },
        Table {
            name: "damages",
            rows: object_rows(&data.damages)?,
        },
        Table {
            name: "kills",
            rows: object_rows(&data.kills)?,
        },
        Table {
            name: "game_state",
            rows: object_rows(&game_state)?,
        },
        Table {
            name: "bomb_events",
            rows: object_rows(&data.bomb_events)?,
        },
        Table {
            name: "entry_kills",
            rows: object_rows(&entry_kills)?,
        },
        Table {
            name: "shots",
            rows: object_rows(&shots)?,
        },
        Table {
            name: "he_grenades",
            rows: object_rows(&he_grenades)?,
        },
        Table {
            name: "flashbangs",
            rows: object_rows(&flashbangs)?,
        },
        Table {
            name: "infernos",
            rows: object_rows(&data.infernos)?,
        },
        Table {
            name: "smokes",
            rows: object_rows(&data.smokes)?,
        },
    ];

    for table in tables.iter_mut() {
        let dropped = drops.for_table(table.name);
        if !dropped.is_empty() {
            let rows = std::mem::take(&mut table.rows);
            table.rows = drop_columns(rows, dropped);
        }

        if table.name != "matches" {
            for row in table.rows.iter_mut() {
                row.insert(
                    "match_id".to_owned(),
                    serde_json::Value::String(parsed.match_id.clone()),
                );
            }
        }
    }

    tracing::debug!("Built {} tables for {:?}", tables.len(), parsed.match_id);

    Ok(MatchTables {
        match_id: parsed.match_id.clone(),
        tables,
    })
}

fn object_rows<T>(
    items: &[T],
) -> Result<Vec<serde_json::Map<String, serde_json::Value>>, serde_json::Error>
where
    T: serde::Serialize,
{
    items
        .iter()
        .map(|item| {
            serde_json::to_value(item).map(|value| match value {
                serde_json::Value::Object(map) => map,
                // Row types are structs with named fields.
                other => panic!("Row serialized to {:?} instead of an object", other),
            })
        })
        .collect()
}

fn drop_columns(
    rows: Vec<serde_json::Map<String, serde_json::Value>>,
    dropped: &[String],
) -> Vec<serde_json::Map<String, serde_json::Value>> {
    rows.into_iter()
        .map(|row| {
            row.into_iter()
                .filter(|(key, _)| !dropped.iter().any(|column| column == key))
                .collect()
        })
        .collect()
}

//! Column drop lists for the persisted tables.

static DEFAULT_DROP_COLUMNS: phf::Map<&'static str, &'static [&'static str]> = phf::phf_map! {
    "kills" => &[
        "attacker_steamid",
        "victim_steamid",
        "assister_steamid",
        "attacker_side",
        "victim_side",
        "assister_side",
    ],
    "damages" => &["attacker_steamid", "user_steamid", "dmg_armor"],
    "infernos" => &[
        "thrower_current_equip_value",
        "thrower_health",
        "entity_id",
        "thrower_steamid",
    ],
    "smokes" => &["thrower_current_equip_value", "thrower_health", "thrower_steamid"],
    "bomb_events" => &["steamid"],
};

/// Columns removed from each table before it is handed to the store.
///
/// Most of the dropped columns are steam ids and per-player economy noise
/// that the analysis queries never touch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropColumns {
    pub kills: Vec<String>,
    pub damages: Vec<String>,
    pub infernos: Vec<String>,
    pub smokes: Vec<String>,
    pub bomb_events: Vec<String>,
}

impl DropColumns {
    pub fn for_table(&self, table: &str) -> &[String] {
        match table {
            "kills" => &self.kills,
            "damages" => &self.damages,
            "infernos" => &self.infernos,
            "smokes" => &self.smokes,
            "bomb_events" => &self.bomb_events,
            _ => &[],
        }
    }
}

impl Default for DropColumns {
    fn default() -> Self {
        Self {
            kills: default_list("kills"),
            damages: default_list("damages"),
            infernos: default_list("infernos"),
            smokes: default_list("smokes"),
            bomb_events: default_list("bomb_events"),
        }
    }
}

fn default_list(table: &str) -> Vec<String> {
    DEFAULT_DROP_COLUMNS
        .get(table)
        .map(|columns| columns.iter().map(|column| (*column).to_owned()).collect())
        .unwrap_or_default()
}

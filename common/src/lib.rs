#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    T,
    Ct,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MatchHeader {
    pub map_name: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RoundRow {
    pub round_num: u32,
    pub start: i64,
    pub freeze_end: Option<i64>,
    pub end: i64,
    pub official_end: Option<i64>,
    pub winner: Side,
    pub reason: String,
    pub bomb_plant: Option<i64>,
    pub bomb_site: Option<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TickRow {
    pub round_num: u32,
    pub tick: i64,
    pub side: Side,
    pub name: String,
    pub steamid: Option<u64>,
    pub team_clan_name: Option<String>,
    #[serde(rename = "X")]
    pub x: f64,
    #[serde(rename = "Y")]
    pub y: f64,
    #[serde(rename = "Z")]
    pub z: f64,
    pub current_equip_value: i16,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct KillRow {
    pub round_num: u32,
    pub tick: i64,
    pub attacker_name: Option<String>,
    pub attacker_steamid: Option<u64>,
    pub attacker_side: Option<Side>,
    pub attacker_team_clan_name: Option<String>,
    pub attacker_place: Option<String>,
    #[serde(rename = "attacker_X")]
    pub attacker_x: Option<f64>,
    #[serde(rename = "attacker_Y")]
    pub attacker_y: Option<f64>,
    #[serde(rename = "attacker_Z")]
    pub attacker_z: Option<f64>,
    pub victim_name: String,
    pub victim_steamid: Option<u64>,
    pub victim_side: Side,
    pub victim_team_clan_name: Option<String>,
    pub victim_place: Option<String>,
    #[serde(rename = "victim_X")]
    pub victim_x: f64,
    #[serde(rename = "victim_Y")]
    pub victim_y: f64,
    #[serde(rename = "victim_Z")]
    pub victim_z: f64,
    pub assister_name: Option<String>,
    pub assister_steamid: Option<u64>,
    pub assister_side: Option<Side>,
    pub weapon: String,
    pub headshot: bool,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DamageRow {
    pub round_num: u32,
    pub tick: i64,
    pub attacker_name: Option<String>,
    pub attacker_steamid: Option<u64>,
    pub attacker_team_name: Option<String>,
    pub user_name: String,
    pub user_steamid: Option<u64>,
    pub user_team_name: Option<String>,
    pub weapon: String,
    pub dmg_health: i32,
    pub dmg_armor: i32,
    pub health: i32,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BombEventRow {
    pub tick: i64,
    pub event: String,
    pub site: Option<String>,
    pub user_name: Option<String>,
    pub steamid: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BombPlantRow {
    pub tick: i64,
    pub user_name: String,
    pub user_steamid: Option<u64>,
    pub user_side: Side,
    pub user_place: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SmokeRow {
    pub entity_id: i32,
    pub start_tick: i64,
    pub end_tick: Option<i64>,
    pub thrower_name: String,
    pub thrower_steamid: Option<u64>,
    pub thrower_health: Option<i32>,
    pub thrower_current_equip_value: Option<i32>,
    #[serde(rename = "X")]
    pub x: f64,
    #[serde(rename = "Y")]
    pub y: f64,
    #[serde(rename = "Z")]
    pub z: f64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InfernoRow {
    pub entity_id: i32,
    pub start_tick: i64,
    pub end_tick: Option<i64>,
    pub thrower_name: String,
    pub thrower_steamid: Option<u64>,
    pub thrower_health: Option<i32>,
    pub thrower_current_equip_value: Option<i32>,
    #[serde(rename = "X")]
    pub x: f64,
    #[serde(rename = "Y")]
    pub y: f64,
    #[serde(rename = "Z")]
    pub z: f64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WeaponFireRow {
    pub tick: i64,
    pub user_name: String,
    pub user_steamid: Option<u64>,
    pub weapon: String,
    pub total_rounds_played: u32,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlayerStateRow {
    pub tick: i64,
    pub name: String,
    pub steamid: Option<u64>,
    pub accuracy_penalty: Option<f64>,
    pub flash_duration: Option<f64>,
    pub is_airborne: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HeDetonationRow {
    pub tick: i64,
    pub user_name: String,
    pub user_steamid: Option<u64>,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub total_rounds_played: u32,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FlashDetonationRow {
    pub tick: i64,
    pub user_name: String,
    pub user_steamid: Option<u64>,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub total_rounds_played: u32,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RawMatchData {
    pub header: MatchHeader,
    pub rounds: Vec<RoundRow>,
    pub ticks: Vec<TickRow>,
    pub kills: Vec<KillRow>,
    pub damages: Vec<DamageRow>,
    pub bomb_events: Vec<BombEventRow>,
    #[serde(default)]
    pub bomb_plants: Vec<BombPlantRow>,
    pub smokes: Vec<SmokeRow>,
    pub infernos: Vec<InfernoRow>,
    pub weapon_fires: Vec<WeaponFireRow>,
    pub player_states: Vec<PlayerStateRow>,
    pub he_detonations: Vec<HeDetonationRow>,
    pub flash_detonations: Vec<FlashDetonationRow>,
}

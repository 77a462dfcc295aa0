/// The first kill of a round and its offset from the end of freeze time.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EntryKillRow {
    pub round_num: u32,
    pub attacker_team_clan_name: Option<String>,
    pub attacker_side: Option<common::Side>,
    pub attacker_name: Option<String>,
    pub attacker_place: Option<String>,
    #[serde(rename = "attacker_X")]
    pub attacker_x: Option<f64>,
    #[serde(rename = "attacker_Y")]
    pub attacker_y: Option<f64>,
    #[serde(rename = "attacker_Z")]
    pub attacker_z: Option<f64>,
    pub weapon: String,
    pub victim_name: String,
    pub victim_place: Option<String>,
    #[serde(rename = "victim_X")]
    pub victim_x: f64,
    #[serde(rename = "victim_Y")]
    pub victim_y: f64,
    #[serde(rename = "victim_Z")]
    pub victim_z: f64,
    pub tick: i64,
    pub freeze_end: Option<i64>,
    pub ticks_after_freeze: Option<i64>,
}

/// Picks the minimum-tick kill of every round. A kill before the end of
/// freeze time yields a negative offset, which is kept as is.
#[tracing::instrument(skip(rounds, kills))]
pub fn extract(rounds: &[common::RoundRow], kills: &[common::KillRow]) -> Vec<EntryKillRow> {
    let freeze_ends: std::collections::HashMap<u32, Option<i64>> = rounds
        .iter()
        .map(|r| (r.round_num, r.freeze_end))
        .collect();

    let mut sorted: Vec<&common::KillRow> = kills.iter().collect();
    sorted.sort_by_key(|kill| kill.tick);

    let mut first_kills = std::collections::BTreeMap::<u32, &common::KillRow>::new();
    for kill in sorted.into_iter() {
        first_kills.entry(kill.round_num).or_insert(kill);
    }

    first_kills
        .into_values()
        .map(|kill| {
            let freeze_end = freeze_ends.get(&kill.round_num).copied().flatten();

            EntryKillRow {
                round_num: kill.round_num,
                attacker_team_clan_name: kill.attacker_team_clan_name.clone(),
                attacker_side: kill.attacker_side,
                attacker_name: kill.attacker_name.clone(),
                attacker_place: kill.attacker_place.clone(),
                attacker_x: kill.attacker_x,
                attacker_y: kill.attacker_y,
                attacker_z: kill.attacker_z,
                weapon: kill.weapon.clone(),
                victim_name: kill.victim_name.clone(),
                victim_place: kill.victim_place.clone(),
                victim_x: kill.victim_x,
                victim_y: kill.victim_y,
                victim_z: kill.victim_z,
                tick: kill.tick,
                freeze_end,
                ticks_after_freeze: freeze_end.map(|freeze| kill.tick - freeze),
            }
        })
        .collect()
}

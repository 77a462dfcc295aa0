/// Players alive on each side at one point of a round, either at the round
/// start or right after a kill.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GameStateRow {
    pub round_num: i64,
    pub tick: i64,
    pub ct_alive: i64,
    pub t_alive: i64,
}

/// Builds the alive-count timeline of a match from a 5v5 baseline per round
/// start plus the per-side death counts accumulated over the kills of each
/// round.
#[tracing::instrument(skip(kills, rounds))]
pub fn reconstruct(kills: &[common::KillRow], rounds: &[common::RoundRow]) -> Vec<GameStateRow> {
    let mut timeline: Vec<GameStateRow> = rounds
        .iter()
        .map(|round| GameStateRow {
            round_num: i64::from(round.round_num),
            tick: round.start,
            ct_alive: 5,
            t_alive: 5,
        })
        .collect();

    let mut sorted: Vec<&common::KillRow> = kills.iter().collect();
    sorted.sort_by_key(|kill| kill.tick);

    let mut deaths = std::collections::HashMap::<u32, (i64, i64)>::new();
    for kill in sorted.into_iter() {
        let (ct_deaths, t_deaths) = deaths.entry(kill.round_num).or_default();
        match kill.victim_side {
            common::Side::Ct => *ct_deaths += 1,
            common::Side::T => *t_deaths += 1,
        };

        let row = GameStateRow {
            round_num: i64::from(kill.round_num),
            tick: kill.tick,
            ct_alive: 5 - *ct_deaths,
            t_alive: 5 - *t_deaths,
        };

        // More than 5 deaths on a side means the input is broken, the count
        // is reported but kept untouched.
        if row.ct_alive < 0 || row.t_alive < 0 {
            tracing::warn!(
                "Alive count below zero in round {}: ct={} t={}",
                row.round_num,
                row.ct_alive,
                row.t_alive
            );
        }

        timeline.push(row);
    }

    timeline.sort_by_key(|row| (row.round_num, row.tick));

    timeline
}

/// The side to team-name pairing observed at the start of a match, before
/// any side swap.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TeamSides {
    pub side1: common::Side,
    pub clan1: String,
    pub side2: common::Side,
    pub clan2: String,
}

#[derive(Debug, PartialEq, Eq)]
pub enum TeamSampleError {
    MissingSide(common::Side),
}

impl std::fmt::Display for TeamSampleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingSide(side) => {
                write!(f, "No tick sample with a team name for side {:?}", side)
            }
        }
    }
}

impl std::error::Error for TeamSampleError {}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EquipValues {
    pub t: Option<i64>,
    pub ct: Option<i64>,
}

/// One round enriched with the winning team name, both sides' equipment
/// value at freeze end and the corrected bomb site.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RoundFeatures {
    pub round_num: u32,
    pub start: i64,
    pub freeze_end: Option<i64>,
    pub end: i64,
    pub official_end: Option<i64>,
    pub winner: common::Side,
    pub reason: String,
    pub bomb_plant: Option<i64>,
    pub winner_team_name: String,
    pub t_equip_value: Option<i64>,
    pub ct_equip_value: Option<i64>,
    pub bomb_site: Option<String>,
}

/// Pairs each side token with the team name it held in the first half, taken
/// from the earliest tick sample of that side carrying a non-empty team name.
pub fn sample_team_sides(ticks: &[common::TickRow]) -> Result<TeamSides, TeamSampleError> {
    let mut first = None;
    let mut second = None;

    for tick in ticks.iter() {
        let clan = match tick.team_clan_name.as_deref() {
            Some(c) if !c.is_empty() => c,
            _ => continue,
        };

        match &first {
            None => {
                first = Some((tick.side, clan.to_owned()));
            }
            Some((side1, _)) if *side1 != tick.side => {
                second = Some((tick.side, clan.to_owned()));
                break;
            }
            _ => {}
        };
    }

    let (side1, clan1) = first.ok_or(TeamSampleError::MissingSide(common::Side::T))?;
    let (side2, clan2) = second.ok_or(TeamSampleError::MissingSide(match side1 {
        common::Side::T => common::Side::Ct,
        common::Side::Ct => common::Side::T,
    }))?;

    Ok(TeamSides {
        side1,
        clan1,
        side2,
        clan2,
    })
}

/// Maps each round's winning side to a team name, one entry per round in
/// round order.
pub fn resolve_winners(rounds: &[common::RoundRow], teams: &TeamSides) -> Vec<String> {
    rounds
        .iter()
        .map(|round| {
            // The equality test flips after round 12 instead of swapping the
            // side/name pairing. Overtime rounds keep the flipped test.
            let first_team_won = if round.round_num <= 12 {
                round.winner == teams.side1
            } else {
                round.winner != teams.side1
            };

            if first_team_won {
                teams.clan1.clone()
            } else {
                teams.clan2.clone()
            }
        })
        .collect()
}

/// Sums every player's equipment value at the freeze-end tick, per round and
/// side. Rounds without a sample at their freeze-end tick have no entry.
pub fn equipment_values(
    rounds: &[common::RoundRow],
    ticks: &[common::TickRow],
) -> std::collections::HashMap<u32, EquipValues> {
    let freeze_ticks: std::collections::HashSet<i64> =
        rounds.iter().filter_map(|r| r.freeze_end).collect();

    let mut sums = std::collections::HashMap::<(u32, common::Side), i64>::new();
    for tick in ticks.iter() {
        if !freeze_ticks.contains(&tick.tick) {
            continue;
        }

        // Per-player values are 16 bit, sums can exceed that.
        *sums.entry((tick.round_num, tick.side)).or_default() +=
            i64::from(tick.current_equip_value);
    }

    let mut values = std::collections::HashMap::<u32, EquipValues>::new();
    for ((round_num, side), sum) in sums.into_iter() {
        let entry = values.entry(round_num).or_default();
        match side {
            common::Side::T => entry.t = Some(sum),
            common::Side::Ct => entry.ct = Some(sum),
        };
    }

    values
}

/// Recomputes the bomb site of each planted round as the plurality of the
/// attacker place names sampled at the plant tick, ignoring the site label
/// the plant events themselves carry. Ties go to the place seen first.
pub fn correct_bomb_sites(
    rounds: &[common::RoundRow],
    plants: &[common::BombPlantRow],
) -> std::collections::HashMap<u32, String> {
    let plant_rounds: std::collections::HashMap<i64, u32> = rounds
        .iter()
        .filter_map(|r| r.bomb_plant.map(|tick| (tick, r.round_num)))
        .collect();

    let mut counts = std::collections::HashMap::<(u32, &str), (usize, usize)>::new();
    for (seen, plant) in plants.iter().enumerate() {
        let round_num = match plant_rounds.get(&plant.tick) {
            Some(r) => *r,
            None => continue,
        };

        if plant.user_side != common::Side::T {
            continue;
        }

        let entry = counts
            .entry((round_num, plant.user_place.as_str()))
            .or_insert((0, seen));
        entry.0 += 1;
    }

    let mut sites = std::collections::HashMap::<u32, (usize, usize, &str)>::new();
    for ((round_num, place), (count, seen)) in counts.into_iter() {
        let replace = match sites.get(&round_num) {
            Some((best_count, best_seen, _)) => {
                count > *best_count || (count == *best_count && seen < *best_seen)
            }
            None => true,
        };

        if replace {
            sites.insert(round_num, (count, seen, place));
        }
    }

    sites
        .into_iter()
        .map(|(round_num, (_, _, place))| (round_num, place.to_owned()))
        .collect()
}

/// Runs winner resolution, equipment aggregation and bomb-site correction
/// over the rounds of one match.
#[tracing::instrument(skip(rounds, ticks, plants))]
pub fn enrich_rounds(
    rounds: &[common::RoundRow],
    ticks: &[common::TickRow],
    plants: &[common::BombPlantRow],
) -> Result<Vec<RoundFeatures>, TeamSampleError> {
    let teams = sample_team_sides(ticks)?;
    tracing::debug!("Team sides: {:?}", teams);

    let winners = resolve_winners(rounds, &teams);
    let equipment = equipment_values(rounds, ticks);
    let mut sites = correct_bomb_sites(rounds, plants);

    Ok(rounds
        .iter()
        .zip(winners.into_iter())
        .map(|(round, winner_team_name)| {
            let equip = equipment
                .get(&round.round_num)
                .copied()
                .unwrap_or_default();

            RoundFeatures {
                round_num: round.round_num,
                start: round.start,
                freeze_end: round.freeze_end,
                end: round.end,
                official_end: round.official_end,
                winner: round.winner,
                reason: round.reason.clone(),
                bomb_plant: round.bomb_plant,
                winner_team_name,
                t_equip_value: equip.t,
                ct_equip_value: equip.ct,
                bomb_site: sites.remove(&round.round_num),
            }
        })
        .collect())
}

/// One fired shot joined with the shooter's state at that tick and the
/// damage the shooter dealt to the opposing team on that tick.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShotRow {
    pub round_num: u32,
    pub tick: i64,
    pub user_name: String,
    pub accuracy_penalty: Option<f64>,
    pub flash_duration: Option<f64>,
    pub inair: Option<bool>,
    pub weapon: String,
    pub damage_dealt: i64,
}

/// Joins weapon-fire events with the shooter state samples and the summed
/// cross-team damage keyed by (tick, shooter). Shots without a matching
/// damage row dealt 0. Two shots by the same player on the same tick cannot
/// be told apart and read the same damage figure.
#[tracing::instrument(skip(fires, damages, states))]
pub fn enrich(
    fires: &[common::WeaponFireRow],
    damages: &[common::DamageRow],
    states: &[common::PlayerStateRow],
) -> Vec<ShotRow> {
    let opponent_damage = opponent_damage_by_tick(damages);

    let mut state_lookup = std::collections::HashMap::<(i64, &str), &common::PlayerStateRow>::new();
    for state in states.iter() {
        state_lookup
            .entry((state.tick, state.name.as_str()))
            .or_insert(state);
    }

    fires
        .iter()
        .map(|fire| {
            let state = state_lookup.get(&(fire.tick, fire.user_name.as_str()));
            let damage_dealt = opponent_damage
                .get(&(fire.tick, fire.user_name.as_str()))
                .copied()
                .unwrap_or(0);

            ShotRow {
                round_num: fire.total_rounds_played + 1,
                tick: fire.tick,
                user_name: fire.user_name.clone(),
                accuracy_penalty: state.and_then(|s| s.accuracy_penalty),
                flash_duration: state.and_then(|s| s.flash_duration),
                inair: state.and_then(|s| s.is_airborne),
                weapon: fire.weapon.clone(),
                damage_dealt,
            }
        })
        .collect()
}

fn opponent_damage_by_tick(
    damages: &[common::DamageRow],
) -> std::collections::HashMap<(i64, &str), i64> {
    let mut summed = std::collections::HashMap::new();

    for damage in damages.iter() {
        let cross_team = match (
            damage.attacker_team_name.as_deref(),
            damage.user_team_name.as_deref(),
        ) {
            (Some(attacker), Some(user)) => attacker != user,
            _ => false,
        };
        if !cross_team {
            continue;
        }

        let attacker = match damage.attacker_name.as_deref() {
            Some(a) => a,
            None => continue,
        };

        *summed.entry((damage.tick, attacker)).or_default() += i64::from(damage.dmg_health);
    }

    summed
}

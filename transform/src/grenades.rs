// An HE detonating this close to the center of a live smoke clears it.
const SMOKE_POP_RADIUS: f64 = 120.0;

/// One HE grenade detonation with the damage it dealt to the opposing team
/// and whether it cleared a smoke.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HeGrenadeRow {
    pub round_num: u32,
    pub tick: i64,
    pub thrower_name: String,
    pub damage_dealt: i64,
    pub smoke_popped: bool,
    pub detonation_x: f64,
    pub detonation_y: f64,
    pub detonation_z: f64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FlashbangRow {
    pub round_num: u32,
    pub tick: i64,
    pub thrower_name: String,
    pub detonation_x: f64,
    pub detonation_y: f64,
    pub detonation_z: f64,
}

/// Joins HE detonations with the cross-team grenade damage on the same tick
/// and checks every detonation against the lifetimes and positions of all
/// completed smokes. The tick window of a smoke is inclusive on both ends,
/// the distance check is strictly inside the radius.
#[tracing::instrument(skip(detonations, damages, smokes))]
pub fn he_grenades(
    detonations: &[common::HeDetonationRow],
    damages: &[common::DamageRow],
    smokes: &[common::SmokeRow],
) -> Vec<HeGrenadeRow> {
    let he_damage = he_damage_by_tick(damages);

    // Smokes still active at the end of the demo have no end tick and are
    // left out, matching an unbounded lifetime is not wanted.
    let active_smokes: Vec<(&common::SmokeRow, i64)> = smokes
        .iter()
        .filter_map(|smoke| smoke.end_tick.map(|end| (smoke, end)))
        .collect();

    let mut popped = std::collections::HashSet::<(i64, &str)>::new();
    for detonation in detonations.iter() {
        for (smoke, end_tick) in active_smokes.iter() {
            if detonation.tick < smoke.start_tick || detonation.tick > *end_tick {
                continue;
            }

            let squared_distance = (detonation.x - smoke.x).powi(2)
                + (detonation.y - smoke.y).powi(2)
                + (detonation.z - smoke.z).powi(2);
            if squared_distance < SMOKE_POP_RADIUS * SMOKE_POP_RADIUS {
                popped.insert((detonation.tick, detonation.user_name.as_str()));
                break;
            }
        }
    }

    detonations
        .iter()
        .map(|detonation| HeGrenadeRow {
            round_num: detonation.total_rounds_played + 1,
            tick: detonation.tick,
            thrower_name: detonation.user_name.clone(),
            damage_dealt: he_damage
                .get(&(detonation.tick, detonation.user_name.as_str()))
                .copied()
                .unwrap_or(0),
            smoke_popped: popped.contains(&(detonation.tick, detonation.user_name.as_str())),
            detonation_x: detonation.x,
            detonation_y: detonation.y,
            detonation_z: detonation.z,
        })
        .collect()
}

/// Renames flash detonations into the shared grenade table shape.
pub fn flashbangs(detonations: &[common::FlashDetonationRow]) -> Vec<FlashbangRow> {
    detonations
        .iter()
        .map(|detonation| FlashbangRow {
            round_num: detonation.total_rounds_played + 1,
            tick: detonation.tick,
            thrower_name: detonation.user_name.clone(),
            detonation_x: detonation.x,
            detonation_y: detonation.y,
            detonation_z: detonation.z,
        })
        .collect()
}

fn he_damage_by_tick(
    damages: &[common::DamageRow],
) -> std::collections::HashMap<(i64, &str), i64> {
    let mut summed = std::collections::HashMap::new();

    for damage in damages.iter() {
        if damage.weapon != "hegrenade" {
            continue;
        }

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

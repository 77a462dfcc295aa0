use transform::grenades;

use pretty_assertions::assert_eq;

fn detonation(tick: i64, name: &str, position: (f64, f64, f64)) -> common::HeDetonationRow {
    common::HeDetonationRow {
        tick,
        user_name: name.to_owned(),
        user_steamid: None,
        x: position.0,
        y: position.1,
        z: position.2,
        total_rounds_played: 4,
    }
}

fn smoke(start_tick: i64, end_tick: Option<i64>, center: (f64, f64, f64)) -> common::SmokeRow {
    common::SmokeRow {
        entity_id: 7,
        start_tick,
        end_tick,
        thrower_name: "smoker".to_owned(),
        thrower_steamid: None,
        thrower_health: Some(100),
        thrower_current_equip_value: Some(4200),
        x: center.0,
        y: center.1,
        z: center.2,
    }
}

fn he_damage(tick: i64, attacker: &str, weapon: &str, same_team: bool, dmg: i32) -> common::DamageRow {
    common::DamageRow {
        round_num: 5,
        tick,
        attacker_name: Some(attacker.to_owned()),
        attacker_steamid: None,
        attacker_team_name: Some("TeamA".to_owned()),
        user_name: "victim".to_owned(),
        user_steamid: None,
        user_team_name: Some(if same_team { "TeamA" } else { "TeamB" }.to_owned()),
        weapon: weapon.to_owned(),
        dmg_health: dmg,
        dmg_armor: 0,
        health: 60,
    }
}

#[test]
fn detonation_near_an_active_smoke_pops_it() {
    let detonations = vec![detonation(500, "thrower", (0.0, 0.0, 0.0))];
    // Squared distance 7500, well inside 120^2.
    let smokes = vec![smoke(400, Some(600), (50.0, 50.0, 50.0))];

    let result = grenades::he_grenades(&detonations, &[], &smokes);
    dbg!(&result);

    let expected = vec![grenades::HeGrenadeRow {
        round_num: 5,
        tick: 500,
        thrower_name: "thrower".to_owned(),
        damage_dealt: 0,
        smoke_popped: true,
        detonation_x: 0.0,
        detonation_y: 0.0,
        detonation_z: 0.0,
    }];

    assert_eq!(expected, result);
}

#[test]
fn detonation_far_from_the_smoke_does_not_pop_it() {
    let detonations = vec![detonation(500, "thrower", (0.0, 0.0, 0.0))];
    let smokes = vec![smoke(400, Some(600), (200.0, 200.0, 200.0))];

    let result = grenades::he_grenades(&detonations, &[], &smokes);

    assert_eq!(false, result[0].smoke_popped);
}

#[test]
fn smoke_lifetime_is_inclusive_on_both_ends() {
    let detonations = vec![
        detonation(399, "before", (0.0, 0.0, 0.0)),
        detonation(400, "first", (0.0, 0.0, 0.0)),
        detonation(600, "last", (0.0, 0.0, 0.0)),
        detonation(601, "after", (0.0, 0.0, 0.0)),
    ];
    let smokes = vec![smoke(400, Some(600), (10.0, 10.0, 10.0))];

    let result = grenades::he_grenades(&detonations, &[], &smokes);

    let popped: Vec<bool> = result.iter().map(|row| row.smoke_popped).collect();
    assert_eq!(vec![false, true, true, false], popped);
}

#[test]
fn exactly_on_the_radius_does_not_pop() {
    let detonations = vec![detonation(500, "thrower", (0.0, 0.0, 0.0))];
    // Squared distance is exactly 120^2.
    let smokes = vec![smoke(400, Some(600), (120.0, 0.0, 0.0))];

    let result = grenades::he_grenades(&detonations, &[], &smokes);

    assert_eq!(false, result[0].smoke_popped);
}

#[test]
fn smokes_without_an_end_tick_are_ignored() {
    let detonations = vec![detonation(500, "thrower", (0.0, 0.0, 0.0))];
    let smokes = vec![smoke(400, None, (10.0, 10.0, 10.0))];

    let result = grenades::he_grenades(&detonations, &[], &smokes);

    assert_eq!(false, result[0].smoke_popped);
}

#[test]
fn damage_counts_only_cross_team_he_hits() {
    let detonations = vec![detonation(500, "thrower", (0.0, 0.0, 0.0))];
    let damages = vec![
        he_damage(500, "thrower", "hegrenade", false, 38),
        he_damage(500, "thrower", "hegrenade", false, 19),
        he_damage(500, "thrower", "hegrenade", true, 25),
        he_damage(500, "thrower", "m4a1", false, 90),
        he_damage(501, "thrower", "hegrenade", false, 14),
    ];

    let result = grenades::he_grenades(&detonations, &damages, &[]);

    assert_eq!(38 + 19, result[0].damage_dealt);
}

#[test]
fn flashbangs_are_projected_into_the_grenade_shape() {
    let detonations = vec![common::FlashDetonationRow {
        tick: 720,
        user_name: "flasher".to_owned(),
        user_steamid: None,
        x: 1.5,
        y: -2.5,
        z: 64.0,
        total_rounds_played: 11,
    }];

    let result = grenades::flashbangs(&detonations);

    let expected = vec![grenades::FlashbangRow {
        round_num: 12,
        tick: 720,
        thrower_name: "flasher".to_owned(),
        detonation_x: 1.5,
        detonation_y: -2.5,
        detonation_z: 64.0,
    }];

    assert_eq!(expected, result);
}

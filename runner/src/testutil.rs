//! A small hand-checked match bundle shared by the unit tests.
//!
//! Two rounds on de_inferno between "Fnatic Rising" (t side) and
//! "Guild Academy" (ct side), with one kill exchange, a bomb plant, a smoke
//! that gets cleared by an HE and one flashbang.

use common::Side;

pub(crate) fn bundle() -> common::RawMatchData {
    common::RawMatchData {
        header: common::MatchHeader {
            map_name: "de_inferno".to_owned(),
        },
        rounds: vec![
            common::RoundRow {
                round_num: 1,
                start: 0,
                freeze_end: Some(1000),
                end: 9000,
                official_end: Some(9500),
                winner: Side::T,
                reason: "t_win".to_owned(),
                bomb_plant: Some(4000),
                bomb_site: Some("BombsiteA".to_owned()),
            },
            common::RoundRow {
                round_num: 2,
                start: 10000,
                freeze_end: Some(11000),
                end: 19000,
                official_end: None,
                winner: Side::Ct,
                reason: "bomb_defused".to_owned(),
                bomb_plant: None,
                bomb_site: None,
            },
        ],
        ticks: vec![
            tick(1, 500, Side::T, "warmup-bot", None, 0),
            tick(1, 1000, Side::T, "alice", Some("Fnatic Rising"), 1000),
            tick(1, 1000, Side::T, "bob", Some("Fnatic Rising"), 2050),
            tick(1, 1000, Side::Ct, "carol", Some("Guild Academy"), 3700),
            tick(1, 1000, Side::Ct, "dave", Some("Guild Academy"), 700),
            tick(1, 1500, Side::T, "alice", Some("Fnatic Rising"), 9999),
            tick(2, 11000, Side::T, "alice", Some("Fnatic Rising"), 3900),
            tick(2, 11000, Side::T, "bob", Some("Fnatic Rising"), 4200),
            tick(2, 11000, Side::Ct, "carol", Some("Guild Academy"), 5000),
            tick(2, 11000, Side::Ct, "dave", Some("Guild Academy"), 1000),
        ],
        kills: vec![
            kill(1, 2000, "alice", Side::T, "TRamp", "carol", Side::Ct, "Pit", "ak47", true),
            kill(1, 2500, "dave", Side::Ct, "Arch", "bob", Side::T, "Banana", "m4a1_silencer", false),
            kill(2, 12000, "alice", Side::T, "Quad", "dave", Side::Ct, "Library", "awp", false),
        ],
        damages: vec![
            damage(1, 2000, "alice", "Fnatic Rising", "carol", "Guild Academy", "ak47", 108),
            damage(1, 2600, "bob", "Fnatic Rising", "alice", "Fnatic Rising", "hegrenade", 7),
            damage(1, 3200, "dave", "Guild Academy", "bob", "Fnatic Rising", "hegrenade", 38),
            damage(2, 12000, "alice", "Fnatic Rising", "dave", "Guild Academy", "awp", 115),
        ],
        bomb_events: vec![
            common::BombEventRow {
                tick: 4000,
                event: "planted".to_owned(),
                site: Some("BombsiteA".to_owned()),
                user_name: Some("alice".to_owned()),
                steamid: Some(1001),
            },
            common::BombEventRow {
                tick: 8900,
                event: "exploded".to_owned(),
                site: Some("BombsiteA".to_owned()),
                user_name: None,
                steamid: None,
            },
        ],
        bomb_plants: vec![common::BombPlantRow {
            tick: 4000,
            user_name: "alice".to_owned(),
            user_steamid: Some(1001),
            user_side: Side::T,
            user_place: "BombsiteA".to_owned(),
        }],
        smokes: vec![
            common::SmokeRow {
                entity_id: 7,
                start_tick: 3000,
                end_tick: Some(3500),
                thrower_name: "carol".to_owned(),
                thrower_steamid: Some(2001),
                thrower_health: Some(100),
                thrower_current_equip_value: Some(4500),
                x: 100.0,
                y: 100.0,
                z: 0.0,
            },
            common::SmokeRow {
                entity_id: 8,
                start_tick: 15000,
                end_tick: None,
                thrower_name: "dave".to_owned(),
                thrower_steamid: Some(2002),
                thrower_health: Some(64),
                thrower_current_equip_value: Some(1000),
                x: 0.0,
                y: 0.0,
                z: 0.0,
            },
        ],
        infernos: vec![common::InfernoRow {
            entity_id: 9,
            start_tick: 5000,
            end_tick: Some(5700),
            thrower_name: "alice".to_owned(),
            thrower_steamid: Some(1001),
            thrower_health: Some(87),
            thrower_current_equip_value: Some(3900),
            x: -50.0,
            y: 220.0,
            z: 4.0,
        }],
        weapon_fires: vec![
            common::WeaponFireRow {
                tick: 2000,
                user_name: "alice".to_owned(),
                user_steamid: Some(1001),
                weapon: "ak47".to_owned(),
                total_rounds_played: 0,
            },
            common::WeaponFireRow {
                tick: 12000,
                user_name: "alice".to_owned(),
                user_steamid: Some(1001),
                weapon: "awp".to_owned(),
                total_rounds_played: 1,
            },
        ],
        player_states: vec![common::PlayerStateRow {
            tick: 2000,
            name: "alice".to_owned(),
            steamid: Some(1001),
            accuracy_penalty: Some(0.51),
            flash_duration: Some(0.0),
            is_airborne: Some(false),
        }],
        he_detonations: vec![common::HeDetonationRow {
            tick: 3200,
            user_name: "dave".to_owned(),
            user_steamid: Some(2002),
            x: 110.0,
            y: 100.0,
            z: 0.0,
            total_rounds_played: 0,
        }],
        flash_detonations: vec![common::FlashDetonationRow {
            tick: 2200,
            user_name: "bob".to_owned(),
            user_steamid: Some(1002),
            x: 75.5,
            y: -10.0,
            z: 2.0,
            total_rounds_played: 0,
        }],
    }
}

pub(crate) fn write_bundle(
    dir: &std::path::Path,
    name: &str,
    data: &common::RawMatchData,
) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_vec(data).unwrap()).unwrap();
    path
}

fn tick(
    round_num: u32,
    tick: i64,
    side: Side,
    name: &str,
    clan: Option<&str>,
    equip: i16,
) -> common::TickRow {
    common::TickRow {
        round_num,
        tick,
        side,
        name: name.to_owned(),
        steamid: Some(1),
        team_clan_name: clan.map(str::to_owned),
        x: 0.0,
        y: 0.0,
        z: 0.0,
        current_equip_value: equip,
    }
}

#[allow(clippy::too_many_arguments)]
fn kill(
    round_num: u32,
    tick: i64,
    attacker: &str,
    attacker_side: Side,
    attacker_place: &str,
    victim: &str,
    victim_side: Side,
    victim_place: &str,
    weapon: &str,
    headshot: bool,
) -> common::KillRow {
    common::KillRow {
        round_num,
        tick,
        attacker_name: Some(attacker.to_owned()),
        attacker_steamid: Some(1001),
        attacker_side: Some(attacker_side),
        attacker_team_clan_name: Some(clan_of(attacker_side).to_owned()),
        attacker_place: Some(attacker_place.to_owned()),
        attacker_x: Some(100.0),
        attacker_y: Some(200.0),
        attacker_z: Some(0.0),
        victim_name: victim.to_owned(),
        victim_steamid: Some(2001),
        victim_side,
        victim_team_clan_name: Some(clan_of(victim_side).to_owned()),
        victim_place: Some(victim_place.to_owned()),
        victim_x: 300.0,
        victim_y: 350.0,
        victim_z: 10.0,
        assister_name: None,
        assister_steamid: None,
        assister_side: None,
        weapon: weapon.to_owned(),
        headshot,
    }
}

#[allow(clippy::too_many_arguments)]
fn damage(
    round_num: u32,
    tick: i64,
    attacker: &str,
    attacker_team: &str,
    user: &str,
    user_team: &str,
    weapon: &str,
    dmg_health: i32,
) -> common::DamageRow {
    common::DamageRow {
        round_num,
        tick,
        attacker_name: Some(attacker.to_owned()),
        attacker_steamid: Some(1001),
        attacker_team_name: Some(attacker_team.to_owned()),
        user_name: user.to_owned(),
        user_steamid: Some(2001),
        user_team_name: Some(user_team.to_owned()),
        weapon: weapon.to_owned(),
        dmg_health,
        dmg_armor: 3,
        health: 50,
    }
}

fn clan_of(side: Side) -> &'static str {
    match side {
        Side::T => "Fnatic Rising",
        Side::Ct => "Guild Academy",
    }
}

//! Synthetic player pools and fixture lists.

use serde_json::{json, Value};
use squadforge::domain::Table;

/// One player record with an expected-points column per gameweek from 1.
pub fn player(id: i64, element_type: i64, team: i64, now_cost: i64, points: &[f64]) -> Value {
    let mut record = json!({
        "id": id,
        "web_name": format!("P{id}"),
        "element_type": element_type,
        "team": team,
        "now_cost": now_cost,
    });
    for (i, p) in points.iter().enumerate() {
        record[format!("ep_gw{}", i + 1)] = json!(p);
    }
    record
}

pub fn fixture(event: u32, home: i64, away: i64, home_difficulty: u8, away_difficulty: u8) -> Value {
    json!({
        "event": event,
        "team_h": home,
        "team_a": away,
        "team_h_difficulty": home_difficulty,
        "team_a_difficulty": away_difficulty,
    })
}

pub fn players_table(records: Vec<Value>) -> Table {
    Table::from_json("players", Value::Array(records)).expect("players table")
}

pub fn fixtures_table(records: Vec<Value>) -> Table {
    Table::from_json("fixtures", Value::Array(records)).expect("fixtures table")
}

pub fn no_fixtures() -> Table {
    fixtures_table(Vec::new())
}

/// Twenty players, just enough to fill 2-5-5-3 with a few spares:
/// 3 GK, 6 DEF, 7 MID, 4 FWD over 6 clubs. One gameweek of points.
pub fn small_pool() -> Vec<Value> {
    let rows: [(i64, i64, i64, f64); 20] = [
        // (element_type, team, cost, points)
        (1, 1, 45, 3.1),
        (1, 2, 50, 3.9),
        (1, 3, 40, 2.7),
        (2, 1, 55, 4.2),
        (2, 2, 45, 3.3),
        (2, 3, 60, 4.8),
        (2, 4, 40, 2.9),
        (2, 5, 50, 3.6),
        (2, 6, 45, 3.4),
        (3, 1, 120, 8.9),
        (3, 2, 75, 5.6),
        (3, 3, 65, 5.1),
        (3, 4, 100, 7.4),
        (3, 5, 55, 4.0),
        (3, 6, 85, 6.2),
        (3, 1, 70, 5.3),
        (4, 2, 110, 7.8),
        (4, 4, 80, 6.1),
        (4, 5, 65, 4.7),
        (4, 1, 90, 6.6),
    ];
    rows.iter()
        .enumerate()
        .map(|(i, (element_type, team, cost, points))| {
            player(i as i64 + 1, *element_type, *team, *cost, &[*points])
        })
        .collect()
}

/// A larger deterministic pool: 80 players over 20 clubs, four gameweeks.
pub fn league_pool() -> Vec<Value> {
    let per_position = [(1, 10), (2, 26), (3, 26), (4, 18)];
    let mut records = Vec::new();
    let mut id = 1;
    for (element_type, count) in per_position {
        for k in 0..count {
            let team = (id % 20) + 1;
            let cost = 40 + ((id * 37) % 60) + element_type * 5;
            let base = 1.5 + (((id * 53) % 70) as f64) / 10.0;
            let points: Vec<f64> = (0..4)
                .map(|gw| base + (((k + gw) % 3) as f64) * 0.25)
                .collect();
            records.push(player(id, element_type, team, cost, &points));
            id += 1;
        }
    }
    records
}

/// Round-robin style fixtures for 20 clubs over gameweeks 1-4.
pub fn league_fixtures() -> Vec<Value> {
    let mut records = Vec::new();
    for gw in 1..=4u32 {
        for pair in 0..10i64 {
            let home = pair * 2 + 1;
            let away = ((pair * 2 + 1 + i64::from(gw) * 3) % 20) + 1;
            let away = if away == home { (away % 20) + 1 } else { away };
            let home_difficulty = (((home + i64::from(gw)) % 5) + 1) as u8;
            let away_difficulty = (6 - i64::from(home_difficulty)) as u8;
            records.push(fixture(gw, home, away, home_difficulty, away_difficulty));
        }
    }
    records
}

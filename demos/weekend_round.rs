//! Settling a weekend round.
//!
//! Two matches and a skins game are netted into the fewest payments,
//! each with a Venmo link.

use golf_settle::core::game::{Game, GameSet, GameType};
use golf_settle::core::player::PlayerId;
use golf_settle::league::backout::{backout_timing, FeeSchedule};
use golf_settle::settlement::engine::SettlementEngine;
use chrono::{Duration, Utc};
use rust_decimal_macros::dec;

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║  golf-settle: Weekend Round Example      ║");
    println!("╚══════════════════════════════════════════╝\n");

    let jake = PlayerId::new("jake");
    let mike = PlayerId::new("mike");
    let chris = PlayerId::new("chris");
    let tommy = PlayerId::new("tommy");
    let roster = vec![jake.clone(), mike.clone(), chris.clone(), tommy.clone()];

    let mut games = GameSet::new();
    games.add(
        Game::new(GameType::MatchPlay, dec!(10), vec![jake.clone(), mike.clone()])
            .with_name("Front nine")
            .with_results([(jake.clone(), dec!(3)), (mike.clone(), dec!(1))]),
    );
    games.add(
        Game::new(GameType::MatchPlay, dec!(10), vec![chris.clone(), tommy.clone()])
            .with_name("Back nine")
            .with_results([(chris.clone(), dec!(2)), (tommy.clone(), dec!(2))]),
    );
    games.add(
        Game::new(GameType::Skins, dec!(6), roster.clone())
            .with_name("Skins")
            .with_results([
                (tommy.clone(), dec!(4)),
                (mike.clone(), dec!(2)),
                (chris.clone(), dec!(1)),
            ]),
    );

    let report = SettlementEngine::default().settle(&games, &roster);
    println!("{}", report);

    println!("━━━ Payment Links ━━━\n");
    for s in report.settlements() {
        println!("  {}", s.venmo_link("Saturday round", Some(s.to_user_id.as_str())));
    }

    println!("\n━━━ Backout Fees ━━━\n");
    let tee_time = Utc::now() + Duration::days(2);
    let deadline = Some(tee_time - Duration::days(3));
    let timing = backout_timing(Utc::now(), tee_time, deadline, &FeeSchedule::default());
    println!("  Withdrawing now: {} (${})", timing.label(), timing.fee);
}

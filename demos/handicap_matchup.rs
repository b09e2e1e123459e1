//! Setting up a fair match from registry handicaps.

use golf_settle::core::course::CourseRating;
use golf_settle::handicap::engine::HandicapEngine;
use golf_settle::handicap::lookup::{HandicapLookup, StaticHandicapDirectory};
use rust_decimal_macros::dec;

fn main() {
    let registry = StaticHandicapDirectory::demo();
    let tees = CourseRating::new(dec!(131), dec!(73.2), 72);
    println!("Tees: {}\n", tees);

    let pairs = [("1234567", "6789012"), ("3456789", "7890123"), ("4567890", "2345678")];
    for (a, b) in pairs {
        let (player_a, player_b) = match (registry.lookup(a), registry.lookup(b)) {
            (Ok(a), Ok(b)) => (a, b),
            (Err(e), _) | (_, Err(e)) => {
                eprintln!("lookup failed: {}", e);
                continue;
            }
        };

        let alloc = HandicapEngine::strokes_given_for(
            player_a.handicap_index,
            player_b.handicap_index,
            &tees,
        );
        println!(
            "{:<15} ({:>4}) -> {:>3}   vs   {:<15} ({:>4}) -> {:>3}   {}",
            player_a.player_name,
            player_a.handicap_index,
            alloc.course_handicap_a,
            player_b.player_name,
            player_b.handicap_index,
            alloc.course_handicap_b,
            alloc,
        );
    }
}

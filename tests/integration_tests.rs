// Integration tests for the cricket career engine.
//
// These exercise the full system end-to-end using the library crate's
// public API: career/team/player generation, a complete AI-only auction,
// league fixture generation and simulation, and the four-match playoff
// bracket -- all against an in-memory database.

use std::collections::HashMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use cricket_core::auction::AuctionEngine;
use cricket_core::db::Database;
use cricket_core::generate::{PlayerGenerator, TeamGenerator};
use cricket_core::match_engine::{self, Aggression};
use cricket_core::model::auction::{Auction, AuctionCategory};
use cricket_core::model::career::Season;
use cricket_core::model::player::Player;
use cricket_core::model::team::{Team, TeamId};
use cricket_core::season::SeasonEngine;
use cricket_core::session::{MatchSessionCache, TossDecision};

/// Runs a full auction against freshly generated teams and players, seeded
/// for determinism. Returns the post-auction teams (remaining_budget
/// reflects spend) and players (team_id/sold_price set for sold players).
fn run_full_auction(seed: u64) -> (Vec<Team>, Vec<Player>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut teams = TeamGenerator::create_teams(1, 0);
    for (i, team) in teams.iter_mut().enumerate() {
        team.id = i as u64 + 1;
    }

    let mut players = PlayerGenerator::generate_player_pool(&mut rng);
    for (i, player) in players.iter_mut().enumerate() {
        player.id = i as u64 + 1;
    }

    let auction = Auction::new(1, 1, 900_000_000, players.len() as i32);
    let mut engine = AuctionEngine::new(auction, ChaCha8Rng::seed_from_u64(rng.gen()));
    engine.initialize_auction(teams.clone(), players.clone());

    for category in [
        AuctionCategory::Marquee,
        AuctionCategory::Batsmen,
        AuctionCategory::Bowlers,
        AuctionCategory::AllRounders,
        AuctionCategory::WicketKeepers,
    ] {
        engine.auction_category_ai_only(category, None);
    }
    engine.complete_auction();

    for team in teams.iter_mut() {
        if let Some(state) = engine.team_state(team.id) {
            team.remaining_budget = state.remaining_budget;
        }
    }
    for entry in engine.entries() {
        if let Some(player) = players.iter_mut().find(|p| p.id == entry.player_id) {
            player.team_id = entry.sold_to_team_id;
            player.sold_price = entry.sold_price;
        }
    }

    (teams, players)
}

fn playing_xis(teams: &[Team], players: &[Player]) -> HashMap<TeamId, Vec<Player>> {
    teams
        .iter()
        .map(|team| {
            let squad: Vec<Player> = players.iter().filter(|p| p.team_id == Some(team.id)).cloned().collect();
            (team.id, SeasonEngine::select_playing_xi(&squad))
        })
        .collect()
}

fn simulate_fixture(
    cache: &MatchSessionCache,
    season_engine: &mut SeasonEngine,
    xis: &HashMap<TeamId, Vec<Player>>,
    fixture_id: u64,
    team1_id: TeamId,
    team2_id: TeamId,
    rng: &mut impl Rng,
) -> TeamId {
    let toss_winner = cache.do_toss(fixture_id, team1_id, team2_id, rng);
    let decision = if rng.gen_bool(0.5) { TossDecision::Bat } else { TossDecision::Bowl };

    cache.start_match(
        fixture_id,
        team1_id,
        team2_id,
        xis.get(&team1_id).cloned().unwrap_or_default(),
        xis.get(&team2_id).cloned().unwrap_or_default(),
        toss_winner,
        decision,
        None,
        match_engine::PitchDna::default(),
        rng.gen(),
    );
    cache.simulate_innings(fixture_id, Aggression::Balanced);
    cache.finalize_if_complete(fixture_id);
    let result = cache.take_completed(fixture_id).expect("match should run to completion");

    let batting_first_id = match decision {
        TossDecision::Bat => toss_winner,
        TossDecision::Bowl if toss_winner == team1_id => team2_id,
        TossDecision::Bowl => team1_id,
    };
    let batting_second_id = if batting_first_id == team1_id { team2_id } else { team1_id };

    season_engine.record_match_result(
        fixture_id,
        result.winner_team_id,
        "integration test".to_string(),
        batting_first_id,
        batting_second_id,
        result.innings1.total_runs,
        result.innings1.overs_faced(),
        result.innings2.total_runs,
        result.innings2.overs_faced(),
    );

    result.winner_team_id.unwrap_or(batting_first_id)
}

// ===========================================================================
// Test: generation produces a valid 8-team, fully staffed player pool
// ===========================================================================

#[test]
fn generated_teams_and_players_are_well_formed() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let teams = TeamGenerator::create_teams(1, 0);
    assert_eq!(teams.len(), 8);
    assert!(teams.iter().any(|t| t.is_user_team));

    let players = PlayerGenerator::generate_player_pool(&mut rng);
    assert_eq!(players.len(), 230);
    for player in &players {
        assert!(player.team_id.is_none(), "ungenerated players should have no team");
    }
}

// ===========================================================================
// Test: full auction sells most of the pool within budget
// ===========================================================================

#[test]
fn full_auction_assigns_players_within_budget() {
    let (teams, players) = run_full_auction(7);

    let sold: Vec<&Player> = players.iter().filter(|p| p.team_id.is_some()).collect();
    assert!(!sold.is_empty(), "auction should sell at least some players");

    for team in &teams {
        assert!(team.remaining_budget >= 0, "team {} overspent its budget", team.name);
        assert!(team.remaining_budget <= 900_000_000);

        let squad_size = sold.iter().filter(|p| p.team_id == Some(team.id)).count();
        assert!(squad_size <= 25, "team {} exceeded max squad size", team.name);
    }
}

// ===========================================================================
// Test: season engine schedules a full 56-match league and reaches playoffs
// ===========================================================================

#[test]
fn league_season_reaches_champion() {
    let (teams, players) = run_full_auction(11);

    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let season = Season::new(1, 1, 1);
    let mut season_engine = SeasonEngine::new(season, teams.clone());
    season_engine.generate_league_fixtures(&mut rng);
    assert_eq!(season_engine.fixtures().len(), 56);

    let xis = playing_xis(&teams, &players);
    let cache = MatchSessionCache::new();

    while !season_engine.is_league_complete() {
        let fixture = season_engine.next_fixture().expect("league not yet complete").clone();
        simulate_fixture(&cache, &mut season_engine, &xis, fixture.id, fixture.team1_id, fixture.team2_id, &mut rng);
    }

    let standings = season_engine.standings();
    assert_eq!(standings.len(), 8);
    for pair in standings.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            a.points > b.points || (a.points == b.points && a.nrr >= b.nrr),
            "standings should be sorted by points then NRR"
        );
    }

    let (q1_id, eliminator_id) = season_engine.generate_playoffs();
    let q1 = season_engine.fixtures().iter().find(|f| f.id == q1_id).unwrap().clone();
    let eliminator = season_engine.fixtures().iter().find(|f| f.id == eliminator_id).unwrap().clone();

    let q1_winner = simulate_fixture(&cache, &mut season_engine, &xis, q1.id, q1.team1_id, q1.team2_id, &mut rng);
    let eliminator_winner =
        simulate_fixture(&cache, &mut season_engine, &xis, eliminator.id, eliminator.team1_id, eliminator.team2_id, &mut rng);

    let q1_loser = if q1_winner == q1.team1_id { q1.team2_id } else { q1.team1_id };
    let q2_id = season_engine.generate_qualifier2(q1_loser, eliminator_winner);
    let q2 = season_engine.fixtures().iter().find(|f| f.id == q2_id).unwrap().clone();
    let q2_winner = simulate_fixture(&cache, &mut season_engine, &xis, q2.id, q2.team1_id, q2.team2_id, &mut rng);

    let final_id = season_engine.generate_final(q1_winner, q2_winner);
    let final_fixture = season_engine.fixtures().iter().find(|f| f.id == final_id).unwrap().clone();
    let champion = simulate_fixture(
        &cache,
        &mut season_engine,
        &xis,
        final_fixture.id,
        final_fixture.team1_id,
        final_fixture.team2_id,
        &mut rng,
    );
    let runner_up = if champion == final_fixture.team1_id { final_fixture.team2_id } else { final_fixture.team1_id };
    season_engine.complete_season(champion, runner_up);

    assert!(teams.iter().any(|t| t.id == champion));
    assert_ne!(champion, runner_up);
}

// ===========================================================================
// Test: persistence round-trip for career, teams, players, and fixtures
// ===========================================================================

#[test]
fn database_persists_career_teams_players_and_fixtures() {
    let db = Database::open(":memory:").expect("in-memory db should open");

    let career = db.insert_career("Integration Career").expect("insert career");
    assert_eq!(db.count_careers().unwrap(), 1);

    let mut teams = TeamGenerator::create_teams(career.id, 0);
    for team in teams.iter_mut() {
        team.id = db.insert_team(career.id, team).expect("insert team");
    }
    let loaded_teams = db.load_teams_for_career(career.id).expect("load teams");
    assert_eq!(loaded_teams.len(), 8);

    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut players = PlayerGenerator::generate_player_pool(&mut rng);
    for player in players.iter_mut() {
        player.id = db.insert_player(career.id, player).expect("insert player");
    }
    let loaded_players = db.load_players_for_career(career.id).expect("load players");
    assert_eq!(loaded_players.len(), players.len());

    let mut season = Season::new(0, career.id, 1);
    season.id = db.insert_season(&season).expect("insert season");

    let mut season_engine = SeasonEngine::new(season, teams.clone());
    season_engine.generate_league_fixtures(&mut rng);
    for fixture in season_engine.fixtures() {
        db.insert_fixture(fixture).expect("insert fixture");
    }

    let loaded_fixtures = db.load_fixtures_for_season(season_engine.season().id).expect("load fixtures");
    assert_eq!(loaded_fixtures.len(), 56);

    db.delete_career(career.id).expect("delete career should cascade");
    assert_eq!(db.count_careers().unwrap(), 0);
    assert!(db.load_teams_for_career(career.id).expect("load teams after delete").is_empty());
}

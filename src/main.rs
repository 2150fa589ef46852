// Cricket-core demo binary.
//
// Startup sequence:
// 1. Initialize tracing (log to file)
// 2. Load config
// 3. Open database
// 4. Create a career and generate its eight franchises
// 5. Generate the season's player pool
// 6. Run the auction (AI-only, all eight teams bid competitively)
// 7. Schedule the league fixtures and select each team's playing XI
// 8. Simulate the league stage, recording results and standings
// 9. Run the four-match playoff bracket to a champion
// 10. Log the final table and exit

use anyhow::Context;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use cricket_core::auction::AuctionEngine;
use cricket_core::config;
use cricket_core::db::Database;
use cricket_core::generate::{PlayerGenerator, TeamGenerator};
use cricket_core::match_engine::{self, Aggression};
use cricket_core::model::auction::{Auction, AuctionCategory};
use cricket_core::model::career::Season;
use cricket_core::model::player::Player;
use cricket_core::model::team::{Team, TeamId};
use cricket_core::season::SeasonEngine;
use cricket_core::session::{MatchSessionCache, TossDecision};

fn main() -> anyhow::Result<()> {
    init_tracing()?;
    info!("cricket-core starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "config loaded: salary_cap={}, squad {}-{}, max_overseas={}",
        config.game.salary_cap, config.game.min_squad_size, config.game.max_squad_size, config.game.max_overseas
    );

    // 3. Open database
    let db = Database::open(&config.db_path).context("failed to open database")?;
    info!("database opened at {}", config.db_path);

    let mut rng = ChaCha8Rng::seed_from_u64(rand::thread_rng().gen());

    // 4. Create a career and generate its eight franchises
    let career = db.insert_career("Demo Career").context("failed to create career")?;
    let user_team_index = 0;
    let mut teams = TeamGenerator::create_teams(career.id, user_team_index);
    for team in teams.iter_mut() {
        team.id = db.insert_team(career.id, team).context("failed to insert team")?;
    }
    info!("created career {} with {} franchises", career.id, teams.len());

    // 5. Generate the season's player pool
    let mut players = PlayerGenerator::generate_player_pool(&mut rng);
    for player in players.iter_mut() {
        player.id = db.insert_player(career.id, player).context("failed to insert player")?;
    }
    info!("generated a pool of {} players", players.len());

    // Season and auction rows
    let mut season = Season::new(0, career.id, 1);
    season.id = db.insert_season(&season).context("failed to insert season")?;

    let mut auction = Auction::new(0, season.id, config.game.salary_cap, players.len() as i32);
    auction.id = db.insert_auction(&auction).context("failed to insert auction")?;

    // 6. Run the auction (AI-only, all eight teams bid competitively)
    let mut auction_engine = AuctionEngine::new(auction, ChaCha8Rng::seed_from_u64(rng.gen()));
    auction_engine.initialize_auction(teams.clone(), players.clone());
    for team in &teams {
        if let Some(state) = auction_engine.team_state(team.id) {
            db.insert_team_auction_state(state).context("failed to insert team auction state")?;
        }
    }
    for entry in auction_engine.entries() {
        db.insert_auction_player_entry(entry).context("failed to insert auction player entry")?;
    }

    for category in [
        AuctionCategory::Marquee,
        AuctionCategory::Batsmen,
        AuctionCategory::Bowlers,
        AuctionCategory::AllRounders,
        AuctionCategory::WicketKeepers,
    ] {
        let results = auction_engine.auction_category_ai_only(category, None);
        for result in &results {
            for bid in &result.bid_history {
                db.record_bid(bid).context("failed to record bid")?;
            }
        }
    }
    auction_engine.complete_auction();
    for team in &teams {
        if let Some(state) = auction_engine.team_state(team.id) {
            db.save_team_auction_state(state).context("failed to save team auction state")?;
        }
    }

    let mut sold_count = 0;
    for entry in auction_engine.entries() {
        if entry.sold_to_team_id.is_none() {
            continue;
        }
        if let Some(player) = players.iter_mut().find(|p| p.id == entry.player_id) {
            player.team_id = entry.sold_to_team_id;
            player.sold_price = entry.sold_price;
            db.update_player(player.id, player).context("failed to update sold player")?;
            sold_count += 1;
        }
    }
    info!("auction complete: {} of {} players sold", sold_count, players.len());

    // Reflect the auction's remaining budgets onto the in-memory teams
    // before handing them to the season engine.
    for team in teams.iter_mut() {
        if let Some(state) = auction_engine.team_state(team.id) {
            team.remaining_budget = state.remaining_budget;
        }
    }

    // 7. Schedule the league fixtures and select each team's playing XI
    let mut season_engine = SeasonEngine::new(season, teams.clone());
    season_engine.generate_league_fixtures(&mut rng);
    for fixture in season_engine.fixtures() {
        db.insert_fixture(fixture).context("failed to insert fixture")?;
    }
    info!("scheduled {} league fixtures", season_engine.fixtures().len());

    let playing_xis = build_playing_xis(&teams, &players);
    let cache = MatchSessionCache::new();

    // 8. Simulate the league stage, recording results and standings
    while !season_engine.is_league_complete() {
        let fixture = match season_engine.next_fixture() {
            Some(f) => f.clone(),
            None => break,
        };
        simulate_fixture(&cache, &mut season_engine, &playing_xis, fixture.id, fixture.team1_id, fixture.team2_id, &mut rng);
    }

    for standing in season_engine.standings() {
        info!(
            "{}. team {} - P{} W{} L{} Pts{} NRR{:.3}",
            standing.position, standing.team_id, standing.played, standing.won, standing.lost, standing.points, standing.nrr
        );
    }

    // 9. Run the four-match playoff bracket to a champion
    let (q1_id, eliminator_id) = season_engine.generate_playoffs();
    let q1 = season_engine.fixtures().iter().find(|f| f.id == q1_id).unwrap().clone();
    let eliminator = season_engine.fixtures().iter().find(|f| f.id == eliminator_id).unwrap().clone();

    let q1_winner = simulate_fixture(&cache, &mut season_engine, &playing_xis, q1.id, q1.team1_id, q1.team2_id, &mut rng);
    let eliminator_winner =
        simulate_fixture(&cache, &mut season_engine, &playing_xis, eliminator.id, eliminator.team1_id, eliminator.team2_id, &mut rng);

    let q1_loser = if q1_winner == q1.team1_id { q1.team2_id } else { q1.team1_id };
    let q2_id = season_engine.generate_qualifier2(q1_loser, eliminator_winner);
    let q2 = season_engine.fixtures().iter().find(|f| f.id == q2_id).unwrap().clone();
    let q2_winner = simulate_fixture(&cache, &mut season_engine, &playing_xis, q2.id, q2.team1_id, q2.team2_id, &mut rng);

    let final_id = season_engine.generate_final(q1_winner, q2_winner);
    let final_fixture = season_engine.fixtures().iter().find(|f| f.id == final_id).unwrap().clone();
    let champion = simulate_fixture(
        &cache,
        &mut season_engine,
        &playing_xis,
        final_fixture.id,
        final_fixture.team1_id,
        final_fixture.team2_id,
        &mut rng,
    );
    let runner_up = if champion == final_fixture.team1_id { final_fixture.team2_id } else { final_fixture.team1_id };
    season_engine.complete_season(champion, runner_up);

    // 10. Log the final table and exit
    let champion_name = teams.iter().find(|t| t.id == champion).map(|t| t.name.as_str()).unwrap_or("unknown");
    info!("season complete: {} are champions", champion_name);

    Ok(())
}

/// Selects and caches each team's starting XI from its post-auction squad.
fn build_playing_xis(teams: &[Team], players: &[Player]) -> std::collections::HashMap<TeamId, Vec<Player>> {
    teams
        .iter()
        .map(|team| {
            let squad: Vec<Player> = players.iter().filter(|p| p.team_id == Some(team.id)).cloned().collect();
            (team.id, SeasonEngine::select_playing_xi(&squad))
        })
        .collect()
}

/// Runs one fixture end to end via the match session cache and records the
/// result against the season engine. Returns the winning team id (a tie
/// arbitrarily favours the team that batted first, since the playoff
/// bracket and NRR table have no representation for a drawn knockout).
fn simulate_fixture(
    cache: &MatchSessionCache,
    season_engine: &mut SeasonEngine,
    playing_xis: &std::collections::HashMap<TeamId, Vec<Player>>,
    fixture_id: u64,
    team1_id: TeamId,
    team2_id: TeamId,
    rng: &mut impl Rng,
) -> TeamId {
    let toss_winner = cache.do_toss(fixture_id, team1_id, team2_id, rng);
    let decision = if rng.gen_bool(0.5) { TossDecision::Bat } else { TossDecision::Bowl };

    let team1_xi = playing_xis.get(&team1_id).cloned().unwrap_or_default();
    let team2_xi = playing_xis.get(&team2_id).cloned().unwrap_or_default();

    cache.start_match(
        fixture_id,
        team1_id,
        team2_id,
        team1_xi,
        team2_xi,
        toss_winner,
        decision,
        None,
        match_engine::PitchDna::default(),
        rng.gen(),
    );
    cache.simulate_innings(fixture_id, Aggression::Balanced);
    cache.finalize_if_complete(fixture_id);
    let result = cache.take_completed(fixture_id).expect("simulate_innings ran the match to completion");

    let batting_first_id = match decision {
        TossDecision::Bat => toss_winner,
        TossDecision::Bowl if toss_winner == team1_id => team2_id,
        TossDecision::Bowl => team1_id,
    };
    let batting_second_id = if batting_first_id == team1_id { team2_id } else { team1_id };

    let margin = match (result.margin_runs, result.margin_wickets) {
        (Some(runs), _) => format!("won by {runs} runs"),
        (_, Some(wickets)) => format!("won by {wickets} wickets"),
        _ => "match tied".to_string(),
    };

    season_engine.record_match_result(
        fixture_id,
        result.winner_team_id,
        margin,
        batting_first_id,
        batting_second_id,
        result.innings1.total_runs,
        result.innings1.overs_faced(),
        result.innings2.total_runs,
        result.innings2.overs_faced(),
    );

    result.winner_team_id.unwrap_or(batting_first_id)
}

fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("cricket-core.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cricket_core=info,warn")))
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber).context("failed to set tracing subscriber")?;

    Ok(())
}

// SQLite persistence layer. One table per persisted entity from
// SPEC_FULL.md 3; InningsState is deliberately absent (it lives only in
// the in-memory match session cache, see session.rs).

use std::sync::Mutex;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::model::auction::{
    Auction, AuctionBid, AuctionCategory, AuctionPlayerEntry, AuctionPlayerStatus, AuctionStatus,
    TeamAuctionState,
};
use crate::model::career::{
    Career, CareerStatus, Fixture, FixtureStatus, FixtureType, Season, SeasonPhase,
    TeamSeasonStats,
};
use crate::model::player::Player;
use crate::model::team::Team;

/// SQLite-backed persistence for careers, teams, players, seasons,
/// fixtures, auctions, and their dependent rows.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) a SQLite database at `path` and ensure all tables
    /// exist. Pass `":memory:"` for an ephemeral in-memory database (useful
    /// for tests).
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database at {path}"))?;

        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .context("failed to enable foreign keys")?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS careers (
                id                    INTEGER PRIMARY KEY AUTOINCREMENT,
                name                  TEXT NOT NULL,
                status                TEXT NOT NULL,
                current_season_number INTEGER NOT NULL DEFAULT 1,
                user_team_id          INTEGER
            );

            CREATE TABLE IF NOT EXISTS teams (
                id               INTEGER PRIMARY KEY AUTOINCREMENT,
                career_id        INTEGER REFERENCES careers(id) ON DELETE CASCADE,
                name             TEXT NOT NULL,
                short_name       TEXT NOT NULL,
                city             TEXT NOT NULL,
                home_ground      TEXT NOT NULL,
                primary_color    TEXT NOT NULL,
                secondary_color  TEXT NOT NULL,
                budget           INTEGER NOT NULL,
                remaining_budget INTEGER NOT NULL,
                matches_played   INTEGER NOT NULL DEFAULT 0,
                wins             INTEGER NOT NULL DEFAULT 0,
                losses           INTEGER NOT NULL DEFAULT 0,
                no_results       INTEGER NOT NULL DEFAULT 0,
                points           INTEGER NOT NULL DEFAULT 0,
                net_run_rate     REAL NOT NULL DEFAULT 0.0,
                is_user_team     INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS players (
                id             INTEGER PRIMARY KEY AUTOINCREMENT,
                career_id      INTEGER REFERENCES careers(id) ON DELETE CASCADE,
                team_id        INTEGER REFERENCES teams(id),
                data           TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS seasons (
                id                     INTEGER PRIMARY KEY AUTOINCREMENT,
                career_id              INTEGER NOT NULL REFERENCES careers(id) ON DELETE CASCADE,
                season_number          INTEGER NOT NULL,
                phase                  TEXT NOT NULL,
                auction_completed      INTEGER NOT NULL DEFAULT 0,
                current_match_number   INTEGER NOT NULL DEFAULT 0,
                total_league_matches   INTEGER NOT NULL DEFAULT 56,
                champion_team_id       INTEGER,
                runner_up_team_id      INTEGER
            );

            CREATE TABLE IF NOT EXISTS fixtures (
                id             INTEGER PRIMARY KEY AUTOINCREMENT,
                season_id      INTEGER NOT NULL REFERENCES seasons(id) ON DELETE CASCADE,
                match_number   INTEGER NOT NULL,
                fixture_type   TEXT NOT NULL,
                team1_id       INTEGER NOT NULL,
                team2_id       INTEGER NOT NULL,
                venue          TEXT NOT NULL,
                status         TEXT NOT NULL,
                match_id       INTEGER,
                winner_id      INTEGER,
                result_summary TEXT
            );

            CREATE TABLE IF NOT EXISTS team_season_stats (
                season_id     INTEGER NOT NULL REFERENCES seasons(id) ON DELETE CASCADE,
                team_id       INTEGER NOT NULL,
                matches_played INTEGER NOT NULL DEFAULT 0,
                wins          INTEGER NOT NULL DEFAULT 0,
                losses        INTEGER NOT NULL DEFAULT 0,
                no_results    INTEGER NOT NULL DEFAULT 0,
                points        INTEGER NOT NULL DEFAULT 0,
                runs_scored   INTEGER NOT NULL DEFAULT 0,
                overs_faced   REAL NOT NULL DEFAULT 0.0,
                runs_conceded INTEGER NOT NULL DEFAULT 0,
                overs_bowled  REAL NOT NULL DEFAULT 0.0,
                PRIMARY KEY (season_id, team_id)
            );

            CREATE TABLE IF NOT EXISTS player_season_stats (
                season_id  INTEGER NOT NULL REFERENCES seasons(id) ON DELETE CASCADE,
                player_id  INTEGER NOT NULL,
                team_id    INTEGER NOT NULL,
                data       TEXT NOT NULL,
                PRIMARY KEY (season_id, player_id)
            );

            CREATE TABLE IF NOT EXISTS auctions (
                id                     INTEGER PRIMARY KEY AUTOINCREMENT,
                season_id              INTEGER NOT NULL REFERENCES seasons(id) ON DELETE CASCADE,
                status                 TEXT NOT NULL,
                current_player_id      INTEGER,
                current_bid            INTEGER NOT NULL DEFAULT 0,
                current_bidder_team_id INTEGER,
                salary_cap             INTEGER NOT NULL,
                min_squad_size         INTEGER NOT NULL,
                max_squad_size         INTEGER NOT NULL,
                max_overseas           INTEGER NOT NULL,
                players_sold           INTEGER NOT NULL DEFAULT 0,
                players_unsold         INTEGER NOT NULL DEFAULT 0,
                total_players          INTEGER NOT NULL DEFAULT 0,
                current_category       TEXT
            );

            CREATE TABLE IF NOT EXISTS auction_player_entries (
                auction_id      INTEGER NOT NULL REFERENCES auctions(id) ON DELETE CASCADE,
                player_id       INTEGER NOT NULL,
                auction_order   INTEGER NOT NULL,
                status          TEXT NOT NULL,
                category        TEXT NOT NULL,
                sold_to_team_id INTEGER,
                sold_price      INTEGER,
                auction_set     INTEGER NOT NULL DEFAULT 1,
                PRIMARY KEY (auction_id, player_id)
            );

            CREATE TABLE IF NOT EXISTS auction_bids (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                auction_id  INTEGER NOT NULL REFERENCES auctions(id) ON DELETE CASCADE,
                player_id   INTEGER NOT NULL,
                team_id     INTEGER NOT NULL,
                bid_amount  INTEGER NOT NULL,
                sequence    INTEGER NOT NULL,
                is_winning_bid INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS team_auction_states (
                auction_id       INTEGER NOT NULL REFERENCES auctions(id) ON DELETE CASCADE,
                team_id          INTEGER NOT NULL,
                remaining_budget INTEGER NOT NULL,
                total_players    INTEGER NOT NULL DEFAULT 0,
                overseas_players INTEGER NOT NULL DEFAULT 0,
                batsmen          INTEGER NOT NULL DEFAULT 0,
                bowlers          INTEGER NOT NULL DEFAULT 0,
                all_rounders     INTEGER NOT NULL DEFAULT 0,
                wicket_keepers   INTEGER NOT NULL DEFAULT 0,
                PRIMARY KEY (auction_id, team_id)
            );

            CREATE TABLE IF NOT EXISTS playing_xi (
                team_id   INTEGER NOT NULL,
                season_id INTEGER NOT NULL REFERENCES seasons(id) ON DELETE CASCADE,
                player_id INTEGER NOT NULL,
                position  INTEGER NOT NULL,
                PRIMARY KEY (team_id, season_id, player_id)
            );
            ",
        )
        .context("failed to create database schema")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    // -- Careers ----------------------------------------------------------

    pub fn insert_career(&self, name: &str) -> Result<Career> {
        let conn = self.conn.lock().expect("database mutex poisoned");
        conn.execute(
            "INSERT INTO careers (name, status, current_season_number) VALUES (?1, 'setup', 1)",
            params![name],
        )
        .context("failed to insert career")?;
        let id = conn.last_insert_rowid() as u64;
        Ok(Career {
            id,
            name: name.to_string(),
            status: CareerStatus::Setup,
            current_season_number: 1,
            user_team_id: None,
        })
    }

    pub fn count_careers(&self) -> Result<u32> {
        let conn = self.conn.lock().expect("database mutex poisoned");
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM careers", [], |row| row.get(0))
            .context("failed to count careers")?;
        Ok(count as u32)
    }

    /// Cascade-delete a career and every dependent row, in one transaction.
    /// Relies on `PRAGMA foreign_keys = ON` plus `ON DELETE CASCADE` on all
    /// child tables declared above.
    pub fn delete_career(&self, career_id: u64) -> Result<()> {
        let conn = self.conn.lock().expect("database mutex poisoned");
        conn.execute("DELETE FROM careers WHERE id = ?1", params![career_id])
            .context("failed to delete career")?;
        Ok(())
    }

    // -- Teams --------------------------------------------------------------

    pub fn insert_team(&self, career_id: u64, team: &Team) -> Result<u64> {
        let conn = self.conn.lock().expect("database mutex poisoned");
        conn.execute(
            "INSERT INTO teams (career_id, name, short_name, city, home_ground, primary_color,
                secondary_color, budget, remaining_budget, is_user_team)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                career_id,
                team.name,
                team.short_name,
                team.city,
                team.home_ground,
                team.primary_color,
                team.secondary_color,
                team.budget,
                team.remaining_budget,
                team.is_user_team as i64,
            ],
        )
        .context("failed to insert team")?;
        Ok(conn.last_insert_rowid() as u64)
    }

    pub fn load_teams_for_career(&self, career_id: u64) -> Result<Vec<Team>> {
        let conn = self.conn.lock().expect("database mutex poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, career_id, name, short_name, city, home_ground, primary_color,
                secondary_color, budget, remaining_budget, matches_played, wins, losses,
                no_results, points, net_run_rate, is_user_team
             FROM teams WHERE career_id = ?1 ORDER BY id",
        )?;
        let teams = stmt
            .query_map(params![career_id], |row| {
                Ok(Team {
                    id: row.get::<_, i64>(0)? as u64,
                    career_id: Some(row.get::<_, i64>(1)? as u64),
                    name: row.get(2)?,
                    short_name: row.get(3)?,
                    city: row.get(4)?,
                    home_ground: row.get(5)?,
                    primary_color: row.get(6)?,
                    secondary_color: row.get(7)?,
                    budget: row.get(8)?,
                    remaining_budget: row.get(9)?,
                    matches_played: row.get(10)?,
                    wins: row.get(11)?,
                    losses: row.get(12)?,
                    no_results: row.get(13)?,
                    points: row.get(14)?,
                    net_run_rate: row.get(15)?,
                    is_user_team: row.get::<_, i64>(16)? != 0,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("failed to map team rows")?;
        Ok(teams)
    }

    // -- Players --------------------------------------------------------------

    /// Players are stored as one JSON blob per row; the relational columns
    /// that matter for joins (career_id, team_id) are duplicated as plain
    /// columns so ownership queries don't require deserializing every row.
    pub fn insert_player(&self, career_id: u64, player: &Player) -> Result<u64> {
        let conn = self.conn.lock().expect("database mutex poisoned");
        let data = serde_json::to_string(player).context("failed to serialize player")?;
        conn.execute(
            "INSERT INTO players (career_id, team_id, data) VALUES (?1, ?2, ?3)",
            params![career_id, player.team_id, data],
        )
        .context("failed to insert player")?;
        Ok(conn.last_insert_rowid() as u64)
    }

    pub fn update_player(&self, player_id: u64, player: &Player) -> Result<()> {
        let conn = self.conn.lock().expect("database mutex poisoned");
        let data = serde_json::to_string(player).context("failed to serialize player")?;
        conn.execute(
            "UPDATE players SET team_id = ?1, data = ?2 WHERE id = ?3",
            params![player.team_id, data, player_id],
        )
        .context("failed to update player")?;
        Ok(())
    }

    pub fn load_players_for_career(&self, career_id: u64) -> Result<Vec<Player>> {
        let conn = self.conn.lock().expect("database mutex poisoned");
        let mut stmt =
            conn.prepare("SELECT data FROM players WHERE career_id = ?1 ORDER BY id")?;
        let players = stmt
            .query_map(params![career_id], |row| {
                let data: String = row.get(0)?;
                Ok(data)
            })?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("failed to read player rows")?;

        players
            .into_iter()
            .map(|data| serde_json::from_str(&data).context("failed to deserialize player"))
            .collect()
    }

    // -- Seasons / Fixtures -------------------------------------------------

    pub fn insert_season(&self, season: &Season) -> Result<u64> {
        let conn = self.conn.lock().expect("database mutex poisoned");
        conn.execute(
            "INSERT INTO seasons (career_id, season_number, phase, auction_completed,
                current_match_number, total_league_matches)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                season.career_id,
                season.season_number,
                phase_to_str(season.phase),
                season.auction_completed as i64,
                season.current_match_number,
                season.total_league_matches,
            ],
        )
        .context("failed to insert season")?;
        Ok(conn.last_insert_rowid() as u64)
    }

    pub fn insert_fixture(&self, fixture: &Fixture) -> Result<u64> {
        let conn = self.conn.lock().expect("database mutex poisoned");
        conn.execute(
            "INSERT INTO fixtures (season_id, match_number, fixture_type, team1_id, team2_id,
                venue, status, winner_id, result_summary)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                fixture.season_id,
                fixture.match_number,
                fixture_type_to_str(fixture.fixture_type),
                fixture.team1_id,
                fixture.team2_id,
                fixture.venue,
                fixture_status_to_str(fixture.status),
                fixture.winner_id,
                fixture.result_summary,
            ],
        )
        .context("failed to insert fixture")?;
        Ok(conn.last_insert_rowid() as u64)
    }

    pub fn update_fixture_result(
        &self,
        fixture_id: u64,
        status: FixtureStatus,
        winner_id: Option<u64>,
        result_summary: &str,
    ) -> Result<()> {
        let conn = self.conn.lock().expect("database mutex poisoned");
        conn.execute(
            "UPDATE fixtures SET status = ?1, winner_id = ?2, result_summary = ?3 WHERE id = ?4",
            params![
                fixture_status_to_str(status),
                winner_id,
                result_summary,
                fixture_id,
            ],
        )
        .context("failed to update fixture result")?;
        Ok(())
    }

    pub fn load_fixtures_for_season(&self, season_id: u64) -> Result<Vec<Fixture>> {
        let conn = self.conn.lock().expect("database mutex poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, season_id, match_number, fixture_type, team1_id, team2_id, venue,
                status, match_id, winner_id, result_summary
             FROM fixtures WHERE season_id = ?1 ORDER BY match_number",
        )?;
        let fixtures = stmt
            .query_map(params![season_id], |row| {
                Ok(Fixture {
                    id: row.get::<_, i64>(0)? as u64,
                    season_id: row.get::<_, i64>(1)? as u64,
                    match_number: row.get(2)?,
                    fixture_type: fixture_type_from_str(&row.get::<_, String>(3)?),
                    team1_id: row.get::<_, i64>(4)? as u64,
                    team2_id: row.get::<_, i64>(5)? as u64,
                    venue: row.get(6)?,
                    status: fixture_status_from_str(&row.get::<_, String>(7)?),
                    match_id: row.get::<_, Option<i64>>(8)?.map(|v| v as u64),
                    winner_id: row.get::<_, Option<i64>>(9)?.map(|v| v as u64),
                    result_summary: row.get(10)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("failed to map fixture rows")?;
        Ok(fixtures)
    }

    pub fn upsert_team_season_stats(&self, stats: &TeamSeasonStats) -> Result<()> {
        let conn = self.conn.lock().expect("database mutex poisoned");
        conn.execute(
            "INSERT INTO team_season_stats (season_id, team_id, matches_played, wins, losses,
                no_results, points, runs_scored, overs_faced, runs_conceded, overs_bowled)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
             ON CONFLICT(season_id, team_id) DO UPDATE SET
                matches_played = excluded.matches_played,
                wins = excluded.wins,
                losses = excluded.losses,
                no_results = excluded.no_results,
                points = excluded.points,
                runs_scored = excluded.runs_scored,
                overs_faced = excluded.overs_faced,
                runs_conceded = excluded.runs_conceded,
                overs_bowled = excluded.overs_bowled",
            params![
                stats.season_id,
                stats.team_id,
                stats.matches_played,
                stats.wins,
                stats.losses,
                stats.no_results,
                stats.points,
                stats.runs_scored,
                stats.overs_faced,
                stats.runs_conceded,
                stats.overs_bowled,
            ],
        )
        .context("failed to upsert team season stats")?;
        Ok(())
    }

    pub fn load_team_season_stats(&self, season_id: u64) -> Result<Vec<TeamSeasonStats>> {
        let conn = self.conn.lock().expect("database mutex poisoned");
        let mut stmt = conn.prepare(
            "SELECT season_id, team_id, matches_played, wins, losses, no_results, points,
                runs_scored, overs_faced, runs_conceded, overs_bowled
             FROM team_season_stats WHERE season_id = ?1",
        )?;
        let rows = stmt
            .query_map(params![season_id], |row| {
                Ok(TeamSeasonStats {
                    season_id: row.get::<_, i64>(0)? as u64,
                    team_id: row.get::<_, i64>(1)? as u64,
                    matches_played: row.get(2)?,
                    wins: row.get(3)?,
                    losses: row.get(4)?,
                    no_results: row.get(5)?,
                    points: row.get(6)?,
                    runs_scored: row.get(7)?,
                    overs_faced: row.get(8)?,
                    runs_conceded: row.get(9)?,
                    overs_bowled: row.get(10)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("failed to map team season stats rows")?;
        Ok(rows)
    }

    // -- Auction --------------------------------------------------------------

    pub fn insert_auction(&self, auction: &Auction) -> Result<u64> {
        let conn = self.conn.lock().expect("database mutex poisoned");
        conn.execute(
            "INSERT INTO auctions (season_id, status, current_bid, salary_cap, min_squad_size,
                max_squad_size, max_overseas, total_players)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                auction.season_id,
                auction_status_to_str(auction.status),
                auction.current_bid,
                auction.salary_cap,
                auction.min_squad_size,
                auction.max_squad_size,
                auction.max_overseas,
                auction.total_players,
            ],
        )
        .context("failed to insert auction")?;
        Ok(conn.last_insert_rowid() as u64)
    }

    pub fn insert_team_auction_state(&self, state: &TeamAuctionState) -> Result<()> {
        let conn = self.conn.lock().expect("database mutex poisoned");
        conn.execute(
            "INSERT INTO team_auction_states (auction_id, team_id, remaining_budget)
             VALUES (?1, ?2, ?3)",
            params![state.auction_id, state.team_id, state.remaining_budget],
        )
        .context("failed to insert team auction state")?;
        Ok(())
    }

    pub fn save_team_auction_state(&self, state: &TeamAuctionState) -> Result<()> {
        let conn = self.conn.lock().expect("database mutex poisoned");
        conn.execute(
            "UPDATE team_auction_states SET remaining_budget = ?1, total_players = ?2,
                overseas_players = ?3, batsmen = ?4, bowlers = ?5, all_rounders = ?6,
                wicket_keepers = ?7
             WHERE auction_id = ?8 AND team_id = ?9",
            params![
                state.remaining_budget,
                state.total_players,
                state.overseas_players,
                state.batsmen,
                state.bowlers,
                state.all_rounders,
                state.wicket_keepers,
                state.auction_id,
                state.team_id,
            ],
        )
        .context("failed to save team auction state")?;
        Ok(())
    }

    pub fn insert_auction_player_entry(&self, entry: &AuctionPlayerEntry) -> Result<()> {
        let conn = self.conn.lock().expect("database mutex poisoned");
        conn.execute(
            "INSERT INTO auction_player_entries (auction_id, player_id, auction_order, status,
                category, auction_set)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                entry.auction_id,
                entry.player_id,
                entry.auction_order,
                entry_status_to_str(entry.status),
                category_to_str(entry.category),
                entry.auction_set,
            ],
        )
        .context("failed to insert auction player entry")?;
        Ok(())
    }

    pub fn record_bid(&self, bid: &AuctionBid) -> Result<()> {
        let conn = self.conn.lock().expect("database mutex poisoned");
        conn.execute(
            "INSERT INTO auction_bids (auction_id, player_id, team_id, bid_amount, sequence,
                is_winning_bid)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                bid.auction_id,
                bid.player_id,
                bid.team_id,
                bid.bid_amount,
                bid.sequence,
                bid.is_winning_bid as i64,
            ],
        )
        .context("failed to record bid")?;
        Ok(())
    }

    /// Sum of sold prices across Sold entries for an auction — used by the
    /// budget-conservation property in SPEC_FULL.md 8.
    pub fn total_sold_price(&self, auction_id: u64) -> Result<i64> {
        let conn = self.conn.lock().expect("database mutex poisoned");
        let total: Option<i64> = conn
            .query_row(
                "SELECT SUM(sold_price) FROM auction_player_entries
                 WHERE auction_id = ?1 AND status = 'sold'",
                params![auction_id],
                |row| row.get(0),
            )
            .optional()
            .context("failed to sum sold prices")?
            .flatten();
        Ok(total.unwrap_or(0))
    }
}

fn phase_to_str(phase: SeasonPhase) -> &'static str {
    match phase {
        SeasonPhase::NotStarted => "not_started",
        SeasonPhase::Auction => "auction",
        SeasonPhase::LeagueStage => "league_stage",
        SeasonPhase::Playoffs => "playoffs",
        SeasonPhase::Completed => "completed",
    }
}

fn fixture_type_to_str(t: FixtureType) -> &'static str {
    match t {
        FixtureType::League => "league",
        FixtureType::Qualifier1 => "qualifier_1",
        FixtureType::Eliminator => "eliminator",
        FixtureType::Qualifier2 => "qualifier_2",
        FixtureType::Final => "final",
    }
}

fn fixture_type_from_str(s: &str) -> FixtureType {
    match s {
        "qualifier_1" => FixtureType::Qualifier1,
        "eliminator" => FixtureType::Eliminator,
        "qualifier_2" => FixtureType::Qualifier2,
        "final" => FixtureType::Final,
        _ => FixtureType::League,
    }
}

fn fixture_status_to_str(s: FixtureStatus) -> &'static str {
    match s {
        FixtureStatus::Scheduled => "scheduled",
        FixtureStatus::InProgress => "in_progress",
        FixtureStatus::Completed => "completed",
        FixtureStatus::Abandoned => "abandoned",
    }
}

fn fixture_status_from_str(s: &str) -> FixtureStatus {
    match s {
        "in_progress" => FixtureStatus::InProgress,
        "completed" => FixtureStatus::Completed,
        "abandoned" => FixtureStatus::Abandoned,
        _ => FixtureStatus::Scheduled,
    }
}

fn auction_status_to_str(s: AuctionStatus) -> &'static str {
    match s {
        AuctionStatus::NotStarted => "not_started",
        AuctionStatus::InProgress => "in_progress",
        AuctionStatus::Paused => "paused",
        AuctionStatus::Completed => "completed",
    }
}

fn entry_status_to_str(s: AuctionPlayerStatus) -> &'static str {
    match s {
        AuctionPlayerStatus::Available => "available",
        AuctionPlayerStatus::InBidding => "in_bidding",
        AuctionPlayerStatus::Sold => "sold",
        AuctionPlayerStatus::Unsold => "unsold",
    }
}

fn category_to_str(c: AuctionCategory) -> &'static str {
    match c {
        AuctionCategory::Marquee => "marquee",
        AuctionCategory::Batsmen => "batsmen",
        AuctionCategory::Bowlers => "bowlers",
        AuctionCategory::AllRounders => "all_rounders",
        AuctionCategory::WicketKeepers => "wicket_keepers",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::career::SeasonPhase;

    fn test_db() -> Database {
        Database::open(":memory:").expect("in-memory database should open")
    }

    #[test]
    fn open_creates_all_tables() {
        let db = test_db();
        let conn = db.conn.lock().unwrap();
        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();

        for expected in [
            "careers",
            "teams",
            "players",
            "seasons",
            "fixtures",
            "team_season_stats",
            "player_season_stats",
            "auctions",
            "auction_player_entries",
            "auction_bids",
            "team_auction_states",
            "playing_xi",
        ] {
            assert!(tables.contains(&expected.to_string()), "missing table {expected}");
        }
    }

    #[test]
    fn insert_and_delete_career_cascades() {
        let db = test_db();
        let career = db.insert_career("Test Career").unwrap();

        let team = Team {
            id: 0,
            career_id: Some(career.id),
            name: "Test Team".into(),
            short_name: "TT".into(),
            city: "Testville".into(),
            home_ground: "Test Ground".into(),
            primary_color: "#000000".into(),
            secondary_color: "#FFFFFF".into(),
            budget: 900_000_000,
            remaining_budget: 900_000_000,
            matches_played: 0,
            wins: 0,
            losses: 0,
            no_results: 0,
            points: 0,
            net_run_rate: 0.0,
            is_user_team: true,
        };
        db.insert_team(career.id, &team).unwrap();

        let season = Season::new(0, career.id, 1);
        let season_id = db.insert_season(&season).unwrap();
        assert!(season_id > 0);

        assert_eq!(db.load_teams_for_career(career.id).unwrap().len(), 1);

        db.delete_career(career.id).unwrap();
        assert_eq!(db.load_teams_for_career(career.id).unwrap().len(), 0);
    }

    #[test]
    fn season_phase_round_trips() {
        assert_eq!(phase_to_str(SeasonPhase::LeagueStage), "league_stage");
    }

    #[test]
    fn total_sold_price_is_zero_with_no_entries() {
        let db = test_db();
        let career = db.insert_career("C").unwrap();
        let season = Season::new(0, career.id, 1);
        let season_id = db.insert_season(&season).unwrap();
        let auction = Auction::new(0, season_id, 900_000_000, 0);
        let auction_id = db.insert_auction(&auction).unwrap();
        assert_eq!(db.total_sold_price(auction_id).unwrap(), 0);
    }
}

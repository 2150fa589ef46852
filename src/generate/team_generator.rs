// Materialises the fixed 8-franchise set for a new career. Grounded on
// generators/team_generator.py; franchise data itself lives in
// model::team::FRANCHISE_TEMPLATES.

use crate::model::career::CareerId;
use crate::model::team::{Team, FRANCHISE_TEMPLATES};

pub struct TeamGenerator;

impl TeamGenerator {
    /// Creates all 8 franchise teams for a career. `user_team_index` (0-7)
    /// selects which franchise the user manages; every other team is
    /// AI-controlled for the auction and season engines.
    pub fn create_teams(career_id: CareerId, user_team_index: usize) -> Vec<Team> {
        FRANCHISE_TEMPLATES
            .iter()
            .enumerate()
            .map(|(i, tpl)| Team {
                id: 0,
                career_id: Some(career_id),
                name: tpl.name.to_string(),
                short_name: tpl.short_name.to_string(),
                city: tpl.city.to_string(),
                home_ground: tpl.home_ground.to_string(),
                primary_color: tpl.primary_color.to_string(),
                secondary_color: tpl.secondary_color.to_string(),
                budget: crate::model::team::DEFAULT_TEAM_BUDGET,
                remaining_budget: crate::model::team::DEFAULT_TEAM_BUDGET,
                matches_played: 0,
                wins: 0,
                losses: 0,
                no_results: 0,
                points: 0,
                net_run_rate: 0.0,
                is_user_team: i == user_team_index,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_exactly_eight_teams_with_one_user_team() {
        let teams = TeamGenerator::create_teams(1, 3);
        assert_eq!(teams.len(), 8);
        assert_eq!(teams.iter().filter(|t| t.is_user_team).count(), 1);
        assert!(teams[3].is_user_team);
        assert_eq!(teams[3].name, "Kolkata Knights");
    }

    #[test]
    fn every_team_starts_with_full_budget() {
        let teams = TeamGenerator::create_teams(1, 0);
        for team in &teams {
            assert_eq!(team.budget, 900_000_000);
            assert_eq!(team.remaining_budget, team.budget);
        }
    }
}

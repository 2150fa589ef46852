// PlayingXI: a team's eleven selected players for one season fixture.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

use super::career::SeasonId;
use super::player::{Player, PlayerId, PlayerRole};
use super::team::TeamId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayingXIEntry {
    pub team_id: TeamId,
    pub season_id: SeasonId,
    pub player_id: PlayerId,
    /// Batting order position, 1-11.
    pub position: i32,
}

/// A validated eleven, ordered by batting position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayingXI {
    pub team_id: TeamId,
    pub season_id: SeasonId,
    pub entries: Vec<PlayingXIEntry>,
}

impl PlayingXI {
    pub fn is_valid(&self) -> bool {
        if self.entries.len() != 11 {
            return false;
        }
        let mut positions: Vec<i32> = self.entries.iter().map(|e| e.position).collect();
        positions.sort_unstable();
        positions == (1..=11).collect::<Vec<i32>>()
    }

    /// Checks composition against selection rules: exactly 11, at least one
    /// wicket-keeper, at most 4 overseas, and a bowling attack of either 5
    /// bowlers or 4 bowlers plus an all-rounder. `roster` must contain every
    /// player referenced by `self.entries`.
    pub fn validate(&self, roster: &[Player]) -> Result<(), CoreError> {
        if !self.is_valid() {
            return Err(CoreError::ValidationFailure {
                field: "playing_xi.entries".to_string(),
                message: format!("must select exactly 11 players with batting positions 1..11, got {}", self.entries.len()),
            });
        }

        let selected: Vec<&Player> = self
            .entries
            .iter()
            .map(|e| {
                roster
                    .iter()
                    .find(|p| p.id == e.player_id)
                    .ok_or_else(|| CoreError::NotFound { entity: "Player", id: e.player_id })
            })
            .collect::<Result<_, _>>()?;

        let wk_count = selected.iter().filter(|p| p.role == PlayerRole::WicketKeeper).count();
        if wk_count == 0 {
            return Err(CoreError::ValidationFailure {
                field: "playing_xi.wicket_keepers".to_string(),
                message: "must include at least 1 wicket keeper".to_string(),
            });
        }

        let overseas_count = selected.iter().filter(|p| p.is_overseas).count();
        if overseas_count > 4 {
            return Err(CoreError::ValidationFailure {
                field: "playing_xi.overseas".to_string(),
                message: format!("max 4 overseas players allowed, got {overseas_count}"),
            });
        }

        let bowler_count = selected.iter().filter(|p| p.role == PlayerRole::Bowler).count();
        let ar_count = selected.iter().filter(|p| p.role == PlayerRole::AllRounder).count();
        if !(bowler_count >= 5 || (bowler_count >= 4 && ar_count >= 1)) {
            return Err(CoreError::ValidationFailure {
                field: "playing_xi.bowling_attack".to_string(),
                message: format!(
                    "need 5 bowlers or 4 bowlers + 1 all-rounder, got {bowler_count} bowlers, {ar_count} all-rounders"
                ),
            });
        }

        Ok(())
    }

    pub fn player_ids(&self) -> Vec<PlayerId> {
        let mut sorted = self.entries.clone();
        sorted.sort_by_key(|e| e.position);
        sorted.into_iter().map(|e| e.player_id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::player::{BatterDNA, BattingIntent, BattingStyle, BowlingType};

    fn test_player(id: PlayerId, role: PlayerRole, is_overseas: bool) -> Player {
        Player {
            id,
            name: format!("Player {id}"),
            age: 25,
            nationality: if is_overseas { "Australia".into() } else { "India".into() },
            is_overseas,
            role,
            batting_style: BattingStyle::RightHanded,
            bowling_type: BowlingType::None,
            batting: 50,
            bowling: 50,
            fielding: 50,
            fitness: 50,
            power: 50,
            technique: 50,
            running: 50,
            pace_or_spin: 0,
            accuracy: 0,
            variation: 0,
            temperament: 50,
            consistency: 50,
            form: 1.0,
            traits: vec![],
            batting_intent: BattingIntent::Accumulator,
            batter_dna: BatterDNA {
                vs_pace: 50,
                vs_bounce: 50,
                vs_spin: 50,
                vs_deception: 50,
                off_side: 50,
                leg_side: 50,
                power: 50,
                weaknesses: vec![],
            },
            bowler_dna: None,
            base_price: 2_000_000,
            sold_price: None,
            team_id: Some(1),
        }
    }

    fn entries(player_ids: &[PlayerId]) -> Vec<PlayingXIEntry> {
        player_ids
            .iter()
            .enumerate()
            .map(|(i, &player_id)| PlayingXIEntry { team_id: 1, season_id: 1, player_id, position: i as i32 + 1 })
            .collect()
    }

    /// 1 keeper, 4 batsmen, 1 all-rounder, 5 bowlers, no overseas.
    fn valid_roster() -> Vec<Player> {
        let mut roster = vec![test_player(1, PlayerRole::WicketKeeper, false)];
        roster.extend((2..=5).map(|id| test_player(id, PlayerRole::Batsman, false)));
        roster.push(test_player(6, PlayerRole::AllRounder, false));
        roster.extend((7..=11).map(|id| test_player(id, PlayerRole::Bowler, false)));
        roster
    }

    #[test]
    fn validate_accepts_a_balanced_xi() {
        let roster = valid_roster();
        let xi = PlayingXI { team_id: 1, season_id: 1, entries: entries(&(1..=11).collect::<Vec<_>>()) };
        assert!(xi.validate(&roster).is_ok());
    }

    #[test]
    fn validate_rejects_missing_wicket_keeper() {
        let mut roster = valid_roster();
        roster[0].role = PlayerRole::Batsman;
        let xi = PlayingXI { team_id: 1, season_id: 1, entries: entries(&(1..=11).collect::<Vec<_>>()) };
        let err = xi.validate(&roster).unwrap_err();
        assert!(matches!(err, CoreError::ValidationFailure { field, .. } if field == "playing_xi.wicket_keepers"));
    }

    #[test]
    fn validate_rejects_more_than_four_overseas() {
        let mut roster = valid_roster();
        for player in roster.iter_mut().take(5) {
            player.is_overseas = true;
        }
        let xi = PlayingXI { team_id: 1, season_id: 1, entries: entries(&(1..=11).collect::<Vec<_>>()) };
        let err = xi.validate(&roster).unwrap_err();
        assert!(matches!(err, CoreError::ValidationFailure { field, .. } if field == "playing_xi.overseas"));
    }

    #[test]
    fn validate_rejects_thin_bowling_attack() {
        let mut roster = valid_roster();
        roster[6].role = PlayerRole::Batsman; // drops to 4 bowlers, 1 all-rounder... still ok
        roster[5].role = PlayerRole::Batsman; // drops the all-rounder too: 4 bowlers, 0 all-rounders
        let xi = PlayingXI { team_id: 1, season_id: 1, entries: entries(&(1..=11).collect::<Vec<_>>()) };
        let err = xi.validate(&roster).unwrap_err();
        assert!(matches!(err, CoreError::ValidationFailure { field, .. } if field == "playing_xi.bowling_attack"));
    }

    #[test]
    fn validate_rejects_wrong_entry_count() {
        let roster = valid_roster();
        let xi = PlayingXI { team_id: 1, season_id: 1, entries: entries(&(1..=10).collect::<Vec<_>>()) };
        let err = xi.validate(&roster).unwrap_err();
        assert!(matches!(err, CoreError::ValidationFailure { field, .. } if field == "playing_xi.entries"));
    }
}

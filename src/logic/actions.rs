//! Every mutating tournament operation as one tagged type.

use crate::logic::fixtures::generate_fixtures;
use crate::logic::roster::parse_name_list;
use crate::logic::standings::{parse_goals, reopen_match, submit_result};
use crate::logic::teams::form_tournament_teams;
use crate::models::{MatchId, PlayerId, Tournament, TournamentError};
use rand::Rng;
use serde::Deserialize;
use std::collections::HashMap;

/// A mutating operation on one tournament, as sent by a client.
///
/// Serialized with an `action` tag, e.g. `{"action": "submit_result", "match_id": "...",
/// "team_1_goals": 2, "team_2_goals": 1}`.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TournamentAction {
    /// Comma- or newline-separated names.
    AddPlayers { names: String },
    RemovePlayer { player_id: PlayerId },
    /// Team name -> player names.
    AssignPlayers { teams: HashMap<String, Vec<String>> },
    FormTeams,
    ClearTeams,
    GenerateFixtures,
    ClearFixtures,
    SubmitResult {
        match_id: MatchId,
        team_1_goals: i64,
        team_2_goals: i64,
    },
    ReopenMatch { match_id: MatchId },
    ClearData,
}

impl TournamentAction {
    /// Apply the action. On error the tournament is unchanged.
    pub fn apply<R: Rng + ?Sized>(
        self,
        tournament: &mut Tournament,
        rng: &mut R,
    ) -> Result<(), TournamentError> {
        match self {
            TournamentAction::AddPlayers { names } => {
                let names = parse_name_list(&names)?;
                let added = tournament.add_players(&names)?;
                log::info!("Tournament {}: added {} players", tournament.id, added.len());
                Ok(())
            }
            TournamentAction::RemovePlayer { player_id } => tournament.remove_player(player_id),
            TournamentAction::AssignPlayers { teams } => tournament.assign_players(&teams),
            TournamentAction::FormTeams => form_tournament_teams(tournament, rng),
            TournamentAction::ClearTeams => {
                tournament.clear_teams();
                Ok(())
            }
            TournamentAction::GenerateFixtures => generate_fixtures(tournament, rng),
            TournamentAction::ClearFixtures => {
                tournament.clear_fixtures();
                Ok(())
            }
            TournamentAction::SubmitResult {
                match_id,
                team_1_goals,
                team_2_goals,
            } => {
                let team_1_goals = parse_goals(team_1_goals)?;
                let team_2_goals = parse_goals(team_2_goals)?;
                submit_result(tournament, match_id, team_1_goals, team_2_goals)
            }
            TournamentAction::ReopenMatch { match_id } => reopen_match(tournament, match_id),
            TournamentAction::ClearData => {
                tournament.clear_data();
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn deserializes_tagged_actions() {
        let a: TournamentAction = serde_json::from_str(r#"{"action": "form_teams"}"#).unwrap();
        assert_eq!(a, TournamentAction::FormTeams);

        let a: TournamentAction =
            serde_json::from_str(r#"{"action": "add_players", "names": "Ada, Bob"}"#).unwrap();
        assert_eq!(
            a,
            TournamentAction::AddPlayers {
                names: "Ada, Bob".into()
            }
        );
    }

    #[test]
    fn negative_goals_are_rejected_before_lookup() {
        let mut t = Tournament::new();
        let action = TournamentAction::SubmitResult {
            match_id: uuid::Uuid::new_v4(),
            team_1_goals: -1,
            team_2_goals: 0,
        };
        assert_eq!(
            action.apply(&mut t, &mut StdRng::seed_from_u64(0)),
            Err(TournamentError::NegativeGoals)
        );
    }
}

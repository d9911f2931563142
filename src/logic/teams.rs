//! Team formation: random pairs of players, named "Team 1", "Team 2", ...

use crate::models::{PlayerId, Team, Tournament, TournamentError};
use rand::seq::SliceRandom;
use rand::Rng;

/// A team to be created, before it has an id.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TeamDraft {
    pub name: String,
    pub members: Vec<PlayerId>,
}

/// Shuffle players into teams of two; an odd player out forms a final team of one.
pub fn form_teams<R: Rng + ?Sized>(player_ids: &[PlayerId], rng: &mut R) -> Vec<TeamDraft> {
    let mut shuffled = player_ids.to_vec();
    shuffled.shuffle(rng);
    shuffled
        .chunks(2)
        .enumerate()
        .map(|(i, members)| TeamDraft {
            name: format!("Team {}", i + 1),
            members: members.to_vec(),
        })
        .collect()
}

/// Re-form the tournament's teams from all players.
///
/// Existing teams, fixtures and records are cleared first, so every player is unassigned
/// when the draw happens.
pub fn form_tournament_teams<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    rng: &mut R,
) -> Result<(), TournamentError> {
    if tournament.players.is_empty() {
        return Err(TournamentError::NoPlayers);
    }
    tournament.clear_teams();

    let player_ids: Vec<PlayerId> = tournament.players.iter().map(|p| p.id).collect();
    for draft in form_teams(&player_ids, rng) {
        let team = Team::new(draft.name);
        for p in tournament
            .players
            .iter_mut()
            .filter(|p| draft.members.contains(&p.id))
        {
            p.assign_to(team.id);
        }
        tournament.teams.push(team);
    }
    log::info!(
        "Tournament {}: formed {} teams from {} players",
        tournament.id,
        tournament.teams.len(),
        tournament.players.len()
    );
    Ok(())
}

//! Read model of a tournament for display: roster, teams, standings, fixtures by matchday.

use crate::logic::standings::{standings, StandingRow};
use crate::models::{GameMatch, MatchId, MatchStatus, Player, TeamId, Tournament, TournamentId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Clone, Debug, Serialize)]
pub struct TeamWithMembers {
    pub id: TeamId,
    pub name: String,
    pub players: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct MatchView {
    pub id: MatchId,
    pub team_1: String,
    pub team_2: String,
    #[serde(flatten)]
    pub status: MatchStatus,
}

#[derive(Clone, Debug, Serialize)]
pub struct MatchdayView {
    pub matchday: u32,
    pub matches: Vec<MatchView>,
}

#[derive(Clone, Debug, Serialize)]
pub struct TournamentOverview {
    pub id: TournamentId,
    pub created_at: DateTime<Utc>,
    pub players: Vec<Player>,
    pub teams: Vec<TeamWithMembers>,
    pub standings: Vec<StandingRow>,
    pub matchdays: Vec<MatchdayView>,
}

fn team_name(tournament: &Tournament, id: TeamId) -> String {
    tournament
        .team(id)
        .map(|t| t.name.clone())
        .unwrap_or_else(|| "?".to_string())
}

fn match_view(tournament: &Tournament, m: &GameMatch) -> MatchView {
    MatchView {
        id: m.id,
        team_1: team_name(tournament, m.team_1),
        team_2: team_name(tournament, m.team_2),
        status: m.status,
    }
}

/// Matches grouped by matchday in ascending order; within a day, scheduling order.
pub fn matchdays(tournament: &Tournament) -> Vec<MatchdayView> {
    let mut by_day: BTreeMap<u32, Vec<MatchView>> = BTreeMap::new();
    for m in &tournament.matches {
        by_day
            .entry(m.matchday)
            .or_default()
            .push(match_view(tournament, m));
    }
    by_day
        .into_iter()
        .map(|(matchday, matches)| MatchdayView { matchday, matches })
        .collect()
}

pub fn overview(tournament: &Tournament) -> TournamentOverview {
    let teams = tournament
        .teams
        .iter()
        .map(|t| TeamWithMembers {
            id: t.id,
            name: t.name.clone(),
            players: tournament.members_of(t.id).map(|p| p.name.clone()).collect(),
        })
        .collect();
    TournamentOverview {
        id: tournament.id,
        created_at: tournament.created_at,
        players: tournament.players.clone(),
        teams,
        standings: standings(tournament),
        matchdays: matchdays(tournament),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Team;

    #[test]
    fn matchdays_are_ascending_and_grouped() {
        let mut t = Tournament::new();
        t.teams = (1..=4).map(|i| Team::new(format!("Team {i}"))).collect();
        let ids: Vec<TeamId> = t.teams.iter().map(|t| t.id).collect();
        t.matches = vec![
            GameMatch::new(ids[0], ids[1], 2),
            GameMatch::new(ids[2], ids[3], 1),
            GameMatch::new(ids[0], ids[2], 2),
        ];

        let days = matchdays(&t);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].matchday, 1);
        assert_eq!(days[0].matches[0].team_1, "Team 3");
        assert_eq!(days[1].matches.len(), 2);
        assert_eq!(days[1].matches[1].team_2, "Team 3");
    }
}

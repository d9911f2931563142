//! Result processing and the standings table.

use crate::models::{
    GameMatch, MatchId, MatchScore, MatchStatus, TeamId, TeamRecord, Tournament, TournamentError,
};
use chrono::Utc;
use serde::Serialize;
use std::collections::HashMap;

/// Record deltas for both sides of one result, plus the winner (`None` for a draw).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ScoredResult {
    pub team_1: TeamRecord,
    pub team_2: TeamRecord,
    pub winner: Option<TeamId>,
}

fn side(own: u32, other: u32) -> TeamRecord {
    let base = TeamRecord {
        goals_for: own,
        goals_against: other,
        ..Default::default()
    };
    match own.cmp(&other) {
        std::cmp::Ordering::Greater => TeamRecord {
            points: 3,
            wins: 1,
            ..base
        },
        std::cmp::Ordering::Less => TeamRecord { losses: 1, ..base },
        std::cmp::Ordering::Equal => TeamRecord {
            points: 1,
            draws: 1,
            ..base
        },
    }
}

/// Score a result: win 3 points, draw 1, loss 0; goals for/against from each side's view.
pub fn score_result(
    team_1: TeamId,
    team_2: TeamId,
    team_1_goals: u32,
    team_2_goals: u32,
) -> Result<ScoredResult, TournamentError> {
    if team_1 == team_2 {
        return Err(TournamentError::SameTeam);
    }
    let winner = match team_1_goals.cmp(&team_2_goals) {
        std::cmp::Ordering::Greater => Some(team_1),
        std::cmp::Ordering::Less => Some(team_2),
        std::cmp::Ordering::Equal => None,
    };
    Ok(ScoredResult {
        team_1: side(team_1_goals, team_2_goals),
        team_2: side(team_2_goals, team_1_goals),
        winner,
    })
}

/// Most goals one side may score in a single match.
pub const MAX_GOALS: u32 = 999;

fn check_goals(goals: u32) -> Result<u32, TournamentError> {
    if goals > MAX_GOALS {
        return Err(TournamentError::GoalsOutOfRange {
            goals: i64::from(goals),
            max: MAX_GOALS,
        });
    }
    Ok(goals)
}

/// Goal counts arrive signed from the outside: negative and over-[`MAX_GOALS`] values are
/// rejected separately.
pub fn parse_goals(goals: i64) -> Result<u32, TournamentError> {
    if goals < 0 {
        return Err(TournamentError::NegativeGoals);
    }
    match u32::try_from(goals) {
        Ok(goals) => check_goals(goals),
        Err(_) => Err(TournamentError::GoalsOutOfRange {
            goals,
            max: MAX_GOALS,
        }),
    }
}

fn scored_match(m: &GameMatch) -> Option<Result<ScoredResult, TournamentError>> {
    m.score()
        .map(|s| score_result(m.team_1, m.team_2, s.team_1_goals, s.team_2_goals))
}

/// Record a result on a pending match and update both team records.
///
/// Both new records are computed before anything is written, so a failed lookup leaves
/// the tournament untouched.
pub fn submit_result(
    tournament: &mut Tournament,
    match_id: MatchId,
    team_1_goals: u32,
    team_2_goals: u32,
) -> Result<(), TournamentError> {
    let m_idx = tournament.match_index(match_id)?;
    let m = &tournament.matches[m_idx];
    if m.is_completed() {
        return Err(TournamentError::MatchAlreadyCompleted(match_id));
    }
    check_goals(team_1_goals)?;
    check_goals(team_2_goals)?;
    let scored = score_result(m.team_1, m.team_2, team_1_goals, team_2_goals)?;
    let (team_1, team_2) = (m.team_1, m.team_2);
    let t1_idx = tournament.team_index(team_1)?;
    let t2_idx = tournament.team_index(team_2)?;

    let team_1_record = tournament.teams[t1_idx]
        .record
        .checked_add(&scored.team_1)
        .ok_or(TournamentError::RecordOverflow(team_1))?;
    let team_2_record = tournament.teams[t2_idx]
        .record
        .checked_add(&scored.team_2)
        .ok_or(TournamentError::RecordOverflow(team_2))?;

    tournament.teams[t1_idx].record = team_1_record;
    tournament.teams[t2_idx].record = team_2_record;
    tournament.matches[m_idx].status = MatchStatus::Completed(MatchScore {
        team_1_goals,
        team_2_goals,
        winner: scored.winner,
        completed_at: Utc::now(),
    });
    log::info!(
        "Tournament {}: match {} finished {}-{}",
        tournament.id,
        match_id,
        team_1_goals,
        team_2_goals
    );
    Ok(())
}

/// Take the result off a completed match: the match goes back to pending and its deltas
/// are subtracted from both records.
pub fn reopen_match(tournament: &mut Tournament, match_id: MatchId) -> Result<(), TournamentError> {
    let m_idx = tournament.match_index(match_id)?;
    let m = &tournament.matches[m_idx];
    let scored = scored_match(m).ok_or(TournamentError::MatchNotCompleted(match_id))??;
    let (team_1, team_2) = (m.team_1, m.team_2);
    let t1_idx = tournament.team_index(team_1)?;
    let t2_idx = tournament.team_index(team_2)?;

    let team_1_record = tournament.teams[t1_idx]
        .record
        .checked_sub(&scored.team_1)
        .ok_or(TournamentError::RecordsOutOfSync(team_1))?;
    let team_2_record = tournament.teams[t2_idx]
        .record
        .checked_sub(&scored.team_2)
        .ok_or(TournamentError::RecordsOutOfSync(team_2))?;

    tournament.teams[t1_idx].record = team_1_record;
    tournament.teams[t2_idx].record = team_2_record;
    tournament.matches[m_idx].status = MatchStatus::Pending;
    log::info!("Tournament {}: match {} reopened", tournament.id, match_id);
    Ok(())
}

/// Records recomputed from scratch out of the completed matches. Teams without results
/// map to an empty record.
pub fn rebuild_records(tournament: &Tournament) -> Result<HashMap<TeamId, TeamRecord>, TournamentError> {
    let mut records: HashMap<TeamId, TeamRecord> = tournament
        .teams
        .iter()
        .map(|t| (t.id, TeamRecord::default()))
        .collect();
    for m in &tournament.matches {
        if let Some(scored) = scored_match(m) {
            let scored = scored?;
            for (team_id, delta) in [(m.team_1, scored.team_1), (m.team_2, scored.team_2)] {
                let record = records
                    .get_mut(&team_id)
                    .ok_or(TournamentError::TeamNotFound(team_id))?;
                *record = record
                    .checked_add(&delta)
                    .ok_or(TournamentError::RecordOverflow(team_id))?;
            }
        }
    }
    Ok(records)
}

/// One line of the standings table.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct StandingRow {
    /// 1-based.
    pub position: usize,
    pub team_id: TeamId,
    pub name: String,
    pub played: u32,
    pub points: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
}

/// Standings ordered by points, then goal difference, both descending. Equal teams keep
/// their creation order.
pub fn standings(tournament: &Tournament) -> Vec<StandingRow> {
    let mut teams: Vec<_> = tournament.teams.iter().collect();
    teams.sort_by(|a, b| {
        b.record
            .points
            .cmp(&a.record.points)
            .then_with(|| b.record.goal_difference().cmp(&a.record.goal_difference()))
    });
    teams
        .into_iter()
        .enumerate()
        .map(|(i, t)| StandingRow {
            position: i + 1,
            team_id: t.id,
            name: t.name.clone(),
            played: t.record.played(),
            points: t.record.points,
            wins: t.record.wins,
            draws: t.record.draws,
            losses: t.record.losses,
            goals_for: t.record.goals_for,
            goals_against: t.record.goals_against,
            goal_difference: t.record.goal_difference(),
        })
        .collect()
}

//! League business logic: team formation, fixtures, results and standings.

mod actions;
mod fixtures;
mod overview;
mod roster;
mod standings;
mod teams;

pub use actions::TournamentAction;
pub use fixtures::{generate_fixtures, minimum_matchdays, schedule_round_robin, Matchday};
pub use overview::{matchdays, overview, MatchView, MatchdayView, TeamWithMembers, TournamentOverview};
pub use roster::parse_name_list;
pub use standings::{
    parse_goals, rebuild_records, reopen_match, score_result, standings, submit_result,
    ScoredResult, StandingRow, MAX_GOALS,
};
pub use teams::{form_teams, form_tournament_teams, TeamDraft};

//! Round-robin league web app: library with models, business logic, storage and HTTP API.

pub mod api;
pub mod config;
pub mod logic;
pub mod models;
pub mod store;

pub use config::ServerConfig;
pub use logic::{
    form_teams, form_tournament_teams, generate_fixtures, matchdays, minimum_matchdays, overview,
    parse_goals, parse_name_list, rebuild_records, reopen_match, schedule_round_robin,
    score_result, standings, submit_result, Matchday, MatchdayView, MatchView, ScoredResult,
    StandingRow, TeamDraft, TeamWithMembers, TournamentAction, TournamentOverview, MAX_GOALS,
};
pub use models::{
    ErrorKind, GameMatch, MatchId, MatchScore, MatchStatus, Player, PlayerId, Team, TeamId,
    TeamRecord, Tournament, TournamentError, TournamentId,
};
pub use store::{MemoryStore, TournamentStore};

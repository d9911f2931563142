//! Data structures for the league: players, teams, matches, tournament.

mod game;
mod player;
mod team;
mod tournament;

pub use game::{GameMatch, MatchId, MatchScore, MatchStatus};
pub use player::{Player, PlayerId};
pub use team::{Team, TeamId, TeamRecord};
pub use tournament::{ErrorKind, Tournament, TournamentError, TournamentId};

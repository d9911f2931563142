//! Fixture scheduling: round-robin pairings packed into matchdays.

use crate::models::{GameMatch, TeamId, Tournament, TournamentError};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::collections::HashSet;
use std::hash::Hash;

/// Shuffled greedy passes tried before falling back to a circle-method ordering.
const GREEDY_ATTEMPTS: usize = 32;

/// One round of fixtures; each team appears at most once.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Matchday<T> {
    /// Starts at 1.
    pub number: u32,
    pub pairings: Vec<(T, T)>,
}

/// Fewest matchdays a full round robin of `teams` can take: N-1 for even N, N for odd N.
pub fn minimum_matchdays(teams: usize) -> usize {
    match teams {
        0 | 1 => 0,
        n if n % 2 == 0 => n - 1,
        n => n,
    }
}

/// Every unordered pair of distinct teams, once.
fn all_pairings<T: Copy>(teams: &[T]) -> Vec<(T, T)> {
    teams
        .iter()
        .enumerate()
        .flat_map(|(i, &a)| teams[i + 1..].iter().map(move |&b| (a, b)))
        .collect()
}

/// Greedy packing: each day takes, in order, every remaining pair whose teams are both free
/// that day. The first remaining pair always fits, so every pass makes progress.
fn pack_matchdays<T: Copy + Eq + Hash>(mut remaining: Vec<(T, T)>) -> Vec<Matchday<T>> {
    let mut matchdays = Vec::new();
    while !remaining.is_empty() {
        let mut used: HashSet<T> = HashSet::new();
        let mut pairings = Vec::new();
        remaining.retain(|&(a, b)| {
            if used.contains(&a) || used.contains(&b) {
                return true;
            }
            used.insert(a);
            used.insert(b);
            pairings.push((a, b));
            false
        });
        matchdays.push(Matchday {
            number: matchdays.len() as u32 + 1,
            pairings,
        });
    }
    matchdays
}

/// Pair order of the circle method: slot 0 stays fixed while the others rotate. With an odd
/// team count an empty slot acts as the bye. Listed round by round, so a greedy pass
/// reproduces the rounds exactly.
fn circle_order<T: Copy>(teams: &[T]) -> Vec<(T, T)> {
    let mut slots: Vec<Option<T>> = teams.iter().copied().map(Some).collect();
    if slots.len() % 2 == 1 {
        slots.push(None);
    }
    let n = slots.len();
    let mut pairs = Vec::with_capacity(teams.len() * teams.len().saturating_sub(1) / 2);
    for _ in 1..n {
        for i in 0..n / 2 {
            if let (Some(a), Some(b)) = (slots[i], slots[n - 1 - i]) {
                pairs.push((a, b));
            }
        }
        slots[1..].rotate_right(1);
    }
    pairs
}

/// Build a full single round robin for `teams`.
///
/// Pairings are packed greedily over a random order. If no shuffled attempt reaches
/// [`minimum_matchdays`], the circle-method order over shuffled teams is packed instead,
/// which always does. Fewer than two teams give an empty schedule.
pub fn schedule_round_robin<T, R>(teams: &[T], rng: &mut R) -> Result<Vec<Matchday<T>>, TournamentError>
where
    T: Copy + Eq + Hash,
    R: Rng + ?Sized,
{
    let mut seen = HashSet::with_capacity(teams.len());
    if !teams.iter().all(|t| seen.insert(*t)) {
        return Err(TournamentError::DuplicateTeam);
    }
    if teams.len() < 2 {
        return Ok(Vec::new());
    }

    let target = minimum_matchdays(teams.len());
    let mut pairings = all_pairings(teams);
    for attempt in 1..=GREEDY_ATTEMPTS {
        pairings.shuffle(rng);
        let matchdays = pack_matchdays(pairings.clone());
        if matchdays.len() <= target {
            log::debug!(
                "Packed {} pairings into {} matchdays (attempt {})",
                pairings.len(),
                matchdays.len(),
                attempt
            );
            return Ok(matchdays);
        }
    }

    log::debug!(
        "Greedy packing missed {} matchdays for {} teams; using circle order",
        target,
        teams.len()
    );
    let mut order = teams.to_vec();
    order.shuffle(rng);
    Ok(pack_matchdays(circle_order(&order)))
}

/// Generate the tournament's fixtures from its teams and store them as pending matches.
///
/// Rejected when fixtures already exist; they must be cleared first.
pub fn generate_fixtures<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    rng: &mut R,
) -> Result<(), TournamentError> {
    if !tournament.matches.is_empty() {
        return Err(TournamentError::FixturesAlreadyGenerated);
    }
    if tournament.teams.len() < 2 {
        return Err(TournamentError::NotEnoughTeams);
    }
    let team_ids: Vec<TeamId> = tournament.teams.iter().map(|t| t.id).collect();
    let matchdays = schedule_round_robin(&team_ids, rng)?;

    tournament.matches = matchdays
        .iter()
        .flat_map(|day| {
            day.pairings
                .iter()
                .map(move |&(team_1, team_2)| GameMatch::new(team_1, team_2, day.number))
        })
        .collect();
    log::info!(
        "Tournament {}: generated {} matches over {} matchdays",
        tournament.id,
        tournament.matches.len(),
        matchdays.len()
    );
    Ok(())
}

//! Integration tests for a full league cycle: roster, team formation, fixtures, results.

use league_tournament_web::{
    form_tournament_teams, generate_fixtures, minimum_matchdays, rebuild_records, reopen_match,
    standings, submit_result, ErrorKind, Player, TeamRecord, Tournament, TournamentAction,
    TournamentError,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

fn tournament_with_players(n: usize) -> Tournament {
    let players: Vec<Player> = (0..n).map(|i| Player::new(format!("P{i}"))).collect();
    Tournament::with_players(players)
}

fn scheduled(players: usize, seed: u64) -> (Tournament, StdRng) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut t = tournament_with_players(players);
    form_tournament_teams(&mut t, &mut rng).unwrap();
    generate_fixtures(&mut t, &mut rng).unwrap();
    (t, rng)
}

#[test]
fn form_teams_assigns_every_player() {
    let mut t = tournament_with_players(5);
    form_tournament_teams(&mut t, &mut StdRng::seed_from_u64(1)).unwrap();
    assert_eq!(t.teams.len(), 3);
    let mut sizes: Vec<usize> = t.teams.iter().map(|team| t.members_of(team.id).count()).collect();
    sizes.sort();
    assert_eq!(sizes, [1, 2, 2]);
    assert!(t.players.iter().all(|p| p.team_id.is_some()));
}

#[test]
fn form_teams_requires_players() {
    let mut t = Tournament::new();
    assert_eq!(
        form_tournament_teams(&mut t, &mut StdRng::seed_from_u64(1)),
        Err(TournamentError::NoPlayers)
    );
}

#[test]
fn reforming_teams_clears_fixtures_and_records() {
    let (mut t, mut rng) = scheduled(8, 2);
    let first = t.matches[0].id;
    submit_result(&mut t, first, 2, 0).unwrap();
    let old_teams: HashSet<_> = t.teams.iter().map(|team| team.id).collect();

    form_tournament_teams(&mut t, &mut rng).unwrap();
    assert!(t.matches.is_empty());
    assert_eq!(t.teams.len(), 4);
    assert!(t.teams.iter().all(|team| team.record == TeamRecord::default()));
    assert!(t.teams.iter().all(|team| !old_teams.contains(&team.id)));
}

#[test]
fn fixtures_cover_every_pair_once() {
    for players in [4, 7, 8, 11, 12, 20] {
        let (t, _) = scheduled(players, players as u64);
        let n = t.teams.len();
        assert_eq!(t.matches.len(), n * (n - 1) / 2);

        let pairs: HashSet<_> = t
            .matches
            .iter()
            .map(|m| if m.team_1 < m.team_2 { (m.team_1, m.team_2) } else { (m.team_2, m.team_1) })
            .collect();
        assert_eq!(pairs.len(), t.matches.len());

        let days: HashSet<u32> = t.matches.iter().map(|m| m.matchday).collect();
        assert!(days.len() <= minimum_matchdays(n));
        for day in days {
            let mut seen = HashSet::new();
            for m in t.matches.iter().filter(|m| m.matchday == day) {
                assert!(seen.insert(m.team_1));
                assert!(seen.insert(m.team_2));
            }
        }
    }
}

#[test]
fn generating_twice_is_a_conflict() {
    let (mut t, mut rng) = scheduled(6, 3);
    let before = t.matches.clone();
    let err = generate_fixtures(&mut t, &mut rng).unwrap_err();
    assert_eq!(err, TournamentError::FixturesAlreadyGenerated);
    assert_eq!(err.kind(), ErrorKind::StateConflict);
    assert_eq!(t.matches, before);

    t.clear_fixtures();
    generate_fixtures(&mut t, &mut rng).unwrap();
    assert_eq!(t.matches.len(), before.len());
}

#[test]
fn generating_with_one_team_is_invalid() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut t = tournament_with_players(2);
    form_tournament_teams(&mut t, &mut rng).unwrap();
    let err = generate_fixtures(&mut t, &mut rng).unwrap_err();
    assert_eq!(err, TournamentError::NotEnoughTeams);
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn clear_fixtures_resets_standings() {
    let (mut t, _) = scheduled(6, 5);
    let id = t.matches[0].id;
    submit_result(&mut t, id, 4, 4).unwrap();
    t.clear_fixtures();
    assert!(standings(&t).iter().all(|r| r.points == 0 && r.played == 0));
}

#[test]
fn records_match_results_under_any_submit_and_reopen_order() {
    let (mut t, mut rng) = scheduled(12, 6);
    for _ in 0..500 {
        let idx = rng.gen_range(0..t.matches.len());
        let id = t.matches[idx].id;
        if t.matches[idx].is_completed() {
            reopen_match(&mut t, id).unwrap();
        } else {
            let (g1, g2) = (rng.gen_range(0..5), rng.gen_range(0..5));
            submit_result(&mut t, id, g1, g2).unwrap();
        }
        let rebuilt = rebuild_records(&t).unwrap();
        for team in &t.teams {
            assert_eq!(team.record, rebuilt[&team.id]);
        }
    }
}

#[test]
fn standings_follow_points_then_goal_difference() {
    let (mut t, _) = scheduled(6, 7);
    // Team 1 beats everyone it meets; the rest draw.
    let leader = t.teams[0].id;
    let ids: Vec<_> = t.matches.iter().map(|m| (m.id, m.team_1 == leader, m.team_2 == leader)).collect();
    for (id, leader_home, leader_away) in ids {
        let (g1, g2) = match (leader_home, leader_away) {
            (true, _) => (3, 0),
            (_, true) => (0, 3),
            _ => (1, 1),
        };
        submit_result(&mut t, id, g1, g2).unwrap();
    }
    let rows = standings(&t);
    assert_eq!(rows[0].team_id, leader);
    assert_eq!(rows[0].points, 6);
    assert_eq!(rows[0].goal_difference, 6);
    for pair in rows.windows(2) {
        assert!(
            (pair[0].points, pair[0].goal_difference) >= (pair[1].points, pair[1].goal_difference)
        );
    }
}

#[test]
fn actions_dispatch_to_operations() {
    let mut rng = StdRng::seed_from_u64(8);
    let mut t = Tournament::new();
    TournamentAction::AddPlayers {
        names: "Ada, Bob, Cy\nDee".into(),
    }
    .apply(&mut t, &mut rng)
    .unwrap();
    assert_eq!(t.players.len(), 4);

    TournamentAction::FormTeams.apply(&mut t, &mut rng).unwrap();
    TournamentAction::GenerateFixtures.apply(&mut t, &mut rng).unwrap();
    assert_eq!(t.matches.len(), 1);

    let match_id = t.matches[0].id;
    TournamentAction::SubmitResult {
        match_id,
        team_1_goals: 1,
        team_2_goals: 2,
    }
    .apply(&mut t, &mut rng)
    .unwrap();
    assert_eq!(t.matches[0].score().and_then(|s| s.winner), Some(t.matches[0].team_2));

    let err = TournamentAction::SubmitResult {
        match_id,
        team_1_goals: 1,
        team_2_goals: 2,
    }
    .apply(&mut t, &mut rng)
    .unwrap_err();
    assert_eq!(err, TournamentError::MatchAlreadyCompleted(match_id));

    TournamentAction::ClearData.apply(&mut t, &mut rng).unwrap();
    assert!(t.players.is_empty() && t.teams.is_empty() && t.matches.is_empty());
}

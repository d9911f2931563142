//! HTTP API: JSON handlers over the shared tournament store.
//!
//! Every mutating route takes the store's write lock for the whole operation, so form teams,
//! generate fixtures and submit result never interleave on a tournament.

use crate::logic::{overview, standings, TournamentAction};
use crate::models::{ErrorKind, MatchId, PlayerId, Tournament, TournamentError, TournamentId};
use crate::store::TournamentStore;
use actix_web::{
    delete, get, post, put,
    web::{self, Data, Json, Path},
    HttpResponse, Responder,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;

/// Shared store; the lock serializes operations.
pub type AppState = Data<RwLock<Box<dyn TournamentStore>>>;

pub fn new_state(store: impl TournamentStore + 'static) -> AppState {
    let store: Box<dyn TournamentStore> = Box::new(store);
    Data::new(RwLock::new(store))
}

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct AddPlayersBody {
    names: String,
}

#[derive(Deserialize)]
struct ResultBody {
    team_1_goals: i64,
    team_2_goals: i64,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

#[derive(Deserialize)]
struct TournamentPlayerPath {
    id: TournamentId,
    player_id: PlayerId,
}

#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: MatchId,
}

fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string(), "kind": e.kind() });
    match e.kind() {
        ErrorKind::InvalidInput => HttpResponse::BadRequest().json(body),
        ErrorKind::StateConflict => HttpResponse::Conflict().json(body),
        ErrorKind::NotFound => HttpResponse::NotFound().json(body),
    }
}

/// Look up the tournament under the write lock and run `f` on it.
fn with_tournament<F>(state: &AppState, id: TournamentId, f: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> HttpResponse,
{
    let mut store = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match store.get_mut(id) {
        Some(t) => f(t),
        None => error_response(&TournamentError::TournamentNotFound(id)),
    }
}

/// Apply one action and answer with the updated overview.
fn run_action(state: &AppState, id: TournamentId, action: TournamentAction) -> HttpResponse {
    with_tournament(state, id, |t| match action.apply(t, &mut rand::thread_rng()) {
        Ok(()) => HttpResponse::Ok().json(overview(t)),
        Err(e) => {
            log::warn!("Tournament {}: rejected request: {}", id, e);
            error_response(&e)
        }
    })
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "league-tournament-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Create an empty tournament (client stores the id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState) -> HttpResponse {
    let tournament = Tournament::new();
    let body = overview(&tournament);
    let mut store = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let id = store.insert(tournament);
    log::info!("Created tournament {}", id);
    HttpResponse::Ok().json(body)
}

#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| HttpResponse::Ok().json(overview(t)))
}

#[delete("/api/tournaments/{id}")]
async fn api_delete_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut store = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match store.remove(path.id) {
        Some(_) => {
            log::info!("Deleted tournament {}", path.id);
            HttpResponse::NoContent().finish()
        }
        None => error_response(&TournamentError::TournamentNotFound(path.id)),
    }
}

/// Standings table, ranked on every read.
#[get("/api/tournaments/{id}/standings")]
async fn api_standings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| HttpResponse::Ok().json(standings(t)))
}

/// Generic entry point: any tagged action.
#[post("/api/tournaments/{id}/actions")]
async fn api_action(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<TournamentAction>,
) -> HttpResponse {
    run_action(&state, path.id, body.into_inner())
}

/// Add players from a comma- or newline-separated list.
#[post("/api/tournaments/{id}/players")]
async fn api_add_players(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<AddPlayersBody>,
) -> HttpResponse {
    let names = body.into_inner().names;
    run_action(&state, path.id, TournamentAction::AddPlayers { names })
}

#[delete("/api/tournaments/{id}/players/{player_id}")]
async fn api_remove_player(state: AppState, path: Path<TournamentPlayerPath>) -> HttpResponse {
    let player_id = path.player_id;
    run_action(&state, path.id, TournamentAction::RemovePlayer { player_id })
}

/// Clear teams and fixtures, then draw new teams of two.
#[post("/api/tournaments/{id}/teams")]
async fn api_form_teams(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    run_action(&state, path.id, TournamentAction::FormTeams)
}

#[delete("/api/tournaments/{id}/teams")]
async fn api_clear_teams(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    run_action(&state, path.id, TournamentAction::ClearTeams)
}

/// Manual reassignment: `{"Team 1": ["Ada", "Bob"], ...}`.
#[put("/api/tournaments/{id}/teams/members")]
async fn api_assign_players(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<HashMap<String, Vec<String>>>,
) -> HttpResponse {
    let teams = body.into_inner();
    run_action(&state, path.id, TournamentAction::AssignPlayers { teams })
}

#[post("/api/tournaments/{id}/fixtures")]
async fn api_generate_fixtures(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    run_action(&state, path.id, TournamentAction::GenerateFixtures)
}

#[delete("/api/tournaments/{id}/fixtures")]
async fn api_clear_fixtures(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    run_action(&state, path.id, TournamentAction::ClearFixtures)
}

#[put("/api/tournaments/{id}/matches/{match_id}/result")]
async fn api_submit_result(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<ResultBody>,
) -> HttpResponse {
    let action = TournamentAction::SubmitResult {
        match_id: path.match_id,
        team_1_goals: body.team_1_goals,
        team_2_goals: body.team_2_goals,
    };
    run_action(&state, path.id, action)
}

/// Remove a result: the match goes back to pending.
#[delete("/api/tournaments/{id}/matches/{match_id}/result")]
async fn api_reopen_match(state: AppState, path: Path<TournamentMatchPath>) -> HttpResponse {
    let match_id = path.match_id;
    run_action(&state, path.id, TournamentAction::ReopenMatch { match_id })
}

/// Delete players, teams and fixtures.
#[post("/api/tournaments/{id}/reset")]
async fn api_reset(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    run_action(&state, path.id, TournamentAction::ClearData)
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}

/// Register the index page and all API routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(serve_index_async))
        .service(api_health)
        .service(favicon)
        .service(api_create_tournament)
        .service(api_get_tournament)
        .service(api_delete_tournament)
        .service(api_standings)
        .service(api_action)
        .service(api_add_players)
        .service(api_remove_player)
        .service(api_form_teams)
        .service(api_clear_teams)
        .service(api_assign_players)
        .service(api_generate_fixtures)
        .service(api_clear_fixtures)
        .service(api_submit_result)
        .service(api_reopen_match)
        .service(api_reset);
}

use axum::{
    Json, Router,
    body::Body,
    extract::{DefaultBodyLimit, Path, Request, State},
    http::{HeaderName, Method, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use tracing::{error, info, warn};

use crate::AppState;
use crate::config::AppConfig;
use crate::game::{
    Choice, GameError, GameState, Role, RoleInfo, Scenario, TerminalChallenge,
    avatar::{self, AvatarView},
    content,
    simulator::{SimulatorInputs, SimulatorReport, simulate},
    terminal,
    verdict::Verdict,
};
use crate::llm::{ChatRelay, LlmSettings, Message};
use crate::normalized::NormalizedEvent;
use crate::save::SaveStore;
use crate::session::GameSessionStore;

/// How often the background sweeper looks for expired sessions.
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>, settings: LlmSettings) -> anyhow::Result<()> {
    info!(
        name: "llm.config.loaded",
        base_url = %settings.base_url,
        model = %settings.model,
        provider = ?settings.provider,
        "LLM configuration loaded"
    );

    let relay = Arc::new(ChatRelay::new(settings));
    let sessions = GameSessionStore::new();
    let save = Arc::new(SaveStore::new(&config.storage.data_dir));

    if save.exists() {
        info!(
            name: "save.slot.found",
            path = %save.path().display(),
            "Existing save slot found"
        );
    }

    // Sweep expired sessions in the background.
    let sweeper = sessions.clone();
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            tick.tick().await;
            let removed = sweeper.cleanup_expired();
            if removed > 0 {
                info!(name: "session.swept", removed, "Expired game sessions removed");
            }
        }
    });

    let state = AppState {
        relay,
        sessions,
        save,
        config: config.clone(),
    };

    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        "Server started"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

/// Build the full application router around the given state.
///
/// Split from [`start_server`] so integration tests can drive the exact
/// production routing and middleware without binding a socket.
pub fn build_router(state: AppState) -> Router {
    let static_dir = state.config.storage.static_dir.clone();

    // Router types change under conditional layering, so "disabled" just
    // means a timeout long enough to never fire.
    let timeout_duration = if state.config.resilience.timeout_disabled {
        Duration::from_secs(365 * 24 * 60 * 60)
    } else {
        Duration::from_secs(30)
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    Router::new()
        .route("/api/chat", post(api_chat))
        .route("/api/game", post(api_create_game))
        .route("/api/game/{id}", get(api_get_game))
        .route("/api/game/{id}/role", post(api_select_role))
        .route("/api/game/{id}/choice", post(api_make_choice))
        .route(
            "/api/game/{id}/terminal",
            get(api_get_terminal).post(api_attempt_terminal),
        )
        .route("/api/game/{id}/advance", post(api_advance))
        .route("/api/game/{id}/reset", post(api_reset))
        .route("/api/simulate", post(api_simulate))
        .route("/healthz", get(healthz))
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(axum::middleware::from_fn(
            move |req: Request, next: Next| {
                let duration = timeout_duration;
                async move {
                    match tokio::time::timeout(duration, next.run(req)).await {
                        Ok(res) => res,
                        Err(_) => {
                            (StatusCode::REQUEST_TIMEOUT, "Request timed out").into_response()
                        }
                    }
                }
            },
        ))
        .with_state(state)
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire types
// ─────────────────────────────────────────────────────────────────────────────

/// Request body for chat API.
#[derive(Debug, Deserialize)]
struct ChatRequest {
    /// Conversation so far, oldest first.
    messages: Vec<Message>,
}

/// Request body for session creation.
#[derive(Debug, Deserialize)]
struct CreateGameRequest {
    /// Hydrate the new session from the save slot instead of defaults.
    #[serde(default)]
    resume: bool,
}

#[derive(Debug, Deserialize)]
struct SelectRoleRequest {
    role: Role,
}

#[derive(Debug, Deserialize)]
struct ChoiceRequest {
    choice_id: String,
}

#[derive(Debug, Deserialize)]
struct TerminalAttemptRequest {
    challenge_id: String,
    command: String,
}

/// Full view of a session: raw state plus everything derived from it.
#[derive(Debug, Serialize)]
struct GameView {
    id: String,
    state: GameState,
    role: Option<&'static RoleInfo>,
    scenario: Option<&'static Scenario>,
    total_scenarios: usize,
    avatar: AvatarView,
    terminal_due: bool,
    /// End-of-game summary, present once the play-through is over.
    #[serde(skip_serializing_if = "Option::is_none")]
    verdict: Option<Verdict>,
}

impl GameView {
    fn new(id: &str, state: GameState) -> Self {
        Self {
            id: id.to_string(),
            role: state.role.map(content::role_info),
            scenario: state.current_scenario(),
            total_scenarios: state.total_scenarios(),
            avatar: avatar::for_level(state.avatar_level),
            terminal_due: state.terminal_due(),
            verdict: state.game_over.then(|| Verdict::from_score(state.score)),
            state,
        }
    }
}

/// Response to a resolved choice: the picked choice plus the updated view.
#[derive(Debug, Serialize)]
struct ChoiceResponse {
    choice: &'static Choice,
    game: GameView,
}

/// Response to a terminal command attempt.
#[derive(Debug, Serialize)]
struct TerminalAttemptResponse {
    success: bool,
    output: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<&'static str>,
    game: GameView,
}

/// JSON error envelope for every non-2xx API response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

type ApiError = (StatusCode, Json<ErrorBody>);

/// Map an engine error onto the wire: unknown session ids are 404, every
/// rejected transition is 422.
fn game_error(err: &GameError) -> ApiError {
    let status = match err {
        GameError::UnknownSession(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::UNPROCESSABLE_ENTITY,
    };
    warn!(name: "game.transition.rejected", error = %err, "Transition rejected");
    (
        status,
        Json(ErrorBody {
            error: err.to_string(),
            details: None,
        }),
    )
}

fn unknown_session(id: &str) -> ApiError {
    game_error(&GameError::UnknownSession(id.to_string()))
}

/// Write-through to the save slot. Failures are logged, never surfaced: the
/// in-memory session stays authoritative.
fn persist(state: &AppState, snapshot: &GameState) {
    if let Err(e) = state.save.save(snapshot) {
        error!(name: "save.write.failed", error = %e, "Failed to persist game state");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// API Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// POST /api/chat - Relay the conversation to the provider, streaming plain
/// text back as deltas arrive.
async fn api_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Response, ApiError> {
    if !state.relay.has_credential() {
        error!(name: "chat.credential.missing", "LLM API key is not configured");
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: "Missing API Key".to_string(),
                details: None,
            }),
        ));
    }

    let mut upstream = state.relay.stream_reply(req.messages).await.map_err(|e| {
        error!(name: "chat.request.failed", error = %e, "Chat relay failed before streaming");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: "Internal Server Error".to_string(),
                details: Some(e.to_string()),
            }),
        )
    })?;

    // Headers are committed from here on, so a mid-stream failure can only
    // end the stream.
    let body = Body::from_stream(async_stream::stream! {
        while let Some(event) = upstream.next().await {
            match event {
                NormalizedEvent::MessageDelta { text } => yield Ok::<_, Infallible>(text),
                NormalizedEvent::Error { message, code } => {
                    error!(
                        name: "chat.stream.failed",
                        error = %message,
                        code = ?code,
                        "Provider stream failed mid-flight"
                    );
                    break;
                }
                NormalizedEvent::Done => break,
            }
        }
    });

    let headers = [
        (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
        (header::CACHE_CONTROL, "no-cache"),
        (HeaderName::from_static("x-accel-buffering"), "no"),
    ];
    Ok((headers, body).into_response())
}

/// POST /api/game - Create a session, optionally resuming the save slot.
async fn api_create_game(
    State(state): State<AppState>,
    Json(req): Json<CreateGameRequest>,
) -> (StatusCode, Json<GameView>) {
    let initial = if req.resume {
        state.save.load()
    } else {
        GameState::default()
    };
    let session = state.sessions.create_with_state(initial);
    info!(
        name: "game.session.created",
        session_id = %session.id(),
        resumed = req.resume,
        "Game session created"
    );
    let view = GameView::new(session.id(), session.state());
    (StatusCode::CREATED, Json(view))
}

/// GET /api/game/{id} - Current state plus derived view.
async fn api_get_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GameView>, ApiError> {
    let session = state.sessions.get(&id).ok_or_else(|| unknown_session(&id))?;
    Ok(Json(GameView::new(session.id(), session.state())))
}

/// POST /api/game/{id}/role - Select (or switch) the playable role.
async fn api_select_role(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<SelectRoleRequest>,
) -> Result<Json<GameView>, ApiError> {
    let session = state.sessions.get(&id).ok_or_else(|| unknown_session(&id))?;
    let updated = session.update(|s| {
        s.select_role(req.role);
        s.clone()
    });
    info!(
        name: "game.role.selected",
        session_id = %id,
        role = req.role.id(),
        "Role selected"
    );
    persist(&state, &updated);
    Ok(Json(GameView::new(session.id(), updated)))
}

/// POST /api/game/{id}/choice - Resolve a choice against the current
/// scenario.
async fn api_make_choice(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ChoiceRequest>,
) -> Result<Json<ChoiceResponse>, ApiError> {
    let session = state.sessions.get(&id).ok_or_else(|| unknown_session(&id))?;
    let (choice, updated) = session
        .update(|s| s.make_choice(&req.choice_id).map(|c| (c, s.clone())))
        .map_err(|e| game_error(&e))?;
    info!(
        name: "game.choice.made",
        session_id = %id,
        choice = choice.id,
        good = choice.good,
        "Choice made"
    );
    persist(&state, &updated);
    Ok(Json(ChoiceResponse {
        choice,
        game: GameView::new(session.id(), updated),
    }))
}

/// GET /api/game/{id}/terminal - Draw a terminal challenge for the
/// session's role.
async fn api_get_terminal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<&'static TerminalChallenge>, ApiError> {
    let session = state.sessions.get(&id).ok_or_else(|| unknown_session(&id))?;
    let role = session
        .state()
        .role
        .ok_or_else(|| game_error(&GameError::RoleNotSelected))?;
    Ok(Json(terminal::pick_challenge(role)))
}

/// POST /api/game/{id}/terminal - Check a submitted command against a
/// challenge. Failures are tracked per session so the hint unlocks from the
/// second miss.
async fn api_attempt_terminal(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<TerminalAttemptRequest>,
) -> Result<Json<TerminalAttemptResponse>, ApiError> {
    let session = state.sessions.get(&id).ok_or_else(|| unknown_session(&id))?;
    if session.state().game_over {
        return Err(game_error(&GameError::GameOver));
    }
    let challenge = content::find_challenge(&req.challenge_id)
        .ok_or_else(|| game_error(&GameError::UnknownChallenge(req.challenge_id.clone())))?;

    let prior_failures = session.terminal_failures(challenge.id);
    let outcome = terminal::check_command(challenge, &req.command, prior_failures);

    let updated = if outcome.success {
        let updated = session.update(|s| {
            s.complete_terminal(challenge);
            s.clone()
        });
        session.clear_terminal_failures(challenge.id);
        info!(
            name: "game.terminal.completed",
            session_id = %id,
            challenge = challenge.id,
            "Terminal challenge completed"
        );
        persist(&state, &updated);
        updated
    } else {
        session.record_terminal_failure(challenge.id);
        session.state()
    };

    Ok(Json(TerminalAttemptResponse {
        success: outcome.success,
        output: outcome.output,
        hint: outcome.hint,
        game: GameView::new(session.id(), updated),
    }))
}

/// POST /api/game/{id}/advance - Move to the next scenario (or end the
/// game after the last one).
async fn api_advance(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GameView>, ApiError> {
    let session = state.sessions.get(&id).ok_or_else(|| unknown_session(&id))?;
    if session.state().game_over {
        return Err(game_error(&GameError::GameOver));
    }
    let updated = session.update(|s| {
        s.advance();
        s.clone()
    });
    persist(&state, &updated);
    Ok(Json(GameView::new(session.id(), updated)))
}

/// POST /api/game/{id}/reset - Restart the play-through, keeping the role.
async fn api_reset(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GameView>, ApiError> {
    let session = state.sessions.get(&id).ok_or_else(|| unknown_session(&id))?;
    let updated = session.update(|s| {
        s.reset();
        s.clone()
    });
    session.clear_all_terminal_failures();
    info!(name: "game.session.reset", session_id = %id, "Game session reset");
    persist(&state, &updated);
    Ok(Json(GameView::new(session.id(), updated)))
}

/// POST /api/simulate - Run the cost simulator over the submitted inputs.
async fn api_simulate(Json(inputs): Json<SimulatorInputs>) -> Json<SimulatorReport> {
    Json(simulate(&inputs))
}

/// GET /healthz - Liveness probe.
async fn healthz() -> &'static str {
    "ok"
}

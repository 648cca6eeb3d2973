//! HTTP route handlers.

use std::time::Instant;

use askama::Template;
use axum::body::Bytes;
use axum::{
    Extension, Form, Json, Router,
    extract::{Path, Query, Request, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    middleware::{self, Next},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tracing::{debug, error, info, warn};

use crate::domain::{ContrastMode, DomainError, FontSize, Requirement, RequirementId, RouteId};
use crate::finder::{FinderError, MAX_COMPARISON_ROUTES, SortField, ToggleOutcome, search_endpoints};
use crate::search::{Key, KeyError, location_candidates, suggest};
use crate::session::{SessionHandle, SessionId, SessionState};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "inclusivego_sid";

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();

    Router::new()
        .route("/", get(index_page))
        .route("/compare", get(compare_page))
        .route("/about", get(about_page))
        .route("/api/session", get(session_snapshot))
        .route("/session/search", post(submit_search))
        .route("/session/input", post(type_input))
        .route("/session/key", post(press_key))
        .route("/session/suggestion", post(choose_suggestion))
        .route("/session/requirements/:id/toggle", post(toggle_requirement))
        .route("/session/routes/:id/select", post(select_route))
        .route("/session/sort", post(set_sort_field))
        .route("/session/sort/direction", post(toggle_sort_direction))
        .route("/session/compare/:id/toggle", post(toggle_comparison))
        .route("/session/compare/clear", post(clear_comparison))
        .route("/session/settings", post(update_settings))
        .route("/history/remove", post(remove_history))
        .route("/history/clear", post(clear_history))
        .layer(middleware::from_fn_with_state(state.clone(), session_layer))
        .route("/health", get(health))
        .route("/api/requirements", get(list_requirements))
        .route("/api/routes", get(list_routes))
        .route("/api/search", post(search_routes))
        .route("/api/autocomplete", get(autocomplete))
        .route("/api/history", get(list_history))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(not_found_page)
        .with_state(state)
}

// ============================================================================
// Sessions
// ============================================================================

/// The session installed for the current request by [`session_layer`].
#[derive(Clone)]
pub struct CurrentSession {
    pub id: SessionId,
    pub handle: SessionHandle,
}

/// Find or start the caller's session and make it available to handlers.
async fn session_layer(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let cookie = session_cookie(req.headers());
    let (id, handle, created) = state.sessions.get_or_create(cookie.as_deref()).await;

    req.extensions_mut().insert(CurrentSession {
        id: id.clone(),
        handle,
    });
    let mut response = next.run(req).await;

    if created {
        let cookie = format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax");
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => warn!(error = %e, "could not encode session cookie"),
        }
    }

    response
}

/// Value of the session cookie, if the client sent one.
fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == SESSION_COOKIE).then(|| value.to_string())
        })
}

fn require_session(session: Option<Extension<CurrentSession>>) -> Result<CurrentSession, AppError> {
    session
        .map(|Extension(current)| current)
        .ok_or(AppError::MissingContext { what: "session" })
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Answer a session update: HTML clients go back to the main page, other
/// clients get the updated session as JSON.
async fn reply(
    state: &AppState,
    headers: &HeaderMap,
    session: &mut SessionState,
    decorate: impl FnOnce(SessionSnapshot) -> SessionSnapshot,
) -> Response {
    if accepts_html(headers) {
        return Redirect::to("/").into_response();
    }

    let history = state.history.entries().await;
    let snapshot = SessionSnapshot::capture(session, &state.catalog, history, Instant::now());
    Json(ApiResponse::ok(decorate(snapshot))).into_response()
}

fn render(template: &impl Template) -> Result<Html<String>, AppError> {
    template.render().map(Html).map_err(|e| AppError::Internal {
        message: format!("Template error: {e}"),
    })
}

// ============================================================================
// Pages
// ============================================================================

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Main page.
async fn index_page(
    State(state): State<AppState>,
    session: Option<Extension<CurrentSession>>,
) -> Result<Response, AppError> {
    let current = require_session(session)?;
    let mut session = current.handle.lock().await;
    let catalog = &state.catalog;

    let visible = session.visible_routes(catalog, Instant::now());
    let selected_id = session.selection.selected();
    let routes = visible
        .into_iter()
        .map(|r| {
            RouteView::from_route(r).with_session(Some(r.id) == selected_id, &session.comparison)
        })
        .collect();
    let selected = session
        .selected_route(catalog)
        .map(|r| RouteView::from_route(r).with_session(true, &session.comparison));

    let template = IndexTemplate {
        page: PageChrome::from_settings(&session.settings),
        search: SearchView::new(&session.autocomplete, &session.search),
        history: state.history.entries().await,
        requirements: RequirementView::all(catalog, &session.requirements),
        sort: SortView::from_state(&session.sort),
        routes,
        selected,
        comparison_count: session.comparison.len(),
        comparison_limit: MAX_COMPARISON_ROUTES,
        can_compare: session.comparison.can_compare(),
    };

    Ok(render(&template)?.into_response())
}

/// Comparison page for the routes picked in this session.
async fn compare_page(
    State(state): State<AppState>,
    session: Option<Extension<CurrentSession>>,
) -> Result<Response, AppError> {
    let current = require_session(session)?;
    let session = current.handle.lock().await;

    let routes = session.comparison.resolve(&state.catalog);
    let template = CompareTemplate::new(PageChrome::from_settings(&session.settings), &routes);

    Ok(render(&template)?.into_response())
}

/// About page.
async fn about_page(session: Option<Extension<CurrentSession>>) -> Result<Response, AppError> {
    let current = require_session(session)?;
    let settings = current.handle.lock().await.settings;

    let template = AboutTemplate {
        page: PageChrome::from_settings(&settings),
    };
    Ok(render(&template)?.into_response())
}

async fn not_found_page() -> Response {
    let template = ErrorTemplate {
        page: PageChrome::default(),
        title: "Page not found".to_string(),
        message: "There is nothing at this address.".to_string(),
        details: None,
    };
    match render(&template) {
        Ok(html) => (StatusCode::NOT_FOUND, html).into_response(),
        Err(e) => e.into_response(),
    }
}

// ============================================================================
// JSON API
// ============================================================================

/// All accessibility requirements.
async fn list_requirements(State(state): State<AppState>) -> Json<ApiResponse<Vec<Requirement>>> {
    Json(ApiResponse::ok(state.catalog.requirements().to_vec()))
}

/// All routes.
async fn list_routes(State(state): State<AppState>) -> Json<ApiResponse<RoutesResponse>> {
    Json(ApiResponse::ok(RoutesResponse::from_routes(
        state.catalog.routes(),
    )))
}

/// Match routes on origin or destination.
///
/// The requirement list in the body is accepted but does not narrow the
/// results; requirement filtering happens in the session view.
async fn search_routes(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ApiResponse<RoutesResponse>>, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: SearchRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "invalid search request");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let matches = search_endpoints(state.catalog.routes(), &req.query);
    debug!(
        query = %req.query,
        requirements = req.active_requirements.len(),
        matches = matches.len(),
        "route search"
    );

    Ok(Json(ApiResponse::ok(RoutesResponse::from_routes(matches))))
}

/// Location suggestions for a partial input.
async fn autocomplete(
    State(state): State<AppState>,
    Query(req): Query<AutocompleteRequest>,
) -> Json<ApiResponse<Vec<String>>> {
    let min_chars = req.min_chars.unwrap_or(state.config.autocomplete_min_chars);
    let candidates = location_candidates(state.catalog.routes());
    Json(ApiResponse::ok(suggest(&candidates, &req.q, min_chars)))
}

/// Recent searches, most recent first.
async fn list_history(State(state): State<AppState>) -> Json<ApiResponse<Vec<String>>> {
    Json(ApiResponse::ok(state.history.entries().await))
}

/// The caller's session as JSON.
async fn session_snapshot(
    State(state): State<AppState>,
    session: Option<Extension<CurrentSession>>,
) -> Result<Json<ApiResponse<SessionSnapshot>>, AppError> {
    let current = require_session(session)?;
    let mut session = current.handle.lock().await;
    let history = state.history.entries().await;

    Ok(Json(ApiResponse::ok(SessionSnapshot::capture(
        &mut session,
        &state.catalog,
        history,
        Instant::now(),
    ))))
}

// ============================================================================
// Session updates
// ============================================================================

/// Search box submitted: apply the query now and remember it.
async fn submit_search(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Option<Extension<CurrentSession>>,
    Form(form): Form<TextForm>,
) -> Result<Response, AppError> {
    let current = require_session(session)?;
    let mut session = current.handle.lock().await;

    session.submit(&form.q);
    state.history.add(&form.q).await;

    Ok(reply(&state, &headers, &mut session, |s| s).await)
}

/// Keystroke in the search box; filtering follows after the quiet period.
async fn type_input(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Option<Extension<CurrentSession>>,
    Form(form): Form<TextForm>,
) -> Result<Response, AppError> {
    let current = require_session(session)?;
    let mut session = current.handle.lock().await;

    session.type_input(&form.q, Instant::now());

    Ok(reply(&state, &headers, &mut session, |s| s).await)
}

/// Navigation key in the suggestion list.
async fn press_key(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Option<Extension<CurrentSession>>,
    Form(form): Form<KeyForm>,
) -> Result<Response, AppError> {
    let current = require_session(session)?;
    let key: Key = form.key.parse()?;
    let mut session = current.handle.lock().await;

    let chosen = session.press_key(key);
    if let Some(chosen) = &chosen {
        state.history.add(chosen).await;
    }

    Ok(reply(&state, &headers, &mut session, |s| s.with_chosen(chosen)).await)
}

/// Suggestion picked with the pointer.
async fn choose_suggestion(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Option<Extension<CurrentSession>>,
    Form(form): Form<TextForm>,
) -> Result<Response, AppError> {
    let current = require_session(session)?;
    let mut session = current.handle.lock().await;

    session.choose_suggestion(&form.q);
    state.history.add(&form.q).await;

    Ok(reply(&state, &headers, &mut session, |s| s).await)
}

async fn toggle_requirement(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Option<Extension<CurrentSession>>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let current = require_session(session)?;
    let id = RequirementId::parse(&id)?;
    if state.catalog.requirement(&id).is_none() {
        return Err(AppError::NotFound {
            message: format!("Unknown requirement: {id}"),
        });
    }

    let mut session = current.handle.lock().await;
    let active = session.toggle_requirement(id);
    debug!(session = %current.id, active, "requirement toggled");

    Ok(reply(&state, &headers, &mut session, |s| s).await)
}

async fn select_route(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Option<Extension<CurrentSession>>,
    Path(id): Path<u32>,
) -> Result<Response, AppError> {
    let current = require_session(session)?;
    let mut session = current.handle.lock().await;

    if !session.select_route(&state.catalog, RouteId(id)) {
        return Err(AppError::NotFound {
            message: format!("Route {id} not found"),
        });
    }

    Ok(reply(&state, &headers, &mut session, |s| s).await)
}

async fn set_sort_field(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Option<Extension<CurrentSession>>,
    Form(form): Form<SortForm>,
) -> Result<Response, AppError> {
    let current = require_session(session)?;
    let field: SortField = form.field.parse()?;
    let mut session = current.handle.lock().await;

    session.sort.set_field(field);

    Ok(reply(&state, &headers, &mut session, |s| s).await)
}

async fn toggle_sort_direction(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Option<Extension<CurrentSession>>,
) -> Result<Response, AppError> {
    let current = require_session(session)?;
    let mut session = current.handle.lock().await;

    session.sort.toggle_direction();

    Ok(reply(&state, &headers, &mut session, |s| s).await)
}

async fn toggle_comparison(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Option<Extension<CurrentSession>>,
    Path(id): Path<u32>,
) -> Result<Response, AppError> {
    let current = require_session(session)?;
    let id = RouteId(id);
    if state.catalog.route(id).is_none() {
        return Err(AppError::NotFound {
            message: format!("Route {id} not found"),
        });
    }

    let mut session = current.handle.lock().await;
    let outcome = session.toggle_comparison(id);
    if outcome == ToggleOutcome::Rejected {
        info!(session = %current.id, route = %id, "comparison full, route not added");
    }

    Ok(reply(&state, &headers, &mut session, |s| s.with_comparison_outcome(outcome)).await)
}

async fn clear_comparison(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Option<Extension<CurrentSession>>,
) -> Result<Response, AppError> {
    let current = require_session(session)?;
    let mut session = current.handle.lock().await;

    session.comparison.clear();

    Ok(reply(&state, &headers, &mut session, |s| s).await)
}

/// Change font size and/or contrast. Nothing changes unless every given
/// value is valid.
async fn update_settings(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Option<Extension<CurrentSession>>,
    Form(form): Form<SettingsForm>,
) -> Result<Response, AppError> {
    let current = require_session(session)?;
    let font_size = form
        .font_size
        .as_deref()
        .map(str::parse::<FontSize>)
        .transpose()?;
    let contrast = form
        .contrast
        .as_deref()
        .map(str::parse::<ContrastMode>)
        .transpose()?;

    let mut session = current.handle.lock().await;
    if let Some(font_size) = font_size {
        session.settings.font_size = font_size;
    }
    if let Some(contrast) = contrast {
        session.settings.contrast_mode = contrast;
    }

    Ok(reply(&state, &headers, &mut session, |s| s).await)
}

async fn remove_history(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Option<Extension<CurrentSession>>,
    Form(form): Form<TextForm>,
) -> Result<Response, AppError> {
    let current = require_session(session)?;
    state.history.remove(&form.q).await;

    let mut session = current.handle.lock().await;
    Ok(reply(&state, &headers, &mut session, |s| s).await)
}

async fn clear_history(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Option<Extension<CurrentSession>>,
) -> Result<Response, AppError> {
    let current = require_session(session)?;
    state.history.clear().await;

    let mut session = current.handle.lock().await;
    Ok(reply(&state, &headers, &mut session, |s| s).await)
}

// ============================================================================
// Errors
// ============================================================================

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
    /// A handler ran without state its middleware should have installed.
    MissingContext { what: &'static str },
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<FinderError> for AppError {
    fn from(e: FinderError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<KeyError> for AppError {
    fn from(e: KeyError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
            AppError::MissingContext { what } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("{what} is not available to this handler"),
            ),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ApiResponse::<()>::failure(message));
        (status, body).into_response()
    }
}

//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented; logs include parameters and basic result info.

use std::sync::Arc;

use axum::{
  extract::{Query, State},
  http::StatusCode,
  response::IntoResponse,
  Json,
};
use tracing::{info, instrument};

use crate::logic::*;
use crate::protocol::*;
use crate::state::AppState;

fn bad_request(message: String) -> axum::response::Response {
  (
    StatusCode::BAD_REQUEST,
    Json(serde_json::json!({ "error": message })),
  )
    .into_response()
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state), fields(module = %q.module.clone().unwrap_or_else(|| "sliding_window".into())))]
pub async fn http_list_problems(
  State(state): State<Arc<AppState>>,
  Query(q): Query<ProblemsQuery>,
) -> impl IntoResponse {
  let module = q.module.unwrap_or_else(|| "sliding_window".into());
  let problems = list_problems(&state, &module).await;
  info!(target: "playground", %module, count = problems.len(), "HTTP problems listed");
  Json(serde_json::json!({ "problems": problems }))
}

#[instrument(level = "info", skip(state))]
pub async fn http_list_modules(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let modules: Vec<_> = state.registry.all().into_iter().cloned().collect();
  Json(serde_json::json!({ "modules": modules }))
}

#[instrument(level = "info", skip(state), fields(%q.module))]
pub async fn http_module_info(
  State(state): State<Arc<AppState>>,
  Query(q): Query<ModuleQuery>,
) -> impl IntoResponse {
  match state.registry.get(&q.module) {
    Some(m) => Json(m.clone()).into_response(),
    None => bad_request(format!("Unknown module: {}", q.module)),
  }
}

#[instrument(level = "info", skip(state, body), fields(%body.problem_id))]
pub async fn http_start_playground(
  State(state): State<Arc<AppState>>,
  Json(body): Json<StartIn>,
) -> impl IntoResponse {
  match start_playground(&state, &body.problem_id).await {
    Ok(out) => {
      info!(target: "playground", id = %body.problem_id, session = %out.session_id, "HTTP playground started");
      Json(out).into_response()
    }
    Err(e) => bad_request(e),
  }
}

#[instrument(level = "info", skip(state), fields(module = %q.module.clone().unwrap_or_else(|| "sliding_window".into())))]
pub async fn http_practice(
  State(state): State<Arc<AppState>>,
  Query(q): Query<PracticeQuery>,
) -> impl IntoResponse {
  let module = q.module.unwrap_or_else(|| "sliding_window".into());
  match practice_playground(&state, &module).await {
    Ok(out) => Json(out).into_response(),
    Err(e) => bad_request(e),
  }
}

#[instrument(level = "info", skip(state, body), fields(%body.session_id, %body.action))]
pub async fn http_user_action(
  State(state): State<Arc<AppState>>,
  Json(body): Json<ActionIn>,
) -> impl IntoResponse {
  match apply_user_action(&state, &body.session_id, &body.action, body.element_index).await {
    Ok(result) => Json(result).into_response(),
    Err(e) => bad_request(e),
  }
}

#[instrument(level = "info", skip(state, body), fields(%body.session_id))]
pub async fn http_reset(
  State(state): State<Arc<AppState>>,
  Json(body): Json<SessionIn>,
) -> impl IntoResponse {
  match reset_playground(&state, &body.session_id).await {
    Ok(out) => Json(out).into_response(),
    Err(e) => bad_request(e),
  }
}

#[instrument(level = "info", skip(state), fields(%q.session_id))]
pub async fn http_playground_state(
  State(state): State<Arc<AppState>>,
  Query(q): Query<SessionQuery>,
) -> impl IntoResponse {
  match playground_state(&state, &q.session_id).await {
    Ok(out) => Json(out).into_response(),
    Err(e) => bad_request(e),
  }
}

#[instrument(level = "info", skip(state), fields(%q.session_id))]
pub async fn http_variables(
  State(state): State<Arc<AppState>>,
  Query(q): Query<SessionQuery>,
) -> impl IntoResponse {
  match session_variables(&state, &q.session_id).await {
    Ok(variables) => Json(VariablesOut { variables }).into_response(),
    Err(e) => bad_request(e),
  }
}

#[instrument(level = "info", skip(state), fields(%q.session_id))]
pub async fn http_action_log(
  State(state): State<Arc<AppState>>,
  Query(q): Query<SessionQuery>,
) -> impl IntoResponse {
  match session_actions(&state, &q.session_id).await {
    Ok(actions) => Json(ActionsOut { actions }).into_response(),
    Err(e) => bad_request(e),
  }
}

#[instrument(level = "info", skip(state, body), fields(%body.session_id))]
pub async fn http_end_playground(
  State(state): State<Arc<AppState>>,
  Json(body): Json<SessionIn>,
) -> impl IntoResponse {
  let ok = end_playground(&state, &body.session_id).await;
  Json(EndedOut { ok })
}

#[instrument(level = "info", skip(state), fields(%q.session_id))]
pub async fn http_get_hint(
  State(state): State<Arc<AppState>>,
  Query(q): Query<SessionQuery>,
) -> impl IntoResponse {
  let text = get_hint_text(&state, &q.session_id).await;
  info!(target: "playground", session = %q.session_id, "HTTP hint served");
  Json(HintOut { text })
}

#[instrument(level = "info", skip(state), fields(%q.session_id))]
pub async fn http_explain(
  State(state): State<Arc<AppState>>,
  Query(q): Query<SessionQuery>,
) -> impl IntoResponse {
  let text = explain_current_snippet(&state, &q.session_id).await;
  Json(AgentOut { text })
}

#[instrument(level = "info", skip(state, body), fields(%body.session_id, text_len = body.text.len()))]
pub async fn http_agent_message(
  State(state): State<Arc<AppState>>,
  Json(body): Json<AgentIn>,
) -> impl IntoResponse {
  let reply = do_agent_reply(&state, &body.session_id, &body.text).await;
  Json(AgentOut { text: reply })
}

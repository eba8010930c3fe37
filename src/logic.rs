//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Mounting/resetting/ending playground sessions
//!   - Forwarding user actions into the engine and shaping the result DTO
//!   - Hints, Jarvis replies, and snippet explanations (assistant-backed,
//!     each with a deterministic local fallback)
//!
//! Assistant calls happen only here, after the engine has done its
//! synchronous work — never inside `process_user_action`.

use tracing::{error, info, instrument};

use crate::domain::UserAction;
use crate::extract::Variable;
use crate::protocol::{
  to_action_result, to_playground_out, ActionResultOut, PlaygroundOut, ProblemSummaryOut,
};
use crate::state::AppState;

#[instrument(level = "info", skip(state), fields(%problem_id))]
pub async fn start_playground(state: &AppState, problem_id: &str) -> Result<PlaygroundOut, String> {
  let session_id = state.start_session(problem_id).await?;
  state
    .with_session(&session_id, |a| to_playground_out(&session_id, a))
    .await
    .ok_or_else(|| format!("Session '{}' vanished during start", session_id))
}

/// Practice mode: rotate to a problem from the module's pool and mount it.
#[instrument(level = "info", skip(state), fields(%module))]
pub async fn practice_playground(state: &AppState, module: &str) -> Result<PlaygroundOut, String> {
  let (problem, origin) = state.choose_practice(module).await;
  info!(target: "playground", %module, id = %problem.id, %origin, "Practice problem chosen");
  start_playground(state, &problem.id).await
}

#[instrument(level = "info", skip(state, action), fields(%session_id, action_len = action.len()))]
pub async fn apply_user_action(
  state: &AppState,
  session_id: &str,
  action: &str,
  element_index: Option<usize>,
) -> Result<ActionResultOut, String> {
  let result = state
    .with_session(session_id, |a| {
      let outcome = a.process_user_action(action, element_index);
      to_action_result(a, outcome)
    })
    .await
    .ok_or_else(|| format!("Unknown sessionId: {}", session_id))?;
  info!(
    target: "playground",
    %session_id,
    %action,
    success = result.success,
    step_complete = result.is_step_complete,
    "User action evaluated"
  );
  Ok(result)
}

#[instrument(level = "info", skip(state), fields(%session_id))]
pub async fn reset_playground(state: &AppState, session_id: &str) -> Result<PlaygroundOut, String> {
  state
    .with_session(session_id, |a| {
      a.reset();
      to_playground_out(session_id, a)
    })
    .await
    .ok_or_else(|| format!("Unknown sessionId: {}", session_id))
}

#[instrument(level = "info", skip(state), fields(%session_id))]
pub async fn end_playground(state: &AppState, session_id: &str) -> bool {
  state.end_session(session_id).await
}

pub async fn playground_state(state: &AppState, session_id: &str) -> Result<PlaygroundOut, String> {
  state
    .with_session(session_id, |a| to_playground_out(session_id, a))
    .await
    .ok_or_else(|| format!("Unknown sessionId: {}", session_id))
}

/// Side-panel variables for one session, in authored display order.
pub async fn session_variables(state: &AppState, session_id: &str) -> Result<Vec<Variable>, String> {
  state
    .with_session(session_id, |a| a.get_variables())
    .await
    .ok_or_else(|| format!("Unknown sessionId: {}", session_id))
}

/// The append-only action log; display and debugging only.
pub async fn session_actions(state: &AppState, session_id: &str) -> Result<Vec<UserAction>, String> {
  state
    .with_session(session_id, |a| a.get_current_state().user_actions.clone())
    .await
    .ok_or_else(|| format!("Unknown sessionId: {}", session_id))
}

pub async fn list_problems(state: &AppState, module: &str) -> Vec<ProblemSummaryOut> {
  state
    .problems_for_module(module)
    .await
    .iter()
    .map(|p| crate::protocol::to_problem_summary(p))
    .collect()
}

struct StepContext {
  title: String,
  description: String,
  jarvis: String,
  code_hint: Option<String>,
  code_snippet: Option<String>,
  code_explanation: Option<String>,
}

async fn step_context(state: &AppState, session_id: &str) -> Option<StepContext> {
  state
    .with_session(session_id, |a| StepContext {
      title: a.problem().title.clone(),
      description: a.get_step_description(),
      jarvis: a.get_jarvis_message(),
      code_hint: a.get_code_hint(),
      code_snippet: a.get_code_snippet(),
      code_explanation: a.get_code_explanation(),
    })
    .await
}

#[instrument(level = "info", skip(state), fields(%session_id))]
pub async fn get_hint_text(state: &AppState, session_id: &str) -> String {
  let Some(ctx) = step_context(state, session_id).await else {
    return "No hint: unknown session.".into();
  };

  if let Some(assistant) = &state.assistant {
    match assistant
      .step_hint(
        &state.prompts,
        &ctx.title,
        &ctx.description,
        ctx.code_hint.as_deref().unwrap_or(""),
      )
      .await
    {
      Ok(t) => return t,
      Err(e) => {
        error!(target: "playground", %session_id, error = %e, "Assistant hint failed; using local hint.");
      }
    }
  }
  local_hint(&ctx)
}

#[instrument(level = "info", skip(state, question), fields(%session_id, question_len = question.len()))]
pub async fn do_agent_reply(state: &AppState, session_id: &str, question: &str) -> String {
  let ctx_text = step_context(state, session_id).await.map(|c| {
    let mut parts: Vec<String> = vec![format!("Problem: {}", c.title)];
    parts.push(format!("Current step: {}", c.description));
    parts.push(format!("Narration: {}", c.jarvis));
    if let Some(hint) = &c.code_hint {
      parts.push(format!("Code hint: {}", hint));
    }
    parts.join("\n")
  });

  if let Some(assistant) = &state.assistant {
    match assistant
      .jarvis_reply(&state.prompts, ctx_text.as_deref().unwrap_or(""), question)
      .await
    {
      Ok(t) => return t,
      Err(e) => {
        error!(target: "playground", %session_id, error = %e, "Assistant reply failed; using stub.");
      }
    }
  }
  agent_reply_stub(question)
}

#[instrument(level = "info", skip(state), fields(%session_id))]
pub async fn explain_current_snippet(state: &AppState, session_id: &str) -> String {
  let Some(ctx) = step_context(state, session_id).await else {
    return "No explanation: unknown session.".into();
  };
  let Some(snippet) = &ctx.code_snippet else {
    // Authored explanation still counts even without a snippet.
    return ctx
      .code_explanation
      .clone()
      .unwrap_or_else(|| "This step has no code attached; follow the description.".into());
  };

  if let Some(assistant) = &state.assistant {
    match assistant
      .explain_snippet(&state.prompts, snippet, &ctx.description)
      .await
    {
      Ok(t) => return t,
      Err(e) => {
        error!(target: "playground", %session_id, error = %e, "Assistant explanation failed; using authored text.");
      }
    }
  }
  ctx
    .code_explanation
    .clone()
    .unwrap_or_else(|| format!("The step runs: {}", snippet))
}

// -------- Local fallbacks --------

fn local_hint(ctx: &StepContext) -> String {
  match &ctx.code_hint {
    Some(hint) => format!("{} Hint: {}", ctx.description.trim(), hint.trim()),
    None => ctx.description.trim().to_string(),
  }
}

/// Tiny agent fallback that answers the most common sliding-window questions.
fn agent_reply_stub(text: &str) -> String {
  let s = text.to_lowercase();
  if s.contains("window") {
    "The window is just a pair of indices over the data. Growing it adds the entering element; sliding it also drops the leaving one.".into()
  } else if s.contains("why") {
    "Short answer: we reuse the previous window's work instead of recomputing from scratch, which is what makes the pass linear.".into()
  } else if s.contains("stuck") || s.contains("help") {
    "Re-read the current step's description; it names the exact move. The code hint shows the same move in code.".into()
  } else {
    "Try asking about the current step, the window, or why the algorithm takes a single pass.".into()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn stub_answers_window_questions() {
    let reply = agent_reply_stub("what is the window doing here?");
    assert!(reply.contains("pair of indices"));
  }

  #[test]
  fn local_hint_recombines_description_and_code_hint() {
    let ctx = StepContext {
      title: "t".into(),
      description: "Grow the window.".into(),
      jarvis: "j".into(),
      code_hint: Some("sum += arr[end];".into()),
      code_snippet: None,
      code_explanation: None,
    };
    assert_eq!(local_hint(&ctx), "Grow the window. Hint: sum += arr[end];");
  }
}

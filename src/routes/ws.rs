//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to core logic. We reply with a single JSON message per request.

use std::sync::Arc;

use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{debug, error, info, instrument};

use crate::logic::*;
use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "windowlab_backend", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "windowlab_backend", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        // Parse, dispatch, serialize response.
        let reply_msg = match serde_json::from_str::<ClientWsMessage>(&txt) {
          Ok(incoming) => {
            debug!(target = "windowlab_backend", "WS received: {:?}", &incoming);
            handle_client_ws(incoming, &state).await
          }
          Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
        };

        let out = serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
          serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
        });

        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "windowlab_backend", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "windowlab_backend", "WebSocket disconnected");
}

#[instrument(level = "info", skip(state))]
async fn handle_client_ws(msg: ClientWsMessage, state: &AppState) -> ServerWsMessage {
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::StartPlayground { problem_id } => {
      match start_playground(state, &problem_id).await {
        Ok(playground) => {
          tracing::info!(target: "playground", id = %problem_id, session = %playground.session_id, "WS playground started");
          ServerWsMessage::Playground { playground }
        }
        Err(message) => ServerWsMessage::Error { message },
      }
    }

    ClientWsMessage::Practice { module } => match practice_playground(state, &module).await {
      Ok(playground) => ServerWsMessage::Playground { playground },
      Err(message) => ServerWsMessage::Error { message },
    },

    ClientWsMessage::UserAction { session_id, action, element_index } => {
      match apply_user_action(state, &session_id, &action, element_index).await {
        Ok(result) => {
          tracing::info!(target: "playground", %session_id, success = result.success, "WS user action evaluated");
          ServerWsMessage::ActionResult { result }
        }
        Err(message) => ServerWsMessage::Error { message },
      }
    }

    ClientWsMessage::ResetPlayground { session_id } => {
      match reset_playground(state, &session_id).await {
        Ok(playground) => ServerWsMessage::Playground { playground },
        Err(message) => ServerWsMessage::Error { message },
      }
    }

    ClientWsMessage::EndPlayground { session_id } => {
      let ok = end_playground(state, &session_id).await;
      ServerWsMessage::Ended { ok }
    }

    ClientWsMessage::Hint { session_id } => {
      let text = get_hint_text(state, &session_id).await;
      tracing::info!(target: "playground", %session_id, "WS hint served");
      ServerWsMessage::Hint { text }
    }

    ClientWsMessage::Variables { session_id } => {
      match session_variables(state, &session_id).await {
        Ok(variables) => ServerWsMessage::Variables { variables },
        Err(message) => ServerWsMessage::Error { message },
      }
    }

    ClientWsMessage::ExplainCode { session_id } => {
      let text = explain_current_snippet(state, &session_id).await;
      ServerWsMessage::Explanation { text }
    }

    ClientWsMessage::AgentMessage { session_id, text } => {
      let reply = do_agent_reply(state, &session_id, &text).await;
      ServerWsMessage::AgentReply { text: reply }
    }

    ClientWsMessage::ListProblems { module } => {
      let problems = list_problems(state, &module).await;
      ServerWsMessage::Problems { problems }
    }

    ClientWsMessage::ModuleInfo { module } => match state.registry.get(&module) {
      Some(m) => ServerWsMessage::Module { module: m.clone() },
      None => ServerWsMessage::Error { message: format!("Unknown module: {}", module) },
    },
  }
}

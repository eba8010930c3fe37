//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::adapter::EngineAdapter;
use crate::config::ModuleCfg;
use crate::domain::{ActionOutcome, IndexSpec, ProblemDefinition, UiState, UserAction};
use crate::extract::Variable;

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    StartPlayground {
        #[serde(rename = "problemId")]
        problem_id: String,
    },
    Practice {
        module: String,
    },
    UserAction {
        #[serde(rename = "sessionId")]
        session_id: String,
        action: String,
        #[serde(rename = "elementIndex")]
        element_index: Option<usize>,
    },
    ResetPlayground {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    EndPlayground {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    Hint {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    Variables {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    ExplainCode {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    AgentMessage {
        #[serde(rename = "sessionId")]
        session_id: String,
        text: String,
    },
    ListProblems {
        module: String,
    },
    ModuleInfo {
        module: String,
    },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Playground {
        playground: PlaygroundOut,
    },
    ActionResult {
        result: ActionResultOut,
    },
    Hint {
        text: String,
    },
    Variables {
        variables: Vec<Variable>,
    },
    Explanation {
        text: String,
    },
    AgentReply {
        text: String,
    },
    Problems {
        problems: Vec<ProblemSummaryOut>,
    },
    Module {
        module: ModuleCfg,
    },
    Ended {
        ok: bool,
    },
    Error {
        message: String,
    },
}

/// DTO used by both WS and HTTP for playground delivery.
#[derive(Debug, Serialize)]
pub struct PlaygroundOut {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(rename = "problemId")]
    pub problem_id: String,
    pub title: String,
    pub variant: String,
    #[serde(rename = "totalSteps")]
    pub total_steps: usize,
    pub progress: f32,
    #[serde(rename = "isCompleted")]
    pub is_completed: bool,
    pub step: StepOut,
    #[serde(rename = "uiState")]
    pub ui_state: UiState,
}

/// The current step with display-safe defaults already applied by the
/// adapter. `expectedElementIndex` is withheld when the author hides it.
#[derive(Debug, Serialize)]
pub struct StepOut {
    #[serde(rename = "stepId")]
    pub step_id: u32,
    pub description: String,
    #[serde(rename = "jarvisMessage")]
    pub jarvis_message: String,
    #[serde(rename = "codeHint")]
    pub code_hint: Option<String>,
    #[serde(rename = "codeSnippet")]
    pub code_snippet: Option<String>,
    #[serde(rename = "codeExplanation")]
    pub code_explanation: Option<String>,
    #[serde(rename = "expectedElementIndex", skip_serializing_if = "Option::is_none")]
    pub expected_element_index: Option<IndexSpec>,
}

#[derive(Debug, Serialize)]
pub struct ActionResultOut {
    pub success: bool,
    pub feedback: String,
    #[serde(rename = "nextState", skip_serializing_if = "Option::is_none")]
    pub next_state: Option<UiState>,
    #[serde(rename = "isStepComplete")]
    pub is_step_complete: bool,
    #[serde(rename = "isCompleted")]
    pub is_completed: bool,
    pub progress: f32,
    /// The step the learner is now on (the last step stays put at terminal).
    pub step: StepOut,
}

#[derive(Debug, Serialize)]
pub struct ProblemSummaryOut {
    pub id: String,
    pub title: String,
    pub variant: String,
    pub difficulty: Option<String>,
    #[serde(rename = "totalSteps")]
    pub total_steps: usize,
}

/// Convert the adapter's current step into the public DTO.
pub fn to_step_out(adapter: &EngineAdapter) -> StepOut {
    let step = adapter.get_current_step();
    StepOut {
        step_id: step.step_id,
        description: adapter.get_step_description(),
        jarvis_message: adapter.get_jarvis_message(),
        code_hint: adapter.get_code_hint(),
        code_snippet: adapter.get_code_snippet(),
        code_explanation: adapter.get_code_explanation(),
        expected_element_index: if step.hide_index_hint {
            None
        } else {
            step.expected_element_index.clone()
        },
    }
}

pub fn to_playground_out(session_id: &str, adapter: &EngineAdapter) -> PlaygroundOut {
    let state = adapter.get_current_state();
    PlaygroundOut {
        session_id: session_id.to_string(),
        problem_id: adapter.problem().id.clone(),
        title: adapter.problem().title.clone(),
        variant: adapter.variant().to_string(),
        total_steps: state.total_steps,
        progress: adapter.get_progress(),
        is_completed: state.is_completed,
        step: to_step_out(adapter),
        ui_state: state.ui_state.clone(),
    }
}

pub fn to_action_result(adapter: &EngineAdapter, outcome: ActionOutcome) -> ActionResultOut {
    ActionResultOut {
        success: outcome.success,
        feedback: outcome.feedback,
        next_state: outcome.next_state,
        is_step_complete: outcome.is_step_complete,
        is_completed: adapter.is_completed(),
        progress: adapter.get_progress(),
        step: to_step_out(adapter),
    }
}

pub fn to_problem_summary(p: &ProblemDefinition) -> ProblemSummaryOut {
    ProblemSummaryOut {
        id: p.id.clone(),
        title: p.title.clone(),
        variant: p.variant.clone(),
        difficulty: p.difficulty.clone(),
        total_steps: p.playground.steps.len(),
    }
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct StartIn {
    #[serde(rename = "problemId")]
    pub problem_id: String,
}

#[derive(Debug, Deserialize)]
pub struct PracticeQuery {
    pub module: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProblemsQuery {
    pub module: Option<String>,
}

#[derive(Deserialize)]
pub struct ActionIn {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub action: String,
    #[serde(rename = "elementIndex")]
    pub element_index: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct SessionQuery {
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

#[derive(Deserialize)]
pub struct SessionIn {
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

#[derive(Deserialize)]
pub struct AgentIn {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub text: String,
}
#[derive(Serialize)]
pub struct AgentOut {
    pub text: String,
}

#[derive(Serialize)]
pub struct HintOut {
    pub text: String,
}

#[derive(Serialize)]
pub struct VariablesOut {
    pub variables: Vec<Variable>,
}

#[derive(Serialize)]
pub struct ActionsOut {
    pub actions: Vec<UserAction>,
}

#[derive(Debug, Deserialize)]
pub struct ModuleQuery {
    pub module: String,
}

#[derive(Serialize)]
pub struct EndedOut {
    pub ok: bool,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

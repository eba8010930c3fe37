//! Domain models for the guided playground: authored step schema, the UI-state
//! snapshot visualizers render, and the per-session playground record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Display status of one visualized array/string element.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementStatus {
  NotYetReached,
  InWindow,
  OutOfWindowPast,
}
impl Default for ElementStatus {
  fn default() -> Self { ElementStatus::NotYetReached }
}

/// One visualized element: a number for array problems, a single character for
/// string problems. The engine never interprets `value`; it is display data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElementView {
  pub value: serde_json::Value,
  #[serde(default)] pub status: ElementStatus,
}

/// Expected click target for a step: one index, or any of several indices the
/// author treats as equivalent (e.g. either boundary of a two-pointer window).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IndexSpec {
  One(usize),
  AnyOf(Vec<usize>),
}

impl IndexSpec {
  pub fn accepts(&self, index: usize) -> bool {
    match self {
      IndexSpec::One(i) => *i == index,
      IndexSpec::AnyOf(set) => set.contains(&index),
    }
  }
}

/// Everything a visualization might render. A superset of optional fields:
/// each problem family populates its own subset and absent fields stay off the
/// wire. The engine swaps whole snapshots in; it never computes deltas.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UiState {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub array_elements: Option<Vec<ElementView>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub string_elements: Option<Vec<ElementView>>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub window_start: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub window_end: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub window_sum: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub max_sum: Option<i64>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub min_length: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub max_length: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub current_length: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub target_sum: Option<i64>,

  // Frequency/character tracking for the advanced family.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub char_count: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub char_frequency: Option<BTreeMap<String, i64>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub ones_count: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub zero_count: Option<i64>,

  // Prefix-sum counters (variable-window problems with extra bookkeeping).
  #[serde(skip_serializing_if = "Option::is_none")]
  pub prefix_count: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub prefix_sum: Option<i64>,

  // Pattern-matching counters.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub pattern_frequency: Option<BTreeMap<String, i64>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub matched_count: Option<i64>,

  // Two-pointer display indices.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub left_pointer: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub right_pointer: Option<i64>,

  /// Indices forming the current window; purely for display.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub highlighted_elements: Option<Vec<usize>>,

  // Completion artifacts, written once at terminal time by the fixed-size
  // family and never anywhere else.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub algorithm_steps_message: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub complexity_analysis: Option<String>,
}

/// One authored transition of a guided walkthrough. Steps carry full
/// forward-looking state, not deltas.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
  /// 1-based, contiguous, matches the step's position in the sequence.
  pub step_id: u32,
  pub description: String,
  /// Tag from the owning variant's closed vocabulary.
  pub expected_action: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub expected_element_index: Option<IndexSpec>,
  /// When set, neither the engine's feedback nor the UI may reveal which
  /// index is expected.
  #[serde(default)]
  pub hide_index_hint: bool,
  /// Complete snapshot adopted verbatim when this step is completed.
  pub ui_state: UiState,

  // Presentation payloads, opaque to control logic.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub jarvis_message: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub code_hint: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub code_snippet: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub code_explanation: Option<String>,
}

/// Full problem document as supplied by content authors. Immutable for the
/// lifetime of any engine built from it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemDefinition {
  pub id: String,
  pub title: String,
  /// Module registry key (sidebar/legend/extractor lookup).
  #[serde(default = "default_module")]
  pub module: String,
  /// Engine variant tag consumed by the factory (`sw_fixed`, `sw_variable`,
  /// `sw_prefix_sum`, `sw_advanced`).
  pub variant: String,
  #[serde(default)]
  pub difficulty: Option<String>,
  pub playground: PlaygroundDef,
  #[serde(default)]
  pub solution: Option<Solution>,
  /// Authored complexity analysis; when present it is used verbatim for the
  /// completion artifact.
  #[serde(default)]
  pub complexity_analysis: Option<String>,
}

fn default_module() -> String {
  "sliding_window".into()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaygroundDef {
  pub initial_state: UiState,
  pub steps: Vec<Step>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Solution {
  #[serde(default)]
  pub optimal: Option<OptimalSolution>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimalSolution {
  #[serde(default)]
  pub time_complexity: Option<String>,
  #[serde(default)]
  pub space_complexity: Option<String>,
  #[serde(default)]
  pub idea: Option<String>,
  #[serde(default)]
  pub walkthrough: Vec<String>,
}

/// One attempted action, appended to the session log whether it was accepted
/// or not. Display/debugging only; never read back into control flow.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAction {
  pub step_id: u32,
  pub action: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub element_index: Option<usize>,
  /// Epoch milliseconds.
  pub timestamp: u64,
  pub is_correct: bool,
  pub feedback: String,
}

/// The engine's full session record.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaygroundState {
  pub current_step: usize,
  pub total_steps: usize,
  pub ui_state: UiState,
  pub is_completed: bool,
  pub user_actions: Vec<UserAction>,
}

/// Result of `process_user_action`. `next_state: None` with `success: true`
/// means terminal: callers re-read the engine state for the final snapshot.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionOutcome {
  pub success: bool,
  pub feedback: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub next_state: Option<UiState>,
  pub is_step_complete: bool,
}

//! Engine adapter: one display-safe interface over any engine the factory
//! builds, so the playground shell never branches on variant type or on
//! missing optional step fields. This is the single place where "absent
//! optional field" turns into a renderable default.

use crate::config::ModuleRegistry;
use crate::domain::{ActionOutcome, PlaygroundState, ProblemDefinition, Step};
use crate::engine::Engine;
use crate::extract::{extract_variables, extraction_context, Variable, VariableCfg};

/// Narration used when a step authors no jarvisMessage.
const DEFAULT_JARVIS_MESSAGE: &str =
  "Keep going! Read the step description and click the element it points at.";

pub struct EngineAdapter {
  engine: Engine,
  /// Extractor descriptors captured once, for the problem's module key.
  extractors: Vec<VariableCfg>,
}

impl EngineAdapter {
  pub fn new(engine: Engine, registry: &ModuleRegistry) -> Self {
    let extractors = registry.variables_for(&engine.problem().module);
    Self { engine, extractors }
  }

  pub fn problem(&self) -> &ProblemDefinition {
    self.engine.problem()
  }

  pub fn variant(&self) -> &'static str {
    self.engine.variant()
  }

  pub fn get_current_state(&self) -> &PlaygroundState {
    self.engine.get_current_state()
  }

  pub fn get_current_step(&self) -> &Step {
    self.engine.get_current_step()
  }

  pub fn process_user_action(&mut self, action: &str, element_index: Option<usize>) -> ActionOutcome {
    self.engine.process_user_action(action, element_index)
  }

  pub fn reset(&mut self) {
    self.engine.reset()
  }

  pub fn is_completed(&self) -> bool {
    self.engine.is_completed()
  }

  pub fn get_progress(&self) -> f32 {
    self.engine.get_progress()
  }

  /// Side-panel variables for the current state, in authored display order.
  pub fn get_variables(&self) -> Vec<Variable> {
    let ctx = extraction_context(self.engine.get_current_state(), self.engine.problem());
    extract_variables(&self.extractors, &ctx)
  }

  pub fn get_step_description(&self) -> String {
    self.engine.get_current_step().description.clone()
  }

  pub fn get_jarvis_message(&self) -> String {
    self
      .engine
      .get_current_step()
      .jarvis_message
      .clone()
      .unwrap_or_else(|| DEFAULT_JARVIS_MESSAGE.to_string())
  }

  /// `None` renders as JSON `null`; the shell hides the code panel then.
  pub fn get_code_hint(&self) -> Option<String> {
    self.engine.get_current_step().code_hint.clone()
  }

  pub fn get_code_snippet(&self) -> Option<String> {
    self.engine.get_current_step().code_snippet.clone()
  }

  pub fn get_code_explanation(&self) -> Option<String> {
    self.engine.get_current_step().code_explanation.clone()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{PlaygroundDef, UiState};
  use crate::engine::{create_engine, VARIANT_FIXED};

  fn bare_step(id: u32, action: &str) -> crate::domain::Step {
    crate::domain::Step {
      step_id: id,
      description: format!("Do thing {id}."),
      expected_action: action.into(),
      expected_element_index: None,
      hide_index_hint: false,
      ui_state: UiState { window_sum: Some(id as i64), ..UiState::default() },
      jarvis_message: None,
      code_hint: None,
      code_snippet: None,
      code_explanation: None,
    }
  }

  fn problem() -> ProblemDefinition {
    ProblemDefinition {
      id: "p-adapter".into(),
      title: "Adapter fixture".into(),
      module: "sliding_window".into(),
      variant: VARIANT_FIXED.into(),
      difficulty: None,
      playground: PlaygroundDef {
        initial_state: UiState { window_sum: Some(0), ..UiState::default() },
        steps: vec![bare_step(1, "click_initialize"), bare_step(2, "complete_algorithm")],
      },
      solution: None,
      complexity_analysis: None,
    }
  }

  fn adapter() -> EngineAdapter {
    let registry = ModuleRegistry::build(&[]);
    let engine = create_engine(VARIANT_FIXED, problem()).expect("engine");
    EngineAdapter::new(engine, &registry)
  }

  #[test]
  fn missing_optional_fields_get_display_safe_defaults() {
    let adapter = adapter();
    assert_eq!(adapter.get_code_hint(), None);
    assert_eq!(adapter.get_code_snippet(), None);
    assert!(adapter.get_jarvis_message().contains("Keep going"));
    assert_eq!(adapter.get_step_description(), "Do thing 1.");
  }

  #[test]
  fn authored_fields_pass_through_unchanged() {
    let mut p = problem();
    p.playground.steps[0].jarvis_message = Some("Watch the left edge.".into());
    p.playground.steps[0].code_hint = Some("let mut sum = 0;".into());
    let registry = ModuleRegistry::build(&[]);
    let engine = create_engine(VARIANT_FIXED, p).expect("engine");
    let adapter = EngineAdapter::new(engine, &registry);
    assert_eq!(adapter.get_jarvis_message(), "Watch the left edge.");
    assert_eq!(adapter.get_code_hint().as_deref(), Some("let mut sum = 0;"));
  }

  #[test]
  fn variables_project_the_live_engine_state() {
    let mut adapter = adapter();
    let sum_of = |vars: &[Variable]| {
      vars
        .iter()
        .find(|v| v.name == "windowSum")
        .map(|v| v.value.clone())
        .expect("windowSum variable")
    };
    assert_eq!(sum_of(&adapter.get_variables()), "0");
    let out = adapter.process_user_action("click_initialize", None);
    assert!(out.success);
    assert_eq!(sum_of(&adapter.get_variables()), "1");
  }

  #[test]
  fn reset_round_trips_through_the_adapter() {
    let mut adapter = adapter();
    adapter.process_user_action("click_initialize", None);
    assert_eq!(adapter.get_current_state().current_step, 1);
    adapter.reset();
    assert_eq!(adapter.get_current_state().current_step, 0);
    assert!(adapter.get_current_state().user_actions.is_empty());
  }
}

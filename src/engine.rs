//! The step-driven playground engine.
//!
//! Flow:
//! 1) A problem document arrives with authored steps, each carrying a full
//!    forward-looking UI snapshot.
//! 2) The factory picks a variant spec by the problem's variant tag.
//! 3) Each user click is validated against the current step's expected
//!    action/target and either advances the walkthrough or returns a hint.
//! 4) Accepted steps adopt the authored snapshot wholesale; the engine never
//!    computes window arithmetic at runtime.
//!
//! The four problem families share one machine. A family is a `VariantSpec`
//! value: which action tags it accepts, which initial-state fields it seeds,
//! and what happens at terminal time.

use tracing::info;

use crate::domain::{
  ActionOutcome, IndexSpec, OptimalSolution, PlaygroundState, ProblemDefinition, Step, UiState,
  UserAction,
};
use crate::util::now_millis;

pub const VARIANT_FIXED: &str = "sw_fixed";
pub const VARIANT_VARIABLE: &str = "sw_variable";
pub const VARIANT_PREFIX_SUM: &str = "sw_prefix_sum";
pub const VARIANT_ADVANCED: &str = "sw_advanced";

/// Whether an action tag consumes the clicked element index.
#[derive(Clone, Copy, Debug, PartialEq)]
enum TargetPolicy {
  /// The index is ignored even if one is supplied.
  Ignored,
  /// The index must satisfy the step's `expectedElementIndex`; steps authored
  /// without one validate on the action tag alone.
  FromStep,
}

#[derive(Clone, Copy, Debug)]
struct ActionDef {
  tag: &'static str,
  target: TargetPolicy,
}

const fn act(tag: &'static str, target: TargetPolicy) -> ActionDef {
  ActionDef { tag, target }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum CompletionPolicy {
  /// Adopt the final authored snapshot and stop.
  Freeze,
  /// Adopt the final snapshot, then attach the walkthrough summary and the
  /// complexity analysis (fixed-size family only).
  FixedArtifacts,
}

/// Everything that distinguishes one engine family from another.
#[derive(Debug)]
pub struct VariantSpec {
  name: &'static str,
  vocabulary: &'static [ActionDef],
  seed: fn(&UiState) -> UiState,
  completion: CompletionPolicy,
}

const FIXED_VOCAB: &[ActionDef] = &[
  act("click_initialize", TargetPolicy::Ignored),
  act("add_element_to_window", TargetPolicy::FromStep),
  act("slide_window", TargetPolicy::FromStep),
  act("update_best", TargetPolicy::FromStep),
  act("complete_algorithm", TargetPolicy::Ignored),
];

const VARIABLE_VOCAB: &[ActionDef] = &[
  act("click_initialize", TargetPolicy::Ignored),
  act("expand_window", TargetPolicy::FromStep),
  act("contract_window", TargetPolicy::FromStep),
  act("add_element_to_window", TargetPolicy::FromStep),
  act("update_best", TargetPolicy::FromStep),
  act("process_element", TargetPolicy::FromStep),
  act("transform_array", TargetPolicy::FromStep),
  act("complete_algorithm", TargetPolicy::FromStep),
];

const ADVANCED_VOCAB: &[ActionDef] = &[
  act("click_initialize", TargetPolicy::Ignored),
  act("expand_window", TargetPolicy::FromStep),
  act("contract_window", TargetPolicy::FromStep),
  act("process_element", TargetPolicy::FromStep),
  act("update_frequency", TargetPolicy::FromStep),
  act("match_pattern", TargetPolicy::FromStep),
  act("update_best", TargetPolicy::FromStep),
  act("complete_algorithm", TargetPolicy::FromStep),
];

static FIXED: VariantSpec = VariantSpec {
  name: VARIANT_FIXED,
  vocabulary: FIXED_VOCAB,
  seed: seed_fixed,
  completion: CompletionPolicy::FixedArtifacts,
};

static VARIABLE: VariantSpec = VariantSpec {
  name: VARIANT_VARIABLE,
  vocabulary: VARIABLE_VOCAB,
  seed: seed_variable,
  completion: CompletionPolicy::Freeze,
};

static ADVANCED: VariantSpec = VariantSpec {
  name: VARIANT_ADVANCED,
  vocabulary: ADVANCED_VOCAB,
  seed: seed_advanced,
  completion: CompletionPolicy::Freeze,
};

/// Numeric-window seed: elements, window bounds, running sums.
fn seed_fixed(initial: &UiState) -> UiState {
  UiState {
    array_elements: initial.array_elements.clone(),
    string_elements: initial.string_elements.clone(),
    window_start: initial.window_start,
    window_end: initial.window_end,
    window_sum: initial.window_sum,
    max_sum: initial.max_sum,
    current_length: initial.current_length,
    highlighted_elements: initial.highlighted_elements.clone(),
    ..UiState::default()
  }
}

/// Variable-window seed. Also carries the prefix counters when the author set
/// them: prefix-sum problems are variable-window problems with extra
/// bookkeeping, not a separate family.
fn seed_variable(initial: &UiState) -> UiState {
  UiState {
    array_elements: initial.array_elements.clone(),
    string_elements: initial.string_elements.clone(),
    window_start: initial.window_start,
    window_end: initial.window_end,
    window_sum: initial.window_sum,
    target_sum: initial.target_sum,
    min_length: initial.min_length,
    max_length: initial.max_length,
    current_length: initial.current_length,
    prefix_count: initial.prefix_count,
    prefix_sum: initial.prefix_sum,
    highlighted_elements: initial.highlighted_elements.clone(),
    ..UiState::default()
  }
}

/// Frequency/pattern seed for the advanced family.
fn seed_advanced(initial: &UiState) -> UiState {
  UiState {
    array_elements: initial.array_elements.clone(),
    string_elements: initial.string_elements.clone(),
    window_start: initial.window_start,
    window_end: initial.window_end,
    max_length: initial.max_length,
    current_length: initial.current_length,
    char_count: initial.char_count,
    char_frequency: initial.char_frequency.clone(),
    ones_count: initial.ones_count,
    zero_count: initial.zero_count,
    pattern_frequency: initial.pattern_frequency.clone(),
    matched_count: initial.matched_count,
    left_pointer: initial.left_pointer,
    right_pointer: initial.right_pointer,
    highlighted_elements: initial.highlighted_elements.clone(),
    ..UiState::default()
  }
}

/// Build an engine for the given variant tag. Unknown tags fail here, at
/// construction time; they are content errors, not runtime user errors.
pub fn create_engine(variant: &str, problem: ProblemDefinition) -> Result<Engine, String> {
  let spec = match variant {
    VARIANT_FIXED => &FIXED,
    // Prefix-sum problems intentionally reuse the variable-window construction.
    VARIANT_VARIABLE | VARIANT_PREFIX_SUM => &VARIABLE,
    VARIANT_ADVANCED => &ADVANCED,
    other => {
      return Err(format!(
        "Unknown playground variant tag '{other}' (expected sw_fixed, sw_variable, sw_prefix_sum or sw_advanced)"
      ))
    }
  };
  Engine::new(spec, problem)
}

/// The stateful validator/advancer for one problem's step sequence.
#[derive(Debug)]
pub struct Engine {
  spec: &'static VariantSpec,
  problem: ProblemDefinition,
  state: PlaygroundState,
}

impl Engine {
  fn new(spec: &'static VariantSpec, problem: ProblemDefinition) -> Result<Self, String> {
    let steps = &problem.playground.steps;
    if steps.is_empty() {
      return Err(format!("Problem '{}' has no playground steps", problem.id));
    }
    for (i, step) in steps.iter().enumerate() {
      if step.step_id as usize != i + 1 {
        return Err(format!(
          "Problem '{}': stepId {} at position {} (stepIds must be 1-based and contiguous)",
          problem.id, step.step_id, i
        ));
      }
      if !spec.vocabulary.iter().any(|a| a.tag == step.expected_action) {
        return Err(format!(
          "Problem '{}': step {} expects action '{}' which is outside the {} vocabulary",
          problem.id, step.step_id, step.expected_action, spec.name
        ));
      }
    }

    let state = PlaygroundState {
      current_step: 0,
      total_steps: steps.len(),
      ui_state: (spec.seed)(&problem.playground.initial_state),
      is_completed: false,
      user_actions: Vec::new(),
    };
    Ok(Self { spec, problem, state })
  }

  pub fn variant(&self) -> &'static str {
    self.spec.name
  }

  pub fn problem(&self) -> &ProblemDefinition {
    &self.problem
  }

  /// Read-only snapshot of the session record. No side effects.
  pub fn get_current_state(&self) -> &PlaygroundState {
    &self.state
  }

  /// The step the learner is on. The terminal branch freezes the pointer at
  /// the last valid index, so this cannot go out of bounds in normal use.
  pub fn get_current_step(&self) -> &Step {
    &self.problem.playground.steps[self.state.current_step]
  }

  pub fn is_completed(&self) -> bool {
    self.state.is_completed
  }

  /// Advisory only; never used for control flow.
  pub fn get_progress(&self) -> f32 {
    self.state.current_step as f32 / self.state.total_steps as f32 * 100.0
  }

  /// Discard session progress and reseed from the retained problem document.
  pub fn reset(&mut self) {
    self.state = PlaygroundState {
      current_step: 0,
      total_steps: self.problem.playground.steps.len(),
      ui_state: (self.spec.seed)(&self.problem.playground.initial_state),
      is_completed: false,
      user_actions: Vec::new(),
    };
  }

  /// Validate `(action, element_index)` against the current step and either
  /// commit the transition or reject with a hint. Atomic from the caller's
  /// perspective: rejection leaves everything but the action log untouched.
  pub fn process_user_action(&mut self, action: &str, element_index: Option<usize>) -> ActionOutcome {
    let step = self.get_current_step().clone();
    let is_last = self.state.current_step + 1 == self.state.total_steps;

    let valid = self.validate(&step, action, element_index);
    let feedback = if !valid {
      rejection_feedback(&step)
    } else if is_last {
      "Algorithm complete! Review the summary panel to see the full picture.".to_string()
    } else {
      "Correct! Moving on to the next step.".to_string()
    };

    // The log entry lands on both branches, before the fork.
    self.state.user_actions.push(UserAction {
      step_id: step.step_id,
      action: action.to_string(),
      element_index,
      timestamp: now_millis(),
      is_correct: valid,
      feedback: feedback.clone(),
    });

    if !valid {
      return ActionOutcome { success: false, feedback, next_state: None, is_step_complete: false };
    }

    // Adopt the completed step's authored snapshot wholesale.
    self.state.ui_state = step.ui_state.clone();

    if is_last {
      if self.spec.completion == CompletionPolicy::FixedArtifacts {
        self.attach_completion_artifacts();
      }
      self.state.is_completed = true;
      info!(target: "playground", problem = %self.problem.id, steps = self.state.total_steps, "Walkthrough completed");
      ActionOutcome { success: true, feedback, next_state: None, is_step_complete: true }
    } else {
      self.state.current_step += 1;
      ActionOutcome {
        success: true,
        feedback,
        next_state: Some(self.state.ui_state.clone()),
        is_step_complete: false,
      }
    }
  }

  fn validate(&self, step: &Step, action: &str, element_index: Option<usize>) -> bool {
    if action != step.expected_action {
      return false;
    }
    let policy = self
      .spec
      .vocabulary
      .iter()
      .find(|a| a.tag == action)
      .map(|a| a.target)
      .unwrap_or(TargetPolicy::FromStep);
    match (policy, &step.expected_element_index) {
      (TargetPolicy::Ignored, _) => true,
      (TargetPolicy::FromStep, None) => true,
      (TargetPolicy::FromStep, Some(expected)) => {
        element_index.map(|i| expected.accepts(i)).unwrap_or(false)
      }
    }
  }

  fn attach_completion_artifacts(&mut self) {
    self.state.ui_state.algorithm_steps_message = self.walkthrough_summary();
    self.state.ui_state.complexity_analysis = self.complexity_summary();
  }

  fn walkthrough_summary(&self) -> Option<String> {
    let optimal = self.problem.solution.as_ref()?.optimal.as_ref()?;
    if optimal.walkthrough.is_empty() {
      return None;
    }
    let numbered: Vec<String> = optimal
      .walkthrough
      .iter()
      .enumerate()
      .map(|(i, line)| format!("{}. {}", i + 1, line))
      .collect();
    Some(numbered.join("\n"))
  }

  /// Fallback chain, in order: authored analysis verbatim, the final step's
  /// codeExplanation, synthesis from the optimal-solution summary.
  fn complexity_summary(&self) -> Option<String> {
    if let Some(text) = &self.problem.complexity_analysis {
      return Some(text.clone());
    }
    if let Some(text) = self
      .problem
      .playground
      .steps
      .last()
      .and_then(|s| s.code_explanation.clone())
    {
      return Some(text);
    }
    let optimal = self.problem.solution.as_ref()?.optimal.as_ref()?;
    synthesize_complexity(optimal)
  }
}

fn rejection_feedback(step: &Step) -> String {
  let mut hint = step.description.trim().to_string();
  if let Some(code_hint) = &step.code_hint {
    hint.push_str(&format!(" Hint: {}", code_hint.trim()));
  }
  if !step.hide_index_hint {
    match &step.expected_element_index {
      Some(IndexSpec::One(i)) => hint.push_str(&format!(" (Look at element {}.)", i)),
      Some(IndexSpec::AnyOf(set)) => {
        let list: Vec<String> = set.iter().map(|i| i.to_string()).collect();
        hint.push_str(&format!(" (Any of elements {} works.)", list.join(", ")));
      }
      None => {}
    }
  }
  format!("Not quite. {hint}")
}

fn synthesize_complexity(optimal: &OptimalSolution) -> Option<String> {
  let mut parts: Vec<String> = Vec::new();
  if let Some(tc) = &optimal.time_complexity {
    parts.push(format!("Time {}: {}", tc, complexity_note(tc)));
  }
  if let Some(sc) = &optimal.space_complexity {
    parts.push(format!("Space {}: {}", sc, complexity_note(sc)));
  }
  if let Some(idea) = &optimal.idea {
    parts.push(idea.clone());
  }
  if parts.is_empty() {
    None
  } else {
    Some(parts.join(" "))
  }
}

/// Canned explanatory copy keyed by complexity class.
fn complexity_note(class: &str) -> &'static str {
  match class.trim() {
    "O(1)" => "constant work no matter how large the input grows.",
    "O(n)" => "a single pass over the input, so work grows linearly with its length.",
    "O(n²)" | "O(n^2)" => "nested passes over the input, so work grows quadratically.",
    "O(log n)" => "the search space halves at every step.",
    _ => "see the walkthrough above for how the work scales.",
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{ElementStatus, ElementView, PlaygroundDef, Solution};

  fn elems(values: &[i64], statuses: &[ElementStatus]) -> Vec<ElementView> {
    values
      .iter()
      .zip(statuses.iter())
      .map(|(v, s)| ElementView { value: serde_json::json!(v), status: s.clone() })
      .collect()
  }

  fn step(id: u32, action: &str, index: Option<IndexSpec>, ui: UiState) -> Step {
    Step {
      step_id: id,
      description: format!("Step {id} of the walkthrough."),
      expected_action: action.to_string(),
      expected_element_index: index,
      hide_index_hint: false,
      ui_state: ui,
      jarvis_message: None,
      code_hint: Some("windowSum += arr[windowEnd]".into()),
      code_snippet: None,
      code_explanation: None,
    }
  }

  fn ui_with_sum(sum: i64) -> UiState {
    UiState {
      array_elements: Some(elems(&[2, 1, 5, 1, 3, 2], &vec![ElementStatus::NotYetReached; 6])),
      window_sum: Some(sum),
      ..UiState::default()
    }
  }

  /// The three-step fixed-size scenario: initialize, add element 2, complete.
  fn three_step_problem() -> ProblemDefinition {
    ProblemDefinition {
      id: "p-fixed-3".into(),
      title: "Maximum Sum Subarray of Size K".into(),
      module: "sliding_window".into(),
      variant: VARIANT_FIXED.into(),
      difficulty: None,
      playground: PlaygroundDef {
        initial_state: ui_with_sum(0),
        steps: vec![
          step(1, "click_initialize", None, ui_with_sum(0)),
          step(2, "add_element_to_window", Some(IndexSpec::One(2)), ui_with_sum(8)),
          step(3, "complete_algorithm", None, ui_with_sum(8)),
        ],
      },
      solution: Some(Solution {
        optimal: Some(OptimalSolution {
          time_complexity: Some("O(n)".into()),
          space_complexity: None,
          idea: None,
          walkthrough: vec![],
        }),
      }),
      complexity_analysis: None,
    }
  }

  #[test]
  fn valid_actions_advance_one_step_at_a_time() {
    let mut engine = create_engine(VARIANT_FIXED, three_step_problem()).expect("engine");
    assert_eq!(engine.get_current_state().current_step, 0);

    let out = engine.process_user_action("click_initialize", None);
    assert!(out.success);
    assert!(!out.is_step_complete);
    assert_eq!(engine.get_current_state().current_step, 1);

    // Wrong index first: state unchanged.
    let bad = engine.process_user_action("add_element_to_window", Some(1));
    assert!(!bad.success);
    assert_eq!(engine.get_current_state().current_step, 1);
    assert!(!engine.is_completed());

    let ok = engine.process_user_action("add_element_to_window", Some(2));
    assert!(ok.success);
    assert_eq!(engine.get_current_state().current_step, 2);
    assert_eq!(ok.next_state.as_ref().and_then(|s| s.window_sum), Some(8));

    let done = engine.process_user_action("complete_algorithm", None);
    assert!(done.success);
    assert!(done.is_step_complete);
    assert!(done.next_state.is_none());
    assert!(engine.is_completed());
    // Pointer frozen at the last valid index.
    assert_eq!(engine.get_current_state().current_step, 2);
  }

  #[test]
  fn rejection_is_a_no_op_apart_from_the_log() {
    let mut engine = create_engine(VARIANT_FIXED, three_step_problem()).expect("engine");
    engine.process_user_action("click_initialize", None);

    let before = engine.get_current_state().clone();
    let out = engine.process_user_action("slide_window", Some(4));
    assert!(!out.success);
    assert!(out.next_state.is_none());

    let after = engine.get_current_state();
    assert_eq!(after.current_step, before.current_step);
    assert_eq!(after.ui_state, before.ui_state);
    assert_eq!(after.is_completed, before.is_completed);
    assert_eq!(after.user_actions.len(), before.user_actions.len() + 1);
    assert!(!after.user_actions.last().unwrap().is_correct);
  }

  #[test]
  fn rejection_feedback_recombines_description_and_code_hint() {
    let mut engine = create_engine(VARIANT_FIXED, three_step_problem()).expect("engine");
    engine.process_user_action("click_initialize", None);
    let out = engine.process_user_action("add_element_to_window", Some(5));
    assert!(out.feedback.contains("Step 2 of the walkthrough."));
    assert!(out.feedback.contains("Hint: windowSum += arr[windowEnd]"));
    assert!(out.feedback.contains("element 2"));
  }

  #[test]
  fn hidden_index_hint_is_not_revealed() {
    let mut problem = three_step_problem();
    problem.playground.steps[1].hide_index_hint = true;
    let mut engine = create_engine(VARIANT_FIXED, problem).expect("engine");
    engine.process_user_action("click_initialize", None);
    let out = engine.process_user_action("add_element_to_window", Some(5));
    assert!(!out.success);
    assert!(!out.feedback.contains("element 2"));
  }

  #[test]
  fn reset_restores_the_freshly_built_state() {
    let problem = three_step_problem();
    let fresh = create_engine(VARIANT_FIXED, problem.clone()).expect("engine");
    let initial = fresh.get_current_state().clone();

    let mut engine = create_engine(VARIANT_FIXED, problem).expect("engine");
    engine.process_user_action("click_initialize", None);
    engine.process_user_action("add_element_to_window", Some(2));
    engine.process_user_action("complete_algorithm", None);
    assert!(engine.is_completed());

    engine.reset();
    assert_eq!(engine.get_current_state(), &initial);
  }

  #[test]
  fn any_of_indices_accepts_either_end_and_nothing_else() {
    let mut problem = three_step_problem();
    problem.playground.steps[1].expected_element_index = Some(IndexSpec::AnyOf(vec![0, 5]));

    for accepted in [0usize, 5] {
      let mut engine = create_engine(VARIANT_FIXED, problem.clone()).expect("engine");
      engine.process_user_action("click_initialize", None);
      let out = engine.process_user_action("add_element_to_window", Some(accepted));
      assert!(out.success, "index {accepted} should be accepted");
    }

    let mut engine = create_engine(VARIANT_FIXED, problem).expect("engine");
    engine.process_user_action("click_initialize", None);
    let out = engine.process_user_action("add_element_to_window", Some(3));
    assert!(!out.success);
  }

  #[test]
  fn actions_without_element_requirement_ignore_the_index() {
    let mut engine = create_engine(VARIANT_FIXED, three_step_problem()).expect("engine");
    let out = engine.process_user_action("click_initialize", Some(4));
    assert!(out.success);
  }

  fn complete(engine: &mut Engine) {
    engine.process_user_action("click_initialize", None);
    engine.process_user_action("add_element_to_window", Some(2));
    engine.process_user_action("complete_algorithm", None);
  }

  #[test]
  fn completion_synthesizes_the_canned_complexity_note() {
    // Only solution.optimal.timeComplexity = "O(n)" is available.
    let mut engine = create_engine(VARIANT_FIXED, three_step_problem()).expect("engine");
    complete(&mut engine);
    let analysis = engine.get_current_state().ui_state.complexity_analysis.clone().expect("analysis");
    assert!(analysis.contains("O(n)"));
    assert!(analysis.contains("single pass"));
  }

  #[test]
  fn authored_complexity_analysis_wins_verbatim() {
    let mut problem = three_step_problem();
    problem.complexity_analysis = Some("Linear scan, constant extra memory.".into());
    let mut engine = create_engine(VARIANT_FIXED, problem).expect("engine");
    complete(&mut engine);
    assert_eq!(
      engine.get_current_state().ui_state.complexity_analysis.as_deref(),
      Some("Linear scan, constant extra memory.")
    );
  }

  #[test]
  fn final_step_code_explanation_beats_synthesis() {
    let mut problem = three_step_problem();
    problem.playground.steps[2].code_explanation = Some("We touched every element once.".into());
    let mut engine = create_engine(VARIANT_FIXED, problem).expect("engine");
    complete(&mut engine);
    assert_eq!(
      engine.get_current_state().ui_state.complexity_analysis.as_deref(),
      Some("We touched every element once.")
    );
  }

  #[test]
  fn walkthrough_summary_numbers_the_authored_lines() {
    let mut problem = three_step_problem();
    problem.solution.as_mut().unwrap().optimal.as_mut().unwrap().walkthrough =
      vec!["Build the first window.".into(), "Slide it to the right.".into()];
    let mut engine = create_engine(VARIANT_FIXED, problem).expect("engine");
    complete(&mut engine);
    assert_eq!(
      engine.get_current_state().ui_state.algorithm_steps_message.as_deref(),
      Some("1. Build the first window.\n2. Slide it to the right.")
    );
  }

  #[test]
  fn unknown_variant_tag_fails_at_construction() {
    let err = create_engine("sw_mystery", three_step_problem()).unwrap_err();
    assert!(err.contains("sw_mystery"));
  }

  #[test]
  fn vocabulary_is_enforced_at_construction() {
    let mut problem = three_step_problem();
    problem.playground.steps[1].expected_action = "update_frequency".into();
    let err = create_engine(VARIANT_FIXED, problem).unwrap_err();
    assert!(err.contains("update_frequency"));
  }

  #[test]
  fn step_ids_must_be_contiguous() {
    let mut problem = three_step_problem();
    problem.playground.steps[2].step_id = 7;
    assert!(create_engine(VARIANT_FIXED, problem).is_err());
  }

  #[test]
  fn prefix_sum_tag_reuses_the_variable_window_seed() {
    let mut problem = three_step_problem();
    problem.variant = VARIANT_PREFIX_SUM.into();
    problem.playground.initial_state.prefix_sum = Some(0);
    problem.playground.initial_state.prefix_count = Some(1);
    problem.playground.initial_state.char_frequency = Some(Default::default());
    for s in &mut problem.playground.steps {
      if s.expected_action == "slide_window" {
        s.expected_action = "process_element".into();
      }
    }
    let engine = create_engine(VARIANT_PREFIX_SUM, problem).expect("engine");
    assert_eq!(engine.variant(), VARIANT_VARIABLE);
    let seeded = &engine.get_current_state().ui_state;
    assert_eq!(seeded.prefix_sum, Some(0));
    assert_eq!(seeded.prefix_count, Some(1));
    // Frequency tracking belongs to the advanced family; the seed drops it.
    assert!(seeded.char_frequency.is_none());
  }

  #[test]
  fn fixed_seed_drops_foreign_fields() {
    let mut problem = three_step_problem();
    problem.playground.initial_state.char_frequency = Some(Default::default());
    problem.playground.initial_state.target_sum = Some(9);
    let engine = create_engine(VARIANT_FIXED, problem).expect("engine");
    let seeded = &engine.get_current_state().ui_state;
    assert!(seeded.char_frequency.is_none());
    assert!(seeded.target_sum.is_none());
    assert_eq!(seeded.window_sum, Some(0));
  }

  #[test]
  fn progress_is_advisory_and_monotonic() {
    let mut engine = create_engine(VARIANT_FIXED, three_step_problem()).expect("engine");
    assert_eq!(engine.get_progress(), 0.0);
    engine.process_user_action("click_initialize", None);
    let after_one = engine.get_progress();
    assert!(after_one > 0.0 && after_one < 100.0);
  }
}

//! Seed content: built-in problem walkthroughs that guarantee the app is
//! useful even without an external content directory.
//!
//! One problem per engine family. Every step carries its complete
//! forward-looking snapshot; the engine adopts these wholesale and never
//! recomputes them.

use std::collections::BTreeMap;

use serde_json::json;
use uuid::Uuid;

use crate::domain::{
  ElementStatus, ElementView, IndexSpec, OptimalSolution, PlaygroundDef, ProblemDefinition,
  Solution, Step, UiState,
};

/// Element rows from values plus a compact status string:
/// '.' = not_yet_reached, 'w' = in_window, 'x' = out_of_window_past.
fn arr(values: &[i64], statuses: &str) -> Vec<ElementView> {
  values
    .iter()
    .zip(statuses.chars())
    .map(|(v, s)| ElementView { value: json!(v), status: status_of(s) })
    .collect()
}

fn chars(text: &str, statuses: &str) -> Vec<ElementView> {
  text
    .chars()
    .zip(statuses.chars())
    .map(|(c, s)| ElementView { value: json!(c.to_string()), status: status_of(s) })
    .collect()
}

fn status_of(tag: char) -> ElementStatus {
  match tag {
    'w' => ElementStatus::InWindow,
    'x' => ElementStatus::OutOfWindowPast,
    _ => ElementStatus::NotYetReached,
  }
}

fn freq(pairs: &[(&str, i64)]) -> BTreeMap<String, i64> {
  pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

fn one(i: usize) -> Option<IndexSpec> {
  Some(IndexSpec::One(i))
}

fn any(set: &[usize]) -> Option<IndexSpec> {
  Some(IndexSpec::AnyOf(set.to_vec()))
}

fn s(
  id: u32,
  action: &str,
  index: Option<IndexSpec>,
  description: &str,
  jarvis: &str,
  code_hint: &str,
  ui: UiState,
) -> Step {
  Step {
    step_id: id,
    description: description.into(),
    expected_action: action.into(),
    expected_element_index: index,
    hide_index_hint: false,
    ui_state: ui,
    jarvis_message: Some(jarvis.into()),
    code_hint: if code_hint.is_empty() { None } else { Some(code_hint.into()) },
    code_snippet: None,
    code_explanation: None,
  }
}

// ---- Fixed-size window: Maximum Sum Subarray of Size K ----

const FIXED_VALUES: &[i64] = &[2, 1, 5, 1, 3, 2];

fn fixed_ui(statuses: &str, start: i64, end: i64, sum: i64, max: i64, len: i64, hl: &[usize]) -> UiState {
  UiState {
    array_elements: Some(arr(FIXED_VALUES, statuses)),
    window_start: Some(start),
    window_end: Some(end),
    window_sum: Some(sum),
    max_sum: Some(max),
    current_length: Some(len),
    highlighted_elements: Some(hl.to_vec()),
    ..UiState::default()
  }
}

fn fixed_window_problem() -> ProblemDefinition {
  let mut steps = vec![
    s(
      1,
      "click_initialize",
      None,
      "Initialize windowSum and maxSum to 0 before any element enters the window.",
      "Every sliding window starts empty. Tap anywhere to set up the two running totals.",
      "let mut window_sum = 0; let mut max_sum = 0;",
      fixed_ui("......", 0, -1, 0, 0, 0, &[]),
    ),
    s(
      2,
      "add_element_to_window",
      one(0),
      "Grow the first window: bring element 0 in and add it to windowSum.",
      "The first window of size 3 is built one element at a time. Start at the left.",
      "window_sum += arr[window_end];",
      fixed_ui("w.....", 0, 0, 2, 0, 1, &[0]),
    ),
    s(
      3,
      "add_element_to_window",
      one(1),
      "Keep growing: bring element 1 into the window.",
      "Still building the first window. One more after this.",
      "window_sum += arr[window_end];",
      fixed_ui("ww....", 0, 1, 3, 0, 2, &[0, 1]),
    ),
    s(
      4,
      "add_element_to_window",
      one(2),
      "Complete the first window with element 2, then record it as the best so far.",
      "Window full! 2 + 1 + 5 = 8 becomes the first candidate for maxSum.",
      "window_sum += arr[window_end]; max_sum = window_sum;",
      fixed_ui("www...", 0, 2, 8, 8, 3, &[0, 1, 2]),
    ),
    s(
      5,
      "slide_window",
      any(&[0, 3]),
      "Slide the window one step: element 3 enters while element 0 leaves.",
      "This is the whole trick: add one number, subtract one number. No recomputing.",
      "window_sum += arr[window_end] - arr[window_start]; window_start += 1;",
      fixed_ui("xwww..", 1, 3, 7, 8, 3, &[1, 2, 3]),
    ),
    s(
      6,
      "slide_window",
      any(&[1, 4]),
      "Slide again: element 4 enters, element 1 leaves, and the sum beats the best.",
      "5 + 1 + 3 = 9. A new champion — maxSum updates.",
      "window_sum += arr[window_end] - arr[window_start]; max_sum = max_sum.max(window_sum);",
      fixed_ui("xxwww.", 2, 4, 9, 9, 3, &[2, 3, 4]),
    ),
    s(
      7,
      "slide_window",
      any(&[2, 5]),
      "One last slide to the end of the array.",
      "1 + 3 + 2 = 6. Smaller than 9, so the best stays put.",
      "window_sum += arr[window_end] - arr[window_start];",
      fixed_ui("xxxwww", 3, 5, 6, 9, 3, &[3, 4, 5]),
    ),
    s(
      8,
      "complete_algorithm",
      None,
      "The window has visited every position. Wrap up and report maxSum.",
      "Done! The answer is 9, found in a single pass.",
      "return max_sum;",
      fixed_ui("xxxwww", 3, 5, 6, 9, 3, &[3, 4, 5]),
    ),
  ];
  steps[7].code_explanation =
    Some("One pass, constant extra space: each element enters and leaves the window exactly once.".into());

  ProblemDefinition {
    id: "max-sum-subarray-k3".into(),
    title: "Maximum Sum Subarray of Size K".into(),
    module: "sliding_window".into(),
    variant: "sw_fixed".into(),
    difficulty: Some("intro".into()),
    playground: PlaygroundDef { initial_state: fixed_ui("......", 0, -1, 0, 0, 0, &[]), steps },
    solution: Some(Solution {
      optimal: Some(OptimalSolution {
        time_complexity: Some("O(n)".into()),
        space_complexity: Some("O(1)".into()),
        idea: Some("Maintain one window of size k and update its sum incrementally while tracking the best.".into()),
        walkthrough: vec![
          "Build the first window of size k and record its sum.".into(),
          "Slide right one element at a time, adding the entering value and subtracting the leaving one.".into(),
          "After every slide, compare the window sum with the best seen so far.".into(),
          "When the window reaches the end, the best recorded sum is the answer.".into(),
        ],
      }),
    }),
    complexity_analysis: None,
  }
}

// ---- Variable-size window: Smallest Subarray With Sum >= 7 ----

const VARIABLE_VALUES: &[i64] = &[2, 1, 5, 2, 3, 2];

fn var_ui(statuses: &str, start: i64, end: i64, sum: i64, min_len: Option<i64>, len: i64, hl: &[usize]) -> UiState {
  UiState {
    array_elements: Some(arr(VARIABLE_VALUES, statuses)),
    window_start: Some(start),
    window_end: Some(end),
    window_sum: Some(sum),
    target_sum: Some(7),
    min_length: min_len,
    current_length: Some(len),
    highlighted_elements: Some(hl.to_vec()),
    ..UiState::default()
  }
}

fn variable_window_problem() -> ProblemDefinition {
  let steps = vec![
    s(
      1,
      "click_initialize",
      None,
      "Start with an empty window and no best length yet.",
      "This window stretches and shrinks. Set up windowSum and an unset minLength.",
      "let mut window_sum = 0; let mut min_length = usize::MAX;",
      var_ui("......", 0, -1, 0, None, 0, &[]),
    ),
    s(
      2,
      "expand_window",
      one(0),
      "Expand: bring element 0 in. The sum is still short of the target 7.",
      "2 < 7, so we keep stretching to the right.",
      "window_sum += arr[window_end];",
      var_ui("w.....", 0, 0, 2, None, 1, &[0]),
    ),
    s(
      3,
      "expand_window",
      one(1),
      "Expand again with element 1.",
      "2 + 1 = 3. Still short — keep going.",
      "window_sum += arr[window_end];",
      var_ui("ww....", 0, 1, 3, None, 2, &[0, 1]),
    ),
    s(
      4,
      "expand_window",
      one(2),
      "Expand with element 2; the window finally reaches the target.",
      "2 + 1 + 5 = 8 >= 7. The window qualifies for the first time.",
      "window_sum += arr[window_end];",
      var_ui("www...", 0, 2, 8, None, 3, &[0, 1, 2]),
    ),
    s(
      5,
      "update_best",
      one(2),
      "Record the qualifying window's length as the best so far.",
      "Three elements reach the target, so minLength becomes 3.",
      "min_length = min_length.min(window_end - window_start + 1);",
      var_ui("www...", 0, 2, 8, Some(3), 3, &[0, 1, 2]),
    ),
    s(
      6,
      "contract_window",
      one(0),
      "Shrink from the left: drop element 0 and see if the window still qualifies.",
      "8 - 2 = 6 < 7. The window no longer qualifies, which is exactly why we shrink greedily.",
      "window_sum -= arr[window_start]; window_start += 1;",
      var_ui("xww...", 1, 2, 6, Some(3), 2, &[1, 2]),
    ),
    s(
      7,
      "complete_algorithm",
      None,
      "Expanding and contracting continues the same way; the best length stands at 3.",
      "That is the whole rhythm: stretch until it qualifies, shrink while it still does.",
      "return min_length;",
      var_ui("xww...", 1, 2, 6, Some(3), 2, &[1, 2]),
    ),
  ];

  ProblemDefinition {
    id: "smallest-subarray-sum-7".into(),
    title: "Smallest Subarray With Sum >= 7".into(),
    module: "sliding_window".into(),
    variant: "sw_variable".into(),
    difficulty: Some("core".into()),
    playground: PlaygroundDef { initial_state: var_ui("......", 0, -1, 0, None, 0, &[]), steps },
    solution: Some(Solution {
      optimal: Some(OptimalSolution {
        time_complexity: Some("O(n)".into()),
        space_complexity: Some("O(1)".into()),
        idea: Some("Stretch the window until it qualifies, then shrink it greedily while it still does.".into()),
        walkthrough: vec![
          "Expand the right edge until the window sum reaches the target.".into(),
          "Record the window length whenever it qualifies.".into(),
          "Contract the left edge while the window still qualifies.".into(),
          "The shortest recorded length is the answer.".into(),
        ],
      }),
    }),
    complexity_analysis: None,
  }
}

// ---- Advanced: Longest Substring With 2 Distinct Characters ----

const ADVANCED_TEXT: &str = "araaci";

#[allow(clippy::too_many_arguments)]
fn adv_ui(
  statuses: &str,
  start: i64,
  end: i64,
  frequency: &[(&str, i64)],
  count: i64,
  len: i64,
  max_len: i64,
  hl: &[usize],
) -> UiState {
  UiState {
    string_elements: Some(chars(ADVANCED_TEXT, statuses)),
    window_start: Some(start),
    window_end: Some(end),
    char_frequency: Some(freq(frequency)),
    char_count: Some(count),
    current_length: Some(len),
    max_length: Some(max_len),
    highlighted_elements: Some(hl.to_vec()),
    ..UiState::default()
  }
}

fn advanced_window_problem() -> ProblemDefinition {
  let steps = vec![
    s(
      1,
      "click_initialize",
      None,
      "Start with an empty window and an empty character-frequency map.",
      "The map tells us how many distinct characters the window holds. Empty means zero.",
      "let mut freq: HashMap<char, usize> = HashMap::new();",
      adv_ui("......", 0, -1, &[], 0, 0, 0, &[]),
    ),
    s(
      2,
      "expand_window",
      one(0),
      "Expand: take 'a' into the window and count it.",
      "One character, one distinct letter. Well under the limit of 2.",
      "*freq.entry(c).or_insert(0) += 1;",
      adv_ui("w.....", 0, 0, &[("a", 1)], 1, 1, 1, &[0]),
    ),
    s(
      3,
      "expand_window",
      one(1),
      "Expand with 'r'. Two distinct characters now — right at the limit.",
      "\"ar\" has 2 distinct letters. Still legal, so the window keeps growing.",
      "*freq.entry(c).or_insert(0) += 1;",
      adv_ui("ww....", 0, 1, &[("a", 1), ("r", 1)], 2, 2, 2, &[0, 1]),
    ),
    s(
      4,
      "expand_window",
      one(2),
      "Expand with another 'a'; the count of distinct letters stays at 2.",
      "\"ara\" repeats a letter, which costs nothing. Longest so far: 3.",
      "*freq.entry(c).or_insert(0) += 1;",
      adv_ui("www...", 0, 2, &[("a", 2), ("r", 1)], 2, 3, 3, &[0, 1, 2]),
    ),
    s(
      5,
      "expand_window",
      one(3),
      "Expand with a third 'a'. Still only two distinct letters.",
      "\"araa\" — four characters, two distinct. New best length: 4.",
      "*freq.entry(c).or_insert(0) += 1;",
      adv_ui("wwww..", 0, 3, &[("a", 3), ("r", 1)], 2, 4, 4, &[0, 1, 2, 3]),
    ),
    s(
      6,
      "expand_window",
      one(4),
      "Expand with 'c' — now three distinct characters break the limit.",
      "The window became illegal. Time to shrink from the left until it recovers.",
      "*freq.entry(c).or_insert(0) += 1; // freq.len() == 3 now",
      adv_ui("wwwww.", 0, 4, &[("a", 3), ("c", 1), ("r", 1)], 3, 5, 4, &[0, 1, 2, 3, 4]),
    ),
    s(
      7,
      "contract_window",
      one(0),
      "Shrink: drop the leftmost 'a'. Three distinct letters remain.",
      "An 'a' left, but others are still inside. Keep shrinking.",
      "freq decrement; remove the entry when it hits zero",
      adv_ui("xwwww.", 1, 4, &[("a", 2), ("c", 1), ("r", 1)], 3, 4, 4, &[1, 2, 3, 4]),
    ),
    s(
      8,
      "contract_window",
      one(1),
      "Shrink again: dropping 'r' removes its last copy and the window is legal.",
      "Back to two distinct letters. The recorded best of 4 survives the squeeze.",
      "freq decrement; remove the entry when it hits zero",
      adv_ui("xxwww.", 2, 4, &[("a", 2), ("c", 1)], 2, 3, 4, &[2, 3, 4]),
    ),
    s(
      9,
      "complete_algorithm",
      None,
      "The scan finishes; the longest legal window seen had length 4.",
      "\"araa\" was the longest stretch with at most 2 distinct characters.",
      "return max_length;",
      adv_ui("xxwww.", 2, 4, &[("a", 2), ("c", 1)], 2, 3, 4, &[2, 3, 4]),
    ),
  ];

  ProblemDefinition {
    id: "longest-substring-2-distinct".into(),
    title: "Longest Substring With 2 Distinct Characters".into(),
    module: "sliding_window".into(),
    variant: "sw_advanced".into(),
    difficulty: Some("advanced".into()),
    playground: PlaygroundDef { initial_state: adv_ui("......", 0, -1, &[], 0, 0, 0, &[]), steps },
    solution: Some(Solution {
      optimal: Some(OptimalSolution {
        time_complexity: Some("O(n)".into()),
        space_complexity: Some("O(k)".into()),
        idea: Some("Track character counts in the window; shrink whenever the distinct count exceeds k.".into()),
        walkthrough: vec![
          "Expand the right edge, counting each character in a frequency map.".into(),
          "When the map grows past k distinct keys, contract from the left.".into(),
          "Record the window length whenever it is legal.".into(),
        ],
      }),
    }),
    complexity_analysis: None,
  }
}

// ---- Prefix-sum flavored variable window: Subarray Sum Equals 2 ----

const PREFIX_VALUES: &[i64] = &[1, 1, 1];

fn pre_ui(statuses: &str, prefix_sum: i64, prefix_count: i64, hl: &[usize]) -> UiState {
  UiState {
    array_elements: Some(arr(PREFIX_VALUES, statuses)),
    target_sum: Some(2),
    prefix_sum: Some(prefix_sum),
    prefix_count: Some(prefix_count),
    highlighted_elements: Some(hl.to_vec()),
    ..UiState::default()
  }
}

fn prefix_sum_problem() -> ProblemDefinition {
  let steps = vec![
    s(
      1,
      "click_initialize",
      None,
      "Seed the prefix bookkeeping: running sum 0, and the empty prefix counted once.",
      "Counting the empty prefix up front is what lets whole-array matches be found later.",
      "let mut seen = HashMap::from([(0, 1)]); let mut prefix_sum = 0;",
      pre_ui("...", 0, 1, &[]),
    ),
    s(
      2,
      "process_element",
      one(0),
      "Process element 0: the running sum becomes 1 and is recorded.",
      "prefixSum 1. No earlier prefix equals 1 - 2, so nothing matches yet.",
      "prefix_sum += arr[i]; *seen.entry(prefix_sum).or_insert(0) += 1;",
      pre_ui("w..", 1, 2, &[0]),
    ),
    s(
      3,
      "process_element",
      one(1),
      "Process element 1: running sum 2, and the empty prefix completes a match.",
      "prefixSum - target = 0, and 0 has been seen. First subarray found: [1, 1].",
      "count += seen.get(&(prefix_sum - target)).unwrap_or(&0);",
      pre_ui("ww.", 2, 3, &[0, 1]),
    ),
    s(
      4,
      "process_element",
      one(2),
      "Process element 2: running sum 3 matches the prefix 1 seen earlier.",
      "Second subarray found: the trailing [1, 1]. The prefix map did the searching.",
      "count += seen.get(&(prefix_sum - target)).unwrap_or(&0);",
      pre_ui("www", 3, 4, &[0, 1, 2]),
    ),
    s(
      5,
      "complete_algorithm",
      None,
      "All elements processed; two subarrays summed to the target.",
      "Every contiguous match was found in one pass over the array.",
      "return count;",
      pre_ui("www", 3, 4, &[0, 1, 2]),
    ),
  ];

  ProblemDefinition {
    id: "subarray-sum-equals-2".into(),
    title: "Subarray Sum Equals 2".into(),
    module: "sliding_window".into(),
    variant: "sw_prefix_sum".into(),
    difficulty: Some("core".into()),
    playground: PlaygroundDef { initial_state: pre_ui("...", 0, 1, &[]), steps },
    solution: Some(Solution {
      optimal: Some(OptimalSolution {
        time_complexity: Some("O(n)".into()),
        space_complexity: Some("O(n)".into()),
        idea: Some("Count prefix sums as you go; each element asks how many earlier prefixes are exactly target behind.".into()),
        walkthrough: vec![
          "Record the empty prefix before scanning.".into(),
          "Extend the running sum one element at a time.".into(),
          "Look up how many earlier prefixes equal the running sum minus the target.".into(),
        ],
      }),
    }),
    complexity_analysis: None,
  }
}

/// All built-in problems, one per engine family.
pub fn seed_problems() -> Vec<ProblemDefinition> {
  vec![
    fixed_window_problem(),
    variable_window_problem(),
    advanced_window_problem(),
    prefix_sum_problem(),
  ]
}

/// Absolute last resort for practice rotation: a minimal three-step
/// walkthrough injected when a module has no content at all.
pub fn hard_fallback_problem(module: String) -> ProblemDefinition {
  let values: &[i64] = &[4, 2, 1];
  let ui = |statuses: &str, sum: i64, hl: &[usize]| UiState {
    array_elements: Some(arr(values, statuses)),
    window_start: Some(0),
    window_end: Some(hl.last().map(|i| *i as i64).unwrap_or(-1)),
    window_sum: Some(sum),
    max_sum: Some(sum),
    current_length: Some(hl.len() as i64),
    highlighted_elements: Some(hl.to_vec()),
    ..UiState::default()
  };
  ProblemDefinition {
    id: Uuid::new_v4().to_string(),
    title: "Warm-up: Build a Window".into(),
    module,
    variant: "sw_fixed".into(),
    difficulty: Some("intro".into()),
    playground: PlaygroundDef {
      initial_state: ui("...", 0, &[]),
      steps: vec![
        s(
          1,
          "click_initialize",
          None,
          "Set the running sum to 0.",
          "A quick warm-up: one window, two clicks.",
          "let mut window_sum = 0;",
          ui("...", 0, &[]),
        ),
        s(
          2,
          "add_element_to_window",
          one(0),
          "Bring the first element into the window.",
          "The window now covers one element.",
          "window_sum += arr[0];",
          ui("w..", 4, &[0]),
        ),
        s(
          3,
          "complete_algorithm",
          None,
          "That is the whole warm-up.",
          "Ready for the real walkthroughs.",
          "return window_sum;",
          ui("w..", 4, &[0]),
        ),
      ],
    },
    solution: None,
    complexity_analysis: None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::engine::create_engine;

  fn first_acceptable_index(step: &Step) -> Option<usize> {
    match &step.expected_element_index {
      Some(IndexSpec::One(i)) => Some(*i),
      Some(IndexSpec::AnyOf(set)) => set.first().copied(),
      None => None,
    }
  }

  #[test]
  fn every_seed_problem_builds_an_engine() {
    for p in seed_problems() {
      let variant = p.variant.clone();
      create_engine(&variant, p).expect("seed problem must construct");
    }
  }

  #[test]
  fn seed_walkthroughs_play_through_to_completion() {
    for p in seed_problems() {
      let variant = p.variant.clone();
      let steps = p.playground.steps.clone();
      let id = p.id.clone();
      let mut engine = create_engine(&variant, p).expect("engine");
      for step in &steps {
        let out = engine.process_user_action(&step.expected_action, first_acceptable_index(step));
        assert!(out.success, "step {} of '{}' was rejected: {}", step.step_id, id, out.feedback);
      }
      assert!(engine.is_completed(), "'{id}' did not reach terminal state");
    }
  }

  #[test]
  fn fixed_seed_completion_carries_both_artifacts() {
    let p = seed_problems().into_iter().find(|p| p.variant == "sw_fixed").expect("fixed seed");
    let steps = p.playground.steps.clone();
    let mut engine = create_engine("sw_fixed", p).expect("engine");
    for step in &steps {
      engine.process_user_action(&step.expected_action, first_acceptable_index(step));
    }
    let ui = &engine.get_current_state().ui_state;
    assert!(ui.algorithm_steps_message.as_deref().unwrap_or("").starts_with("1. "));
    // The final step authors a codeExplanation, which outranks synthesis.
    assert_eq!(
      ui.complexity_analysis.as_deref(),
      Some("One pass, constant extra space: each element enters and leaves the window exactly once.")
    );
  }

  #[test]
  fn hard_fallback_problem_is_playable() {
    let p = hard_fallback_problem("sliding_window".into());
    let steps = p.playground.steps.clone();
    let mut engine = create_engine(&p.variant.clone(), p).expect("engine");
    for step in &steps {
      let out = engine.process_user_action(&step.expected_action, first_acceptable_index(step));
      assert!(out.success);
    }
    assert!(engine.is_completed());
  }
}

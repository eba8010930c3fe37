//! Loading application configuration (assistant prompts + per-module UI
//! config) from TOML, and the module registry built from it.
//!
//! See `AppConfig`, `ModuleCfg` and `Prompts` for the expected schema.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::extract::{Formatter, VariableCfg};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
  #[serde(default)]
  pub prompts: Prompts,
  #[serde(default)]
  pub modules: Vec<ModuleCfg>,
}

/// Per-module UI configuration: what the sidebar shows, how the legend reads,
/// and which variables the side panel extracts.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModuleCfg {
  pub key: String,
  pub title: String,
  #[serde(default)] pub sidebar: Vec<SidebarSectionCfg>,
  #[serde(default)] pub legend: Vec<LegendEntryCfg>,
  #[serde(default)] pub variables: Vec<VariableCfg>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SidebarSectionCfg {
  pub title: String,
  #[serde(default)] pub items: Vec<String>,
}

/// One legend swatch: a label and the element status it refers to.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LegendEntryCfg {
  pub label: String,
  pub status: String,
}

/// Prompts used by the assistant client. Defaults are sensible for guided
/// algorithm walkthroughs; override them in TOML to tune tone/structure.
#[derive(Clone, Debug, Deserialize)]
pub struct Prompts {
  pub hint_system: String,
  pub hint_user_template: String,
  pub jarvis_system: String,
  pub jarvis_user_template: String,
  pub explain_system: String,
  pub explain_user_template: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      hint_system: "You are a patient algorithms coach. Keep hints short and do NOT reveal which element to click.".into(),
      hint_user_template: "Problem: {title}\nCurrent step: {description}\nCode hint: {code_hint}\nGive ONE concise hint (< 25 words) that nudges the learner without revealing the exact click.".into(),
      jarvis_system: "You are Jarvis, a friendly guide inside an algorithm-learning app. Answer questions about the current walkthrough in 1-3 sentences.".into(),
      jarvis_user_template: "{context}\n\nLearner question: {question}".into(),
      explain_system: "Explain the given code snippet for a beginner, line by line. Stay under 80 words.".into(),
      explain_user_template: "Snippet:\n{snippet}\n\nStep: {description}".into(),
    }
  }
}

/// Explicitly constructed registry: one source of truth per module, built once
/// and passed by reference to the code that needs it.
#[derive(Clone, Debug)]
pub struct ModuleRegistry {
  modules: HashMap<String, ModuleCfg>,
}

impl ModuleRegistry {
  /// Compiled-in defaults overlaid with TOML-supplied modules (same key wins).
  pub fn build(extra: &[ModuleCfg]) -> Self {
    let mut modules = HashMap::new();
    for m in default_modules() {
      modules.insert(m.key.clone(), m);
    }
    for m in extra {
      modules.insert(m.key.clone(), m.clone());
    }
    Self { modules }
  }

  pub fn get(&self, key: &str) -> Option<&ModuleCfg> {
    self.modules.get(key)
  }

  /// Extractor descriptors for a module; unknown keys extract nothing.
  pub fn variables_for(&self, key: &str) -> Vec<VariableCfg> {
    self
      .modules
      .get(key)
      .map(|m| m.variables.clone())
      .unwrap_or_default()
  }

  /// All modules, sorted by key for stable listings.
  pub fn all(&self) -> Vec<&ModuleCfg> {
    let mut all: Vec<&ModuleCfg> = self.modules.values().collect();
    all.sort_by(|a, b| a.key.cmp(&b.key));
    all
  }
}

fn var(name: &str, path: &str, description: &str, value_type: &str, formatter: Option<Formatter>) -> VariableCfg {
  VariableCfg {
    name: name.into(),
    path: path.into(),
    description: description.into(),
    value_type: value_type.into(),
    formatter,
  }
}

fn default_modules() -> Vec<ModuleCfg> {
  vec![ModuleCfg {
    key: "sliding_window".into(),
    title: "Sliding Window".into(),
    sidebar: vec![
      SidebarSectionCfg {
        title: "Core Idea".into(),
        items: vec![
          "Keep a window over the data and reuse the previous window's work.".into(),
          "Add the entering element, drop the leaving one. No recomputing.".into(),
        ],
      },
      SidebarSectionCfg {
        title: "When To Use".into(),
        items: vec![
          "Contiguous subarray/substring asks (max sum, min length, longest run).".into(),
          "Anything phrased as 'of size k' or 'with at most k ...'.".into(),
        ],
      },
    ],
    legend: vec![
      LegendEntryCfg { label: "Not yet reached".into(), status: "not_yet_reached".into() },
      LegendEntryCfg { label: "In the window".into(), status: "in_window".into() },
      LegendEntryCfg { label: "Left behind".into(), status: "out_of_window_past".into() },
    ],
    variables: vec![
      var("windowSum", "$.uiState.windowSum", "Sum of the current window", "number", None),
      var("maxSum", "$.uiState.maxSum", "Best sum seen so far", "number", None),
      var("windowStart", "$.uiState.windowStart", "Left edge of the window", "number", None),
      var("windowEnd", "$.uiState.windowEnd", "Right edge of the window", "number", None),
      var(
        "windowSize",
        "$.uiState.highlightedElements",
        "How many elements the window covers",
        "number",
        Some(Formatter::ArrayLength),
      ),
      var(
        "distinctChars",
        "$.uiState.charFrequency",
        "Distinct characters tracked in the window",
        "number",
        Some(Formatter::CountKeys),
      ),
      var("minLength", "$.uiState.minLength", "Shortest qualifying window so far", "number", None),
      var("step", "$.currentStep", "Zero-based step pointer", "number", None),
    ],
  }]
}

/// Attempt to load `AppConfig` from APP_CONFIG_PATH. On any parsing/IO error,
/// returns None and the compiled-in defaults are used.
pub fn load_app_config_from_env() -> Option<AppConfig> {
  let path = std::env::var("APP_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<AppConfig>(&s) {
      Ok(cfg) => {
        info!(target: "windowlab_backend", %path, "Loaded app config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "windowlab_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "windowlab_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn registry_overlay_replaces_defaults_by_key() {
    let custom = ModuleCfg {
      key: "sliding_window".into(),
      title: "Sliding Window (custom)".into(),
      sidebar: vec![],
      legend: vec![],
      variables: vec![],
    };
    let registry = ModuleRegistry::build(&[custom]);
    assert_eq!(registry.get("sliding_window").map(|m| m.title.as_str()), Some("Sliding Window (custom)"));
    assert!(registry.variables_for("sliding_window").is_empty());
  }

  #[test]
  fn unknown_module_extracts_nothing() {
    let registry = ModuleRegistry::build(&[]);
    assert!(registry.variables_for("two_pointers").is_empty());
    assert!(registry.get("sliding_window").is_some());
  }
}

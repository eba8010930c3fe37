//! Declarative projection of playground state into named, formatted display
//! values for the side panel.
//!
//! Descriptors are content-authored: `{name, path, description, type,
//! formatter?}`. `path` is a `$.`-rooted dot-path walked key by key over the
//! context `{...playgroundState, problemData}`. A missing key resolves to the
//! `"N/A"` placeholder, and a genuinely bad descriptor (malformed path,
//! formatter/type mismatch) is caught per variable so one bad entry never
//! blanks the whole panel.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::domain::{PlaygroundState, ProblemDefinition};

pub const NOT_AVAILABLE: &str = "N/A";

/// Named transform applied to the raw extracted value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Formatter {
  CountKeys,
  JsonStringify,
  ArrayLength,
  ArrayJoin,
}

/// One authored extractor descriptor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VariableCfg {
  pub name: String,
  pub path: String,
  #[serde(default)]
  pub description: String,
  /// Display type shown next to the value ("number", "object", ...).
  #[serde(rename = "type", default)]
  pub value_type: String,
  #[serde(default)]
  pub formatter: Option<Formatter>,
}

/// Extracted, display-ready variable. A batch keeps the authored descriptor
/// order; it is display order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Variable {
  pub name: String,
  pub value: String,
  pub description: String,
  #[serde(rename = "type")]
  pub value_type: String,
}

/// Build the lookup context: the playground state spread at the top level,
/// plus the problem document under `problemData`.
pub fn extraction_context(state: &PlaygroundState, problem: &ProblemDefinition) -> Value {
  let mut ctx = serde_json::to_value(state).unwrap_or(Value::Null);
  if !ctx.is_object() {
    ctx = Value::Object(Default::default());
  }
  if let Value::Object(map) = &mut ctx {
    map.insert(
      "problemData".into(),
      serde_json::to_value(problem).unwrap_or(Value::Null),
    );
  }
  ctx
}

/// Read-only projection: never mutates anything, never fails as a whole.
pub fn extract_variables(descriptors: &[VariableCfg], context: &Value) -> Vec<Variable> {
  descriptors
    .iter()
    .map(|d| {
      let value = match extract_one(d, context) {
        Ok(v) => v,
        Err(reason) => {
          warn!(target: "playground", name = %d.name, path = %d.path, %reason, "Variable extraction failed; substituting placeholder");
          NOT_AVAILABLE.to_string()
        }
      };
      Variable {
        name: d.name.clone(),
        value,
        description: d.description.clone(),
        value_type: d.value_type.clone(),
      }
    })
    .collect()
}

fn extract_one(d: &VariableCfg, context: &Value) -> Result<String, String> {
  match walk_path(&d.path, context)? {
    None | Some(Value::Null) => Ok(NOT_AVAILABLE.into()),
    Some(v) => match &d.formatter {
      None => Ok(plain(v)),
      Some(f) => apply_formatter(f, v),
    },
  }
}

/// Walk a `$.`-rooted dot-path key by key. A numeric segment indexes arrays.
/// Unresolved segments yield `Ok(None)`; only a malformed path is an error.
fn walk_path<'a>(path: &str, context: &'a Value) -> Result<Option<&'a Value>, String> {
  let rest = path
    .strip_prefix("$.")
    .ok_or_else(|| format!("path '{path}' must start with '$.'"))?;
  if rest.is_empty() {
    return Err(format!("path '{path}' has no segments"));
  }
  let mut cur = context;
  for key in rest.split('.') {
    let next = match cur {
      Value::Object(map) => map.get(key),
      Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
      _ => None,
    };
    match next {
      Some(v) => cur = v,
      None => return Ok(None),
    }
  }
  Ok(Some(cur))
}

fn plain(v: &Value) -> String {
  match v {
    Value::Null => NOT_AVAILABLE.into(),
    Value::String(s) => s.clone(),
    Value::Bool(b) => b.to_string(),
    Value::Number(n) => n.to_string(),
    // Compact JSON for structured values shown without a formatter.
    other => other.to_string(),
  }
}

fn apply_formatter(f: &Formatter, v: &Value) -> Result<String, String> {
  match f {
    Formatter::CountKeys => v
      .as_object()
      .map(|m| m.len().to_string())
      .ok_or_else(|| "count_keys expects an object".to_string()),
    Formatter::JsonStringify => {
      serde_json::to_string(v).map_err(|e| format!("json_stringify failed: {e}"))
    }
    Formatter::ArrayLength => v
      .as_array()
      .map(|a| a.len().to_string())
      .ok_or_else(|| "array_length expects an array".to_string()),
    Formatter::ArrayJoin => v
      .as_array()
      .map(|a| a.iter().map(plain).collect::<Vec<_>>().join(", "))
      .ok_or_else(|| "array_join expects an array".to_string()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn cfg(name: &str, path: &str, formatter: Option<Formatter>) -> VariableCfg {
    VariableCfg {
      name: name.into(),
      path: path.into(),
      description: format!("{name} for the side panel"),
      value_type: "number".into(),
      formatter,
    }
  }

  fn context() -> Value {
    json!({
      "currentStep": 3,
      "uiState": {
        "windowSum": 8,
        "charFrequency": {"a": 2, "r": 1},
        "highlightedElements": [0, 1, 2],
        "maxSum": null
      },
      "problemData": {"title": "Maximum Sum Subarray of Size K"}
    })
  }

  #[test]
  fn resolves_nested_paths_in_authored_order() {
    let descriptors = vec![
      cfg("windowSum", "$.uiState.windowSum", None),
      cfg("title", "$.problemData.title", None),
      cfg("step", "$.currentStep", None),
    ];
    let vars = extract_variables(&descriptors, &context());
    assert_eq!(vars.len(), 3);
    assert_eq!(vars[0].value, "8");
    assert_eq!(vars[1].value, "Maximum Sum Subarray of Size K");
    assert_eq!(vars[2].value, "3");
  }

  #[test]
  fn one_bad_descriptor_never_blanks_the_panel() {
    let descriptors = vec![
      cfg("missing", "$.uiState.nothing.here", None),
      cfg("malformed", "uiState.windowSum", None),
      cfg("mismatch", "$.uiState.windowSum", Some(Formatter::CountKeys)),
      cfg("windowSum", "$.uiState.windowSum", None),
    ];
    let vars = extract_variables(&descriptors, &context());
    assert_eq!(vars[0].value, NOT_AVAILABLE);
    assert_eq!(vars[1].value, NOT_AVAILABLE);
    assert_eq!(vars[2].value, NOT_AVAILABLE);
    assert_eq!(vars[3].value, "8");
  }

  #[test]
  fn null_values_format_to_the_placeholder() {
    let vars = extract_variables(&[cfg("maxSum", "$.uiState.maxSum", None)], &context());
    assert_eq!(vars[0].value, NOT_AVAILABLE);
  }

  #[test]
  fn formatters_transform_the_raw_value() {
    let descriptors = vec![
      cfg("distinct", "$.uiState.charFrequency", Some(Formatter::CountKeys)),
      cfg("freq", "$.uiState.charFrequency", Some(Formatter::JsonStringify)),
      cfg("windowLen", "$.uiState.highlightedElements", Some(Formatter::ArrayLength)),
      cfg("window", "$.uiState.highlightedElements", Some(Formatter::ArrayJoin)),
    ];
    let vars = extract_variables(&descriptors, &context());
    assert_eq!(vars[0].value, "2");
    assert_eq!(vars[1].value, r#"{"a":2,"r":1}"#);
    assert_eq!(vars[2].value, "3");
    assert_eq!(vars[3].value, "0, 1, 2");
  }

  #[test]
  fn numeric_segments_index_arrays() {
    let vars = extract_variables(
      &[cfg("second", "$.uiState.highlightedElements.1", None)],
      &context(),
    );
    assert_eq!(vars[0].value, "1");
  }
}

//! # Scenarios
//!
//! A scenario is a set of `greeter` objects plus a list of overrides to apply
//! to them. Running one records what each object's `show` returns before and
//! after the overrides.
//!
//! Scenario files are JSON:
//!
//! ```json
//! {
//!   "objects": [{"label": "a", "attributes": {"name": "I am A"}}],
//!   "overrides": [
//!     {"target": "a", "method": "show", "replacement": "announce",
//!      "attributes": {"number": 1}}
//!   ]
//! }
//! ```

use crate::AppError;
use rebind_core::{AttributeUpdates, Attributes, Class, Method, Object, Value, from_fn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};

/// Class every scenario object is created from.
pub const GREETER_CLASS: &str = "greeter";

/// The method scenarios display and usually override.
pub const SHOW_METHOD: &str = "show";

fn default_method() -> String {
    SHOW_METHOD.to_string()
}

/// The `greeter` class: `show` returns the object's `name` attribute.
pub fn greeter_class() -> Class {
    Class::new(GREETER_CLASS).with_method(
        SHOW_METHOD,
        from_fn(|this, _| this.require_attribute("name").cloned()),
    )
}

// =============================================================================
// SCENARIO DOCUMENT
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub objects: Vec<ObjectSpec>,
    #[serde(default)]
    pub overrides: Vec<OverrideSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObjectSpec {
    pub label: String,
    #[serde(default)]
    pub attributes: Attributes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OverrideSpec {
    /// Label of the object to override.
    pub target: String,
    #[serde(default = "default_method")]
    pub method: String,
    pub replacement: Replacement,
    /// Attributes written onto the target with the override.
    #[serde(default)]
    pub attributes: AttributeUpdates,
}

/// Built-in replacement bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Replacement {
    /// `Hello from number <number>`, then call through to the original.
    Announce,
    /// Return fixed text without calling the original.
    Replace { text: String },
}

/// A [`Replacement`] bound to the method name it stands in for.
struct ReplacementMethod {
    replacement: Replacement,
    method: String,
}

impl Method for ReplacementMethod {
    fn invoke(&self, this: &Object, args: &[Value]) -> rebind_core::Result<Value> {
        match &self.replacement {
            Replacement::Announce => {
                let number = this.int_attribute("number")?;
                let original = this.call_original(&self.method, args)?;
                Ok(Value::Text(format!("Hello from number {number}\n{original}")))
            }
            Replacement::Replace { text } => Ok(Value::Text(text.clone())),
        }
    }
}

impl Scenario {
    /// Three greeters; `a` and `b` get announcing overrides, `c` is left alone.
    #[must_use]
    pub fn builtin() -> Self {
        let object = |label: &str, name: &str| ObjectSpec {
            label: label.to_string(),
            attributes: Attributes::from([("name".to_string(), Value::from(name))]),
        };
        Self {
            objects: vec![
                object("a", "I am A"),
                object("b", "I am B"),
                object("c", "I am C"),
            ],
            overrides: vec![
                OverrideSpec {
                    target: "a".to_string(),
                    method: default_method(),
                    replacement: Replacement::Announce,
                    attributes: AttributeUpdates::new().set("number", 1),
                },
                OverrideSpec {
                    target: "b".to_string(),
                    method: default_method(),
                    replacement: Replacement::Announce,
                    attributes: AttributeUpdates::new()
                        .set("name", "I am still B")
                        .set("number", 2),
                },
            ],
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Read and parse a scenario file. Does not validate.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        debug!(path = %path.display(), "loading scenario");
        let content = std::fs::read_to_string(path).map_err(|source| AppError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Check the scenario is runnable.
    ///
    /// Rejects overrides of methods the `greeter` class does not define, and
    /// `announce` overrides whose target will not hold an integer `number`.
    /// Repeated overrides of one target and method only warn here; they fail
    /// when run.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.objects.is_empty() {
            return Err(AppError::Scenario("no objects defined".to_string()));
        }

        // Dry run against real objects: attributes set by earlier overrides
        // count for later ones, as they do in `run`.
        let class = greeter_class();
        let mut objects = BTreeMap::new();
        for spec in &self.objects {
            if spec.label.is_empty() {
                return Err(AppError::Scenario("object label is empty".to_string()));
            }
            let object = class.instantiate(spec.label.as_str(), spec.attributes.clone());
            if objects.insert(spec.label.as_str(), object).is_some() {
                return Err(AppError::Scenario(format!(
                    "duplicate object label `{}`",
                    spec.label
                )));
            }
        }

        let mut seen = BTreeSet::new();
        for spec in &self.overrides {
            let Some(object) = objects.get_mut(spec.target.as_str()) else {
                return Err(AppError::Scenario(format!(
                    "override targets unknown object `{}`",
                    spec.target
                )));
            };
            if spec.method.is_empty() {
                return Err(AppError::Scenario(format!(
                    "override of `{}` names no method",
                    spec.target
                )));
            }
            if !object.has_method(&spec.method) {
                let defined: Vec<&str> = class.method_names().collect();
                return Err(AppError::Scenario(format!(
                    "`{}` has no method `{}`; {GREETER_CLASS} defines {defined:?}",
                    spec.target, spec.method
                )));
            }

            object.apply_updates(spec.attributes.clone());
            if let (Replacement::Announce, Err(e)) =
                (&spec.replacement, object.int_attribute("number"))
            {
                return Err(AppError::Scenario(format!(
                    "announce override of `{}`.{}: {e}",
                    spec.target, spec.method
                )));
            }

            if !seen.insert((spec.target.as_str(), spec.method.as_str())) {
                warn!(
                    target_object = %spec.target,
                    method = %spec.method,
                    "method is overridden more than once; the repeat will be rejected"
                );
            }
        }

        Ok(())
    }

    /// Build the objects, apply the overrides in order, and record `show`
    /// output before and after.
    pub fn run(&self) -> Result<Transcript, AppError> {
        self.validate()?;

        let class = greeter_class();
        let mut objects: Vec<Object> = self
            .objects
            .iter()
            .map(|spec| class.instantiate(spec.label.as_str(), spec.attributes.clone()))
            .collect();

        let before = show_all(&objects)?;

        let mut applied = Vec::with_capacity(self.overrides.len());
        for spec in &self.overrides {
            let object = objects
                .iter_mut()
                .find(|object| object.label() == spec.target)
                .ok_or_else(|| {
                    AppError::Scenario(format!("override targets unknown object `{}`", spec.target))
                })?;

            let replacement = ReplacementMethod {
                replacement: spec.replacement.clone(),
                method: spec.method.clone(),
            };
            object.override_method(&spec.method, replacement, spec.attributes.clone())?;

            let attributes: Vec<String> = spec.attributes.names().map(str::to_string).collect();
            info!(
                target_object = %spec.target,
                method = %spec.method,
                attributes = ?attributes,
                "override applied"
            );
            applied.push(AppliedOverride {
                target: spec.target.clone(),
                method: spec.method.clone(),
                attributes,
            });
        }

        let after = show_all(&objects)?;

        Ok(Transcript {
            before,
            applied,
            after,
        })
    }
}

fn show_all(objects: &[Object]) -> Result<Vec<Shown>, AppError> {
    objects
        .iter()
        .map(|object| -> Result<Shown, AppError> {
            let output = object.call(SHOW_METHOD, &[])?;
            Ok(Shown {
                object: object.label().to_string(),
                output: output.to_string(),
            })
        })
        .collect()
}

// =============================================================================
// TRANSCRIPT
// =============================================================================

/// What one object's `show` returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shown {
    pub object: String,
    pub output: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedOverride {
    pub target: String,
    pub method: String,
    /// Names of the attributes set alongside the override.
    pub attributes: Vec<String>,
}

/// Result of running a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transcript {
    pub before: Vec<Shown>,
    pub applied: Vec<AppliedOverride>,
    pub after: Vec<Shown>,
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== before ==")?;
        for shown in &self.before {
            writeln!(f, "{}\n", shown.output)?;
        }
        writeln!(f, "== overrides ==")?;
        for applied in &self.applied {
            writeln!(
                f,
                "{}.{} [{}]",
                applied.target,
                applied.method,
                applied.attributes.join(", ")
            )?;
        }
        writeln!(f)?;
        writeln!(f, "== after ==")?;
        for shown in &self.after {
            writeln!(f, "{}\n", shown.output)?;
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

//! Namespaced classes: logical class names rewritten as `{namespace}-{name}`
//! so that style modules do not collide in the global stylesheet.

use crate::stylesheet::{
    json_kind, merge_stylesheets, stylesheet_from_json, CssError, CssResult, Declarations,
    Stylesheet,
};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

/// Logical class name to declarations.
pub type ClassDefs = IndexMap<String, Declarations>;

/// Result of namespacing a set of class definitions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Namespaced {
    /// Logical name to namespaced class name, for use in `class` attributes
    pub lookup: IndexMap<String, String>,
    /// `.{namespace}-{name}` to declarations, ready for [`crate::to_css_text`]
    pub stylesheet: Stylesheet,
}

impl Namespaced {
    pub fn class(&self, name: &str) -> Option<&str> {
        self.lookup.get(name).map(String::as_str)
    }

    /// Namespaced names for `names`, skipping unknown ones.
    pub fn classes(&self, names: &[&str]) -> Vec<String> {
        names
            .iter()
            .filter_map(|name| {
                let class = self.class(name);
                if class.is_none() {
                    warn!(class = %name, "Unknown class name");
                }
                class.map(String::from)
            })
            .collect()
    }

    /// Global rules first, then the namespaced ones. A namespaced selector
    /// equal to a global one replaces it.
    pub fn with_global(&self, global: &Stylesheet) -> Stylesheet {
        for selector in self.stylesheet.keys() {
            if global.contains_key(selector) {
                debug!(selector = %selector, "Namespaced rule overrides global rule");
            }
        }
        merge_stylesheets(global, &self.stylesheet)
    }
}

pub fn namespaced_name(namespace: &str, name: &str) -> String {
    format!("{}-{}", namespace, name)
}

/// Rewrite every class in `class_defs` into `namespace`.
#[instrument(skip(class_defs), fields(classes = class_defs.len()))]
pub fn namespace(class_defs: &ClassDefs, namespace: &str) -> Namespaced {
    let mut result = Namespaced::default();

    for (name, body) in class_defs {
        let class = namespaced_name(namespace, name);
        debug!(name = %name, class = %class, "Namespacing class");

        let selector = format!(".{}", class);
        if result.stylesheet.contains_key(&selector) {
            debug!(selector = %selector, "Duplicate namespaced selector, last definition wins");
        }
        result.stylesheet.insert(selector, body.clone());
        result.lookup.insert(name.clone(), class);
    }

    result
}

/// A namespace, its class definitions and any un-namespaced global rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StyleModule {
    pub namespace: String,
    pub global: Stylesheet,
    pub classes: ClassDefs,
}

impl StyleModule {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Default::default()
        }
    }

    pub fn with_global(mut self, selector: impl Into<String>, body: Declarations) -> Self {
        self.global.insert(selector.into(), body);
        self
    }

    pub fn with_class(mut self, name: impl Into<String>, body: Declarations) -> Self {
        self.classes.insert(name.into(), body);
        self
    }

    /// Namespace the classes and merge the global rules in front of them.
    pub fn compile(&self) -> Namespaced {
        let namespaced = namespace(&self.classes, &self.namespace);
        Namespaced {
            stylesheet: namespaced.with_global(&self.global),
            lookup: namespaced.lookup,
        }
    }

    /// Whether a JSON document looks like a style module rather than a plain
    /// stylesheet.
    pub fn is_module_shape(value: &Value) -> bool {
        matches!(value, Value::Object(map) if map.get("namespace").is_some_and(Value::is_string))
    }

    /// `{"namespace": "todo", "global": {...}, "classes": {...}}`
    pub fn from_json(value: &Value) -> CssResult<Self> {
        let Value::Object(map) = value else {
            return Err(CssError::InvalidStyleModule {
                message: format!("expected a mapping, found {}", json_kind(value)),
            });
        };

        let namespace = match map.get("namespace") {
            Some(Value::String(namespace)) => namespace.clone(),
            Some(other) => {
                return Err(CssError::InvalidStyleModule {
                    message: format!("namespace must be a string, found {}", json_kind(other)),
                })
            }
            None => {
                return Err(CssError::InvalidStyleModule {
                    message: "missing namespace".to_string(),
                })
            }
        };

        let global = match map.get("global") {
            Some(global) => stylesheet_from_json(global)?,
            None => Stylesheet::new(),
        };
        let classes = match map.get("classes") {
            Some(classes) => stylesheet_from_json(classes)?,
            None => ClassDefs::new(),
        };

        Ok(Self {
            namespace,
            global,
            classes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stylesheet::declarations;
    use serde_json::json;

    fn todo_classes() -> ClassDefs {
        let mut classes = ClassDefs::new();
        classes.insert("bold".to_string(), declarations([("font-weight", "bold")]));
        classes.insert("red".to_string(), declarations([("color", "red")]));
        classes
    }

    #[test]
    fn test_namespace_lookup() {
        let result = namespace(&todo_classes(), "todo");
        assert_eq!(result.class("bold"), Some("todo-bold"));
        assert_eq!(result.class("red"), Some("todo-red"));
        assert_eq!(result.class("missing"), None);
    }

    #[test]
    fn test_namespace_stylesheet_keys() {
        let result = namespace(&todo_classes(), "todo");
        let selectors: Vec<_> = result.stylesheet.keys().collect();
        assert_eq!(selectors, vec![".todo-bold", ".todo-red"]);
        assert_eq!(result.stylesheet[".todo-bold"]["font-weight"], "bold");
    }

    #[test]
    fn test_classes_skip_unknown_names() {
        let result = namespace(&todo_classes(), "todo");
        assert_eq!(result.classes(&["bold", "nope", "red"]), vec!["todo-bold", "todo-red"]);
    }

    #[test]
    fn test_namespace_is_deterministic() {
        let first = namespace(&todo_classes(), "todo");
        let second = namespace(&todo_classes(), "todo");
        assert_eq!(first, second);
    }

    #[test]
    fn test_globals_pass_through_verbatim() {
        let module = StyleModule::new("todo")
            .with_global("body", declarations([("font-family", "sans-serif")]))
            .with_global("ul", declarations([("padding-inline-start", "0")]))
            .with_class("bold", declarations([("font-weight", "bold")]));

        let compiled = module.compile();
        let selectors: Vec<_> = compiled.stylesheet.keys().collect();
        assert_eq!(selectors, vec!["body", "ul", ".todo-bold"]);
        assert_eq!(compiled.lookup["bold"], "todo-bold");
    }

    #[test]
    fn test_namespaced_rule_overrides_colliding_global() {
        let module = StyleModule::new("x")
            .with_global(".x-a", declarations([("color", "black")]))
            .with_class("a", declarations([("color", "white")]));

        let compiled = module.compile();
        assert_eq!(compiled.stylesheet.len(), 1);
        assert_eq!(compiled.stylesheet[".x-a"]["color"], "white");
    }

    #[test]
    fn test_style_module_from_json() {
        let value = json!({
            "namespace": "todo",
            "global": {"body": {"font-family": "sans-serif"}},
            "classes": {"todo": {"width": "15em", "margin": "1em"}}
        });
        assert!(StyleModule::is_module_shape(&value));

        let module = StyleModule::from_json(&value).expect("valid module");
        assert_eq!(module.namespace, "todo");
        assert_eq!(module.compile().class("todo"), Some("todo-todo"));
    }

    #[test]
    fn test_style_module_from_json_errors() {
        assert!(matches!(
            StyleModule::from_json(&json!({"classes": {}})).unwrap_err(),
            CssError::InvalidStyleModule { .. }
        ));
        assert!(matches!(
            StyleModule::from_json(&json!({"namespace": 3})).unwrap_err(),
            CssError::InvalidStyleModule { .. }
        ));
        assert!(!StyleModule::is_module_shape(&json!({"body": {}})));
    }
}

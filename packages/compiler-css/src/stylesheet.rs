use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;

pub type CssResult<T> = Result<T, CssError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CssError {
    #[error("Stylesheet must be a mapping of selector to declarations, found {found}")]
    NotAMapping { found: &'static str },

    #[error("Declarations for '{selector}' must be a mapping, found {found}")]
    InvalidDeclarations {
        selector: String,
        found: &'static str,
    },

    #[error("Value of '{property}' in '{selector}' must be a string or number, found {found}")]
    InvalidDeclaration {
        selector: String,
        property: String,
        found: &'static str,
    },

    #[error("Invalid style module: {message}")]
    InvalidStyleModule { message: String },
}

/// Property to value, in declaration order.
pub type Declarations = IndexMap<String, String>;

/// Selector to declarations, in rule order.
pub type Stylesheet = IndexMap<String, Declarations>;

pub fn declarations<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Declarations
where
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(property, value)| (property.into(), value.into()))
        .collect()
}

/// `{...base, ...overrides}`: a key already in `base` keeps its position and
/// takes the value from `overrides`.
pub fn merge_stylesheets(base: &Stylesheet, overrides: &Stylesheet) -> Stylesheet {
    let mut merged = base.clone();
    for (selector, body) in overrides {
        merged.insert(selector.clone(), body.clone());
    }
    merged
}

/// Convert to CSS text
pub fn to_css_text(stylesheet: &Stylesheet) -> String {
    let mut css = String::new();

    for (selector, body) in stylesheet {
        css.push_str(selector);
        css.push_str(" {\n");

        for (property, value) in body {
            css.push_str("    ");
            css.push_str(property);
            css.push_str(": ");
            css.push_str(value);
            css.push_str(";\n");
        }

        css.push_str("}\n");
    }

    css
}

/// Read a stylesheet from JSON. Declaration values may be strings or numbers.
pub fn stylesheet_from_json(value: &Value) -> CssResult<Stylesheet> {
    let Value::Object(rules) = value else {
        return Err(CssError::NotAMapping {
            found: json_kind(value),
        });
    };

    let mut stylesheet = Stylesheet::new();
    for (selector, body) in rules {
        let Value::Object(properties) = body else {
            return Err(CssError::InvalidDeclarations {
                selector: selector.clone(),
                found: json_kind(body),
            });
        };

        let mut declarations = Declarations::new();
        for (property, value) in properties {
            let value = match value {
                Value::String(text) => text.clone(),
                Value::Number(number) => number.to_string(),
                other => {
                    return Err(CssError::InvalidDeclaration {
                        selector: selector.clone(),
                        property: property.clone(),
                        found: json_kind(other),
                    })
                }
            };
            declarations.insert(property.clone(), value);
        }
        stylesheet.insert(selector.clone(), declarations);
    }

    Ok(stylesheet)
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_css_text() {
        let mut stylesheet = Stylesheet::new();
        stylesheet.insert(".bold".to_string(), declarations([("font-weight", "bold")]));
        stylesheet.insert(".red".to_string(), declarations([("color", "red")]));

        let css = to_css_text(&stylesheet);

        println!("Generated CSS:\n{}", css);

        assert_eq!(css, ".bold {\n    font-weight: bold;\n}\n.red {\n    color: red;\n}\n");
    }

    #[test]
    fn test_declaration_order_is_kept() {
        let mut stylesheet = Stylesheet::new();
        stylesheet.insert(
            ".todo".to_string(),
            declarations([("width", "15em"), ("border", "solid 2px darkorange"), ("margin", "1em")]),
        );
        let css = to_css_text(&stylesheet);
        let width = css.find("width").unwrap();
        let border = css.find("border").unwrap();
        let margin = css.find("margin").unwrap();
        assert!(width < border && border < margin);
    }

    #[test]
    fn test_stylesheet_from_json() {
        let stylesheet = stylesheet_from_json(&json!({
            "body": {"font-family": "sans-serif"},
            ".faded": {"opacity": 0.5, "z-index": 2}
        }))
        .expect("valid stylesheet");

        assert_eq!(stylesheet["body"]["font-family"], "sans-serif");
        assert_eq!(stylesheet[".faded"]["opacity"], "0.5");
        assert_eq!(stylesheet[".faded"]["z-index"], "2");
    }

    #[test]
    fn test_stylesheet_from_json_rejects_bad_shapes() {
        assert_eq!(
            stylesheet_from_json(&json!([1])).unwrap_err(),
            CssError::NotAMapping { found: "array" }
        );
        assert!(matches!(
            stylesheet_from_json(&json!({"ul": "padding: 0"})).unwrap_err(),
            CssError::InvalidDeclarations { .. }
        ));
        assert!(matches!(
            stylesheet_from_json(&json!({"ul": {"padding": {"x": 1}}})).unwrap_err(),
            CssError::InvalidDeclaration { ref property, .. } if property == "padding"
        ));
    }

    #[test]
    fn test_merge_last_write_wins_in_place() {
        let mut base = Stylesheet::new();
        base.insert("body".to_string(), declarations([("color", "black")]));
        base.insert("ul".to_string(), declarations([("margin", "0")]));
        let mut overrides = Stylesheet::new();
        overrides.insert("body".to_string(), declarations([("color", "white")]));

        let merged = merge_stylesheets(&base, &overrides);
        let selectors: Vec<_> = merged.keys().collect();
        assert_eq!(selectors, vec!["body", "ul"]);
        assert_eq!(merged["body"]["color"], "white");
    }
}

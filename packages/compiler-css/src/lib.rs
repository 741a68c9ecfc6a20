//! Namespaced styles and CSS text output.
//!
//! ```
//! use trellis_compiler_css::{declarations, to_css_text, StyleModule};
//!
//! let styles = StyleModule::new("todo")
//!     .with_class("bold", declarations([("font-weight", "bold")]))
//!     .compile();
//!
//! assert_eq!(styles.class("bold"), Some("todo-bold"));
//! assert_eq!(to_css_text(&styles.stylesheet), ".todo-bold {\n    font-weight: bold;\n}\n");
//! ```

mod namespace;
mod stylesheet;

pub use namespace::{namespace, namespaced_name, ClassDefs, Namespaced, StyleModule};
pub use stylesheet::{
    declarations, merge_stylesheets, stylesheet_from_json, to_css_text, CssError, CssResult,
    Declarations, Stylesheet,
};

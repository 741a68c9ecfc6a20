//! Virtual nodes for Trellis templates.
//!
//! ```
//! use trellis_vdom::{attrs, m, VNode};
//!
//! let node: VNode = m!("h3", m!("a", attrs! { "href" => "#foo" }, "You & I"));
//! assert_eq!(node.as_element().unwrap().tag(), "h3");
//! ```

pub mod builder;
pub mod error;
pub mod json;
pub mod selector;
pub mod text;
pub mod vdom;

pub use builder::{build, normalize_children, number_to_text, try_build, Arg};
pub use error::{SelectorError, SelectorResult};
pub use json::{is_vnode_shape, nodes_from_json};
pub use selector::{Selector, DEFAULT_TAG};
pub use text::dedent;
pub use vdom::{is_void, trust, AttrValue, Attrs, Element, Trusted, VNode, VOID_ELEMENTS};

/// `m!(selector, args...)` is [`build`] with each argument converted through
/// [`Arg::from`].
#[macro_export]
macro_rules! m {
    ($selector:expr $(, $arg:expr)* $(,)?) => {{
        let args: ::std::vec::Vec<$crate::Arg> = ::std::vec![$($crate::Arg::from($arg)),*];
        $crate::build($selector, args)
    }};
}

/// Ordered attribute map: `attrs! { "name" => value, ... }`.
#[macro_export]
macro_rules! attrs {
    ($($name:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut attrs = $crate::Attrs::new();
        $(attrs.insert($name, $value);)*
        attrs
    }};
}

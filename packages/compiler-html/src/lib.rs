mod compiler;

pub use compiler::{
    escape_attribute, escape_text, has_inline_content, is_inline, render, render_fragment,
    render_with_options, RenderError, RenderOptions, RenderResult,
};

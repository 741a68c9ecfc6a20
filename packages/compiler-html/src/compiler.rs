use thiserror::Error;
use tracing::{debug, instrument};
use trellis_vdom::{number_to_text, AttrValue, Element, VNode};

pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur during HTML rendering
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("Invalid attribute type: {attribute} on <{tag}> holds a {found}")]
    InvalidAttributeType {
        tag: String,
        attribute: String,
        found: &'static str,
    },
}

/// Options for HTML rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Indent block content, one child per line
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// Prefix the output with `<!DOCTYPE html>`
    pub doctype: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "    ".to_string(),
            doctype: false,
        }
    }
}

struct Context<'a> {
    options: &'a RenderOptions,
    buffer: String,
}

impl<'a> Context<'a> {
    fn new(options: &'a RenderOptions) -> Self {
        Self {
            options,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    /// Newline followed by `depth` indents. No-op when not pretty-printing.
    fn add_break(&mut self, depth: usize) {
        if !self.options.pretty {
            return;
        }
        self.buffer.push('\n');
        for _ in 0..depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Render a node with the default options.
pub fn render(node: &VNode) -> RenderResult<String> {
    render_with_options(node, &RenderOptions::default())
}

pub fn render_with_options(node: &VNode, options: &RenderOptions) -> RenderResult<String> {
    render_fragment(std::slice::from_ref(node), options)
}

/// Render several root nodes, separated by line breaks when pretty-printing.
#[instrument(skip(nodes, options), fields(roots = nodes.len(), pretty = options.pretty))]
pub fn render_fragment(nodes: &[VNode], options: &RenderOptions) -> RenderResult<String> {
    let mut ctx = Context::new(options);

    if options.doctype {
        ctx.add("<!DOCTYPE html>");
        if !nodes.is_empty() {
            ctx.add_break(0);
        }
    }

    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            ctx.add_break(0);
        }
        compile_node(node, 0, !options.pretty, &mut ctx)?;
    }

    let output = ctx.get_output();
    debug!(bytes = output.len(), "Rendered HTML");
    Ok(output)
}

fn compile_node(node: &VNode, depth: usize, compact: bool, ctx: &mut Context) -> RenderResult<()> {
    match node {
        VNode::Element(element) => compile_element(element, depth, compact, ctx),
        VNode::Text(content) => {
            ctx.add(&escape_text(content));
            Ok(())
        }
        VNode::Raw(raw) => {
            ctx.add(raw.as_str());
            Ok(())
        }
    }
}

fn compile_element(
    element: &Element,
    depth: usize,
    compact: bool,
    ctx: &mut Context,
) -> RenderResult<()> {
    let tag = escape_attribute(element.tag());

    ctx.add("<");
    ctx.add(&tag);
    compile_attributes(element, ctx)?;
    ctx.add(">");

    // Void elements never hold children and take no closing tag
    if element.is_void() {
        return Ok(());
    }

    let children = element.children();
    if compact || has_inline_content(element.tag()) {
        for child in children {
            compile_node(child, depth + 1, true, ctx)?;
        }
    } else if !children.is_empty() {
        for (i, child) in children.iter().enumerate() {
            // runs of inline content share a line
            if i == 0 || is_block(child) || is_block(&children[i - 1]) {
                ctx.add_break(depth + 1);
            }
            compile_node(child, depth + 1, false, ctx)?;
        }
        if children.last().is_some_and(is_block) {
            ctx.add_break(depth);
        }
    }

    ctx.add("</");
    ctx.add(&tag);
    ctx.add(">");
    Ok(())
}

fn compile_attributes(element: &Element, ctx: &mut Context) -> RenderResult<()> {
    for (name, value) in element.attrs().iter() {
        match value {
            AttrValue::Null | AttrValue::Bool(false) => {}
            AttrValue::Bool(true) => {
                ctx.add(" ");
                ctx.add(&escape_attribute(name));
            }
            AttrValue::Number(number) => compile_attribute(name, &number_to_text(number), ctx),
            AttrValue::Str(text) => compile_attribute(name, text, ctx),
            // empty class lists are omitted
            AttrValue::List(items) if items.is_empty() => {}
            AttrValue::List(items) => compile_attribute(name, &items.join(" "), ctx),
            AttrValue::Unsupported(_) => {
                return Err(RenderError::InvalidAttributeType {
                    tag: element.tag().to_string(),
                    attribute: name.to_string(),
                    found: value.kind(),
                });
            }
        }
    }
    Ok(())
}

fn compile_attribute(name: &str, value: &str, ctx: &mut Context) {
    ctx.add(" ");
    ctx.add(&escape_attribute(name));
    ctx.add("=\"");
    ctx.add(&escape_attribute(value));
    ctx.add("\"");
}

/// Escape text content. Every `&` is escaped, including ones that already
/// look like entities.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape a double-quoted attribute value.
pub fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Elements laid out inline with the surrounding text.
pub fn is_inline(tag: &str) -> bool {
    matches!(
        tag,
        "a" | "abbr"
            | "audio"
            | "b"
            | "bdi"
            | "bdo"
            | "br"
            | "button"
            | "canvas"
            | "cite"
            | "code"
            | "data"
            | "dfn"
            | "em"
            | "embed"
            | "i"
            | "iframe"
            | "img"
            | "input"
            | "kbd"
            | "label"
            | "mark"
            | "meter"
            | "object"
            | "output"
            | "picture"
            | "progress"
            | "q"
            | "s"
            | "samp"
            | "select"
            | "small"
            | "span"
            | "strong"
            | "sub"
            | "sup"
            | "svg"
            | "textarea"
            | "time"
            | "u"
            | "var"
            | "video"
            | "wbr"
    )
}

/// Elements whose content is written without added whitespace: inline
/// elements, text containers and whitespace-sensitive elements.
pub fn has_inline_content(tag: &str) -> bool {
    is_inline(tag)
        || matches!(
            tag,
            "h1" | "h2"
                | "h3"
                | "h4"
                | "h5"
                | "h6"
                | "p"
                | "li"
                | "dt"
                | "dd"
                | "th"
                | "td"
                | "caption"
                | "legend"
                | "summary"
                | "figcaption"
                | "option"
                | "title"
                | "pre"
                | "script"
                | "style"
        )
}

fn is_block(node: &VNode) -> bool {
    node.as_element()
        .is_some_and(|element| !is_inline(element.tag()))
}

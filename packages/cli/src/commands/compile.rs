use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use serde_json::Value;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use trellis_compiler_css::{stylesheet_from_json, to_css_text, StyleModule};
use trellis_compiler_html::render_fragment;
use trellis_vdom::{is_vnode_shape, nodes_from_json, Selector};

#[derive(Debug, Args)]
pub struct CompileArgs {
    /// JSON document to compile (`-` reads stdin)
    pub input: String,

    /// Render vnode JSON to HTML
    #[arg(long, conflicts_with_all = ["css", "classes"])]
    pub html: bool,

    /// Emit a style module or stylesheet as CSS
    #[arg(long, conflicts_with = "classes")]
    pub css: bool,

    /// Print the namespaced class names of a style module
    #[arg(long)]
    pub classes: bool,

    /// Compile this top-level key instead of the whole document
    #[arg(short, long)]
    pub name: Option<String>,

    /// Disable HTML pretty-printing (overrides config)
    #[arg(long)]
    pub compact: bool,

    /// Prefix HTML output with <!DOCTYPE html> (overrides config)
    #[arg(long)]
    pub doctype: bool,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

pub fn compile(args: CompileArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let source = read_input(&args.input)?;
    let document: Value = serde_json::from_str(&source)
        .with_context(|| format!("{} is not valid JSON", args.input))?;
    let value = select_export(document, args.name.as_deref())?;

    let output = if args.html {
        compile_html(value, &config, &args)?
    } else if args.css {
        compile_css(&value)?
    } else if args.classes {
        compile_classes(&value)?
    } else {
        compile_json(value)?
    };

    write_output(&output, args.out.as_deref())
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        fs::read_to_string(input).with_context(|| format!("Cannot read {}", input))
    }
}

fn select_export(document: Value, name: Option<&str>) -> Result<Value> {
    let Some(name) = name else {
        return Ok(document);
    };
    match document {
        Value::Object(mut exports) => exports
            .remove(name)
            .ok_or_else(|| anyhow!("'{}' is not a top-level key of the input", name)),
        _ => Err(anyhow!("--name requires the input to be a JSON object")),
    }
}

fn compile_html(value: Value, config: &Config, args: &CompileArgs) -> Result<String> {
    if config.strict_selectors {
        check_selectors(&value)?;
    }

    let mut options = config.render_options();
    if args.compact {
        options.pretty = false;
    }
    if args.doctype {
        options.doctype = true;
    }

    let nodes = nodes_from_json(value);
    debug!(roots = nodes.len(), "Rendering HTML");
    Ok(render_fragment(&nodes, &options)?)
}

/// Strict-parse the `tag` of every vnode-shaped object.
fn check_selectors(value: &Value) -> Result<()> {
    match value {
        Value::Object(map) => {
            if is_vnode_shape(map) {
                if let Some(Value::String(tag)) = map.get("tag") {
                    Selector::parse_strict(tag)
                        .with_context(|| format!("Invalid tag {:?}", tag))?;
                }
            }
            map.values().try_for_each(check_selectors)
        }
        Value::Array(items) => items.iter().try_for_each(check_selectors),
        _ => Ok(()),
    }
}

fn compile_css(value: &Value) -> Result<String> {
    let stylesheet = if StyleModule::is_module_shape(value) {
        StyleModule::from_json(value)?.compile().stylesheet
    } else {
        stylesheet_from_json(value)?
    };
    debug!(rules = stylesheet.len(), "Emitting CSS");
    Ok(to_css_text(&stylesheet))
}

fn compile_classes(value: &Value) -> Result<String> {
    let module = StyleModule::from_json(value)?;
    Ok(serde_json::to_string_pretty(&module.compile().lookup)?)
}

fn compile_json(value: Value) -> Result<String> {
    let mut nodes = nodes_from_json(value);
    let output = if nodes.len() == 1 {
        serde_json::to_string_pretty(&nodes.remove(0))?
    } else {
        serde_json::to_string_pretty(&nodes)?
    };
    Ok(output)
}

fn write_output(output: &str, out: Option<&Path>) -> Result<()> {
    let Some(path) = out else {
        if output.ends_with('\n') {
            print!("{}", output);
        } else {
            println!("{}", output);
        }
        return Ok(());
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, output).with_context(|| format!("Cannot write {}", path.display()))?;
    info!(path = %path.display(), bytes = output.len(), "Wrote output");
    Ok(())
}

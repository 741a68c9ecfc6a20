//! Selector descriptors (`"form#my-form.wide"`) lexed with logos.
//!
//! The permissive parser accepts anything: unknown characters and stray
//! tokens are skipped and a repeated `#id` keeps the last one. The strict
//! parser reports the first of those problems instead.

use crate::error::{SelectorError, SelectorResult};
use logos::Logos;
use tracing::debug;

/// Tag used when the selector names only an id and/or classes.
pub const DEFAULT_TAG: &str = "div";

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorToken<'src> {
    #[token("#")]
    Hash,
    #[token(".")]
    Dot,
    #[regex(r"[ \t\r\n]+")]
    Whitespace,
    #[regex(r"[\p{L}\p{N}_\-]+", |lex| lex.slice())]
    Ident(&'src str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prefix {
    Id,
    Class,
}

impl Prefix {
    fn as_char(self) -> char {
        match self {
            Prefix::Id => '#',
            Prefix::Class => '.',
        }
    }
}

/// Tag name, id and classes described by a selector string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
}

impl Selector {
    pub fn parse(source: &str) -> Self {
        // permissive parsing never rejects
        parse_selector(source, false).unwrap_or_default()
    }

    pub fn parse_strict(source: &str) -> SelectorResult<Self> {
        parse_selector(source, true)
    }
}

impl Default for Selector {
    fn default() -> Self {
        Self {
            tag: DEFAULT_TAG.to_string(),
            id: None,
            classes: Vec::new(),
        }
    }
}

impl From<&str> for Selector {
    fn from(source: &str) -> Self {
        Selector::parse(source)
    }
}

fn reject(strict: bool, error: SelectorError) -> SelectorResult<()> {
    if strict {
        debug!(%error, "Rejecting selector");
        Err(error)
    } else {
        Ok(())
    }
}

fn parse_selector(source: &str, strict: bool) -> SelectorResult<Selector> {
    let mut selector = Selector::default();
    let mut pending: Option<(Prefix, usize)> = None;

    for (result, span) in SelectorToken::lexer(source).spanned() {
        let token = match result {
            Ok(token) => token,
            Err(_) => {
                reject(
                    strict,
                    SelectorError::unexpected_character(span.start, &source[span.clone()]),
                )?;
                pending = None;
                continue;
            }
        };

        match token {
            SelectorToken::Hash | SelectorToken::Dot => {
                if let Some((prefix, pos)) = pending {
                    reject(
                        strict,
                        SelectorError::DanglingPrefix {
                            pos,
                            prefix: prefix.as_char(),
                        },
                    )?;
                }
                let prefix = if token == SelectorToken::Hash {
                    Prefix::Id
                } else {
                    Prefix::Class
                };
                pending = Some((prefix, span.start));
            }
            SelectorToken::Whitespace => {
                reject(strict, SelectorError::Whitespace { pos: span.start })?;
                if let Some((prefix, pos)) = pending.take() {
                    reject(
                        strict,
                        SelectorError::DanglingPrefix {
                            pos,
                            prefix: prefix.as_char(),
                        },
                    )?;
                }
            }
            SelectorToken::Ident(name) => match pending.take() {
                Some((Prefix::Id, pos)) => {
                    if let Some(previous) = &selector.id {
                        reject(
                            strict,
                            SelectorError::DuplicateId {
                                pos,
                                name: name.to_string(),
                                previous: previous.clone(),
                            },
                        )?;
                    }
                    selector.id = Some(name.to_string());
                }
                Some((Prefix::Class, _)) => selector.classes.push(name.to_string()),
                None if span.start == 0 => selector.tag = name.to_ascii_lowercase(),
                None => reject(strict, SelectorError::stray_identifier(span.start, name))?,
            },
        }
    }

    if let Some((prefix, pos)) = pending {
        reject(
            strict,
            SelectorError::DanglingPrefix {
                pos,
                prefix: prefix.as_char(),
            },
        )?;
    }

    Ok(selector)
}

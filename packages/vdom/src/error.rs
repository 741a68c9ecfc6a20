use thiserror::Error;

pub type SelectorResult<T> = Result<T, SelectorError>;

/// Rejections raised by strict selector parsing. The permissive parser never
/// produces these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    #[error("Unexpected character at {pos}: {found:?}")]
    UnexpectedCharacter { pos: usize, found: String },

    #[error("Whitespace at {pos} is not allowed in a selector")]
    Whitespace { pos: usize },

    #[error("Identifier '{name}' at {pos} must follow '#' or '.' or start the selector")]
    StrayIdentifier { pos: usize, name: String },

    #[error("Duplicate id '{name}' at {pos}, selector already has id '{previous}'")]
    DuplicateId {
        pos: usize,
        name: String,
        previous: String,
    },

    #[error("'{prefix}' at {pos} is not followed by a name")]
    DanglingPrefix { pos: usize, prefix: char },
}

impl SelectorError {
    pub fn unexpected_character(pos: usize, found: impl Into<String>) -> Self {
        Self::UnexpectedCharacter {
            pos,
            found: found.into(),
        }
    }

    pub fn stray_identifier(pos: usize, name: impl Into<String>) -> Self {
        Self::StrayIdentifier {
            pos,
            name: name.into(),
        }
    }

    pub fn pos(&self) -> usize {
        match self {
            Self::UnexpectedCharacter { pos, .. }
            | Self::Whitespace { pos }
            | Self::StrayIdentifier { pos, .. }
            | Self::DuplicateId { pos, .. }
            | Self::DanglingPrefix { pos, .. } => *pos,
        }
    }
}

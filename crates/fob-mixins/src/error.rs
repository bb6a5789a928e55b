//! Error types for rule resolution and per-file transforms.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TransformError>;

/// Errors raised while loading or resolving mixin rules.
///
/// Any of these aborts the run before a single file is transformed, since
/// the resulting rule set would be invalid.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("rule #{index} has no include pattern")]
    #[diagnostic(
        code(fob::mixins::missing_include),
        help("Every rule needs an `include` glob relative to the project root")
    )]
    MissingInclude { index: usize },

    #[error("invalid glob pattern `{pattern}`: {source}")]
    #[diagnostic(code(fob::mixins::invalid_pattern))]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("path is not valid UTF-8: {}", .0.display())]
    #[diagnostic(code(fob::mixins::non_utf8_path))]
    NonUtf8Path(PathBuf),

    #[error("config not found: {}", .0.display())]
    #[diagnostic(
        code(fob::mixins::config_not_found),
        help("Create fob-mixins.toml, fob-mixins.json, or add a `vueMixins` field to package.json")
    )]
    NotFound(PathBuf),

    #[error("invalid config value for `{field}`")]
    #[diagnostic(code(fob::mixins::invalid_value))]
    InvalidValue {
        field: String,
        #[help]
        hint: Option<String>,
    },

    #[error("failed to load config: {0}")]
    #[diagnostic(code(fob::mixins::load_failed))]
    Load(#[from] Box<figment::Error>),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Load(Box::new(err))
    }
}

/// Structural errors from splitting a component document into blocks.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum SfcError {
    /// File exceeds maximum allowed size
    #[error("file too large: {size} bytes (max: {max} bytes)")]
    #[diagnostic(code(fob::mixins::file_too_large))]
    FileTooLarge { size: usize, max: usize },

    /// Too many top-level blocks
    #[error("too many top-level blocks: {count} found (max: {max} allowed)")]
    #[diagnostic(code(fob::mixins::too_many_blocks))]
    TooManyBlocks { count: usize, max: usize },

    /// Block opened but never closed
    #[error("unclosed <{tag}> block starting at byte position {position}")]
    #[diagnostic(code(fob::mixins::unclosed_block))]
    UnclosedBlock { tag: String, position: usize },
}

/// A single parser or syntax-check diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDiagnostic {
    pub message: String,
    /// Byte offset relative to the original script text. `None` when the
    /// error has no label or points into the synthesized header.
    pub offset: Option<usize>,
}

/// Failure of the script rewrite itself.
#[derive(Debug, Clone, Error)]
pub enum InjectError {
    #[error("script failed to parse: {}", first_message(.diagnostics))]
    Parse { diagnostics: Vec<ParseDiagnostic> },
}

/// Per-file transform failure. Nothing is emitted for the file.
#[derive(Debug, Error, Diagnostic)]
pub enum TransformError {
    #[error("failed to split component {id}: {source}")]
    #[diagnostic(code(fob::mixins::sfc))]
    Sfc {
        id: String,
        #[source]
        source: SfcError,
    },

    #[error("failed to parse script in {id}{}: {message}", format_position(.line, .column))]
    #[diagnostic(
        code(fob::mixins::parse),
        help(
            "The component script must be valid module syntax and must not declare `__mixins` or `__mixin_N`"
        )
    )]
    Parse {
        id: String,
        message: String,
        /// 1-based line in the original document
        line: Option<usize>,
        /// 1-based column in the original document
        column: Option<usize>,
        diagnostics: Vec<ParseDiagnostic>,
    },
}

impl TransformError {
    /// The file identifier the error belongs to.
    pub fn id(&self) -> &str {
        match self {
            Self::Sfc { id, .. } | Self::Parse { id, .. } => id,
        }
    }
}

fn first_message(diagnostics: &[ParseDiagnostic]) -> &str {
    diagnostics
        .first()
        .map(|d| d.message.as_str())
        .unwrap_or("unknown error")
}

fn format_position(line: &Option<usize>, column: &Option<usize>) -> String {
    match (line, column) {
        (Some(line), Some(column)) => format!(" at {}:{}", line, column),
        _ => String::new(),
    }
}

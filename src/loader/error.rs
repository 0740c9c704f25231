use miette::{Diagnostic, NamedSource, SourceSpan};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A problem located inside one input document
#[derive(Error, Debug, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(trackcheck::document))]
pub struct DocumentError {
    #[source_code]
    pub src: NamedSource<String>,

    #[label("here")]
    pub span: SourceSpan,

    pub message: String,

    #[help]
    pub help: Option<String>,

    /// Further schema violations found in the same document
    #[related]
    pub others: Vec<DocumentError>,
}

impl DocumentError {
    pub fn new(path: &Path, content: &str, span: SourceSpan, message: String) -> Self {
        Self {
            src: crate::error_utils::create_named_source(path, content.to_string()),
            span,
            message,
            help: None,
            others: Vec::new(),
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

#[derive(Error, Debug, Diagnostic)]
pub enum LoadError {
    #[error("Failed to read {}", path.display())]
    #[diagnostic(code(trackcheck::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Document(#[from] DocumentError),

    #[error("No {0} file configured")]
    #[diagnostic(
        code(trackcheck::missing_input),
        help("Pass it on the command line or set it in trackcheck.yml")
    )]
    MissingInput(&'static str),

    #[error("Event '{uid}' appears more than once in {}", path.display())]
    #[diagnostic(code(trackcheck::duplicate_event))]
    DuplicateEvent { uid: String, path: PathBuf },

    #[error("Embedded {0} schema is invalid: {1}")]
    #[diagnostic(code(trackcheck::schema))]
    Schema(&'static str, String),
}

pub mod builder;
pub mod parser;

#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    #[error("Invalid XML: {0}")]
    ParserError(#[from] crate::parser::Error),

    #[error("XML Builder error: {0}")]
    BuilderError(#[from] crate::builder::XmlBuilderError),

    #[error("Invalid UTF-8 in document: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("Invalid tag: expected '{expected}', found '{found}'")]
    XmlInvalidTag { expected: String, found: String },

    #[error("Missing element: {0}")]
    MissingElement(String),

    #[error("Nesting deeper than {limit} elements")]
    TooDeep { limit: usize },
}

impl XmlError {
    /// True when the error came from reading a document rather than writing one.
    pub fn is_parse_error(&self) -> bool {
        !matches!(self, Self::BuilderError(_))
    }
}

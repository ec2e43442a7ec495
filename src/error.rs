/// Error types for presentation object-model operations.
use thiserror::Error;

/// Result type for presentation object-model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for presentation object-model operations.
#[derive(Error, Debug)]
pub enum Error {
    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// Invalid format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// A property that is defined by a placeholder cannot be changed on the
    /// placeholder instance itself.
    #[error(
        "'{0}' cannot be changed on a placeholder shape; change it on the referenced layout or master shape instead"
    )]
    PlaceholderImmutable(&'static str),

    /// A property write requires a run-level override record that does not
    /// exist, so the value belongs to the slide master.
    #[error(
        "'{0}' cannot be changed on the slide level since it belongs to the slide master; change it on the slide master instead"
    )]
    LevelNotOverridable(&'static str),

    /// A category axis was present but carried no usable reference.
    #[error("category axis carries no multi-level, string, or numeric reference")]
    MalformedCategoryAxis,
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Error::Xml(err.to_string())
    }
}

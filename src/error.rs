/// Errors produced while building the element registry or moving elements
/// between markup and objects.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The static element tables are inconsistent. This is a bug in the
    /// tables themselves and is never recoverable.
    #[error("descriptor conflict in {element}: {reason}")]
    DescriptorConflict {
        element: &'static str,
        reason: String,
    },

    #[error("unable to decode XML: {0}")]
    XmlParse(#[from] xml::reader::Error),

    #[error("unable to encode XML: {0}")]
    XmlWrite(#[from] xml::writer::Error),

    #[error("document has no root element")]
    EmptyDocument,

    #[error("unexpected root element: expected {expected}, found {found}")]
    UnexpectedRoot { expected: String, found: String },

    #[error("invalid algorithm suite: {0}")]
    AlgorithmSuite(String),
}

pub type Result<T> = std::result::Result<T, Error>;

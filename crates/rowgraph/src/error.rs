use thiserror::Error as ThisError;

///
/// Error
///
/// Top-level error for one `read` or `write` call. Every variant is fatal
/// to the call that produced it; nothing is retried internally and partial
/// accumulation is discarded with the call.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

///
/// ArgumentError
///
/// A required argument is unusable at a public entry point.
///

#[derive(Debug, ThisError)]
pub enum ArgumentError {
    #[error("the provided collection of type maps is empty")]
    EmptyTypeMaps,
}

///
/// ConfigurationError
///
/// Malformed mapping configuration. Raised while compiling a type map,
/// before any CSV row is consumed.
///

#[derive(Debug, ThisError)]
pub enum ConfigurationError {
    #[error("the mapping does not provide the entry point of the csv file")]
    MissingEntryPoint,

    #[error("the mapping provides more than one entry point")]
    MultipleEntryPoints,

    #[error("identifier rule '{source}' does not specify the entity kind to query")]
    MissingEntityKind { r#source: String },

    #[error(
        "the entry point is of the target kind but expects to build a path via other identifier rules"
    )]
    EntryPointNotAlone,

    #[error("malformed mapping document: {0}")]
    MalformedDocument(#[from] serde_json::Error),
}

///
/// FormatError
///
/// CSV input that is structurally unusable for the configured maps.
///

#[derive(Debug, ThisError)]
pub enum FormatError {
    #[error("the csv does not provide any header, the mapping cannot continue")]
    MissingHeader,

    #[error("the csv does not contain any header for the source '{source}'")]
    UnknownSource { r#source: String },
}

///
/// DataError
///
/// A CSV row references an entity that must pre-exist but cannot be found.
///

#[derive(Debug, ThisError)]
pub enum DataError {
    #[error("the csv references entities that are not part of the store: source '{source}'")]
    UnresolvedEntryPoint { r#source: String },

    #[error(
        "the csv references entities that are not part of the store: source '{source}', value '{value}'"
    )]
    UnresolvedReference { r#source: String, value: String },
}

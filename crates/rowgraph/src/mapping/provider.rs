use crate::{
    error::{ConfigurationError, Error},
    mapping::TypeMap,
};
use std::{fs, path::Path};
use tracing::debug;

/// Load the ordered mapping document from a JSON file.
pub fn load_type_maps(path: impl AsRef<Path>) -> Result<Vec<TypeMap>, Error> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading type maps");

    let json = fs::read_to_string(path)?;

    parse_type_maps(&json)
}

/// Parse the ordered mapping document from JSON text. Field names accept
/// both camelCase and PascalCase spellings.
pub fn parse_type_maps(json: &str) -> Result<Vec<TypeMap>, Error> {
    let maps =
        serde_json::from_str::<Vec<TypeMap>>(json).map_err(ConfigurationError::MalformedDocument)?;

    Ok(maps)
}

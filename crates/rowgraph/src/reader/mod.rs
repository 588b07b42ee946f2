mod mapper;
mod row;


use crate::{
    entity::{EntityRef, EntitySource},
    error::{ArgumentError, Error, FormatError},
    mapping::TypeMap,
    path::PathTree,
    reader::{
        mapper::RowMapper,
        row::{HeaderIndex, Row},
    },
};
use std::io::Read;
use tracing::error;

/// Delimiters considered by the sniffer, comma first.
const DELIMITER_CANDIDATES: [u8; 4] = [b',', b';', b'\t', b'|'];

///
/// CsvReader
///
/// Reads CSV content and maps every row onto the entity graph, one
/// [`TypeMap`] at a time, in configuration order. Entities produced for an
/// earlier row or an earlier map are visible to everything mapped after
/// them, so one CSV pass never duplicates an entity.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct CsvReader;

impl CsvReader {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Map the CSV content onto entities.
    ///
    /// Returns every entity created or updated across all rows and maps,
    /// distinct by identity. Entities the snapshot already contained are
    /// included when a row updated them; newly created entities transfer
    /// to the caller, which owns persistence.
    pub fn read<R, S>(
        &self,
        source: R,
        maps: &[TypeMap],
        session: &S,
    ) -> Result<Vec<EntityRef>, Error>
    where
        R: Read,
        S: EntitySource,
    {
        if maps.is_empty() {
            return Err(ArgumentError::EmptyTypeMaps.into());
        }

        // Compiling every tree up front keeps the contract that a bad
        // mapping fails before a single csv byte is interpreted.
        let trees = maps
            .iter()
            .map(PathTree::build)
            .collect::<Result<Vec<_>, _>>()?;

        let snapshot = session.entities();

        let mut source = source;
        let mut content = String::new();
        source.read_to_string(&mut content)?;

        let mut csv = csv::ReaderBuilder::new()
            .delimiter(sniff_delimiter(&content))
            .from_reader(content.as_bytes());

        let header = read_header(&mut csv, maps)?;

        let mut produced: Vec<EntityRef> = Vec::new();
        for record in csv.records() {
            let record = record?;
            let row = Row::new(&header, &record);

            for (map, tree) in maps.iter().zip(&trees) {
                let mapper = RowMapper::new(map, tree, session, &snapshot, produced.clone());
                let mapped = mapper.map_row(&row)?;
                merge_distinct(&mut produced, mapped);
            }
        }

        Ok(produced)
    }
}

/// Read and validate the header row: every rule source of every map must
/// name a header, checked before any data row is mapped.
fn read_header(csv: &mut csv::Reader<&[u8]>, maps: &[TypeMap]) -> Result<HeaderIndex, Error> {
    let headers = csv.headers()?.clone();

    if headers.is_empty() {
        error!("the csv does not provide any header, the mapping cannot continue");
        return Err(FormatError::MissingHeader.into());
    }

    let header = HeaderIndex::new(&headers);

    for rule in maps.iter().flat_map(|map| &map.properties) {
        if !header.contains(&rule.source) {
            error!(source = %rule.source, "the csv does not contain a header for the source");
            return Err(FormatError::UnknownSource {
                source: rule.source.clone(),
            }
            .into());
        }
    }

    Ok(header)
}

/// Pick the most frequent candidate delimiter on the header line. Ties and
/// absence fall back to the comma.
fn sniff_delimiter(content: &str) -> u8 {
    let header = content.lines().next().unwrap_or_default();

    let mut best = b',';
    let mut best_count = 0usize;
    for candidate in DELIMITER_CANDIDATES {
        let count = header.bytes().filter(|byte| *byte == candidate).count();
        if count > best_count {
            best = candidate;
            best_count = count;
        }
    }

    best
}

/// Append entities not already present, identity-wise.
fn merge_distinct(into: &mut Vec<EntityRef>, mapped: Vec<EntityRef>) {
    for entity in mapped {
        if !into.contains(&entity) {
            into.push(entity);
        }
    }
}

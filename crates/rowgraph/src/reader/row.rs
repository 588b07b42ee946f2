use std::collections::HashMap;

///
/// HeaderIndex
///
/// Header names resolved to field positions, built once per read.
///

#[derive(Debug)]
pub(super) struct HeaderIndex(HashMap<String, usize>);

impl HeaderIndex {
    pub(super) fn new(headers: &csv::StringRecord) -> Self {
        Self(
            headers
                .iter()
                .enumerate()
                .map(|(position, name)| (name.to_string(), position))
                .collect(),
        )
    }

    pub(super) fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub(super) fn position(&self, name: &str) -> Option<usize> {
        self.0.get(name).copied()
    }
}

///
/// Row
///
/// One CSV record addressed by header name.
///

#[derive(Clone, Copy, Debug)]
pub(super) struct Row<'a> {
    header: &'a HeaderIndex,
    record: &'a csv::StringRecord,
}

impl<'a> Row<'a> {
    pub(super) const fn new(header: &'a HeaderIndex, record: &'a csv::StringRecord) -> Self {
        Self { header, record }
    }

    pub(super) fn field(&self, source: &str) -> Option<&'a str> {
        self.header
            .position(source)
            .and_then(|position| self.record.get(position))
    }
}

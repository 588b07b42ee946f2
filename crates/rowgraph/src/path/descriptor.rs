///
/// PropertyDescriptor
///
/// A parsed dotted property path. Depth counts segments; the last segment
/// names the property that links an entity to its parent in a path chain.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PropertyDescriptor {
    segments: Vec<String>,
}

impl PropertyDescriptor {
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let segments = path
            .split('.')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(ToString::to_string)
            .collect();

        Self { segments }
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    #[must_use]
    pub fn segment(&self, index: usize) -> Option<&str> {
        self.segments.get(index).map(String::as_str)
    }

    /// First segment: the short name used for export file naming.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.segment(0)
    }

    /// Last segment: the property linking this descriptor's entity to its
    /// parent.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }
}

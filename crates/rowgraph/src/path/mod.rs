mod descriptor;

#[cfg(test)]
mod tests;

pub use descriptor::PropertyDescriptor;

use crate::{
    error::ConfigurationError,
    mapping::{PropertyMap, TypeMap},
};

///
/// PathNode
///
/// One node of the compiled traversal tree: the identifier rule it wraps,
/// the rule's parsed path, and arena links to parent and children.
///

#[derive(Clone, Debug)]
pub struct PathNode {
    pub rule: PropertyMap,
    pub descriptor: PropertyDescriptor,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
}

impl PathNode {
    /// Property name on the parent that this node's entities hang off.
    #[must_use]
    pub fn link_property(&self) -> Option<&str> {
        self.descriptor.last()
    }
}

///
/// PathTree
///
/// Arena of [`PathNode`]s addressed by index. The root (index 0) wraps the
/// mapping's empty-path identifier rule; children at depth d+1 attach by
/// path length, not by path prefix.
///

#[derive(Clone, Debug)]
pub struct PathTree {
    nodes: Vec<PathNode>,
}

impl PathTree {
    /// Compile a mapping's identifier rules into a rooted traversal tree.
    ///
    /// A same-kind entry point must be the only identifier rule: in that
    /// case rows map 1:1 onto target entities and there is no chain to
    /// build.
    pub fn build(map: &TypeMap) -> Result<Self, ConfigurationError> {
        if let Some(rule) = map.identifier_rules().find(|rule| rule.entity_kind.is_none()) {
            return Err(ConfigurationError::MissingEntityKind {
                source: rule.source.clone(),
            });
        }

        let mut roots = map
            .identifier_rules()
            .filter(|rule| rule.path.trim().is_empty());

        let root = roots.next().ok_or(ConfigurationError::MissingEntryPoint)?;
        if roots.next().is_some() {
            return Err(ConfigurationError::MultipleEntryPoints);
        }

        let chained: Vec<(PropertyDescriptor, &PropertyMap)> = map
            .identifier_rules()
            .filter(|rule| !rule.path.trim().is_empty())
            .map(|rule| (PropertyDescriptor::parse(&rule.path), rule))
            .collect();

        if root.entity_kind.as_deref() == Some(map.entity_kind.as_str()) && !chained.is_empty() {
            return Err(ConfigurationError::EntryPointNotAlone);
        }

        let mut tree = Self {
            nodes: vec![PathNode {
                rule: root.clone(),
                descriptor: PropertyDescriptor::default(),
                parent: None,
                children: Vec::new(),
            }],
        };
        tree.attach_children(0, &chained);

        Ok(tree)
    }

    /// Attach the children of `parent`: all identifier rules one level
    /// deeper. A single candidate always attaches; among several, the ones
    /// sharing the parent's source win, and with none sharing it all of
    /// them attach. Overlap between three or more same-depth sources is
    /// resolved by rule order, nothing smarter.
    fn attach_children(&mut self, parent: usize, all: &[(PropertyDescriptor, &PropertyMap)]) {
        let depth = self.nodes[parent].descriptor.depth();
        let next: Vec<&(PropertyDescriptor, &PropertyMap)> = all
            .iter()
            .filter(|(descriptor, _)| descriptor.depth() == depth + 1)
            .collect();

        let chosen = if next.len() <= 1 {
            next
        } else {
            let same_source: Vec<&(PropertyDescriptor, &PropertyMap)> = next
                .iter()
                .copied()
                .filter(|(_, rule)| rule.source == self.nodes[parent].rule.source)
                .collect();

            if same_source.is_empty() { next } else { same_source }
        };

        for (descriptor, rule) in chosen {
            let index = self.nodes.len();
            self.nodes.push(PathNode {
                rule: (*rule).clone(),
                descriptor: descriptor.clone(),
                parent: Some(parent),
                children: Vec::new(),
            });
            self.nodes[parent].children.push(index);
            self.attach_children(index, all);
        }
    }

    #[must_use]
    pub fn root(&self) -> &PathNode {
        &self.nodes[0]
    }

    #[must_use]
    pub fn node(&self, index: usize) -> &PathNode {
        &self.nodes[index]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

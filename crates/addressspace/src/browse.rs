//! Browsing with a provider-side continuation.
//!
//! # Paging
//!
//! A browse collects every matching reference for all descriptions in the
//! query, returns the first page and parks the rest as the single
//! continuation. `browse_next` drains it page by page. Starting a new browse
//! drops whatever was left of the previous one.

use std::collections::VecDeque;

use tracing::{debug, trace};

use corelib::{
    BrowseDescription, BrowseDirection, BrowseResultMask, LocalizedText, NodeClass, NodeId,
    NodesQuery, QualifiedName, ReferenceDescription,
};

use crate::space::AddressSpace;

/// References not yet handed out by the current browse.
#[derive(Debug)]
pub(crate) struct Continuation {
    remaining: VecDeque<ReferenceDescription>,
    page_size: usize,
}

impl Continuation {
    fn take_page(&mut self) -> Vec<ReferenceDescription> {
        let n = self.page_size.min(self.remaining.len());
        self.remaining.drain(..n).collect()
    }
}

impl AddressSpace {
    pub(crate) fn start_browse(&self, query: &NodesQuery) -> Vec<ReferenceDescription> {
        let mut all: VecDeque<ReferenceDescription> = query
            .nodes_to_browse
            .iter()
            .flat_map(|desc| self.matching_references(desc))
            .collect();

        let page_size = self.page_size(query.max_references_per_node);
        let n = page_size.min(all.len());
        let page: Vec<_> = all.drain(..n).collect();

        debug!(
            nodes = query.nodes_to_browse.len(),
            returned = page.len(),
            pending = all.len(),
            "browse"
        );

        let mut continuation = self.continuation.lock();
        *continuation = if all.is_empty() {
            None
        } else {
            Some(Continuation {
                remaining: all,
                page_size,
            })
        };
        page
    }

    pub(crate) fn next_page(&self) -> Vec<ReferenceDescription> {
        let mut guard = self.continuation.lock();
        let Some(continuation) = guard.as_mut() else {
            return Vec::new();
        };
        let page = continuation.take_page();
        trace!(
            returned = page.len(),
            pending = continuation.remaining.len(),
            "browse next"
        );
        if continuation.remaining.is_empty() {
            *guard = None;
        }
        page
    }

    /// Effective page size: the smaller non-zero cap of client and server.
    fn page_size(&self, requested: u32) -> usize {
        let server = self.config.max_references_per_node;
        let cap = match (requested, server) {
            (0, 0) => return usize::MAX,
            (0, s) => s,
            (r, 0) => r,
            (r, s) => r.min(s),
        };
        usize::try_from(cap).unwrap_or(usize::MAX)
    }

    /// All references of one description after type, class and mask filtering.
    pub(crate) fn matching_references(
        &self,
        desc: &BrowseDescription,
    ) -> Vec<ReferenceDescription> {
        if !self.contains(&desc.node_to_browse) {
            debug!(node = %desc.node_to_browse, "browse of unknown node");
            return Vec::new();
        }

        let mut found = Vec::new();
        if matches!(desc.direction, BrowseDirection::Forward | BrowseDirection::Both) {
            found.extend(self.forward_references(&desc.node_to_browse));
        }
        if matches!(desc.direction, BrowseDirection::Inverse | BrowseDirection::Both) {
            found.extend(self.inverse_references(&desc.node_to_browse));
        }

        found
            .into_iter()
            .filter(|r| self.reference_type_matches(r, desc))
            .filter(|r| desc.node_class_mask.includes(r.target_node_class))
            .map(|r| apply_result_mask(r, desc.result_mask))
            .collect()
    }

    fn reference_type_matches(
        &self,
        reference: &ReferenceDescription,
        desc: &BrowseDescription,
    ) -> bool {
        if desc.reference_type_id.is_null() {
            return true;
        }
        if desc.include_subtypes {
            self.is_subtype_of(&reference.reference_type_id, &desc.reference_type_id)
        } else {
            reference.reference_type_id == desc.reference_type_id
        }
    }

    /// Stored forward edges, with target names refreshed from the graph.
    pub(crate) fn forward_references(&self, node: &NodeId) -> Vec<ReferenceDescription> {
        let mut references = self.references(node);
        for reference in &mut references {
            if let Some(name) = self.browse_name_of(&reference.target_node_id) {
                reference.browse_name = name;
            }
        }
        references
    }

    /// Edges pointing at `node`, described from its side.
    pub(crate) fn inverse_references(&self, node: &NodeId) -> Vec<ReferenceDescription> {
        let sources: Vec<(NodeId, NodeId, QualifiedName)> = self
            .nodes
            .iter()
            .flat_map(|entry| {
                let source = entry.key().clone();
                entry
                    .value()
                    .references
                    .iter()
                    .filter(|r| r.is_forward && &r.target_node_id == node)
                    .map(|r| (source.clone(), r.reference_type_id.clone(), r.browse_name.clone()))
                    .collect::<Vec<_>>()
            })
            .collect();

        sources
            .into_iter()
            .map(|(source, reference_type_id, fallback_name)| {
                let browse_name = self.browse_name_of(&source).unwrap_or(fallback_name);
                ReferenceDescription {
                    reference_type_id,
                    is_forward: false,
                    display_name: LocalizedText::new(browse_name.name.clone()),
                    browse_name,
                    target_node_class: self.node_class_of(&source),
                    target_type_definition: self.type_definition_of(&source),
                    target_node_id: source,
                }
            })
            .collect()
    }
}

/// Clear the fields the caller did not ask for.
fn apply_result_mask(
    mut reference: ReferenceDescription,
    mask: BrowseResultMask,
) -> ReferenceDescription {
    if !mask.contains(BrowseResultMask::REFERENCE_TYPE) {
        reference.reference_type_id = NodeId::null();
    }
    if !mask.contains(BrowseResultMask::IS_FORWARD) {
        reference.is_forward = false;
    }
    if !mask.contains(BrowseResultMask::NODE_CLASS) {
        reference.target_node_class = NodeClass::Unspecified;
    }
    if !mask.contains(BrowseResultMask::BROWSE_NAME) {
        reference.browse_name = QualifiedName::default();
    }
    if !mask.contains(BrowseResultMask::DISPLAY_NAME) {
        reference.display_name = LocalizedText::default();
    }
    if !mask.contains(BrowseResultMask::TYPE_DEFINITION) {
        reference.target_type_definition = NodeId::null();
    }
    reference
}

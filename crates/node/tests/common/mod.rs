//! Shared test fixtures: tracing setup and provider doubles.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use addressspace::AddressSpace;
use corelib::{
    AttributeId, BrowsePath, BrowsePathResult, DataValue, NodeClass, NodeId, NodesQuery, ObjectId,
    Provider, ProviderError, QualifiedName, ReadValueId, ReferenceDescription, ReferenceTypeId,
    Result, StatusCode, Variant, WriteValue,
};
use node::{NodeConfig, NodeManager};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Manager over a fresh address space with the standard nodes.
pub fn standard_manager() -> (Arc<AddressSpace>, Arc<NodeManager>) {
    init_tracing();
    let space = Arc::new(AddressSpace::default());
    let manager = Arc::new(NodeManager::new(space.clone()));
    (space, manager)
}

/// Same, with a small browse page so results span several pages.
pub fn paged_manager(page_size: u32) -> (Arc<AddressSpace>, Arc<NodeManager>) {
    init_tracing();
    let space = Arc::new(AddressSpace::default());
    let manager = Arc::new(NodeManager::new(space.clone()).with_config(NodeConfig {
        browse_page_size: page_size,
        ..Default::default()
    }));
    (space, manager)
}

pub fn organizes(target: u32) -> ReferenceDescription {
    ReferenceDescription::forward(
        ReferenceTypeId::Organizes,
        NodeId::numeric(1, target),
        QualifiedName::new(1, format!("Item{target}")),
        NodeClass::Object,
        ObjectId::FolderType.into(),
    )
}

// ============================================================================
// Scripted Pages
// ============================================================================

#[derive(Debug, Default)]
pub struct CallCounts {
    pub browse: usize,
    pub browse_next: usize,
}

/// Serves a fixed list of pages and counts browse calls.
///
/// `browse` returns the first page, each `browse_next` the next one, then
/// empty pages forever.
pub struct ScriptedProvider {
    pages: Vec<Vec<ReferenceDescription>>,
    pending: Mutex<VecDeque<Vec<ReferenceDescription>>>,
    pub calls: Mutex<CallCounts>,
}

impl ScriptedProvider {
    pub fn new(pages: Vec<Vec<ReferenceDescription>>) -> Self {
        Self {
            pages,
            pending: Mutex::new(VecDeque::new()),
            calls: Mutex::new(CallCounts::default()),
        }
    }

    /// Split `references` into pages of the given sizes; leftovers form a
    /// final page.
    pub fn split(references: Vec<ReferenceDescription>, sizes: &[usize]) -> Self {
        let mut rest = references.into_iter();
        let mut pages: Vec<Vec<_>> = sizes
            .iter()
            .map(|n| rest.by_ref().take(*n).collect::<Vec<_>>())
            .filter(|page| !page.is_empty())
            .collect();
        let tail: Vec<_> = rest.collect();
        if !tail.is_empty() {
            pages.push(tail);
        }
        Self::new(pages)
    }
}

impl Provider for ScriptedProvider {
    fn browse(&self, _query: &NodesQuery) -> Result<Vec<ReferenceDescription>> {
        self.calls.lock().browse += 1;
        let mut pending: VecDeque<_> = self.pages.iter().cloned().collect();
        let first = pending.pop_front().unwrap_or_default();
        *self.pending.lock() = pending;
        Ok(first)
    }

    fn browse_next(&self) -> Result<Vec<ReferenceDescription>> {
        self.calls.lock().browse_next += 1;
        Ok(self.pending.lock().pop_front().unwrap_or_default())
    }

    fn read(&self, _requests: &[ReadValueId]) -> Result<Vec<DataValue>> {
        Ok(Vec::new())
    }

    fn write(&self, _requests: &[WriteValue]) -> Result<Vec<StatusCode>> {
        Ok(Vec::new())
    }

    fn translate_browse_paths_to_node_ids(
        &self,
        _paths: &[BrowsePath],
    ) -> Result<Vec<BrowsePathResult>> {
        Ok(Vec::new())
    }

    fn add_attribute(
        &self,
        _node: &NodeId,
        _attribute: AttributeId,
        _value: Variant,
    ) -> Result<()> {
        Ok(())
    }

    fn add_reference(&self, _source: &NodeId, _reference: &ReferenceDescription) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "Scripted"
    }
}

// ============================================================================
// Failing Provider
// ============================================================================

/// Every call fails as if the connection dropped.
pub struct DisconnectedProvider;

impl Provider for DisconnectedProvider {
    fn browse(&self, _query: &NodesQuery) -> Result<Vec<ReferenceDescription>> {
        Err(ProviderError::Disconnected.into())
    }

    fn browse_next(&self) -> Result<Vec<ReferenceDescription>> {
        Err(ProviderError::Disconnected.into())
    }

    fn read(&self, _requests: &[ReadValueId]) -> Result<Vec<DataValue>> {
        Err(ProviderError::Disconnected.into())
    }

    fn write(&self, _requests: &[WriteValue]) -> Result<Vec<StatusCode>> {
        Err(ProviderError::Disconnected.into())
    }

    fn translate_browse_paths_to_node_ids(
        &self,
        _paths: &[BrowsePath],
    ) -> Result<Vec<BrowsePathResult>> {
        Err(ProviderError::Disconnected.into())
    }

    fn add_attribute(
        &self,
        _node: &NodeId,
        _attribute: AttributeId,
        _value: Variant,
    ) -> Result<()> {
        Err(ProviderError::Disconnected.into())
    }

    fn add_reference(&self, _source: &NodeId, _reference: &ReferenceDescription) -> Result<()> {
        Err(ProviderError::Disconnected.into())
    }

    fn name(&self) -> &'static str {
        "Disconnected"
    }
}

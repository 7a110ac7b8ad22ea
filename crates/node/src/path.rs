//! Child lookup by browse path.
//!
//! Text paths are parsed element by element. An element without a namespace
//! prefix inherits the namespace of the element before it; the first element
//! inherits the namespace of the starting node's cached browse name. So
//! `["2:Boiler", "Temperature"]` resolves `2:Boiler/2:Temperature`.

use std::sync::Arc;

use tracing::debug;

use corelib::{BrowsePath, Error, QualifiedName, RelativePath, Result, StatusCode};

use crate::node::Node;

/// Parse text path elements into qualified names with namespace inheritance.
pub fn parse_path<S: AsRef<str>>(path: &[S], start_namespace: u16) -> Result<Vec<QualifiedName>> {
    let mut namespace = start_namespace;
    path.iter()
        .map(|element| {
            let name = QualifiedName::parse(element.as_ref(), namespace)?;
            namespace = name.namespace_index;
            Ok(name)
        })
        .collect()
}

impl Node {
    /// Child named `name`; the text may carry an `ns:` prefix.
    pub fn get_child(&self, name: &str) -> Result<Node> {
        self.get_child_path(&[name])
    }

    /// Descendant at the end of a text path.
    pub fn get_child_path<S: AsRef<str>>(&self, path: &[S]) -> Result<Node> {
        let names = parse_path(path, self.browse_name().namespace_index)?;
        self.get_child_names(&names)
    }

    pub fn get_child_ns(&self, namespace: u16, name: &str) -> Result<Node> {
        self.get_child_qualified(QualifiedName::new(namespace, name))
    }

    pub fn get_child_qualified(&self, name: QualifiedName) -> Result<Node> {
        self.get_child_names(std::slice::from_ref(&name))
    }

    /// Descendant at the end of a path of qualified names.
    ///
    /// Resolved with a single translate call. When the path matches several
    /// nodes the first target wins. Anything short of a good status with at
    /// least one target is `PathNotFound`.
    pub fn get_child_names(&self, path: &[QualifiedName]) -> Result<Node> {
        self.ensure_not_null()?;
        let request = BrowsePath {
            starting_node: self.id().clone(),
            relative_path: path.iter().cloned().collect::<RelativePath>(),
        };
        let results = self
            .provider()
            .translate_browse_paths_to_node_ids(std::slice::from_ref(&request))?;

        let (status, target) = match results.into_iter().next() {
            Some(result) => (result.status, result.targets.into_iter().next()),
            None => (StatusCode::BAD_NO_MATCH, None),
        };
        match target {
            Some(target) if status.is_good() => Ok(Node::with_browse_name(
                Arc::clone(self.manager()),
                target.target_id,
                path.last().cloned().unwrap_or_default(),
            )),
            _ => {
                debug!(start = %self.id(), %status, "child path not resolved");
                Err(Error::PathNotFound {
                    start: self.id().clone(),
                    path: path.to_vec(),
                    status: if status.is_good() { StatusCode::BAD_NO_MATCH } else { status },
                })
            }
        }
    }
}

//! Browse path translation.
//!
//! # Algorithm
//!
//! Starting from `{starting_node}`, each path element replaces the current
//! node set with every node reachable over one matching reference whose
//! browse name equals the element's target name. The search fails with
//! `BadNoMatch` as soon as a step yields no nodes. Targets keep discovery
//! order and are deduplicated.

use tracing::debug;

use corelib::{
    BrowseDescription, BrowseDirection, BrowsePath, BrowsePathResult, BrowsePathTarget,
    BrowseResultMask, NodeClassMask, NodeId, RelativePathElement, StatusCode,
};
use corelib::view::REMAINING_PATH_INDEX_NONE;

use crate::space::AddressSpace;

impl AddressSpace {
    pub(crate) fn translate(&self, path: &BrowsePath) -> BrowsePathResult {
        let elements = &path.relative_path.elements;
        if elements.is_empty() {
            return BrowsePathResult::bad(StatusCode::BAD_NOTHING_TO_DO);
        }
        if !self.contains(&path.starting_node) {
            return BrowsePathResult::bad(StatusCode::BAD_NODE_ID_UNKNOWN);
        }
        if elements.iter().any(|e| e.target_name.is_empty()) {
            return BrowsePathResult::bad(StatusCode::BAD_BROWSE_NAME_INVALID);
        }

        let mut current = vec![path.starting_node.clone()];
        for (depth, element) in elements.iter().enumerate() {
            let mut next: Vec<NodeId> = Vec::new();
            for node in &current {
                for target in self.step(node, element) {
                    if !next.contains(&target) {
                        next.push(target);
                    }
                }
            }
            if next.is_empty() {
                debug!(
                    start = %path.starting_node,
                    depth,
                    name = %element.target_name,
                    "browse path has no match"
                );
                return BrowsePathResult::bad(StatusCode::BAD_NO_MATCH);
            }
            current = next;
        }

        BrowsePathResult {
            status: StatusCode::GOOD,
            targets: current
                .into_iter()
                .map(|target_id| BrowsePathTarget {
                    target_id,
                    remaining_path_index: REMAINING_PATH_INDEX_NONE,
                })
                .collect(),
        }
    }

    /// Nodes one hop from `node` matching `element`.
    fn step(&self, node: &NodeId, element: &RelativePathElement) -> Vec<NodeId> {
        let desc = BrowseDescription {
            node_to_browse: node.clone(),
            direction: if element.is_inverse {
                BrowseDirection::Inverse
            } else {
                BrowseDirection::Forward
            },
            reference_type_id: element.reference_type_id.clone(),
            include_subtypes: element.include_subtypes,
            node_class_mask: NodeClassMask::empty(),
            result_mask: BrowseResultMask::BROWSE_NAME,
        };
        self.matching_references(&desc)
            .into_iter()
            .filter(|r| r.browse_name == element.target_name)
            .map(|r| r.target_node_id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corelib::{
        AttributeId, NodeClass, ObjectId, Provider, QualifiedName, ReferenceDescription,
        ReferenceTypeId, RelativePath,
    };

    fn link(
        space: &AddressSpace,
        parent: &NodeId,
        reference: ReferenceTypeId,
        child: &NodeId,
        name: &QualifiedName,
    ) {
        space.insert_attribute(child, AttributeId::BrowseName, name.clone().into());
        space.insert_reference(
            parent,
            &ReferenceDescription::forward(
                reference,
                child.clone(),
                name.clone(),
                NodeClass::Object,
                ObjectId::FolderType.into(),
            ),
        );
    }

    fn path(start: NodeId, names: &[(u16, &str)]) -> BrowsePath {
        BrowsePath {
            starting_node: start,
            relative_path: names
                .iter()
                .map(|(ns, n)| QualifiedName::new(*ns, *n))
                .collect::<RelativePath>(),
        }
    }

    fn plant() -> AddressSpace {
        let space = AddressSpace::default();
        let objects: NodeId = ObjectId::ObjectsFolder.into();
        let boiler = NodeId::string(2, "Boiler");
        let temp = NodeId::string(2, "Boiler.Temperature");
        let unit = NodeId::string(2, "Boiler.Temperature.Unit");
        let boiler_name = QualifiedName::new(2, "Boiler");
        let temp_name = QualifiedName::new(2, "Temperature");
        link(&space, &objects, ReferenceTypeId::Organizes, &boiler, &boiler_name);
        link(&space, &boiler, ReferenceTypeId::HasComponent, &temp, &temp_name);
        link(&space, &temp, ReferenceTypeId::HasProperty, &unit, &QualifiedName::new(2, "Unit"));
        space
    }

    #[test]
    fn test_resolves_multi_hop_path() {
        let space = plant();
        let results = space
            .translate_browse_paths_to_node_ids(&[path(
                ObjectId::ObjectsFolder.into(),
                &[(2, "Boiler"), (2, "Temperature"), (2, "Unit")],
            )])
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].status, StatusCode::GOOD);
        assert_eq!(results[0].targets.len(), 1);
        assert_eq!(results[0].targets[0].target_id, NodeId::string(2, "Boiler.Temperature.Unit"));
        assert_eq!(results[0].targets[0].remaining_path_index, REMAINING_PATH_INDEX_NONE);
    }

    #[test]
    fn test_status_codes() {
        let space = plant();
        let objects: NodeId = ObjectId::ObjectsFolder.into();
        let results = space
            .translate_browse_paths_to_node_ids(&[
                path(objects.clone(), &[(2, "Boiler"), (2, "Pressure")]),
                path(objects.clone(), &[]),
                path(NodeId::string(7, "Nowhere"), &[(2, "Boiler")]),
                path(objects.clone(), &[(2, "")]),
                path(objects, &[(3, "Boiler")]),
            ])
            .unwrap();
        let statuses: Vec<_> = results.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![
                StatusCode::BAD_NO_MATCH,
                StatusCode::BAD_NOTHING_TO_DO,
                StatusCode::BAD_NODE_ID_UNKNOWN,
                StatusCode::BAD_BROWSE_NAME_INVALID,
                StatusCode::BAD_NO_MATCH,
            ]
        );
        assert!(results.iter().all(|r| r.targets.is_empty()));
    }

    #[test]
    fn test_inverse_element() {
        let space = plant();
        let mut p = path(NodeId::string(2, "Boiler.Temperature"), &[(0, "Objects")]);
        p.relative_path.elements = vec![
            RelativePathElement {
                is_inverse: true,
                ..RelativePathElement::child(QualifiedName::new(2, "Boiler"))
            },
            RelativePathElement {
                is_inverse: true,
                ..RelativePathElement::child(QualifiedName::new(0, "Objects"))
            },
        ];
        let result = space.translate(&p);
        assert_eq!(result.status, StatusCode::GOOD);
        assert_eq!(result.targets[0].target_id, NodeId::from(ObjectId::ObjectsFolder));
    }

    #[test]
    fn test_fan_out_collects_all_matches() {
        let space = AddressSpace::empty();
        let root = NodeId::string(1, "Root");
        let name = QualifiedName::new(1, "Root");
        space.insert_attribute(&root, AttributeId::BrowseName, name.into());
        let a = NodeId::string(1, "A");
        let b = NodeId::string(1, "B");
        let same = QualifiedName::new(1, "Twin");
        link(&space, &root, ReferenceTypeId::Organizes, &a, &same);
        link(&space, &root, ReferenceTypeId::HasComponent, &b, &same);
        let result = space.translate(&path(root, &[(1, "Twin")]));
        let targets: Vec<_> = result.targets.into_iter().map(|t| t.target_id).collect();
        assert_eq!(targets, vec![a, b]);
    }
}

//! Node handle tests against the in-memory address space.
//!
//! # Test Strategy
//!
//! 1. **Path lookup**: Text and qualified paths, namespace inheritance, misses
//! 2. **Builder**: Created nodes are readable, typed and linked
//! 3. **Attributes**: Reads, writes and the browse name cache
//! 4. **Identity**: Equality, display and the null node
//! 5. **Provider failures**: Errors pass through untouched, empty results are typed

mod common;

use std::sync::Arc;

use anyhow::Result;

use common::{standard_manager, DisconnectedProvider, ScriptedProvider};
use corelib::{
    AttributeId, DataTypeId, Error, LocalizedText, NodeClass, NodeId, ObjectId, ProviderError,
    QualifiedName, ReferenceDescription, ReferenceTypeId, StatusCode, Variant, VariantType,
};
use node::{NameAllocator, NodeManager, SequentialAllocator, VALUE_RANK_SCALAR};

// ============================================================================
// Path Lookup
// ============================================================================

#[test]
fn test_get_child_with_namespace_prefix() -> Result<()> {
    let (_space, manager) = standard_manager();
    let objects = manager.objects();
    let boiler =
        objects.add_folder_with_id(NodeId::string(2, "Boiler"), QualifiedName::new(2, "Boiler"))?;
    let temp = boiler.add_variable_with_id(
        NodeId::string(2, "Boiler.Temperature"),
        QualifiedName::new(2, "Temperature"),
        21.5,
    )?;

    let found = objects.get_child_path(&["2:Boiler", "Temperature"])?;
    assert_eq!(found, temp);
    assert_eq!(found.browse_name(), &QualifiedName::new(2, "Temperature"));

    let direct = boiler.get_child("2:Temperature")?;
    assert_eq!(direct.read_value()?, Variant::Double(21.5));
    Ok(())
}

#[test]
fn test_missing_child_is_path_not_found() {
    let (_space, manager) = standard_manager();
    let objects = manager.objects();

    let err = objects.get_child_path(&["2:Nowhere"]).unwrap_err();
    match err {
        Error::PathNotFound { start, path, status } => {
            assert_eq!(start, NodeId::from(ObjectId::ObjectsFolder));
            assert_eq!(path, vec![QualifiedName::new(2, "Nowhere")]);
            assert_eq!(status, StatusCode::BAD_NO_MATCH);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(objects.find_child(&QualifiedName::new(2, "Nowhere")).unwrap().is_none());
}

#[test]
fn test_empty_path_is_not_found() {
    let (_space, manager) = standard_manager();
    let err = manager.objects().get_child_names(&[]).unwrap_err();
    assert!(matches!(
        err,
        Error::PathNotFound { status: StatusCode::BAD_NOTHING_TO_DO, .. }
    ));
}

#[test]
fn test_malformed_path_element() {
    let (_space, manager) = standard_manager();
    let err = manager.objects().get_child("abc:Pump").unwrap_err();
    assert!(matches!(err, Error::MalformedIdentifierText { .. }));
}

#[test]
fn test_standard_folders_resolve_from_root() -> Result<()> {
    let (_space, manager) = standard_manager();
    let root = manager.root();
    assert_eq!(root.get_child("Objects")?, manager.objects());
    assert_eq!(root.get_child_ns(0, "Types")?.id(), &NodeId::from(ObjectId::TypesFolder));
    assert!(root.find_child(&QualifiedName::new(0, "Views"))?.is_some());
    Ok(())
}

// ============================================================================
// Builder
// ============================================================================

#[test]
fn test_add_variable_then_read_back() -> Result<()> {
    let (_space, manager) = standard_manager();
    let objects = manager.objects();

    let speed = objects.add_variable("Speed", 3.5)?;
    let found = objects.get_child("Speed")?;

    assert_eq!(found, speed);
    assert_eq!(found.read_value()?, Variant::Double(3.5));
    assert_eq!(found.read_data_type()?, NodeId::numeric(0, 11));
    assert_eq!(found.read(AttributeId::ValueRank)?, Variant::Int32(VALUE_RANK_SCALAR));
    assert_eq!(found.read(AttributeId::NodeClass)?, NodeClass::Variable.to_variant());
    assert_eq!(found.read_display_name()?, LocalizedText::new("Speed"));
    Ok(())
}

#[test]
fn test_created_nodes_have_type_definitions() -> Result<()> {
    let (space, manager) = standard_manager();
    let line = manager.objects().add_folder("Line")?;
    let unit = line.add_property("Unit", "rpm")?;

    let typedef = |id: &NodeId| {
        space
            .references(id)
            .into_iter()
            .find(|r| r.is_type(ReferenceTypeId::HasTypeDefinition))
            .map(|r| r.target_node_id)
    };
    assert_eq!(typedef(line.id()), Some(NodeId::from(ObjectId::FolderType)));
    assert_eq!(typedef(unit.id()), Some(NodeId::from(ObjectId::PropertyType)));

    let structural: Vec<_> = space
        .references(line.id())
        .into_iter()
        .filter(|r| r.is_type(ReferenceTypeId::HasProperty))
        .map(|r| r.target_node_id)
        .collect();
    assert_eq!(structural, vec![unit.id().clone()]);
    Ok(())
}

#[test]
fn test_allocated_ids_use_default_namespace() -> Result<()> {
    let (_space, manager) = standard_manager();
    let objects = manager.objects();
    let a = objects.add_folder("A")?;
    let b = objects.add_folder("B")?;
    let c = objects.add_folder("7:C")?;
    assert_eq!(a.id(), &NodeId::numeric(1, 1000));
    assert_eq!(b.id(), &NodeId::numeric(1, 1001));
    assert_eq!(c.id(), &NodeId::numeric(7, 1002));
    assert_eq!(c.browse_name(), &QualifiedName::new(7, "C"));
    Ok(())
}

#[test]
fn test_injected_allocator() -> Result<()> {
    common::init_tracing();
    let space = Arc::new(addressspace::AddressSpace::default());
    let manager = Arc::new(NodeManager::new(space).with_allocator(Arc::new(NameAllocator)));

    let pump = manager.objects().add_folder("Pump")?;
    assert_eq!(pump.id(), &NodeId::string(1, "Pump"));

    // A builder can also take an allocator of its own.
    let local = SequentialAllocator::new(50);
    let rpm = pump.builder().in_namespace(4).add_variable("Rpm", 0u16)?;
    let other = node::NodeBuilder::new(&pump, &local).add_variable("Flow", 0.0f32)?;
    assert_eq!(rpm.id(), &NodeId::string(4, "Rpm"));
    assert_eq!(other.id(), &NodeId::numeric(1, 50));
    Ok(())
}

#[test]
fn test_exhausted_allocator_fails_creation() -> Result<()> {
    let space = Arc::new(addressspace::AddressSpace::default());
    let allocator = Arc::new(SequentialAllocator::new(u32::MAX));
    let manager = Arc::new(NodeManager::new(space.clone()).with_allocator(allocator));
    let objects = manager.objects();

    let last = objects.add_folder("Last")?;
    assert_eq!(last.id(), &NodeId::numeric(1, u32::MAX));
    let before = space.node_count();

    let err = objects.add_folder("Next").unwrap_err();
    assert!(matches!(err, Error::AllocatorExhausted { namespace: 1 }));
    assert_eq!(space.node_count(), before);
    assert_eq!(objects.get_child("Last")?, last);
    Ok(())
}

#[test]
fn test_unsupported_value_leaves_graph_untouched() {
    let (space, manager) = standard_manager();
    let before = space.node_count();
    let boxed = Variant::Variant(Box::new(Variant::Int32(1)));

    let err = manager.objects().add_variable("Boxed", boxed).unwrap_err();

    assert!(matches!(err, Error::UnsupportedVariantKind(VariantType::Variant)));
    assert_eq!(space.node_count(), before);
    assert!(manager.objects().get_children().unwrap().is_empty());
}

#[test]
fn test_empty_name_is_rejected() {
    let (_space, manager) = standard_manager();
    let err = manager.objects().add_folder("").unwrap_err();
    assert!(matches!(err, Error::MalformedIdentifierText { .. }));
}

#[test]
fn test_variable_without_value_takes_first_write() -> Result<()> {
    let (_space, manager) = standard_manager();
    let empty = manager.objects().add_variable("Empty", Variant::Null)?;

    assert_eq!(empty.read_data_type()?, NodeId::from(DataTypeId::Null));
    assert_eq!(empty.write_value(1.0)?, StatusCode::GOOD);
    assert_eq!(empty.read_value()?, Variant::Double(1.0));
    Ok(())
}

// ============================================================================
// Attributes
// ============================================================================

#[test]
fn test_write_value_statuses() -> Result<()> {
    let (_space, manager) = standard_manager();
    let level = manager.objects().add_variable("Level", 1.0)?;

    assert_eq!(level.write_value(2.5)?, StatusCode::GOOD);
    assert_eq!(level.read_value()?.as_f64(), Some(2.5));
    assert_eq!(level.write_value("high")?, StatusCode::BAD_TYPE_MISMATCH);
    assert_eq!(level.read_value()?.as_f64(), Some(2.5));
    Ok(())
}

#[test]
fn test_missing_attribute_is_not_found() {
    let (_space, manager) = standard_manager();
    let objects = manager.objects();
    let err = objects.read_value().unwrap_err();
    assert!(matches!(
        err,
        Error::AttributeNotFound {
            attribute: AttributeId::Value,
            status: StatusCode::BAD_ATTRIBUTE_ID_INVALID,
            ..
        }
    ));

    let ghost = manager.node(NodeId::string(9, "Ghost"));
    assert!(matches!(
        ghost.read(AttributeId::NodeClass).unwrap_err(),
        Error::AttributeNotFound { status: StatusCode::BAD_NODE_ID_UNKNOWN, .. }
    ));
    assert_eq!(ghost.read_browse_name().unwrap(), QualifiedName::default());
}

#[test]
fn test_read_browse_name_and_rename() -> Result<()> {
    let (_space, manager) = standard_manager();
    let objects = manager.objects();
    let mut tank = objects.add_folder("Tank")?;

    let plain = manager.node(tank.id().clone());
    assert!(plain.browse_name().is_empty());
    assert_eq!(plain.read_browse_name()?, QualifiedName::new(0, "Tank"));

    let status = tank.write_browse_name(QualifiedName::new(3, "Vessel"))?;
    assert_eq!(status, StatusCode::GOOD);
    assert_eq!(tank.browse_name(), &QualifiedName::new(3, "Vessel"));
    assert_eq!(objects.get_child("3:Vessel")?, tank);
    assert!(objects.find_child(&QualifiedName::new(0, "Tank"))?.is_none());
    Ok(())
}

#[test]
fn test_wrongly_tagged_browse_name_reads_empty() {
    let (space, manager) = standard_manager();
    let odd = NodeId::string(1, "Odd");
    space.insert_attribute(&odd, AttributeId::BrowseName, Variant::from("Odd"));

    let name = manager.node(odd).read_browse_name().unwrap();

    assert_eq!(name, QualifiedName::default());
}

#[test]
fn test_failed_rename_keeps_cache() {
    let (_space, manager) = standard_manager();
    let mut ghost = manager.node(NodeId::string(9, "Ghost"));
    ghost.set_browse_name_cache(QualifiedName::new(9, "Ghost"));

    let status = ghost.write_browse_name(QualifiedName::new(9, "Spirit")).unwrap();

    assert_eq!(status, StatusCode::BAD_NODE_ID_UNKNOWN);
    assert_eq!(ghost.browse_name(), &QualifiedName::new(9, "Ghost"));
}

// ============================================================================
// Identity
// ============================================================================

#[test]
fn test_equality_ignores_browse_name_cache() {
    let (_space, manager) = standard_manager();
    let objects = manager.objects();
    let bare = manager.node(ObjectId::ObjectsFolder.into());
    assert_eq!(objects, bare);
    assert_ne!(objects, manager.root());
}

#[test]
fn test_null_node() {
    let (_space, manager) = standard_manager();
    let null = manager.null_node();

    assert!(null.is_null());
    assert_eq!(null.to_string(), "Node(*null)");
    assert_eq!(null, manager.null_node());
    assert_ne!(null, manager.node(NodeId::null()));
    assert_ne!(null, manager.objects());

    assert!(matches!(null.read_value(), Err(Error::NullNode)));
    assert!(matches!(null.get_children(), Err(Error::NullNode)));
    assert!(matches!(null.get_child("Objects"), Err(Error::NullNode)));
    assert!(matches!(null.add_folder("X"), Err(Error::NullNode)));
}

#[test]
fn test_unspecified_class_child_is_browsable() -> Result<()> {
    let (space, manager) = standard_manager();
    let objects = manager.objects();
    let target = NodeId::string(1, "T");
    let name = QualifiedName::new(0, "T");
    space.insert_attribute(&target, AttributeId::BrowseName, name.clone().into());
    space.insert_reference(
        objects.id(),
        &ReferenceDescription::forward(
            ReferenceTypeId::Organizes,
            target.clone(),
            name.clone(),
            NodeClass::Unspecified,
            NodeId::null(),
        ),
    );

    let children = objects.get_children()?;
    let by_path = objects.get_child("T")?;

    assert_eq!(children.len(), 1);
    assert_eq!(children[0], by_path);
    assert_eq!(by_path.id(), &target);
    assert_eq!(objects.find_child(&name)?, Some(by_path));
    Ok(())
}

#[test]
fn test_display() {
    let (_space, manager) = standard_manager();
    assert_eq!(manager.objects().to_string(), "Node(0:Objects, id=0:85)");
}

// ============================================================================
// Provider Failures
// ============================================================================

#[test]
fn test_provider_errors_pass_through() {
    common::init_tracing();
    let manager = Arc::new(NodeManager::new(Arc::new(DisconnectedProvider)));
    let objects = manager.objects();

    let is_disconnected = |err: Error| matches!(err, Error::Provider(ProviderError::Disconnected));
    assert!(is_disconnected(objects.read_value().unwrap_err()));
    assert!(is_disconnected(objects.write_value(1).unwrap_err()));
    assert!(is_disconnected(objects.get_children().unwrap_err()));
    assert!(is_disconnected(objects.get_child("Pump").unwrap_err()));
    assert!(is_disconnected(objects.find_child(&QualifiedName::new(0, "Pump")).unwrap_err()));
    assert!(is_disconnected(objects.read_browse_name().unwrap_err()));
    assert!(is_disconnected(objects.add_folder("Pump").unwrap_err()));
}

#[test]
fn test_data_type_ids_are_namespace_zero_numeric() {
    let id: NodeId = DataTypeId::Double.into();
    assert_eq!(id, NodeId::numeric(0, 11));
    assert_ne!(id, NodeId::two_byte(11));
}

#[test]
fn test_empty_provider_results_are_typed_errors() {
    common::init_tracing();
    let manager = Arc::new(NodeManager::new(Arc::new(ScriptedProvider::new(Vec::new()))));
    let objects = manager.objects();

    assert!(matches!(
        objects.read_value().unwrap_err(),
        Error::AttributeNotFound { attribute: AttributeId::Value, .. }
    ));
    assert!(matches!(
        objects.write_value(1.0).unwrap_err(),
        Error::AttributeNotFound { attribute: AttributeId::Value, .. }
    ));
    assert!(matches!(
        objects.get_child("Pump").unwrap_err(),
        Error::PathNotFound { status: StatusCode::BAD_NO_MATCH, .. }
    ));
    assert_eq!(objects.read_browse_name().unwrap(), QualifiedName::default());
}

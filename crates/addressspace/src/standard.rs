//! Namespace-0 content: root folders, the type nodes new instances point
//! at, and the reference type hierarchy.

use corelib::{
    AttributeId, LocalizedText, NodeClass, NodeId, ObjectId, QualifiedName, ReferenceDescription,
    ReferenceTypeId, Variant,
};

use crate::space::AddressSpace;

pub(crate) fn populate(space: &AddressSpace) {
    for folder in [
        ObjectId::RootFolder,
        ObjectId::ObjectsFolder,
        ObjectId::TypesFolder,
        ObjectId::ViewsFolder,
    ] {
        define(space, folder.into(), NodeClass::Object, folder.browse_name());
        link(
            space,
            folder.into(),
            ReferenceTypeId::HasTypeDefinition,
            ObjectId::FolderType.into(),
            ObjectId::FolderType.browse_name(),
            NodeClass::ObjectType,
        );
    }
    for folder in [ObjectId::ObjectsFolder, ObjectId::TypesFolder, ObjectId::ViewsFolder] {
        link(
            space,
            ObjectId::RootFolder.into(),
            ReferenceTypeId::Organizes,
            folder.into(),
            folder.browse_name(),
            NodeClass::Object,
        );
    }

    let types = [
        (ObjectId::BaseObjectType, None, NodeClass::ObjectType),
        (ObjectId::FolderType, Some(ObjectId::BaseObjectType), NodeClass::ObjectType),
        (ObjectId::BaseVariableType, None, NodeClass::VariableType),
        (ObjectId::BaseDataVariableType, Some(ObjectId::BaseVariableType), NodeClass::VariableType),
        (ObjectId::PropertyType, Some(ObjectId::BaseVariableType), NodeClass::VariableType),
    ];
    for (id, supertype, class) in types {
        define(space, id.into(), class, id.browse_name());
        if let Some(supertype) = supertype {
            link(
                space,
                supertype.into(),
                ReferenceTypeId::HasSubtype,
                id.into(),
                id.browse_name(),
                class,
            );
        }
    }

    for reference in ReferenceTypeId::ALL {
        let id: NodeId = reference.into();
        define(space, id.clone(), NodeClass::ReferenceType, reference.browse_name());
        let is_abstract = Variant::Boolean(reference.is_abstract());
        space.insert_attribute(&id, AttributeId::IsAbstract, is_abstract);
        if let Some(parent) = reference.parent() {
            link(
                space,
                parent.into(),
                ReferenceTypeId::HasSubtype,
                id,
                reference.browse_name(),
                NodeClass::ReferenceType,
            );
        }
    }
}

fn define(space: &AddressSpace, id: NodeId, class: NodeClass, name: &str) {
    space.insert_attribute(&id, AttributeId::NodeId, Variant::NodeId(id.clone()));
    space.insert_attribute(&id, AttributeId::NodeClass, class.to_variant());
    space.insert_attribute(&id, AttributeId::BrowseName, QualifiedName::new(0, name).into());
    space.insert_attribute(&id, AttributeId::DisplayName, LocalizedText::new(name).into());
}

fn link(
    space: &AddressSpace,
    source: NodeId,
    reference: ReferenceTypeId,
    target: NodeId,
    target_name: &str,
    target_class: NodeClass,
) {
    let type_definition = match target_class {
        NodeClass::Object => ObjectId::FolderType.into(),
        _ => NodeId::null(),
    };
    space.insert_reference(
        &source,
        &ReferenceDescription::forward(
            reference,
            target,
            QualifiedName::new(0, target_name),
            target_class,
            type_definition,
        ),
    );
}

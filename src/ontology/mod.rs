//! Cloud security ontology.
//!
//! Every discovered resource is a variant of the [`schema::Resource`] union
//! and implements [`IsResource`]. The functions in this module work on any
//! such resource through its static [`ResourceDescriptor`]:
//!
//! - [`resource_types`] / [`has_type`]: the declared type chain
//! - [`related`]: references to other resources, derived from field names
//! - [`resource_map`]: the canonical property map with the injected `"type"` key
//! - [`resource_ids`]: identifiers of a batch

pub mod compact;
pub mod descriptor;
pub mod naming;
pub mod schema;
pub mod wellknown;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{PostureError, Result};

pub use compact::{Compact, CompactFields};
pub use descriptor::{Field, FieldDescriptor, FieldKind, FieldValue, ResourceDescriptor};
pub use naming::{default_naming, NamingStrategy, SuffixNaming};
pub use schema::{registry, Resource};
pub use wellknown::{Duration, Timestamp};

/// Reserved key holding the type chain in a canonical property map.
pub const TYPE_KEY: &str = "type";

/// Property under which curated relationships are reported.
pub const CURATED_PROPERTY: &str = "related";

/// Canonical property map of a single resource.
pub type ResourceProperties = Map<String, Value>;

/// The capability set every resource variant provides.
pub trait IsResource: std::fmt::Debug + Send + Sync {
    fn get_id(&self) -> &str;

    fn get_name(&self) -> &str;

    /// `None` when the provider does not report a creation time.
    fn get_creation_time(&self) -> Option<&Timestamp>;

    /// Snapshot of the untranslated provider payload, or empty.
    fn get_raw(&self) -> &str;

    /// Schema metadata of this variant.
    fn descriptor(&self) -> &'static ResourceDescriptor;

    /// Current field values, in the order of `descriptor().fields`.
    fn field_values(&self) -> Vec<FieldValue<'_>>;

    /// Serializes every declared field, defaults included.
    fn to_value(&self) -> serde_json::Result<Value>;

    /// Wraps a copy of this resource into the root union. `None` for variants
    /// that are not part of the schema.
    fn to_resource(&self) -> Option<Resource>;

    /// An author-curated relationship list, preferred over field-name
    /// inference when present.
    fn related_resources(&self) -> Option<&dyn HasRelatedResources> {
        None
    }
}

/// Explicit list of related resource IDs.
pub trait HasRelatedResources {
    fn related(&self) -> Vec<String>;
}

/// Static access to a variant's descriptor, without an instance.
pub trait ResourceType {
    fn type_descriptor() -> &'static ResourceDescriptor;
}

/// Borrowing and unwrapping through the resource union.
pub trait AsResource {
    fn as_resource(&self) -> &dyn IsResource;

    fn into_boxed(self) -> Box<dyn IsResource>;
}

/// A reference from one resource to another.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relationship {
    /// Field name with the relationship suffix stripped.
    pub property: String,
    /// Identifier of the referenced resource.
    pub value: String,
}

impl Relationship {
    fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

/// Declared type chain of the resource's variant, most specific first.
///
/// Empty if the variant declares none.
pub fn resource_types(r: &dyn IsResource) -> &'static [&'static str] {
    r.descriptor().type_names
}

/// Declared type chain of `T`, without constructing one.
pub fn resource_types_of<T: ResourceType>() -> &'static [&'static str] {
    T::type_descriptor().type_names
}

/// Whether `type_name` appears in the resource's type chain. Exact match.
pub fn has_type(r: &dyn IsResource, type_name: &str) -> bool {
    resource_types(r).contains(&type_name)
}

/// Relationships of `r` under the default naming convention.
pub fn related(r: &dyn IsResource) -> Vec<Relationship> {
    related_with(r, default_naming())
}

/// Relationships of `r` under the given naming convention.
///
/// Curated relationships win if the resource provides them. Otherwise every
/// string field whose name the convention accepts contributes: a scalar when
/// non-empty, a list with one entry per element. List elements are not
/// filtered.
pub fn related_with(r: &dyn IsResource, naming: &dyn NamingStrategy) -> Vec<Relationship> {
    if let Some(curated) = r.related_resources() {
        return curated
            .related()
            .into_iter()
            .filter(|id| !id.is_empty())
            .map(|id| Relationship::new(CURATED_PROPERTY, id))
            .collect();
    }

    let fields = r.descriptor().fields;
    let values = r.field_values();
    debug_assert_eq!(fields.len(), values.len(), "descriptor out of sync");

    let mut relationships = Vec::new();
    for (field, value) in fields.iter().zip(values) {
        if !field.kind.is_string() {
            continue;
        }
        let Some(property) = naming.reference_property(field.name) else {
            continue;
        };

        match value {
            FieldValue::String(id) if !id.is_empty() => {
                relationships.push(Relationship::new(property, id));
            }
            FieldValue::StringList(ids) => {
                relationships.extend(ids.iter().map(|id| Relationship::new(property, id.as_str())));
            }
            FieldValue::String(_) | FieldValue::Other => {}
        }
    }

    relationships
}

/// Canonical property map: every declared field (defaults included) plus the
/// type chain under [`TYPE_KEY`].
pub fn resource_map(r: &dyn IsResource) -> Result<ResourceProperties> {
    let value = r.to_value().map_err(|source| PostureError::Serialization {
        resource: r.get_id().to_string(),
        source,
    })?;

    let Value::Object(mut props) = value else {
        return Err(PostureError::NotAnObject(r.get_id().to_string()));
    };

    props.insert(TYPE_KEY.to_string(), Value::from(resource_types(r).to_vec()));
    Ok(props)
}

/// The canonical property map as indented JSON.
pub fn to_pretty_json(r: &dyn IsResource) -> Result<String> {
    let props = resource_map(r)?;
    Ok(serde_json::to_string_pretty(&props)?)
}

/// Identifiers of `resources`, in order. Never deduplicated.
pub fn resource_ids(resources: &[Box<dyn IsResource>]) -> Vec<String> {
    resources.iter().map(|r| r.get_id().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::schema::*;
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const VM_TYPES: [&str; 4] = ["VirtualMachine", "Compute", "CloudResource", "Resource"];

    fn ts(y: i32, m: u32, d: u32) -> Timestamp {
        Timestamp::new(Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap())
    }

    /// A resource outside the schema, with no declared type chain.
    #[derive(Debug, Default, Serialize)]
    struct Unregistered {
        id: String,
        name: String,
        raw: String,
        owner_id: String,
        peer_ids: Vec<String>,
        size_id: u32,
        curated: Option<Vec<String>>,
    }

    impl HasRelatedResources for Unregistered {
        fn related(&self) -> Vec<String> {
            self.curated.clone().unwrap_or_default()
        }
    }

    impl IsResource for Unregistered {
        fn get_id(&self) -> &str {
            &self.id
        }
        fn get_name(&self) -> &str {
            &self.name
        }
        fn get_creation_time(&self) -> Option<&Timestamp> {
            None
        }
        fn get_raw(&self) -> &str {
            &self.raw
        }
        fn descriptor(&self) -> &'static ResourceDescriptor {
            static DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
                name: "Unregistered",
                type_names: &[],
                fields: &[
                    FieldDescriptor { name: "id", kind: FieldKind::String },
                    FieldDescriptor { name: "name", kind: FieldKind::String },
                    FieldDescriptor { name: "raw", kind: FieldKind::String },
                    FieldDescriptor { name: "owner_id", kind: FieldKind::String },
                    FieldDescriptor { name: "peer_ids", kind: FieldKind::StringList },
                    FieldDescriptor { name: "size_id", kind: FieldKind::Int32 },
                ],
            };
            &DESCRIPTOR
        }
        fn field_values(&self) -> Vec<FieldValue<'_>> {
            vec![
                self.id.value(),
                self.name.value(),
                self.raw.value(),
                self.owner_id.value(),
                self.peer_ids.value(),
                self.size_id.value(),
            ]
        }
        fn to_value(&self) -> serde_json::Result<Value> {
            serde_json::to_value(self)
        }
        fn to_resource(&self) -> Option<Resource> {
            None
        }
        fn related_resources(&self) -> Option<&dyn HasRelatedResources> {
            self.curated.as_ref().map(|_| self as &dyn HasRelatedResources)
        }
    }

    /// Declares a field whose whole name is the reference suffix.
    #[derive(Debug, Default, Serialize)]
    struct BareSuffix {
        id: String,
        #[serde(rename = "_id")]
        bare: String,
    }

    impl IsResource for BareSuffix {
        fn get_id(&self) -> &str {
            &self.id
        }
        fn get_name(&self) -> &str {
            ""
        }
        fn get_creation_time(&self) -> Option<&Timestamp> {
            None
        }
        fn get_raw(&self) -> &str {
            ""
        }
        fn descriptor(&self) -> &'static ResourceDescriptor {
            static DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
                name: "BareSuffix",
                type_names: &["BareSuffix", "Resource"],
                fields: &[
                    FieldDescriptor { name: "id", kind: FieldKind::String },
                    FieldDescriptor { name: "_id", kind: FieldKind::String },
                ],
            };
            &DESCRIPTOR
        }
        fn field_values(&self) -> Vec<FieldValue<'_>> {
            vec![self.id.value(), self.bare.value()]
        }
        fn to_value(&self) -> serde_json::Result<Value> {
            serde_json::to_value(self)
        }
        fn to_resource(&self) -> Option<Resource> {
            None
        }
    }

    /// Serializes into a JSON array instead of an object.
    #[derive(Debug)]
    struct NotAMessage;

    impl IsResource for NotAMessage {
        fn get_id(&self) -> &str {
            "odd"
        }
        fn get_name(&self) -> &str {
            ""
        }
        fn get_creation_time(&self) -> Option<&Timestamp> {
            None
        }
        fn get_raw(&self) -> &str {
            ""
        }
        fn descriptor(&self) -> &'static ResourceDescriptor {
            VirtualMachine::type_descriptor()
        }
        fn field_values(&self) -> Vec<FieldValue<'_>> {
            vec![FieldValue::Other; VirtualMachine::type_descriptor().fields.len()]
        }
        fn to_value(&self) -> serde_json::Result<Value> {
            Ok(json!([1, 2]))
        }
        fn to_resource(&self) -> Option<Resource> {
            None
        }
    }

    /// Fails to serialize, like a map with non-string keys would.
    #[derive(Debug)]
    struct Unserializable;

    impl IsResource for Unserializable {
        fn get_id(&self) -> &str {
            "broken"
        }
        fn get_name(&self) -> &str {
            ""
        }
        fn get_creation_time(&self) -> Option<&Timestamp> {
            None
        }
        fn get_raw(&self) -> &str {
            ""
        }
        fn descriptor(&self) -> &'static ResourceDescriptor {
            Account::type_descriptor()
        }
        fn field_values(&self) -> Vec<FieldValue<'_>> {
            vec![FieldValue::Other; Account::type_descriptor().fields.len()]
        }
        fn to_value(&self) -> serde_json::Result<Value> {
            let mut bad = std::collections::HashMap::new();
            bad.insert(vec![1u8], 1);
            serde_json::to_value(bad)
        }
        fn to_resource(&self) -> Option<Resource> {
            None
        }
    }

    #[test]
    fn zero_vm_has_full_type_chain() {
        let vm = VirtualMachine::default();
        assert_eq!(resource_types(&vm), VM_TYPES);
        assert_eq!(resource_types_of::<VirtualMachine>(), VM_TYPES);
    }

    #[test]
    fn missing_metadata_is_empty_not_error() {
        let r = Unregistered::default();
        assert!(resource_types(&r).is_empty());
        assert!(!has_type(&r, "Resource"));
    }

    #[test]
    fn has_type_is_exact() {
        let vm = VirtualMachine::default();
        assert!(has_type(&vm, "Compute"));
        assert!(has_type(&vm, "Resource"));
        assert!(!has_type(&vm, "compute"));
        assert!(!has_type(&vm, "Storage"));
    }

    #[test]
    fn object_storage_parent_relationship() {
        let storage = ObjectStorage {
            id: "some-id".into(),
            name: "some-name".into(),
            parent_id: Some("some-storage-account-id".into()),
            raw: "{}".into(),
            ..Default::default()
        };
        assert_eq!(
            related(&storage),
            vec![Relationship::new("parent", "some-storage-account-id")]
        );
    }

    #[test]
    fn empty_scalar_reference_is_skipped() {
        let storage = ObjectStorage {
            id: "some-id".into(),
            parent_id: Some(String::new()),
            ..Default::default()
        };
        assert!(related(&storage).is_empty());
        assert!(related(&ObjectStorage::default()).is_empty());
    }

    #[test]
    fn list_references_fan_out_in_order() {
        let vm = VirtualMachine {
            id: "vm".into(),
            block_storage_ids: vec!["a".into(), "b".into()],
            ..Default::default()
        };
        assert_eq!(
            related(&vm),
            vec![
                Relationship::new("block_storage", "a"),
                Relationship::new("block_storage", "b"),
            ]
        );
    }

    #[test]
    fn list_references_keep_empty_elements() {
        let vm = VirtualMachine {
            network_interface_ids: vec!["nic".into(), String::new()],
            ..Default::default()
        };
        assert_eq!(
            related(&vm),
            vec![
                Relationship::new("network_interface", "nic"),
                Relationship::new("network_interface", ""),
            ]
        );
    }

    #[test]
    fn relationships_follow_declaration_order() {
        let vm = VirtualMachine {
            parent_id: Some("rg".into()),
            network_interface_ids: vec!["nic".into()],
            block_storage_ids: vec!["disk".into()],
            ..Default::default()
        };
        let properties: Vec<_> = related(&vm).into_iter().map(|r| r.property).collect();
        assert_eq!(properties, ["parent", "network_interface", "block_storage"]);
    }

    #[test]
    fn non_string_fields_are_never_references() {
        let r = Unregistered {
            owner_id: "owner".into(),
            peer_ids: vec!["p1".into()],
            size_id: 9,
            ..Default::default()
        };
        assert_eq!(
            related(&r),
            vec![Relationship::new("owner", "owner"), Relationship::new("peer", "p1")]
        );
    }

    #[test]
    fn curated_relationships_take_precedence() {
        let r = Unregistered {
            owner_id: "owner".into(),
            curated: Some(vec!["x".into(), String::new(), "y".into()]),
            ..Default::default()
        };
        assert_eq!(
            related(&r),
            vec![
                Relationship::new(CURATED_PROPERTY, "x"),
                Relationship::new(CURATED_PROPERTY, "y"),
            ]
        );
    }

    #[test]
    fn bare_suffix_field_has_empty_property() {
        let r = BareSuffix {
            id: "x".into(),
            bare: "target".into(),
        };
        assert_eq!(related(&r), vec![Relationship::new("", "target")]);

        let unset = BareSuffix::default();
        assert!(related(&unset).is_empty());
    }

    #[test]
    fn custom_naming_strategy() {
        let vm = VirtualMachine {
            parent_id: Some("rg".into()),
            block_storage_ids: vec!["disk".into()],
            ..Default::default()
        };
        let only_singular = SuffixNaming::new(["_id"]);
        assert_eq!(
            related_with(&vm, &only_singular),
            vec![Relationship::new("parent", "rg")]
        );
    }

    #[test]
    fn resource_map_of_vm() {
        let vm = VirtualMachine {
            id: "my-id".into(),
            name: "My VM".into(),
            creation_time: Some(ts(2024, 1, 1)),
            automatic_updates: Some(AutomaticUpdates {
                interval: Some(Duration::from_days(2)),
                ..Default::default()
            }),
            ..Default::default()
        };

        let props = resource_map(&vm).unwrap();
        assert_eq!(props["id"], json!("my-id"));
        assert_eq!(props["name"], json!("My VM"));
        assert_eq!(props["creationTime"], json!("2024-01-01T00:00:00Z"));
        assert_eq!(
            props["automaticUpdates"],
            json!({"enabled": false, "interval": "172800s", "securityOnly": false})
        );
        assert_eq!(props[TYPE_KEY], json!(VM_TYPES));
        assert_eq!(props["blockStorageIds"], json!([]));
        assert_eq!(props["labels"], json!({}));
        assert_eq!(props["bootLogging"], Value::Null);
        assert_eq!(props["description"], json!(""));
        assert_eq!(props["internetAccessibleEndpoint"], json!(false));
        assert!(!props.contains_key("parentId"));
    }

    #[test]
    fn resource_map_emits_every_declared_field() {
        let vm = VirtualMachine::default();
        let props = resource_map(&vm).unwrap();
        for field in vm.descriptor().fields {
            if field.name == "parent_id" {
                continue;
            }
            let key = camel_case(field.name);
            assert!(props.contains_key(&key), "missing {key}");
        }
    }

    #[test]
    fn resource_map_type_matches_resource_types() {
        let storage = BlockStorage::default();
        let props = resource_map(&storage).unwrap();
        assert_eq!(props[TYPE_KEY], json!(resource_types(&storage)));
    }

    #[test]
    fn resource_map_without_metadata_has_empty_type() {
        let props = resource_map(&Unregistered::default()).unwrap();
        assert_eq!(props[TYPE_KEY], json!([]));
    }

    #[test]
    fn resource_map_wraps_serialization_failure() {
        let err = resource_map(&Unserializable).unwrap_err();
        assert!(matches!(err, PostureError::Serialization { ref resource, .. } if resource == "broken"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn resource_map_rejects_non_objects() {
        let err = resource_map(&NotAMessage).unwrap_err();
        assert!(matches!(err, PostureError::NotAnObject(_)));
    }

    #[test]
    fn resource_map_does_not_touch_input() {
        let vm = VirtualMachine {
            id: "vm".into(),
            ..Default::default()
        };
        let before = vm.clone();
        let first = resource_map(&vm).unwrap();
        let second = resource_map(&vm).unwrap();
        assert_eq!(vm, before);
        assert_eq!(first, second);
    }

    #[test]
    fn pretty_json_contains_type() {
        let text = to_pretty_json(&Account {
            id: "acc".into(),
            ..Default::default()
        })
        .unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed[TYPE_KEY], json!(["Account", "Infrastructure", "Resource"]));
        assert!(text.contains('\n'));
    }

    #[test]
    fn resource_ids_of_empty_batch() {
        let ids = resource_ids(&[]);
        assert!(ids.is_empty());
        assert_eq!(serde_json::to_value(&ids).unwrap(), json!([]));
    }

    #[test]
    fn resource_ids_in_order() {
        let batch: Vec<Box<dyn IsResource>> = vec![
            Box::new(Account {
                id: "test".into(),
                ..Default::default()
            }),
            Box::new(Account {
                id: "test2".into(),
                ..Default::default()
            }),
            Box::new(Account {
                id: "test".into(),
                ..Default::default()
            }),
        ];
        assert_eq!(resource_ids(&batch), ["test", "test2", "test"]);
    }

    fn camel_case(name: &str) -> String {
        let mut out = String::new();
        let mut upper = false;
        for c in name.chars() {
            if c == '_' {
                upper = true;
            } else if upper {
                out.extend(c.to_uppercase());
                upper = false;
            } else {
                out.push(c);
            }
        }
        out
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_vm() -> impl Strategy<Value = VirtualMachine> {
            (
                ".*",
                ".*",
                proptest::option::of("[a-z0-9-]{0,8}"),
                proptest::collection::vec("[a-z0-9-]{0,8}", 0..4),
                proptest::collection::vec("[a-z0-9-]{0,8}", 0..4),
                any::<bool>(),
            )
                .prop_map(|(id, name, parent_id, nics, disks, exposed)| VirtualMachine {
                    id,
                    name,
                    parent_id,
                    network_interface_ids: nics,
                    block_storage_ids: disks,
                    internet_accessible_endpoint: exposed,
                    ..Default::default()
                })
        }

        proptest! {
            #[test]
            fn type_chain_ignores_field_values(a in arb_vm(), b in arb_vm()) {
                prop_assert_eq!(resource_types(&a), resource_types(&b));
            }

            #[test]
            fn has_type_agrees_with_chain(vm in arb_vm(), t in "[A-Za-z]{0,16}") {
                prop_assert_eq!(has_type(&vm, &t), resource_types(&vm).contains(&t.as_str()));
            }

            #[test]
            fn scalar_references_are_never_empty(vm in arb_vm()) {
                for rel in related(&vm).iter().filter(|r| r.property == "parent") {
                    prop_assert!(!rel.value.is_empty());
                }
            }

            #[test]
            fn extraction_and_projection_are_idempotent(vm in arb_vm()) {
                prop_assert_eq!(related(&vm), related(&vm));
                prop_assert_eq!(resource_map(&vm).unwrap(), resource_map(&vm).unwrap());
            }

            #[test]
            fn list_fan_out_matches_lengths(vm in arb_vm()) {
                let rels = related(&vm);
                let disks = rels.iter().filter(|r| r.property == "block_storage").count();
                prop_assert_eq!(disks, vm.block_storage_ids.len());
            }
        }
    }
}

//! The resource schema: a single-rooted tagged union of resource variants.
//!
//! ```text
//! Resource
//! ├── CloudResource
//! │   ├── Compute        { VirtualMachine, Container, Function }
//! │   ├── Networking     { NetworkInterface, NetworkService }
//! │   │   └── NetworkService { LoadBalancer, StorageService { ObjectStorageService } }
//! │   └── Storage        { BlockStorage, ObjectStorage, FileStorage, DatabaseStorage }
//! ├── Infrastructure     { Account, ResourceGroup }
//! └── Data
//!     └── Document       { SecurityAdvisoryDocument }
//! ```
//!
//! Concrete variants are declared with `resource!`, which adds the common
//! fields and generates the static descriptor. Every variant must also be
//! listed in the [`registry`]. Nested messages are declared with `message!`
//! and nested unions with `oneof!`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::compact::{variant_key, CompactFields};
use super::{AsResource, IsResource};
use crate::error::Result;

pub use common::*;
pub use compute::*;
pub use document::*;
pub use infrastructure::*;
pub use network::*;
pub use registry::{registry, Registry};
pub use storage::*;

/// Declares a concrete resource variant.
///
/// The common fields (`id`, `name`, `creation_time`, `description`,
/// `geo_location`, `labels`, `parent_id`, `raw`) come first, followed by the
/// listed ones. `via` names the unions between the variant and the root,
/// innermost first.
macro_rules! resource {
    (
        $(#[$meta:meta])*
        pub struct $name:ident : [$($type_name:literal),+ $(,)?] via $($via:ident),+ {
            $(
                $(#[$fmeta:meta])*
                pub $field:ident : $fty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "camelCase", default)]
        pub struct $name {
            pub id: String,
            pub name: String,
            pub creation_time: Option<$crate::ontology::Timestamp>,
            pub description: String,
            pub geo_location: Option<$crate::ontology::schema::GeoLocation>,
            pub labels: std::collections::BTreeMap<String, String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            pub parent_id: Option<String>,
            pub raw: String,
            $(
                $(#[$fmeta])*
                pub $field: $fty,
            )*
        }

        impl $crate::ontology::ResourceType for $name {
            fn type_descriptor() -> &'static $crate::ontology::ResourceDescriptor {
                use $crate::ontology::{Field, FieldDescriptor};

                static DESCRIPTOR: $crate::ontology::ResourceDescriptor =
                    $crate::ontology::ResourceDescriptor {
                        name: stringify!($name),
                        type_names: &[$($type_name),+],
                        fields: &[
                            FieldDescriptor { name: "id", kind: <String as Field>::KIND },
                            FieldDescriptor { name: "name", kind: <String as Field>::KIND },
                            FieldDescriptor {
                                name: "creation_time",
                                kind: <Option<$crate::ontology::Timestamp> as Field>::KIND,
                            },
                            FieldDescriptor { name: "description", kind: <String as Field>::KIND },
                            FieldDescriptor {
                                name: "geo_location",
                                kind: <Option<$crate::ontology::schema::GeoLocation> as Field>::KIND,
                            },
                            FieldDescriptor {
                                name: "labels",
                                kind: <std::collections::BTreeMap<String, String> as Field>::KIND,
                            },
                            FieldDescriptor { name: "parent_id", kind: <Option<String> as Field>::KIND },
                            FieldDescriptor { name: "raw", kind: <String as Field>::KIND },
                            $(
                                FieldDescriptor {
                                    name: stringify!($field),
                                    kind: <$fty as Field>::KIND,
                                },
                            )*
                        ],
                    };

                &DESCRIPTOR
            }
        }

        impl $crate::ontology::IsResource for $name {
            fn get_id(&self) -> &str {
                &self.id
            }

            fn get_name(&self) -> &str {
                &self.name
            }

            fn get_creation_time(&self) -> Option<&$crate::ontology::Timestamp> {
                self.creation_time.as_ref()
            }

            fn get_raw(&self) -> &str {
                &self.raw
            }

            fn descriptor(&self) -> &'static $crate::ontology::ResourceDescriptor {
                <Self as $crate::ontology::ResourceType>::type_descriptor()
            }

            fn field_values(&self) -> Vec<$crate::ontology::FieldValue<'_>> {
                use $crate::ontology::Field;

                vec![
                    self.id.value(),
                    self.name.value(),
                    self.creation_time.value(),
                    self.description.value(),
                    self.geo_location.value(),
                    self.labels.value(),
                    self.parent_id.value(),
                    self.raw.value(),
                    $( self.$field.value(), )*
                ]
            }

            fn to_value(&self) -> serde_json::Result<serde_json::Value> {
                serde_json::to_value(self)
            }

            fn to_resource(&self) -> Option<$crate::ontology::schema::Resource> {
                let r = self.clone();
                $( let r = $via::from(r); )+
                Some($crate::ontology::schema::Resource::from(r))
            }
        }

        impl $crate::ontology::compact::CompactFields for $name {
            fn compact_fields(&self) -> serde_json::Map<String, serde_json::Value> {
                use $crate::ontology::compact::{camel_case, Compact};

                let mut map = serde_json::Map::new();
                let fields: [(&str, Option<serde_json::Value>); 8] = [
                    ("id", self.id.compact()),
                    ("name", self.name.compact()),
                    ("creation_time", self.creation_time.compact()),
                    ("description", self.description.compact()),
                    ("geo_location", self.geo_location.compact()),
                    ("labels", self.labels.compact()),
                    ("parent_id", self.parent_id.compact()),
                    ("raw", self.raw.compact()),
                ];
                for (field, value) in fields {
                    if let Some(value) = value {
                        map.insert(camel_case(field), value);
                    }
                }
                $(
                    if let Some(value) = self.$field.compact() {
                        map.insert(camel_case(stringify!($field)), value);
                    }
                )*
                map
            }
        }

        impl $crate::ontology::AsResource for $name {
            fn as_resource(&self) -> &dyn $crate::ontology::IsResource {
                self
            }

            fn into_boxed(self) -> Box<dyn $crate::ontology::IsResource> {
                Box::new(self)
            }
        }
    };
}

/// Registers a nested type as a singular (`Option<T>`) and repeated
/// (`Vec<T>`) field of resources and messages.
macro_rules! nested_field {
    ($name:ident) => {
        impl $crate::ontology::Field for Option<$name> {
            const KIND: $crate::ontology::FieldKind = $crate::ontology::FieldKind::Message;
        }

        impl $crate::ontology::Field for Vec<$name> {
            const KIND: $crate::ontology::FieldKind = $crate::ontology::FieldKind::MessageList;
        }

        /// A set message is kept even if all its fields are defaults.
        impl $crate::ontology::compact::Compact for Option<$name> {
            fn compact(&self) -> Option<serde_json::Value> {
                use $crate::ontology::compact::CompactFields;
                self.as_ref().map(|m| m.to_compact_value())
            }
        }

        impl $crate::ontology::compact::Compact for Vec<$name> {
            fn compact(&self) -> Option<serde_json::Value> {
                use $crate::ontology::compact::CompactFields;
                (!self.is_empty())
                    .then(|| serde_json::Value::Array(self.iter().map(|m| m.to_compact_value()).collect()))
            }
        }
    };
}

/// Declares nested messages: plain structs with camelCase JSON and defaults
/// for missing fields.
macro_rules! message {
    ($(
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                pub $field:ident : $fty:ty
            ),* $(,)?
        }
    )+) => {$(
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "camelCase", default)]
        pub struct $name {
            $(
                $(#[$fmeta])*
                pub $field: $fty,
            )*
        }

        impl $crate::ontology::compact::CompactFields for $name {
            fn compact_fields(&self) -> serde_json::Map<String, serde_json::Value> {
                use $crate::ontology::compact::{camel_case, Compact};

                let mut map = serde_json::Map::new();
                $(
                    if let Some(value) = self.$field.compact() {
                        map.insert(camel_case(stringify!($field)), value);
                    }
                )*
                map
            }
        }

        nested_field!($name);
    )+};
}

/// Declares a nested union whose variants are messages of the same name.
macro_rules! oneof {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $($variant:ident),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub enum $name {
            $( $variant($variant), )+
        }

        impl $crate::ontology::compact::CompactFields for $name {
            fn compact_fields(&self) -> serde_json::Map<String, serde_json::Value> {
                let mut map = serde_json::Map::new();
                match self {
                    $(
                        Self::$variant(inner) => {
                            map.insert(
                                $crate::ontology::compact::variant_key(stringify!($variant)),
                                $crate::ontology::compact::CompactFields::to_compact_value(inner),
                            );
                        }
                    )+
                }
                map
            }
        }

        nested_field!($name);
    };
}

/// Declares a union level of the hierarchy, serialized as an externally
/// tagged object keyed by the lowerCamelCase variant name.
macro_rules! resource_union {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $($variant:ident),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub enum $name {
            $( $variant($variant), )+
        }

        impl CompactFields for $name {
            fn compact_fields(&self) -> Map<String, Value> {
                let mut map = Map::new();
                match self {
                    $(
                        Self::$variant(r) => {
                            map.insert(variant_key(stringify!($variant)), r.to_compact_value());
                        }
                    )+
                }
                map
            }
        }

        impl AsResource for $name {
            fn as_resource(&self) -> &dyn IsResource {
                match self {
                    $( Self::$variant(r) => r.as_resource(), )+
                }
            }

            fn into_boxed(self) -> Box<dyn IsResource> {
                match self {
                    $( Self::$variant(r) => r.into_boxed(), )+
                }
            }
        }

        $(
            impl From<$variant> for $name {
                fn from(r: $variant) -> Self {
                    Self::$variant(r)
                }
            }
        )+
    };
}

mod common;
mod compute;
mod document;
mod infrastructure;
mod network;
mod registry;
mod storage;

resource_union! {
    /// Root of the ontology: anything discoverable.
    pub enum Resource { CloudResource, Infrastructure, Data }
}

resource_union! {
    pub enum CloudResource { Compute, Networking, Storage }
}

resource_union! {
    pub enum Compute { VirtualMachine, Container, Function }
}

resource_union! {
    pub enum Networking { NetworkInterface, NetworkService }
}

resource_union! {
    pub enum NetworkService { LoadBalancer, StorageService }
}

resource_union! {
    pub enum StorageService { ObjectStorageService }
}

resource_union! {
    pub enum Storage { BlockStorage, ObjectStorage, FileStorage, DatabaseStorage }
}

resource_union! {
    /// Organizational containers such as accounts and resource groups.
    pub enum Infrastructure { Account, ResourceGroup }
}

resource_union! {
    pub enum Data { Document }
}

resource_union! {
    pub enum Document { SecurityAdvisoryDocument }
}

impl Resource {
    /// Compact JSON form: the union nesting is kept, default scalars are left
    /// out and set messages are written even when empty.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_compact_value())?)
    }
}

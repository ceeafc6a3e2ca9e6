use super::{
    ActivityLogging, AutomaticUpdates, BootLogging, CloudResource, Compute, MalwareProtection,
    OsLogging, RemoteAttestation, ResourceLogging,
};

resource! {
    /// A virtual machine, e.g. an Azure VM or an IONOS server.
    pub struct VirtualMachine: ["VirtualMachine", "Compute", "CloudResource", "Resource"]
        via Compute, CloudResource
    {
        pub network_interface_ids: Vec<String>,
        pub block_storage_ids: Vec<String>,
        pub activity_logging: Option<ActivityLogging>,
        pub automatic_updates: Option<AutomaticUpdates>,
        pub boot_logging: Option<BootLogging>,
        pub malware_protection: Option<MalwareProtection>,
        pub os_logging: Option<OsLogging>,
        pub remote_attestation: Option<RemoteAttestation>,
        pub resource_logging: Option<ResourceLogging>,
        pub internet_accessible_endpoint: bool,
    }
}

resource! {
    pub struct Container: ["Container", "Compute", "CloudResource", "Resource"]
        via Compute, CloudResource
    {
        pub network_interface_ids: Vec<String>,
        pub activity_logging: Option<ActivityLogging>,
        pub resource_logging: Option<ResourceLogging>,
        pub internet_accessible_endpoint: bool,
    }
}

resource! {
    /// A serverless function.
    pub struct Function: ["Function", "Compute", "CloudResource", "Resource"]
        via Compute, CloudResource
    {
        pub network_interface_ids: Vec<String>,
        pub resource_logging: Option<ResourceLogging>,
        pub runtime_language: String,
        pub runtime_version: String,
        pub internet_accessible_endpoint: bool,
    }
}

use super::{
    AccessRestriction, ActivityLogging, CloudResource, HttpEndpoint, NetworkService, Networking,
    StorageService,
};

resource! {
    pub struct NetworkInterface: ["NetworkInterface", "Networking", "CloudResource", "Resource"]
        via Networking, CloudResource
    {
        pub access_restriction: Option<AccessRestriction>,
        /// Network service (e.g. a load balancer) the interface is attached to.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub network_service_id: Option<String>,
    }
}

resource! {
    pub struct LoadBalancer: ["LoadBalancer", "NetworkService", "Networking", "CloudResource", "Resource"]
        via NetworkService, Networking, CloudResource
    {
        pub access_restriction: Option<AccessRestriction>,
        pub activity_logging: Option<ActivityLogging>,
        pub http_endpoints: Vec<HttpEndpoint>,
        pub internet_accessible_endpoint: bool,
        pub ips: Vec<String>,
        pub ports: Vec<u32>,
        /// Backends receiving the balanced traffic.
        pub network_interface_ids: Vec<String>,
    }
}

resource! {
    /// The account-level endpoint in front of object storages, e.g. an
    /// Azure storage account.
    pub struct ObjectStorageService: [
        "ObjectStorageService",
        "StorageService",
        "NetworkService",
        "Networking",
        "CloudResource",
        "Resource",
    ]
        via StorageService, NetworkService, Networking, CloudResource
    {
        pub storage_ids: Vec<String>,
        pub activity_logging: Option<ActivityLogging>,
        pub http_endpoint: Option<HttpEndpoint>,
        pub internet_accessible_endpoint: bool,
        pub ips: Vec<String>,
        pub ports: Vec<u32>,
    }
}

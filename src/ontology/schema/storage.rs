use super::{
    ActivityLogging, AnomalyDetection, AtRestEncryption, Backup, CloudResource,
    Immutability, ResourceLogging, Storage,
};

resource! {
    /// A disk or volume attached to compute resources.
    pub struct BlockStorage: ["BlockStorage", "Storage", "CloudResource", "Resource"]
        via Storage, CloudResource
    {
        pub activity_logging: Option<ActivityLogging>,
        pub at_rest_encryption: Option<AtRestEncryption>,
        pub backups: Vec<Backup>,
        pub immutability: Option<Immutability>,
        pub resource_logging: Option<ResourceLogging>,
    }
}

resource! {
    /// A bucket or blob container.
    pub struct ObjectStorage: ["ObjectStorage", "Storage", "CloudResource", "Resource"]
        via Storage, CloudResource
    {
        pub activity_logging: Option<ActivityLogging>,
        pub at_rest_encryption: Option<AtRestEncryption>,
        pub backups: Vec<Backup>,
        pub immutability: Option<Immutability>,
        pub public_access: bool,
        pub resource_logging: Option<ResourceLogging>,
    }
}

resource! {
    pub struct FileStorage: ["FileStorage", "Storage", "CloudResource", "Resource"]
        via Storage, CloudResource
    {
        pub activity_logging: Option<ActivityLogging>,
        pub at_rest_encryption: Option<AtRestEncryption>,
        pub backups: Vec<Backup>,
        pub immutability: Option<Immutability>,
        pub public_access: bool,
        pub resource_logging: Option<ResourceLogging>,
    }
}

resource! {
    pub struct DatabaseStorage: ["DatabaseStorage", "Storage", "CloudResource", "Resource"]
        via Storage, CloudResource
    {
        pub activity_logging: Option<ActivityLogging>,
        pub anomaly_detections: Vec<AnomalyDetection>,
        pub at_rest_encryption: Option<AtRestEncryption>,
        pub backups: Vec<Backup>,
        pub immutability: Option<Immutability>,
        pub public_access: bool,
        pub resource_logging: Option<ResourceLogging>,
    }
}

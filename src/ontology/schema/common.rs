//! Nested messages shared by resource variants.

use crate::ontology::wellknown::int64;
use crate::ontology::{Duration, Timestamp};

message! {
    pub struct GeoLocation {
        pub region: String,
    }

    /// Logging of management-plane activity (who changed what).
    pub struct ActivityLogging {
        pub enabled: bool,
        pub logging_service_ids: Vec<String>,
        pub retention_period: Option<Duration>,
    }

    pub struct ApplicationLogging {
        pub enabled: bool,
        pub logging_service_ids: Vec<String>,
        pub retention_period: Option<Duration>,
    }

    pub struct BootLogging {
        pub enabled: bool,
        pub logging_service_ids: Vec<String>,
        pub retention_period: Option<Duration>,
    }

    pub struct OsLogging {
        pub enabled: bool,
        pub logging_service_ids: Vec<String>,
        pub retention_period: Option<Duration>,
    }

    /// Data-plane logging of the resource itself.
    pub struct ResourceLogging {
        pub enabled: bool,
        pub logging_service_ids: Vec<String>,
        pub retention_period: Option<Duration>,
        pub monitoring_log_data_enabled: bool,
        pub security_alerts_enabled: bool,
    }

    pub struct AutomaticUpdates {
        pub enabled: bool,
        pub interval: Option<Duration>,
        pub security_only: bool,
    }

    pub struct MalwareProtection {
        pub enabled: bool,
        #[serde(with = "int64")]
        pub days_since_active: i64,
        #[serde(with = "int64")]
        pub number_of_threats_found: i64,
        pub application_logging: Option<ApplicationLogging>,
    }

    pub struct RemoteAttestation {
        pub enabled: bool,
        /// Whether the last attestation succeeded.
        pub status: bool,
        pub creation_time: Option<Timestamp>,
    }

    pub struct ManagedKeyEncryption {
        pub enabled: bool,
        pub algorithm: String,
    }

    pub struct CustomerKeyEncryption {
        pub enabled: bool,
        pub algorithm: String,
        pub key_url: String,
    }

    pub struct TransportEncryption {
        pub enabled: bool,
        pub enforced: bool,
        pub protocol: String,
        pub protocol_version: f64,
        pub cipher_suites: Vec<CipherSuite>,
    }

    pub struct CipherSuite {
        pub authentication_mechanism: String,
        pub key_exchange_algorithm: String,
        pub mac_algorithm: String,
        pub session_cipher: String,
    }

    pub struct HttpEndpoint {
        pub url: String,
        pub transport_encryption: Option<TransportEncryption>,
    }

    pub struct Backup {
        pub enabled: bool,
        pub interval: Option<Duration>,
        pub retention_period: Option<Duration>,
        /// Storage the backup is written to, if known.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub storage_id: Option<String>,
        pub transport_encryption: Option<TransportEncryption>,
    }

    pub struct Immutability {
        pub enabled: bool,
    }

    pub struct AnomalyDetection {
        pub enabled: bool,
        pub scope: String,
        pub application_logging: Option<ApplicationLogging>,
    }

    pub struct L3Firewall {
        pub enabled: bool,
        pub inbound: bool,
        pub restricted_ports: String,
    }

    pub struct WebApplicationFirewall {
        pub enabled: bool,
    }
}

oneof! {
    /// Encryption at rest, with keys held either by the provider or the customer.
    pub enum AtRestEncryption { ManagedKeyEncryption, CustomerKeyEncryption }
}

impl AtRestEncryption {
    pub fn is_enabled(&self) -> bool {
        match self {
            Self::ManagedKeyEncryption(e) => e.enabled,
            Self::CustomerKeyEncryption(e) => e.enabled,
        }
    }
}

oneof! {
    pub enum AccessRestriction { L3Firewall, WebApplicationFirewall }
}

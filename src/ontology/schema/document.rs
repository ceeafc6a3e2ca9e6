use super::{Data, Document, TransportEncryption};

message! {
    /// A problem found while checking a document.
    pub struct DocumentError {
        pub message: String,
    }

    pub struct DocumentChecksum {
        pub algorithm: String,
        pub errors: Vec<DocumentError>,
    }

    pub struct DocumentSignature {
        pub algorithm: String,
        pub errors: Vec<DocumentError>,
    }

    pub struct SchemaValidation {
        pub format: String,
        pub schema_url: String,
        pub errors: Vec<DocumentError>,
    }

    pub struct LocalDocumentLocation {
        pub path: String,
    }

    pub struct RemoteDocumentLocation {
        pub path: String,
        pub transport_encryption: Option<TransportEncryption>,
    }
}

oneof! {
    pub enum DocumentLocation { LocalDocumentLocation, RemoteDocumentLocation }
}

resource! {
    /// A security advisory (e.g. a CSAF document) published by a provider.
    pub struct SecurityAdvisoryDocument: ["SecurityAdvisoryDocument", "Document", "Data", "Resource"]
        via Document, Data
    {
        pub filetype: String,
        pub document_checksums: Vec<DocumentChecksum>,
        pub document_signatures: Vec<DocumentSignature>,
        pub schema_validation: Option<SchemaValidation>,
        pub document_location: Option<DocumentLocation>,
    }
}

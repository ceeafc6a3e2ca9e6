use super::Infrastructure;

resource! {
    /// A provider account or subscription.
    pub struct Account: ["Account", "Infrastructure", "Resource"] via Infrastructure {}
}

resource! {
    /// A grouping of resources inside an account, e.g. an Azure resource
    /// group or an IONOS data center.
    pub struct ResourceGroup: ["ResourceGroup", "Infrastructure", "Resource"] via Infrastructure {}
}

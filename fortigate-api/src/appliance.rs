use crate::category::Category;
use crate::error::ApiError;
use crate::record::Record;
use crate::response::ApiResponse;

/// An authenticated session scoped to one virtual domain.
pub trait Appliance {
    /// Virtual domain this session is scoped to.
    fn vdom(&self) -> &str;

    /// All virtual domains defined on the appliance.
    fn list_vdoms(&self) -> Result<Vec<Record>, ApiError>;

    /// All objects of `category` in this session's vdom.
    ///
    /// Implementations must return only objects belonging to the session's
    /// vdom, including for categories whose endpoint is global
    /// (see [`Category::scoped_by_vdom`]).
    fn list(&self, category: Category) -> Result<Vec<Record>, ApiError>;

    /// Create one object at the CMDB `path`.
    ///
    /// A rejected object is reported through the response status, not as an
    /// `Err`; `Err` means no response was obtained.
    fn create(&self, path: &str, record: &Record) -> Result<ApiResponse, ApiError>;

    /// Tear the session down.
    fn logout(self) -> Result<(), ApiError>
    where
        Self: Sized;
}

/// Opens vdom-scoped sessions against one appliance.
pub trait Connector {
    type Session: Appliance;

    /// Host or label identifying the appliance in messages.
    fn host(&self) -> &str;

    fn connect(&self, vdom: &str) -> Result<Self::Session, ApiError>;
}

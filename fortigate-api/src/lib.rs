//! Session client primitives for the FortiGate REST management API.
//!
//! Configuration objects are kept loosely typed ([`Record`]) so fields the
//! appliance adds in newer firmware pass through untouched. The [`Appliance`]
//! and [`Connector`] traits are the seam higher-level tools program against;
//! [`FortiGate`] is the HTTPS implementation.

pub mod appliance;
pub mod category;
pub mod client;
pub mod error;
pub mod filter;
pub mod record;
pub mod response;

pub use appliance::{Appliance, Connector};
pub use category::{Category, VDOM_KEY_FIELD, VDOM_PATH};
pub use client::{ClientOptions, Credentials, FortiGate, FortiGateConnector};
pub use error::ApiError;
pub use filter::filter_by_vdom;
pub use record::{key_set, ObjectKey, Record};
pub use response::{results, ApiResponse};

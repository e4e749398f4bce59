//! One-way copy of FortiGate configuration objects between appliances.
//!
//! The copy is a create-if-absent reconciliation: for every configuration
//! table, objects present on the source but missing on the destination (by
//! natural key) are created. Objects that already exist are never modified,
//! nothing is deleted, and nothing is copied back.
//!
//! # Layout
//!
//! - [`driver`] — run orchestration: vdom phase, `root`-first ordering,
//!   per-vdom category passes
//! - [`vdom`] — virtual domain reconciliation and ordering
//! - [`reconcile`] — the generic per-table reconciliation loop
//! - [`rewrite`] — policy transform applied before push
//! - [`report`] — terminal commentary
//!
//! The appliance API itself lives in `fortigate-api`; the driver only talks
//! to it through the [`fortigate_api::Connector`] and
//! [`fortigate_api::Appliance`] traits, so it can be driven against any
//! implementation.
//!
//! # Examples
//!
//! ```ignore
//! use fortigate_api::{ClientOptions, Credentials, FortiGateConnector};
//! use fortigate_copy::driver::{run, RunOptions};
//!
//! let creds = Credentials { username: "admin".into(), password: "secret".into() };
//! let source = FortiGateConnector::new("10.0.0.1", creds.clone(), ClientOptions::default());
//! let destination = FortiGateConnector::new("10.0.0.2", creds, ClientOptions::default());
//! let summary = run(&source, &destination, &RunOptions::default())?;
//! println!("pushed {} objects", summary.pushed());
//! ```

pub mod driver;
pub mod reconcile;
pub mod report;
pub mod rewrite;
pub mod vdom;

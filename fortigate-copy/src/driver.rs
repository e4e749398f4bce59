//! Source-to-destination copy orchestration.
//!
//! A run has two phases:
//!
//! 1. **Virtual domains** — over sessions scoped to `root`, every source vdom
//!    missing on the destination is created. Any failure here ends the run
//!    with [`DriverError::VdomCreation`].
//! 2. **Per-vdom objects** — `root` first, then the remaining vdoms in
//!    source order. Each vdom gets fresh sessions on both appliances; all
//!    nine category lists are fetched from both sides up front and the
//!    categories are reconciled in [`Category::ALL`] order. Category failures
//!    are reported and the run carries on.
//!
//! Nothing is cached between runs: existence is always checked against the
//! destination's live state, so repeating a run only pushes what is still
//! missing.

use std::collections::HashMap;

use fortigate_api::{key_set, ApiError, Appliance, Category, Connector, Record};
use thiserror::Error;
use tracing::{info, warn};

use crate::reconcile::{reconcile_category, ErrorRecord, Reconciliation};
use crate::report::{render_category, render_vdom_banner, render_vdom_phase};
use crate::rewrite::PolicyRewrite;
use crate::vdom::{move_to_front, reconcile_vdoms, vdom_names, ROOT_VDOM};

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("failed to open a session for vdom {vdom} on {host}")]
    Connect {
        host: String,
        vdom: String,
        source: ApiError,
    },
    #[error("failed to list {what} in vdom {vdom} on {host}")]
    List {
        host: String,
        vdom: String,
        what: &'static str,
        source: ApiError,
    },
    #[error("virtual domain configuration failed: {} errors", .errors.len())]
    VdomCreation { errors: Vec<ErrorRecord> },
}

/// Behaviour switches for a run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub rewrite: PolicyRewrite,
}

/// Per-category outcomes for one vdom.
#[derive(Debug, Clone)]
pub struct VdomReport {
    pub vdom: String,
    pub categories: Vec<Reconciliation>,
}

/// Everything a completed run did.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub vdom_phase: Reconciliation,
    pub vdoms: Vec<VdomReport>,
}

impl RunSummary {
    fn outcomes(&self) -> impl Iterator<Item = &Reconciliation> {
        std::iter::once(&self.vdom_phase).chain(self.vdoms.iter().flat_map(|v| &v.categories))
    }

    /// Create calls issued, vdoms included.
    pub fn pushed(&self) -> usize {
        self.outcomes().map(|o| o.attempted).sum()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes().map(|o| o.skipped).sum()
    }

    pub fn errors(&self) -> usize {
        self.outcomes().map(|o| o.errors.len()).sum()
    }
}

/// Copy everything missing on `destination` from `source`.
pub fn run<S, D>(source: &S, destination: &D, options: &RunOptions) -> Result<RunSummary, DriverError>
where
    S: Connector,
    D: Connector,
{
    let (source_vdoms, vdom_phase) =
        with_sessions(source, destination, ROOT_VDOM, |source_root, destination_root| {
            let source_vdoms = list_vdoms(source, source_root)?;
            let destination_vdoms = list_vdoms(destination, destination_root)?;
            let vdom_phase = reconcile_vdoms(destination_root, &source_vdoms, &destination_vdoms);
            Ok((source_vdoms, vdom_phase))
        })?;

    println!();
    println!("{}", render_vdom_phase(&vdom_phase));
    if !vdom_phase.is_success() {
        return Err(DriverError::VdomCreation {
            errors: vdom_phase.errors,
        });
    }

    let mut order = vdom_names(&source_vdoms);
    if !move_to_front(&mut order, ROOT_VDOM) {
        warn!("source has no root vdom; keeping listing order");
    }

    let mut vdoms = Vec::with_capacity(order.len());
    for vdom in order {
        println!("{}", render_vdom_banner(&vdom));
        vdoms.push(sync_vdom(source, destination, &vdom, options)?);
    }

    Ok(RunSummary { vdom_phase, vdoms })
}

/// Reconcile every category of one vdom.
pub fn sync_vdom<S, D>(
    source: &S,
    destination: &D,
    vdom: &str,
    options: &RunOptions,
) -> Result<VdomReport, DriverError>
where
    S: Connector,
    D: Connector,
{
    let categories = with_sessions(source, destination, vdom, |source_session, destination_session| {
        let mut source_objects = fetch_all(source, source_session)?;
        let destination_objects = fetch_all(destination, destination_session)?;

        let mut categories = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            let pending = source_objects.remove(&category).unwrap_or_default();
            let existing = destination_objects
                .get(&category)
                .map(|records| key_set(records, category.key_field()))
                .unwrap_or_default();

            let outcome = reconcile_category(
                destination_session,
                category,
                pending,
                &existing,
                &options.rewrite,
            );
            info!(
                %vdom,
                %category,
                attempted = outcome.attempted,
                skipped = outcome.skipped,
                errors = outcome.errors.len(),
                "category reconciled"
            );
            println!("{}", render_category(&outcome));
            categories.push(outcome);
        }
        Ok(categories)
    })?;

    Ok(VdomReport {
        vdom: vdom.to_string(),
        categories,
    })
}

/// Open a `vdom` session on both appliances, run `work`, then log both out
/// whatever `work` returned.
fn with_sessions<S, D, T, F>(source: &S, destination: &D, vdom: &str, work: F) -> Result<T, DriverError>
where
    S: Connector,
    D: Connector,
    F: FnOnce(&S::Session, &D::Session) -> Result<T, DriverError>,
{
    let source_session = connect(source, vdom)?;
    let destination_session = match connect(destination, vdom) {
        Ok(session) => session,
        Err(err) => {
            logout(source, source_session);
            return Err(err);
        }
    };

    let result = work(&source_session, &destination_session);

    logout(source, source_session);
    logout(destination, destination_session);
    result
}

fn connect<C: Connector>(connector: &C, vdom: &str) -> Result<C::Session, DriverError> {
    connector
        .connect(vdom)
        .map_err(|source| DriverError::Connect {
            host: connector.host().to_string(),
            vdom: vdom.to_string(),
            source,
        })
}

fn list_vdoms<C: Connector>(connector: &C, session: &C::Session) -> Result<Vec<Record>, DriverError> {
    session.list_vdoms().map_err(|source| DriverError::List {
        host: connector.host().to_string(),
        vdom: session.vdom().to_string(),
        what: "vdoms",
        source,
    })
}

fn fetch_all<C: Connector>(
    connector: &C,
    session: &C::Session,
) -> Result<HashMap<Category, Vec<Record>>, DriverError> {
    Category::ALL
        .into_iter()
        .map(|category| {
            session
                .list(category)
                .map(|records| (category, records))
                .map_err(|source| DriverError::List {
                    host: connector.host().to_string(),
                    vdom: session.vdom().to_string(),
                    what: category.label(),
                    source,
                })
        })
        .collect()
}

/// Logout failures do not affect the copy.
fn logout<C: Connector>(connector: &C, session: C::Session) {
    let vdom = session.vdom().to_string();
    if let Err(err) = session.logout() {
        warn!(host = connector.host(), %vdom, "logout failed: {err}");
    }
}

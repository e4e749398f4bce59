//! Create-if-absent reconciliation of one object table.
//!
//! Existence is decided purely by natural key against the destination's live
//! key set; field values are never compared. Every failure is recorded and the
//! pass continues with the next object.

use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};

use fortigate_api::{Appliance, Category, ObjectKey, Record};
use tracing::{debug, warn};

use crate::report::render_error;
use crate::rewrite::PolicyRewrite;

/// Why a single object could not be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// The appliance answered with a non-2xx status.
    Status(u16),
    /// No response was obtained.
    Transport(String),
    /// The source object has no natural key and was not pushed.
    MissingKey,
}

impl Display for Failure {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Status(code) => write!(f, "{code}"),
            Failure::Transport(reason) => write!(f, "transport ({reason})"),
            Failure::MissingKey => f.write_str("missing key"),
        }
    }
}

/// One failed create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    pub failure: Failure,
    pub label: &'static str,
    pub key: Option<ObjectKey>,
}

/// Where and how a table is pushed.
#[derive(Debug, Clone, Copy)]
pub struct Target<'a> {
    pub path: &'a str,
    pub label: &'static str,
    pub key_field: &'a str,
}

impl Target<'static> {
    pub fn category(category: Category) -> Self {
        Self {
            path: category.path(),
            label: category.label(),
            key_field: category.key_field(),
        }
    }
}

/// Result of reconciling one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub label: &'static str,
    /// Create calls issued.
    pub attempted: usize,
    /// Objects already present on the destination.
    pub skipped: usize,
    pub errors: Vec<ErrorRecord>,
}

impl Reconciliation {
    fn new(label: &'static str) -> Self {
        Self {
            label,
            attempted: 0,
            skipped: 0,
            errors: Vec::new(),
        }
    }

    /// Create calls that succeeded.
    pub fn created(&self) -> usize {
        let failed_calls = self
            .errors
            .iter()
            .filter(|e| e.failure != Failure::MissingKey)
            .count();
        self.attempted.saturating_sub(failed_calls)
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Push every object of `source` whose key is absent from
/// `destination_keys`, applying `transform` right before each push.
pub fn reconcile<A, F>(
    session: &A,
    source: Vec<Record>,
    destination_keys: &HashSet<ObjectKey>,
    target: Target<'_>,
    mut transform: F,
) -> Reconciliation
where
    A: Appliance,
    F: FnMut(&mut Record),
{
    let mut outcome = Reconciliation::new(target.label);

    for mut record in source {
        let Some(key) = record.key(target.key_field) else {
            warn!(label = target.label, field = target.key_field, "source object has no key");
            let error = ErrorRecord {
                failure: Failure::MissingKey,
                label: target.label,
                key: None,
            };
            println!("{}", render_error(&error));
            outcome.errors.push(error);
            continue;
        };

        if destination_keys.contains(&key) {
            debug!(label = target.label, %key, "already present");
            outcome.skipped += 1;
            continue;
        }

        transform(&mut record);
        outcome.attempted += 1;

        let failure = match session.create(target.path, &record) {
            Ok(response) if response.is_success() => None,
            Ok(response) => Some(Failure::Status(response.status)),
            Err(err) => Some(Failure::Transport(err.to_string())),
        };
        if let Some(failure) = failure {
            let error = ErrorRecord {
                failure,
                label: target.label,
                key: Some(key),
            };
            println!("{}", render_error(&error));
            outcome.errors.push(error);
        }
    }

    outcome
}

/// Reconcile one category within the session's vdom.
pub fn reconcile_category<A: Appliance>(
    session: &A,
    category: Category,
    source: Vec<Record>,
    destination_keys: &HashSet<ObjectKey>,
    rewrite: &PolicyRewrite,
) -> Reconciliation {
    let target = Target::category(category);
    if category == Category::Policy {
        reconcile(session, source, destination_keys, target, |record| {
            rewrite.apply(record)
        })
    } else {
        reconcile(session, source, destination_keys, target, |_| {})
    }
}

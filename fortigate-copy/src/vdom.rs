use fortigate_api::{key_set, Appliance, Record, VDOM_KEY_FIELD, VDOM_PATH};
use tracing::debug;

use crate::reconcile::{reconcile, Reconciliation, Target};

/// Label used for virtual domain errors.
pub const VDOM_LABEL: &str = "vdom";
/// The appliance's default virtual domain.
pub const ROOT_VDOM: &str = "root";

/// Names of `vdoms` in listing order.
pub fn vdom_names(vdoms: &[Record]) -> Vec<String> {
    vdoms
        .iter()
        .filter_map(|vdom| vdom.str_field(VDOM_KEY_FIELD))
        .map(str::to_string)
        .collect()
}

/// Create every source vdom the destination lacks.
pub fn reconcile_vdoms<A: Appliance>(
    session: &A,
    source: &[Record],
    destination: &[Record],
) -> Reconciliation {
    let existing = key_set(destination, VDOM_KEY_FIELD);
    let target = Target {
        path: VDOM_PATH,
        label: VDOM_LABEL,
        key_field: VDOM_KEY_FIELD,
    };
    reconcile(session, source.to_vec(), &existing, target, |_| {})
}

/// Move `key` to the front of `names`, keeping the order of the others.
///
/// Returns `false` and leaves `names` untouched when `key` is not listed.
pub fn move_to_front(names: &mut [String], key: &str) -> bool {
    match names.iter().position(|name| name == key) {
        Some(idx) => {
            names[..=idx].rotate_right(1);
            true
        }
        None => {
            debug!(%key, "not listed; order unchanged");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::{move_to_front, vdom_names};
    use fortigate_api::Record;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn root_moves_to_front() {
        let mut list = names(&["branch1", "root", "branch2"]);
        assert!(move_to_front(&mut list, "root"));
        assert_eq!(list, names(&["root", "branch1", "branch2"]));
    }

    #[test]
    fn later_root_shifts_preceding_entries() {
        let mut list = names(&["a", "b", "c", "root", "d"]);
        move_to_front(&mut list, "root");
        assert_eq!(list, names(&["root", "a", "b", "c", "d"]));
    }

    #[test]
    fn root_already_first_is_unchanged() {
        let mut list = names(&["root", "dmz"]);
        move_to_front(&mut list, "root");
        assert_eq!(list, names(&["root", "dmz"]));
    }

    #[test]
    fn missing_root_leaves_order() {
        let mut list = names(&["branch1", "branch2"]);
        assert!(!move_to_front(&mut list, "root"));
        assert_eq!(list, names(&["branch1", "branch2"]));

        let mut empty: Vec<String> = Vec::new();
        assert!(!move_to_front(&mut empty, "root"));
    }

    #[test]
    fn names_follow_listing_order() {
        let vdoms: Vec<Record> =
            serde_json::from_value(json!([{"name": "dmz"}, {"name": "root"}, {"id": 3}]))
                .expect("records");
        assert_eq!(vdom_names(&vdoms), names(&["dmz", "root"]));
    }
}

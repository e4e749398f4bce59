use crate::record::Record;

/// Keep only records whose own `vdom` field names `vdom`.
///
/// The interface and zone tables are global on the appliance; their listing
/// ignores the `vdom` query parameter.
pub fn filter_by_vdom(records: Vec<Record>, vdom: &str) -> Vec<Record> {
    records
        .into_iter()
        .filter(|record| record.str_field("vdom") == Some(vdom))
        .collect()
}

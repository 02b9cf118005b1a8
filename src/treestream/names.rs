use crate::Tree;
use crate::parsers::nexus::TranslateTable;
use log::trace;
use std::sync::Arc;

/// Name carried by unnamed nodes in some tree writers; never translated.
pub const NO_NAME: &str = "NoName";

/// Replaces every node name found in `table` with its mapped leaf name.
///
/// Returns the number of nodes renamed.
pub fn resolve_names(tree: &mut Tree, table: &TranslateTable) -> usize {
    if table.is_empty() {
        return 0;
    }

    let renamed = tree.rename_nodes(|name| {
        if name == NO_NAME {
            return None;
        }
        table.get(name).map(Arc::from)
    });
    trace!("Renamed {renamed} of {} nodes.", tree.node_count());
    renamed
}

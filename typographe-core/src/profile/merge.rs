//! Value-level merge of profile documents

/// Merges `overlay` over `base`, returning the combined table.
///
/// Tables merge key by key, recursively. Every other value kind, arrays
/// included, is replaced wholesale by the overlay: an override that lists
/// punctuation rules supplies the complete list, not a patch of it.
/// Keys only present in one side are kept as they are, so groups the
/// engine does not read survive a merge unchanged.
pub fn merge_tables(base: &toml::Table, overlay: &toml::Table) -> toml::Table {
    let mut out = base.clone();
    for (key, value) in overlay {
        match (out.get(key), value) {
            (Some(toml::Value::Table(base_table)), toml::Value::Table(overlay_table)) => {
                let merged = merge_tables(base_table, overlay_table);
                out.insert(key.clone(), toml::Value::Table(merged));
            }
            _ => {
                out.insert(key.clone(), value.clone());
            }
        }
    }
    out
}

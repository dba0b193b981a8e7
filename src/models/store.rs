//! Store name extraction from statement descriptions

/// Derive the canonical store name from a raw description.
///
/// Descriptions look like `"CARD PAYMENT, Tesco Stores, London"`: the second
/// comma-separated field is the store. Descriptions without a comma are
/// used whole. Both forms are trimmed.
pub fn extract_store_name(description: &str) -> String {
    let mut fields = description.split(',');
    match (fields.next(), fields.next()) {
        (Some(_), Some(store)) => store.trim().to_string(),
        _ => description.trim().to_string(),
    }
}

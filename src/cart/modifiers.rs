use crate::models::LineItem;

/// Modifier ids the line item should carry after a checkbox toggle.
///
/// The result is a set: ids keep their first-seen order and never repeat,
/// even if the item itself arrived with duplicates.
pub fn apply_modifier_toggle(
    line_item: &LineItem,
    modifier_id: &str,
    checked: bool,
) -> Vec<String> {
    let current = dedup_modifier_ids(line_item.modifier_ids());
    if checked {
        let mut ids = current;
        if !ids.iter().any(|id| id == modifier_id) {
            ids.push(modifier_id.to_string());
        }
        ids
    } else {
        current.into_iter().filter(|id| id != modifier_id).collect()
    }
}

pub fn dedup_modifier_ids<I, S>(ids: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut out: Vec<String> = Vec::new();
    for id in ids {
        let id = id.into();
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}

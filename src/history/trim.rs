use crate::models::Entry;

/// Deduplicate and truncate a full history file's entries
///
/// Walks from the newest entry back to the oldest. For each one, every earlier
/// entry with the same trimmed text is removed, so only the last occurrence of
/// a line survives and survivors keep their relative order. The result is then
/// cut from the front down to `max` entries.
///
/// Every position is compared against all earlier ones, which is quadratic;
/// this keeps which-duplicate-survives identical when a line repeats many times.
pub fn dedup_and_truncate(mut entries: Vec<Entry>, max: usize) -> Vec<Entry> {
    let mut from_end = 0;
    while from_end < entries.len() {
        let current = entries.len() - from_end - 1;
        let line = entries[current].line().trim().to_string();

        let mut position = 0;
        entries.retain(|entry| {
            let keep = position >= current || entry.line().trim() != line;
            position += 1;
            keep
        });

        from_end += 1;
    }

    if entries.len() > max {
        entries.drain(..entries.len() - max);
    }
    entries
}

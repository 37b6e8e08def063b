use std::collections::HashMap;
use std::hash::Hash;

/// Append `values` under `key` and keep only the `keep` most recent entries.
///
/// `keep == 0` disables the bound.
pub fn extend_bounded<K, V>(
    map: &mut HashMap<K, Vec<V>>,
    key: K,
    values: impl IntoIterator<Item = V>,
    keep: usize,
) where
    K: Hash + Eq,
{
    let entries = map.entry(key).or_default();
    entries.extend(values);
    if keep > 0 && entries.len() > keep {
        let excess = entries.len() - keep;
        entries.drain(..excess);
    }
}

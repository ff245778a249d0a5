//! Most-frequent-value search built on [`ChainedMap`]

use crate::ChainedMap;

/// Returns the strings that occur most often in `items`, together with their frequency.
///
/// Ties are all returned, in the order their buckets appear in the counting map. An empty input
/// yields no modes and a frequency of zero.
///
/// ```rust
/// use primehash::find_mode;
///
/// let (mut modes, frequency) = find_mode(&["Arch", "Mint", "Mint", "Ubuntu", "Ubuntu"]);
/// modes.sort();
/// assert_eq!(modes, vec!["Mint".to_string(), "Ubuntu".to_string()]);
/// assert_eq!(frequency, 2);
/// ```
pub fn find_mode<S: AsRef<str>>(items: &[S]) -> (Vec<String>, usize) {
    let mut counts = ChainedMap::new(items.len());
    for item in items {
        let item = item.as_ref();
        let count = counts.get(item).copied().unwrap_or(0_usize);
        counts.put(item, count.saturating_add(1));
    }

    let mut modes = Vec::new();
    let mut frequency = 0;
    for (key, count) in counts.get_keys_and_values() {
        if count > frequency {
            frequency = count;
            modes.clear();
        }
        if count == frequency {
            modes.push(key);
        }
    }

    (modes, frequency)
}

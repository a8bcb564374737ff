use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

/// Build a key -> element-position index over a slice.
///
/// A duplicate key keeps the first occurrence and drops the rest with a
/// warning; corpus regeneration carries on.
pub fn unique_index<T, K, F>(elements: &[T], key: F) -> HashMap<K, usize>
where
    K: Eq + Hash + Display,
    F: Fn(&T) -> K,
{
    let mut index = HashMap::with_capacity(elements.len());
    for (position, element) in elements.iter().enumerate() {
        let key = key(element);
        if index.contains_key(&key) {
            log::warn!("duplicate index key '{key}', keeping the first occurrence");
            continue;
        }
        index.insert(key, position);
    }
    index
}

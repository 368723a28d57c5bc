//! Small helpers shared by game implementations

use rand::Rng;

/// Format a duration in whole seconds as `m:ss`, or `h:mm:ss` past an hour.
pub fn format_time(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = seconds % 3600 / 60;
    let seconds = seconds % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// Pick a uniformly random element, or None for an empty slice.
pub fn random_element<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    let index = rng.gen_range(0..items.len());
    items.get(index)
}

/// Remove and return a uniformly random element, or None for an empty vec.
///
/// Uses `swap_remove`, so the order of the remaining elements is not kept.
pub fn take_random_element<T, R: Rng + ?Sized>(items: &mut Vec<T>, rng: &mut R) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    let index = rng.gen_range(0..items.len());
    Some(items.swap_remove(index))
}

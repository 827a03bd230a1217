mod ordered;

/// Returns the 0-indexed position of the first item which equals `item`, if it's found
fn item_pos<T: PartialEq>(items: &[T], item: &T) -> Option<usize> {
    items.iter().position(|v| v == item)
}

pub use ordered::*;

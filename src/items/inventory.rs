//! Consumable multiset helpers.
//!
//! The bag is an unordered multiset kept as a `Vec<Item>`; quantity is the
//! occurrence count of a kind.

use std::borrow::Cow;

use super::types::{Item, ItemKind};

/// Returns the bag with one more item of `kind`.
pub fn add_item(items: &[Item], kind: ItemKind) -> Vec<Item> {
    let mut next = items.to_vec();
    next.push(Item::new(kind));
    next
}

/// Removes the first item of `kind`. Borrows the input unchanged when absent.
pub fn remove_one(items: &[Item], kind: ItemKind) -> Cow<'_, [Item]> {
    match items.iter().position(|item| item.kind == kind) {
        Some(index) => {
            let mut next = items.to_vec();
            next.remove(index);
            Cow::Owned(next)
        }
        None => Cow::Borrowed(items),
    }
}

pub fn count(items: &[Item], kind: ItemKind) -> usize {
    items.iter().filter(|item| item.kind == kind).count()
}

pub fn has(items: &[Item], kind: ItemKind) -> bool {
    items.iter().any(|item| item.kind == kind)
}

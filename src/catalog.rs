/// Item catalog and player-state collaborators used by the choice runtime
///
/// The runtime never reaches for global state: whoever drives it passes an
/// [`ItemCatalog`] to resolve item keys and a [`PlayerState`] to mutate.
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An item the player can own
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub info: String,
}

/// Resolved reference to a catalog item
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemHandle {
    /// Normalized lookup key, see [`normalize_key`]
    pub key: String,
    pub name: String,
}

/// Resolves item keys written in scripts
pub trait ItemCatalog {
    /// Look up an item by its script key. `None` if the key is unknown.
    fn resolve(&self, key: &str) -> Option<ItemHandle>;
}

/// Mutable player balance and inventory
pub trait PlayerState {
    fn add_credits(&mut self, amount: i64);

    fn add_item(&mut self, item: ItemHandle);

    /// Remove one instance of `item`. Returns `false` (and changes nothing)
    /// if the player does not own it.
    fn remove_item(&mut self, item: &ItemHandle) -> bool;
}

/// Script keys match item names with spaces removed, ignoring case:
/// `roxolquartz` refers to "Roxol Quartz".
pub fn normalize_key(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

impl Item {
    pub fn new(name: impl Into<String>, info: impl Into<String>) -> Self {
        Item {
            name: name.into(),
            info: info.into(),
        }
    }

    pub fn key(&self) -> String {
        normalize_key(&self.name)
    }

    pub fn handle(&self) -> ItemHandle {
        ItemHandle {
            key: self.key(),
            name: self.name.clone(),
        }
    }
}

/// Catalog backed by a map, filled at startup
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    items: HashMap<String, Item>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item, replacing any item with the same key
    pub fn insert(&mut self, item: Item) -> Option<Item> {
        self.items.insert(item.key(), item)
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.insert(item);
        self
    }

    pub fn get(&self, handle: &ItemHandle) -> Option<&Item> {
        self.items.get(&handle.key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ItemCatalog for InMemoryCatalog {
    fn resolve(&self, key: &str) -> Option<ItemHandle> {
        self.items.get(&normalize_key(key)).map(Item::handle)
    }
}

impl FromIterator<Item> for InMemoryCatalog {
    fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
        let mut catalog = InMemoryCatalog::new();
        for item in iter {
            catalog.insert(item);
        }
        catalog
    }
}

/// Plain player store. The inventory is a multiset: owning three fuel cells
/// means three entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub credits: i64,
    pub inventory: Vec<ItemHandle>,
}

impl Player {
    pub fn new(credits: i64) -> Self {
        Player {
            credits,
            inventory: Vec::new(),
        }
    }

    pub fn count(&self, item: &ItemHandle) -> usize {
        self.inventory.iter().filter(|owned| *owned == item).count()
    }

    /// Count owned items by script key
    pub fn count_key(&self, key: &str) -> usize {
        let key = normalize_key(key);
        self.inventory.iter().filter(|owned| owned.key == key).count()
    }

    pub fn has_item(&self, item: &ItemHandle) -> bool {
        self.inventory.contains(item)
    }
}

impl PlayerState for Player {
    fn add_credits(&mut self, amount: i64) {
        self.credits = self.credits.saturating_add(amount);
    }

    fn add_item(&mut self, item: ItemHandle) {
        self.inventory.push(item);
    }

    fn remove_item(&mut self, item: &ItemHandle) -> bool {
        match self.inventory.iter().position(|owned| owned == item) {
            Some(index) => {
                self.inventory.remove(index);
                true
            }
            None => false,
        }
    }
}

/// Stock items shipped with the game, as (name, info) pairs
use crate::catalog::{InMemoryCatalog, Item};

pub const ITEMS: &[(&str, &str)] = &[
    ("Fuel", "Plutonium fuel for spacecrafts."),
    (
        "Roxol Quartz",
        "An uncommon crystal used in most modern machinery.",
    ),
    ("Naphtha", "Unrefined oil for machinery and spacecrafts."),
    (
        "Red Eye",
        "A dangerous drug highly sought after on the black market.",
    ),
    (
        "Waning Sun",
        "A sun on the brink of a supernova, held in statis through quantum locking.",
    ),
    ("Korian Steel", "High quality steel alloy produced on Koria."),
    (
        "Mining Drill",
        "A small electronic hand drill used to extract ores and minerals.",
    ),
    (
        "Q Chip",
        "A miniture quantum computer. Used in almost all modern electronics.",
    ),
];

impl InMemoryCatalog {
    /// Catalog holding every stock item
    ///
    /// # Example
    /// ```
    /// use choice_tree::catalog::{InMemoryCatalog, ItemCatalog};
    ///
    /// let catalog = InMemoryCatalog::builtin();
    /// assert_eq!(catalog.resolve("miningdrill").unwrap().name, "Mining Drill");
    /// ```
    pub fn builtin() -> Self {
        ITEMS
            .iter()
            .map(|(name, info)| Item::new(*name, *info))
            .collect()
    }
}

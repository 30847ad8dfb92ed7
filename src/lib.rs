//! Choice Tree - a branching dialogue script engine
//!
//! Scripts are plain text: narrative lines, then option lines starting with
//! `>`, each followed by action lines (`credits`, `get`, `remove`, or a nested
//! `choice { … }` block). This crate builds scripts into a [`ChoiceNode`]
//! tree and walks that tree as the player picks options.
//!
//! # Example
//!
//! ```
//! use choice_tree::catalog::{InMemoryCatalog, Item, Player};
//! use choice_tree::{parse, ChoiceRuntime};
//!
//! let script = "A trader hails you.\n> Sell fuel\nremove fuel\ncredits 40\n> Ignore\n";
//! let tree = parse(script).unwrap();
//!
//! let catalog = InMemoryCatalog::new().with_item(Item::new("Fuel", "Plutonium fuel."));
//! let mut player = Player::default();
//! let mut runtime = ChoiceRuntime::new(&tree);
//!
//! runtime.select(0, &catalog, &mut player).unwrap();
//! assert_eq!(player.credits, 40);
//! ```
pub mod ast;
pub mod catalog;
pub mod compiler;
pub mod diagnostic;
pub mod lines;
pub mod loader;
pub mod parser;
pub mod runtime;
pub mod span;

#[cfg(feature = "builtin-items")]
pub mod builtin_items;

/// Re-export main types for convenience
pub use ast::{Action, ChoiceNode, ChoiceOption};
pub use catalog::{InMemoryCatalog, ItemCatalog, Player, PlayerState};
pub use lines::{split_lines, ScriptLine};
pub use loader::{LoadError, ScriptLoader};
pub use parser::{
    build_choice_tree, build_choice_tree_with, parse, BuildOptions, BuildWarning, Built, ParseError,
};
pub use runtime::{ChoiceRuntime, Effect, RuntimeError, Selection, Transition};

/// Combined error type for loading, building and running scripts
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScriptError {
    #[error("Load error: {0}")]
    Load(#[from] LoadError),
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}

/// Split and build a script's source text
///
/// # Example
/// ```
/// use choice_tree::{build_script, BuildOptions};
///
/// let built = build_script("Deal?\n> Sure\ncredits lots\n", BuildOptions::new()).unwrap();
/// assert!(built.root.options[0].actions.is_empty());
/// assert_eq!(built.warnings.len(), 1);
/// ```
pub fn build_script(source: &str, options: BuildOptions) -> Result<Built, ParseError> {
    build_choice_tree_with(&split_lines(source), options)
}

/// Load a script by name and build it
///
/// # Example
/// ```
/// # tokio_test::block_on(async {
/// use choice_tree::loader::InMemoryLoader;
/// use choice_tree::{load_choice_tree, BuildOptions};
///
/// let loader = InMemoryLoader::new();
/// loader.add("Intro", "Welcome aboard.\n> Look around\n");
///
/// let built = load_choice_tree(&loader, "Intro", BuildOptions::new()).await.unwrap();
/// assert_eq!(built.root.synopsis, ["Welcome aboard."]);
/// # });
/// ```
pub async fn load_choice_tree<L: ScriptLoader + ?Sized>(
    loader: &L,
    name: &str,
    options: BuildOptions,
) -> Result<Built, ScriptError> {
    let source = loader.load(name).await?;
    let built = build_script(&source, options)?;
    log::debug!(
        "script '{}': {} option(s) at the root",
        name,
        built.root.options.len()
    );
    Ok(built)
}

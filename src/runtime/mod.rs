/// Choice runtime - walks a built tree as the player selects options
mod effect;
mod error;

pub use effect::{Effect, Selection, Transition};
pub use error::RuntimeError;

use crate::ast::{Action, ChoiceNode};
use crate::catalog::{ItemCatalog, ItemHandle, PlayerState};
use log::{debug, warn};

/// Holds the single "current choice" cursor into an immutable tree.
///
/// The cursor is only ever reassigned to another node of the same tree; nodes
/// themselves are never mutated.
#[derive(Debug, Clone)]
pub struct ChoiceRuntime<'t> {
    root: &'t ChoiceNode,
    current: &'t ChoiceNode,
}

impl<'t> ChoiceRuntime<'t> {
    pub fn new(root: &'t ChoiceNode) -> Self {
        ChoiceRuntime {
            root,
            current: root,
        }
    }

    /// The node the presentation layer should display
    pub fn current(&self) -> &'t ChoiceNode {
        self.current
    }

    pub fn root(&self) -> &'t ChoiceNode {
        self.root
    }

    pub fn is_at_root(&self) -> bool {
        std::ptr::eq(self.current, self.root)
    }

    /// Move the cursor back to the root
    pub fn reset(&mut self) {
        self.current = self.root;
    }

    /// Apply option `index` of the current node.
    ///
    /// Actions run in authored order. `EnterSubChoice` moves the cursor as
    /// soon as it is reached and the remaining actions still run; with several
    /// of them the last one wins. If an action fails, the actions before it
    /// (including any cursor move) stay applied.
    ///
    /// # Example
    /// ```
    /// use choice_tree::catalog::{InMemoryCatalog, Player};
    /// use choice_tree::runtime::ChoiceRuntime;
    ///
    /// let tree = choice_tree::parse("Hello.\n> Take credits\ncredits 10\n").unwrap();
    /// let mut runtime = ChoiceRuntime::new(&tree);
    /// let mut player = Player::default();
    ///
    /// let selection = runtime
    ///     .select(0, &InMemoryCatalog::new(), &mut player)
    ///     .unwrap();
    /// assert!(selection.transition.is_exhausted());
    /// assert_eq!(player.credits, 10);
    /// ```
    pub fn select<C, P>(
        &mut self,
        index: usize,
        catalog: &C,
        player: &mut P,
    ) -> Result<Selection<'t>, RuntimeError>
    where
        C: ItemCatalog + ?Sized,
        P: PlayerState + ?Sized,
    {
        let node = self.current;
        let option = node
            .options
            .get(index)
            .ok_or(RuntimeError::OptionOutOfRange {
                index,
                len: node.options.len(),
            })?;
        debug!("selecting option {} {:?}", index, option.synopsis);

        let mut effects = Vec::with_capacity(option.actions.len());
        let mut entered = None;

        for (position, action) in option.actions.iter().enumerate() {
            let line = option.action_line(position);
            let effect = match action {
                Action::GrantCredits(amount) => {
                    player.add_credits(*amount);
                    Effect::CreditsGranted { amount: *amount }
                }
                Action::GrantItem(key) => {
                    let item = resolve(catalog, key, line)?;
                    player.add_item(item.clone());
                    Effect::ItemGranted { item }
                }
                Action::RemoveItem(key) => {
                    let item = resolve(catalog, key, line)?;
                    let removed = player.remove_item(&item);
                    if !removed {
                        warn!("player does not own '{}', nothing removed", item.name);
                    }
                    Effect::ItemRemoved { item, removed }
                }
                Action::EnterSubChoice(child) => {
                    let child: &'t ChoiceNode = child;
                    self.current = child;
                    entered = Some(child);
                    Effect::EnteredChoice { line: child.line }
                }
            };
            debug!("applied {:?}", effect);
            effects.push(effect);
        }

        let transition = match entered {
            Some(node) => Transition::Entered(node),
            None => Transition::Exhausted,
        };
        Ok(Selection {
            transition,
            effects,
        })
    }
}

fn resolve<C: ItemCatalog + ?Sized>(
    catalog: &C,
    key: &str,
    line: usize,
) -> Result<ItemHandle, RuntimeError> {
    catalog.resolve(key).ok_or_else(|| RuntimeError::UnknownItem {
        key: key.to_string(),
        line,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{InMemoryCatalog, Item, Player};
    use crate::parser::parse;

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::new()
            .with_item(Item::new("Fuel", "Plutonium fuel for spacecrafts."))
            .with_item(Item::new("Naphtha", "Unrefined oil."))
    }

    #[test]
    fn test_grant_credits() {
        let tree = parse("Hello.\n> Take credits\ncredits 10\n").unwrap();
        let mut runtime = ChoiceRuntime::new(&tree);
        let mut player = Player::new(5);

        let selection = runtime.select(0, &catalog(), &mut player).unwrap();
        assert_eq!(player.credits, 15);
        assert_eq!(selection.effects, [Effect::CreditsGranted { amount: 10 }]);
        assert_eq!(selection.credits_delta(), 10);
        assert!(runtime.is_at_root());
    }

    #[test]
    fn test_item_actions_resolve_through_catalog() {
        let tree = parse("Pick one:\n> A\nget fuel\n> B\nremove fuel\n").unwrap();
        let catalog = catalog();
        let fuel = catalog.resolve("fuel").unwrap();
        let mut runtime = ChoiceRuntime::new(&tree);
        let mut player = Player::default();

        runtime.select(0, &catalog, &mut player).unwrap();
        assert_eq!(player.inventory, [fuel.clone()]);

        let selection = runtime.select(1, &catalog, &mut player).unwrap();
        assert!(player.inventory.is_empty());
        assert_eq!(
            selection.effects,
            [Effect::ItemRemoved {
                item: fuel,
                removed: true
            }]
        );
    }

    #[test]
    fn test_removing_absent_item_is_a_no_op() {
        let tree = parse("Trade\n> Give fuel\nremove fuel\ncredits 3\n").unwrap();
        let mut runtime = ChoiceRuntime::new(&tree);
        let mut player = Player::default();

        let selection = runtime.select(0, &catalog(), &mut player).unwrap();
        assert!(matches!(
            selection.effects[0],
            Effect::ItemRemoved { removed: false, .. }
        ));
        assert_eq!(player.credits, 3);
    }

    #[test]
    fn test_unknown_item_keeps_earlier_effects() {
        let tree = parse("Shop\n> Buy\ncredits -4\nget unobtainium\ncredits 100\n").unwrap();
        let mut runtime = ChoiceRuntime::new(&tree);
        let mut player = Player::new(10);

        let err = runtime.select(0, &catalog(), &mut player).unwrap_err();
        assert_eq!(
            err,
            RuntimeError::UnknownItem {
                key: "unobtainium".to_string(),
                line: 3
            }
        );
        assert_eq!(player.credits, 6);
    }

    #[test]
    fn test_out_of_range_applies_nothing() {
        let tree = parse("Hello.\n> Take credits\ncredits 10\n").unwrap();
        let mut runtime = ChoiceRuntime::new(&tree);
        let mut player = Player::default();

        let err = runtime.select(1, &catalog(), &mut player).unwrap_err();
        assert_eq!(err, RuntimeError::OptionOutOfRange { index: 1, len: 1 });
        assert_eq!(player, Player::default());
    }

    #[test]
    fn test_enter_sub_choice_moves_cursor() {
        let tree = parse("Go:\n> Door\nchoice\n{\nInside.\n> Leave\n}\n").unwrap();
        let mut runtime = ChoiceRuntime::new(&tree);
        let mut player = Player::default();

        let selection = runtime.select(0, &catalog(), &mut player).unwrap();
        let inner = selection.transition.entered().unwrap();
        assert_eq!(inner.synopsis, ["Inside."]);
        assert!(std::ptr::eq(runtime.current(), inner));
        assert_eq!(selection.effects, [Effect::EnteredChoice { line: 4 }]);

        let selection = runtime.select(0, &catalog(), &mut player).unwrap();
        assert!(selection.transition.is_exhausted());
        assert!(std::ptr::eq(runtime.current(), inner));

        runtime.reset();
        assert!(runtime.is_at_root());
    }

    #[test]
    fn test_actions_after_sub_choice_still_run() {
        let source = "Go:\n> Door\ncredits 1\nchoice\n{\nInside.\n> Leave\n}\nget fuel\n";
        let tree = parse(source).unwrap();
        let mut runtime = ChoiceRuntime::new(&tree);
        let mut player = Player::default();

        let selection = runtime.select(0, &catalog(), &mut player).unwrap();
        assert_eq!(selection.effects.len(), 3);
        assert!(matches!(selection.effects[1], Effect::EnteredChoice { .. }));
        assert_eq!(player.credits, 1);
        assert_eq!(player.count_key("fuel"), 1);
        assert_eq!(runtime.current().synopsis, ["Inside."]);
    }

    #[test]
    fn test_last_sub_choice_wins() {
        let source = "Go:\n> Both\nchoice\n{\nFirst\n> a\n}\nchoice\n{\nSecond\n> b\n}\n";
        let tree = parse(source).unwrap();
        let mut runtime = ChoiceRuntime::new(&tree);

        let selection = runtime
            .select(0, &catalog(), &mut Player::default())
            .unwrap();
        assert_eq!(selection.transition.entered().unwrap().synopsis, ["Second"]);
        assert_eq!(runtime.current().synopsis, ["Second"]);
    }

    #[test]
    fn test_failure_after_sub_choice_leaves_cursor_moved() {
        let source = "Go:\n> Door\nchoice\n{\nInside.\n> Leave\n}\nget unobtainium\n";
        let tree = parse(source).unwrap();
        let mut runtime = ChoiceRuntime::new(&tree);

        let result = runtime.select(0, &catalog(), &mut Player::default());
        assert!(matches!(result, Err(RuntimeError::UnknownItem { .. })));
        assert_eq!(runtime.current().synopsis, ["Inside."]);
    }
}

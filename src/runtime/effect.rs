/// Record of what a selection changed, in the order it happened
use crate::ast::ChoiceNode;
use crate::catalog::ItemHandle;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    CreditsGranted {
        amount: i64,
    },
    ItemGranted {
        item: ItemHandle,
    },
    /// `removed` is false when the player did not own the item
    ItemRemoved {
        item: ItemHandle,
        removed: bool,
    },
    /// The cursor moved to the nested choice starting at `line`
    EnteredChoice {
        line: usize,
    },
}

/// Where the cursor stands after a selection
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition<'t> {
    /// A sub-choice fired and is now current
    Entered(&'t ChoiceNode),
    /// No sub-choice fired; the cursor did not move. Leaving the choice
    /// screen is up to the caller.
    Exhausted,
}

/// Outcome of [`ChoiceRuntime::select`](super::ChoiceRuntime::select)
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<'t> {
    pub transition: Transition<'t>,
    pub effects: Vec<Effect>,
}

impl<'t> Transition<'t> {
    pub fn entered(&self) -> Option<&'t ChoiceNode> {
        match self {
            Transition::Entered(node) => Some(node),
            Transition::Exhausted => None,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, Transition::Exhausted)
    }
}

impl Selection<'_> {
    /// Net credit change of this selection
    pub fn credits_delta(&self) -> i64 {
        self.effects
            .iter()
            .map(|effect| match effect {
                Effect::CreditsGranted { amount } => *amount,
                _ => 0,
            })
            .sum()
    }
}

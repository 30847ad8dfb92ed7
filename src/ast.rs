/// Choice tree definitions produced by the builders
use serde::{Deserialize, Serialize};

/// A narrative beat: display lines followed by the options the player picks from
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChoiceNode {
    pub synopsis: Vec<String>,
    pub options: Vec<ChoiceOption>,
    /// Line index where this block starts in the script
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    /// The option line as authored, marker included
    pub synopsis: String,
    pub actions: Vec<Action>,
    /// Source line of each entry in `actions`
    #[serde(default)]
    pub action_lines: Vec<usize>,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    GrantCredits(i64),
    GrantItem(String),
    RemoveItem(String),
    EnterSubChoice(Box<ChoiceNode>),
}

impl ChoiceNode {
    pub fn new(line: usize) -> Self {
        ChoiceNode {
            synopsis: Vec::new(),
            options: Vec::new(),
            line,
        }
    }

    pub fn add_synopsis_line(&mut self, text: impl Into<String>) {
        self.synopsis.push(text.into());
    }

    pub fn add_option(&mut self, option: ChoiceOption) {
        self.options.push(option);
    }

    /// Depth of the deepest nested choice below this node (0 when no option
    /// enters a sub-choice)
    pub fn depth(&self) -> usize {
        self.options
            .iter()
            .flat_map(|option| option.sub_choices())
            .map(|child| child.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Total number of nodes in this tree, including `self`
    pub fn node_count(&self) -> usize {
        1 + self
            .options
            .iter()
            .flat_map(|option| option.sub_choices())
            .map(ChoiceNode::node_count)
            .sum::<usize>()
    }
}

impl ChoiceOption {
    pub fn new(synopsis: impl Into<String>, line: usize) -> Self {
        ChoiceOption {
            synopsis: synopsis.into(),
            actions: Vec::new(),
            action_lines: Vec::new(),
            line,
        }
    }

    /// Append an action authored on script line `line`
    pub fn add_action(&mut self, action: Action, line: usize) {
        self.actions.push(action);
        self.action_lines.push(line);
    }

    /// Source line of the action at `index`, falling back to the option line
    pub fn action_line(&self, index: usize) -> usize {
        self.action_lines.get(index).copied().unwrap_or(self.line)
    }

    /// Nested choices this option can enter, in authored order
    pub fn sub_choices(&self) -> impl Iterator<Item = &ChoiceNode> {
        self.actions.iter().filter_map(|action| match action {
            Action::EnterSubChoice(node) => Some(node.as_ref()),
            _ => None,
        })
    }
}

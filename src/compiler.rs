/// Action compiler: turns a tokenized line into a deferred effect
use crate::ast::Action;
use std::fmt;

/// Recognized action verbs. Matching is case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Credits,
    Get,
    Remove,
    Choice,
}

/// What a single line means inside an option block
#[derive(Debug, Clone, PartialEq)]
pub enum ActionLine {
    Action(Action),
    /// `choice`: a nested block follows
    SubChoice,
    /// `credits` whose argument is not an integer; carries the raw argument
    MalformedCredits(String),
    MissingArgument(Verb),
    NotAnAction,
}

impl Verb {
    pub fn from_token(token: &str) -> Option<Verb> {
        if token.eq_ignore_ascii_case("credits") {
            Some(Verb::Credits)
        } else if token.eq_ignore_ascii_case("get") {
            Some(Verb::Get)
        } else if token.eq_ignore_ascii_case("remove") {
            Some(Verb::Remove)
        } else if token.eq_ignore_ascii_case("choice") {
            Some(Verb::Choice)
        } else {
            None
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Verb::Credits => "credits",
            Verb::Get => "get",
            Verb::Remove => "remove",
            Verb::Choice => "choice",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Compile one tokenized line. Tokens past the verb's arguments are ignored.
///
/// # Example
/// ```
/// use choice_tree::ast::Action;
/// use choice_tree::compiler::{compile_action, ActionLine};
///
/// assert_eq!(
///     compile_action(&["credits", "10"]),
///     ActionLine::Action(Action::GrantCredits(10))
/// );
/// assert_eq!(compile_action(&["hello"]), ActionLine::NotAnAction);
/// ```
pub fn compile_action(tokens: &[&str]) -> ActionLine {
    let Some((first, args)) = tokens.split_first() else {
        return ActionLine::NotAnAction;
    };
    let Some(verb) = Verb::from_token(first) else {
        return ActionLine::NotAnAction;
    };

    match (verb, args.first()) {
        (Verb::Choice, _) => ActionLine::SubChoice,
        (verb, None) => ActionLine::MissingArgument(verb),
        (Verb::Credits, Some(amount)) => match amount.parse::<i64>() {
            Ok(amount) => ActionLine::Action(Action::GrantCredits(amount)),
            Err(_) => ActionLine::MalformedCredits(amount.to_string()),
        },
        (Verb::Get, Some(key)) => ActionLine::Action(Action::GrantItem(key.to_string())),
        (Verb::Remove, Some(key)) => ActionLine::Action(Action::RemoveItem(key.to_string())),
    }
}

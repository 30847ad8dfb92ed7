/// Choice and option builders for the branching script format
use crate::ast::*;
use crate::compiler::{compile_action, ActionLine, Verb};
use crate::lines::{split_lines, LineKind, ScriptLine};
use crate::span::Span;
use log::{debug, trace, warn};

/// Structural errors. Any of these aborts the whole build.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("choice block starting at line {} has no option lines", .line + 1)]
    NoOptions { line: usize, span: Span },

    #[error("expected '{{' on the line after 'choice' at line {}", .line + 1)]
    ExpectedBlockOpen { line: usize, span: Span },

    #[error("block opened at line {} is never closed with '}}'", .line + 1)]
    UnterminatedBlock { line: usize, span: Span },

    #[error("unexpected '}}' at line {} with no open block", .line + 1)]
    UnexpectedBlockClose { line: usize, span: Span },

    #[error("{0}")]
    Rejected(BuildWarning),
}

/// Problems the lenient grammar recovers from by dropping the line
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildWarning {
    #[error("ignoring 'credits {value}' at line {}: not an integer", .line + 1)]
    MalformedNumberIgnored {
        value: String,
        line: usize,
        span: Span,
    },

    #[error("ignoring '{verb}' at line {}: missing argument", .line + 1)]
    MissingArgument { verb: Verb, line: usize, span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::NoOptions { span, .. } => *span,
            ParseError::ExpectedBlockOpen { span, .. } => *span,
            ParseError::UnterminatedBlock { span, .. } => *span,
            ParseError::UnexpectedBlockClose { span, .. } => *span,
            ParseError::Rejected(warning) => warning.span(),
        }
    }

    /// 0-based index of the offending line
    pub fn line(&self) -> usize {
        match self {
            ParseError::NoOptions { line, .. } => *line,
            ParseError::ExpectedBlockOpen { line, .. } => *line,
            ParseError::UnterminatedBlock { line, .. } => *line,
            ParseError::UnexpectedBlockClose { line, .. } => *line,
            ParseError::Rejected(warning) => warning.line(),
        }
    }
}

impl BuildWarning {
    pub fn span(&self) -> Span {
        match self {
            BuildWarning::MalformedNumberIgnored { span, .. } => *span,
            BuildWarning::MissingArgument { span, .. } => *span,
        }
    }

    pub fn line(&self) -> usize {
        match self {
            BuildWarning::MalformedNumberIgnored { line, .. } => *line,
            BuildWarning::MissingArgument { line, .. } => *line,
        }
    }
}

/// Build configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Fail the build on the first warning instead of dropping the line
    pub warnings_as_errors: bool,
}

impl BuildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_warnings_as_errors(mut self, strict: bool) -> Self {
        self.warnings_as_errors = strict;
        self
    }
}

/// A successfully built tree plus the lines that were dropped along the way
#[derive(Debug, Clone, PartialEq)]
pub struct Built {
    pub root: ChoiceNode,
    pub warnings: Vec<BuildWarning>,
}

/// Forward-only cursor over an immutable line sequence
pub struct LineCursor<'a> {
    lines: &'a [ScriptLine],
    pos: usize,
}

impl<'a> LineCursor<'a> {
    pub fn new(lines: &'a [ScriptLine]) -> Self {
        LineCursor { lines, pos: 0 }
    }

    pub fn peek(&self) -> Option<&'a ScriptLine> {
        let lines: &'a [ScriptLine] = self.lines;
        lines.get(self.pos)
    }

    pub fn advance(&mut self) -> Option<&'a ScriptLine> {
        let line = self.peek()?;
        self.pos += 1;
        Some(line)
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.lines.len()
    }

    /// Zero-width span just past the last line
    fn end_span(&self) -> Span {
        self.lines
            .last()
            .map(|line| Span::point(line.span.end))
            .unwrap_or_default()
    }
}

pub struct Parser<'a> {
    cursor: LineCursor<'a>,
    options: BuildOptions,
    warnings: Vec<BuildWarning>,
}

impl<'a> Parser<'a> {
    pub fn new(lines: &'a [ScriptLine]) -> Self {
        Parser {
            cursor: LineCursor::new(lines),
            options: BuildOptions::default(),
            warnings: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    pub fn parse(mut self) -> Result<Built, ParseError> {
        let root = self.parse_choice(None)?;

        debug!(
            "built choice tree: {} node(s), nesting depth {}, {} warning(s)",
            root.node_count(),
            root.depth(),
            self.warnings.len()
        );

        Ok(Built {
            root,
            warnings: self.warnings,
        })
    }

    /// Build one choice block. `open` is the `{` line of a nested block, or
    /// `None` at the top level.
    fn parse_choice(&mut self, open: Option<&'a ScriptLine>) -> Result<ChoiceNode, ParseError> {
        let nested = open.is_some();
        let start = self
            .cursor
            .peek()
            .or(open)
            .map(|line| line.index)
            .unwrap_or(0);
        let mut node = ChoiceNode::new(start);

        // Synopsis: everything before the first option marker
        while let Some(line) = self.cursor.peek() {
            match line.kind() {
                LineKind::OptionMarker => break,
                LineKind::BlockClose if nested => break,
                LineKind::BlockClose => {
                    return Err(ParseError::UnexpectedBlockClose {
                        line: line.index,
                        span: line.span,
                    });
                }
                LineKind::BlockOpen | LineKind::Text => {
                    node.add_synopsis_line(line.text.clone());
                    self.cursor.advance();
                }
            }
        }

        while let Some(head) = self.cursor.peek() {
            if head.kind() != LineKind::OptionMarker {
                break;
            }
            self.cursor.advance();
            let option = self.parse_option(head, nested)?;
            node.add_option(option);
        }

        if node.options.is_empty() {
            let (line, span) = match open {
                Some(open) => (open.index, open.span),
                None => (start, self.cursor.end_span()),
            };
            return Err(ParseError::NoOptions { line, span });
        }

        Ok(node)
    }

    /// Build the option whose marker line `head` has just been consumed
    fn parse_option(
        &mut self,
        head: &'a ScriptLine,
        nested: bool,
    ) -> Result<ChoiceOption, ParseError> {
        let mut option = ChoiceOption::new(head.text.clone(), head.index);

        while let Some(line) = self.cursor.peek() {
            match line.kind() {
                LineKind::OptionMarker => break,
                LineKind::BlockClose if nested => break,
                LineKind::BlockClose => {
                    return Err(ParseError::UnexpectedBlockClose {
                        line: line.index,
                        span: line.span,
                    });
                }
                LineKind::BlockOpen | LineKind::Text => {}
            }
            self.cursor.advance();

            match compile_action(&line.tokens()) {
                ActionLine::Action(action) => option.add_action(action, line.index),
                ActionLine::SubChoice => {
                    let node = self.parse_sub_choice(line)?;
                    option.add_action(Action::EnterSubChoice(Box::new(node)), line.index);
                }
                ActionLine::MalformedCredits(value) => {
                    self.warn(BuildWarning::MalformedNumberIgnored {
                        value,
                        line: line.index,
                        span: line.span,
                    })?;
                }
                ActionLine::MissingArgument(verb) => {
                    self.warn(BuildWarning::MissingArgument {
                        verb,
                        line: line.index,
                        span: line.span,
                    })?;
                }
                ActionLine::NotAnAction => {
                    trace!("line {}: not an action, ignored", line.number());
                }
            }
        }

        Ok(option)
    }

    /// `choice` has been consumed; expect `{`, the nested block, then `}`
    fn parse_sub_choice(&mut self, choice: &'a ScriptLine) -> Result<ChoiceNode, ParseError> {
        let open = match self.cursor.peek() {
            Some(line) if line.kind() == LineKind::BlockOpen => line,
            _ => {
                return Err(ParseError::ExpectedBlockOpen {
                    line: choice.index,
                    span: choice.span,
                });
            }
        };
        self.cursor.advance();

        let node = self.parse_choice(Some(open))?;

        match self.cursor.peek() {
            Some(line) if line.kind() == LineKind::BlockClose => {
                self.cursor.advance();
                Ok(node)
            }
            _ => Err(ParseError::UnterminatedBlock {
                line: open.index,
                span: open.span,
            }),
        }
    }

    fn warn(&mut self, warning: BuildWarning) -> Result<(), ParseError> {
        if self.options.warnings_as_errors {
            return Err(ParseError::Rejected(warning));
        }
        warn!("{}", warning);
        self.warnings.push(warning);
        Ok(())
    }
}

/// Build a choice tree from script lines
pub fn build_choice_tree(lines: &[ScriptLine]) -> Result<ChoiceNode, ParseError> {
    Parser::new(lines).parse().map(|built| built.root)
}

/// Build a choice tree, returning the warnings alongside it
pub fn build_choice_tree_with(
    lines: &[ScriptLine],
    options: BuildOptions,
) -> Result<Built, ParseError> {
    Parser::new(lines).with_options(options).parse()
}

/// Split `source` into lines and build the tree
pub fn parse(source: &str) -> Result<ChoiceNode, ParseError> {
    build_choice_tree(&split_lines(source))
}

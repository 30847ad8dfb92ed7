/// Diagnostic reporting for scripts using ariadne
use crate::lines::split_lines;
use crate::parser::{BuildWarning, ParseError};
use crate::runtime::RuntimeError;
use crate::span::Span;
use crate::ScriptError;
use ariadne::{Color, Label, Report, ReportKind, Source};

struct Diagnostic {
    kind: ReportKind<'static>,
    message: String,
    label: String,
    span: Span,
    help: Option<&'static str>,
}

fn render(source_name: &str, source: &str, diagnostic: Diagnostic) -> String {
    let color = match diagnostic.kind {
        ReportKind::Warning => Color::Yellow,
        _ => Color::Red,
    };

    let mut builder = Report::build(diagnostic.kind, source_name, diagnostic.span.start)
        .with_message(&diagnostic.message)
        .with_label(
            Label::new((source_name, diagnostic.span.range()))
                .with_message(&diagnostic.label)
                .with_color(color),
        );
    if let Some(help) = diagnostic.help {
        builder = builder.with_help(help);
    }

    let mut output = Vec::new();
    if builder
        .finish()
        .write((source_name, Source::from(source)), &mut output)
        .is_err()
    {
        return format!("{}\n", diagnostic.message);
    }
    String::from_utf8_lossy(&output).into_owned()
}

/// Span of the 0-based line `index` in `source`
fn line_span(source: &str, index: usize) -> Span {
    split_lines(source)
        .get(index)
        .map(|line| line.span)
        .unwrap_or_else(|| Span::point(source.len()))
}

/// Report a structural error with the offending line highlighted
pub fn report_parse_error(source_name: &str, source: &str, error: &ParseError) -> String {
    let (label, help) = match error {
        ParseError::Rejected(warning) => {
            let mut diagnostic = warning_diagnostic(warning);
            diagnostic.kind = ReportKind::Error;
            diagnostic.help = Some("strict building turns this warning into an error");
            return render(source_name, source, diagnostic);
        }
        ParseError::NoOptions { .. } => (
            "no line here starts with '>'",
            "a choice needs at least one option line beginning with '>'",
        ),
        ParseError::ExpectedBlockOpen { .. } => (
            "this 'choice' is not followed by '{'",
            "put '{' on its own line right after 'choice'",
        ),
        ParseError::UnterminatedBlock { .. } => (
            "this block is never closed",
            "close nested choices with a line starting with '}'",
        ),
        ParseError::UnexpectedBlockClose { .. } => (
            "nothing to close here",
            "remove this line or add the matching 'choice' and '{'",
        ),
    };

    render(
        source_name,
        source,
        Diagnostic {
            kind: ReportKind::Error,
            message: error.to_string(),
            label: label.to_string(),
            span: error.span(),
            help: Some(help),
        },
    )
}

fn warning_diagnostic(warning: &BuildWarning) -> Diagnostic {
    let (label, help) = match warning {
        BuildWarning::MalformedNumberIgnored { value, .. } => (
            format!("'{}' is not an integer", value),
            "credit amounts are whole numbers, e.g. 'credits 250'",
        ),
        BuildWarning::MissingArgument { verb, .. } => (
            format!("'{}' needs an argument", verb),
            "write 'credits <amount>', 'get <item>' or 'remove <item>'",
        ),
    };
    Diagnostic {
        kind: ReportKind::Warning,
        message: warning.to_string(),
        label,
        span: warning.span(),
        help: Some(help),
    }
}

/// Report a dropped line
pub fn report_build_warning(source_name: &str, source: &str, warning: &BuildWarning) -> String {
    render(source_name, source, warning_diagnostic(warning))
}

/// Report a runtime error; errors tied to a script line point at it
pub fn report_runtime_error(source_name: &str, source: &str, error: &RuntimeError) -> String {
    match error {
        RuntimeError::UnknownItem { key, line } => render(
            source_name,
            source,
            Diagnostic {
                kind: ReportKind::Error,
                message: error.to_string(),
                label: format!("'{}' is not in the item catalog", key),
                span: line_span(source, *line),
                help: Some("item keys are item names without spaces, e.g. 'roxolquartz'"),
            },
        ),
        RuntimeError::OptionOutOfRange { .. } => format!("Error: {}\n", error),
    }
}

/// Combined error reporting for any script error
pub fn report_script_error(source_name: &str, source: &str, error: &ScriptError) -> String {
    match error {
        ScriptError::Load(e) => format!("Error: {}\n", e),
        ScriptError::Parse(e) => report_parse_error(source_name, source, e),
        ScriptError::Runtime(e) => report_runtime_error(source_name, source, e),
    }
}

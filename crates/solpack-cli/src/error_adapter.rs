//! Rendering of solpack errors through miette.
//!
//! Dataset problems carry spans into the CSV text, so each one becomes its
//! own report with the offending cells underlined. Every other failure is a
//! single report with a `solpack::*` code and a hint about what to check.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceCode, SourceSpan};

use solpack::SolpackError;
use solpack_data::{
    Span,
    error::{Diagnostic, ErrorCode},
};

/// Fallback hint for a dataset error code, used when the diagnostic brings
/// none of its own.
fn code_hint(code: ErrorCode) -> &'static str {
    match code {
        ErrorCode::E001 => "close the quoted field with `\"`",
        ErrorCode::E002 => "write a quote inside a quoted field as `\"\"`",
        ErrorCode::E100 => "the first line must name the columns, starting with `eName`",
        ErrorCode::E101 => "every row needs one field per header column",
        ErrorCode::E102 => "rename or remove one of the columns",
        ErrorCode::E200 => "the catalog keys every body by its `eName` column",
        ErrorCode::E300 => "body names are matched exactly against the `eName` column",
        ErrorCode::E301 => "the magnitude column must hold a finite number greater than zero",
    }
}

/// Hint and code for errors that do not point into the dataset.
fn failure_info(err: &SolpackError) -> Option<(&'static str, Option<&'static str>)> {
    match err {
        SolpackError::Io(_) => Some((
            "solpack::io",
            Some("check that the dataset exists and the output directory is writable"),
        )),
        SolpackError::Parse { .. } => None,
        SolpackError::Dataset(_) => Some((
            "solpack::dataset",
            Some("the scene needs bodies with usable values in the columns it reads"),
        )),
        SolpackError::Layout(_) => Some((
            "solpack::layout",
            Some("check `[style] background_color` and the scene settings in the config"),
        )),
        SolpackError::Export(_) => Some(("solpack::export", None)),
    }
}

fn to_source_span(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// One error ready to be rendered by miette.
pub enum Reportable<'a> {
    /// A dataset diagnostic with the text it points into
    Row { diag: &'a Diagnostic, src: &'a str },
    /// Any other failure
    Failure(&'a SolpackError),
}

impl Reportable<'_> {
    /// 1-based line of the first primary label, if any.
    pub fn line(&self) -> Option<usize> {
        let Reportable::Row { diag, src } = self else {
            return None;
        };
        let label = diag.labels().iter().find(|label| label.is_primary())?;
        let start = label.span().start().min(src.len());
        Some(src.as_bytes()[..start].iter().filter(|&&b| b == b'\n').count() + 1)
    }
}

impl fmt::Debug for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Row { diag, .. } => f.debug_tuple("Row").field(diag).finish(),
            Reportable::Failure(err) => f.debug_tuple("Failure").field(err).finish(),
        }
    }
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Row { diag, .. } => f.write_str(diag.message()),
            Reportable::Failure(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Row { .. } => None,
            Reportable::Failure(err) => err.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Row { diag, .. } => diag
                .code()
                .map(|code| Box::new(code) as Box<dyn fmt::Display>),
            Reportable::Failure(err) => {
                failure_info(err).map(|(code, _)| Box::new(code) as Box<dyn fmt::Display>)
            }
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self {
            Reportable::Row { diag, .. } => diag
                .help()
                .or_else(|| diag.code().map(code_hint)),
            Reportable::Failure(err) => failure_info(err).and_then(|(_, help)| help),
        };
        help.map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<miette::Severity> {
        match self {
            Reportable::Row { diag, .. } if diag.severity().is_warning() => {
                Some(miette::Severity::Warning)
            }
            _ => Some(miette::Severity::Error),
        }
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        match self {
            Reportable::Row { src, .. } => Some(src as &dyn SourceCode),
            Reportable::Failure(_) => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let Reportable::Row { diag, .. } = self else {
            return None;
        };
        if diag.labels().is_empty() {
            return None;
        }

        Some(Box::new(diag.labels().iter().map(|label| {
            let span = to_source_span(label.span());
            let message = Some(label.message().to_string());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

/// Splits an error into reports: one per dataset diagnostic, or a single
/// report for any other failure.
pub fn to_reportables(err: &SolpackError) -> Vec<Reportable<'_>> {
    match err {
        SolpackError::Parse { err: parse_err, src } => parse_err
            .diagnostics()
            .iter()
            .map(|diag| Reportable::Row {
                diag,
                src: src.as_str(),
            })
            .collect(),
        _ => vec![Reportable::Failure(err)],
    }
}

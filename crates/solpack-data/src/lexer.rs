//! Record tokenizer for comma-separated body datasets.
//!
//! The tokenizer splits source text into [`Record`]s of [`Field`]s. Fields
//! may be quoted with `"`; inside a quoted field `""` stands for a single
//! quote and commas and line breaks are literal. Line breaks may be `\n`,
//! `\r\n` or a lone `\r`, and a leading byte order mark is skipped.
//!
//! The public entry point is [`tokenize`], which recovers from broken rows
//! by skipping to the next line and reports every problem in a single pass.

use winnow::{
    Parser as _,
    combinator::{alt, cut_err, eof, opt, peek, preceded, repeat, separated, terminated},
    error::{ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location},
    token::{none_of, take_till, take_while},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::Span,
};

/// Rich diagnostic information for tokenizer errors.
///
/// Attached to winnow errors via `.context()`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LexerDiagnostic {
    code: ErrorCode,
    message: &'static str,
    help: Option<&'static str>,
    /// The error span covers from `start` to the error position.
    start: usize,
}

type Input<'a> = LocatingSlice<&'a str>;
type IResult<'a, O> = ModalResult<O, ContextError<LexerDiagnostic>>;

/// A single field with its unescaped text.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    text: String,
    span: Span,
    quoted: bool,
}

impl Field {
    /// Unescaped field text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Source span, including the quotes of a quoted field
    pub fn span(&self) -> Span {
        self.span
    }

    pub fn is_quoted(&self) -> bool {
        self.quoted
    }
}

/// One row of fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    fields: Vec<Field>,
    span: Span,
}

impl Record {
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn into_fields(self) -> Vec<Field> {
        self.fields
    }

    /// A record made of a single unquoted whitespace-only field, as produced
    /// by a blank line.
    pub fn is_blank(&self) -> bool {
        matches!(self.fields.as_slice(), [only] if !only.is_quoted() && only.text().trim().is_empty())
    }
}

fn line_break<'a>(input: &mut Input<'a>) -> IResult<'a, ()> {
    alt(("\r\n", "\n", "\r")).void().parse_next(input)
}

fn byte_order_mark<'a>(input: &mut Input<'a>) -> IResult<'a, Option<char>> {
    opt('\u{FEFF}').parse_next(input)
}

/// Skip the remainder of the current line, including its line break.
fn skip_line<'a>(input: &mut Input<'a>) -> IResult<'a, ()> {
    (take_till(0.., ['\r', '\n']), opt(line_break))
        .void()
        .parse_next(input)
}

fn unquoted_field<'a>(input: &mut Input<'a>) -> IResult<'a, &'a str> {
    take_while(0.., |c: char| !matches!(c, ',' | '\r' | '\n')).parse_next(input)
}

fn quoted_content<'a>(input: &mut Input<'a>, start: usize) -> IResult<'a, String> {
    let content = repeat(0.., alt(("\"\"".value('"'), none_of('"')))).fold(
        String::new,
        |mut acc, ch| {
            acc.push(ch);
            acc
        },
    );

    preceded(
        '"',
        cut_err(terminated(content, '"')).context(LexerDiagnostic {
            code: ErrorCode::E001,
            message: "unterminated quoted field",
            help: Some("close the field with `\"`"),
            start,
        }),
    )
    .parse_next(input)
}

/// A closing quote must be followed by a separator, a line break or the end
/// of input. Nothing is consumed.
fn quoted_field_end<'a>(input: &mut Input<'a>) -> IResult<'a, ()> {
    let start = input.current_token_start();
    cut_err(peek(alt((','.void(), line_break, eof.void()))))
        .context(LexerDiagnostic {
            code: ErrorCode::E002,
            message: "unexpected character after closing quote",
            help: Some("write a quote inside a quoted field as `\"\"`"),
            start,
        })
        .parse_next(input)
}

fn field<'a>(input: &mut Input<'a>) -> IResult<'a, Field> {
    let start = input.current_token_start();
    let quoted = input.starts_with('"');
    let text = if quoted {
        let text = quoted_content(input, start)?;
        quoted_field_end(input)?;
        text
    } else {
        unquoted_field(input)?.to_string()
    };
    let end = input.current_token_start();

    Ok(Field {
        text,
        span: Span::new(start..end),
        quoted,
    })
}

fn record_fields<'a>(input: &mut Input<'a>) -> IResult<'a, Vec<Field>> {
    separated(1.., field, ',').parse_next(input)
}

/// Collects records and diagnostics over one pass of the input.
struct Lexer {
    records: Vec<Record>,
    diagnostics: DiagnosticCollector,
}

impl Lexer {
    fn new() -> Self {
        Self {
            records: Vec::new(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    fn tokenize(&mut self, mut input: Input<'_>) {
        // A missing mark is not an error.
        let _ = byte_order_mark(&mut input);

        while !input.is_empty() {
            let start = input.current_token_start();
            match record_fields(&mut input) {
                Ok(fields) => {
                    let end = input.current_token_start();
                    self.records.push(Record {
                        fields,
                        span: Span::new(start..end),
                    });
                    let _ = line_break(&mut input);
                }
                Err(e) => {
                    let error_pos = input.current_token_start();
                    self.diagnostics.emit(Self::convert_err_mode(e, error_pos));
                    let _ = skip_line(&mut input);
                }
            }
        }
    }

    fn finish(self) -> Result<Vec<Record>, ParseError> {
        self.diagnostics.finish().map(|()| self.records)
    }

    /// Convert an ErrMode and error position to a Diagnostic.
    ///
    /// Falls back to E002 when no diagnostic context is attached.
    fn convert_err_mode(
        err: ErrMode<ContextError<LexerDiagnostic>>,
        error_pos: usize,
    ) -> Diagnostic {
        let context_error = match err {
            ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => ctx,
            ErrMode::Incomplete(_) => ContextError::new(),
        };

        if let Some(LexerDiagnostic {
            code,
            message,
            help,
            start,
        }) = context_error.context().next()
        {
            let span = Span::new(*start..error_pos.max(start + 1));

            let mut diag = Diagnostic::error(*message)
                .with_code(*code)
                .with_label(span, code.description());
            if let Some(h) = help {
                diag = diag.with_help(*h);
            }
            return diag;
        }

        let span = Span::new(error_pos..error_pos.saturating_add(1));
        Diagnostic::error("unexpected character")
            .with_code(ErrorCode::E002)
            .with_label(span, ErrorCode::E002.description())
    }
}

/// Split source text into records, collecting every tokenizer error.
///
/// # Returns
///
/// - `Ok(records)` - The whole input was tokenized
/// - `Err(ParseError)` - One or more rows were malformed
pub fn tokenize(source: &str) -> Result<Vec<Record>, ParseError> {
    let mut lexer = Lexer::new();
    lexer.tokenize(LocatingSlice::new(source));
    lexer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(record: &Record) -> Vec<&str> {
        record.fields().iter().map(Field::text).collect()
    }

    #[test]
    fn test_simple_rows() {
        let records = tokenize("eName,volume\nEarth,1.08321e12\n").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(texts(&records[0]), ["eName", "volume"]);
        assert_eq!(texts(&records[1]), ["Earth", "1.08321e12"]);
    }

    #[test]
    fn test_missing_trailing_newline() {
        let records = tokenize("a,b\n1,2").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(texts(&records[1]), ["1", "2"]);
    }

    #[test]
    fn test_crlf_and_lone_cr() {
        let records = tokenize("a,b\r\n1,2\r3,4").unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(texts(&records[2]), ["3", "4"]);
    }

    #[test]
    fn test_empty_fields() {
        let records = tokenize("Moon,,Earth,\n").unwrap();
        assert_eq!(texts(&records[0]), ["Moon", "", "Earth", ""]);
    }

    #[test]
    fn test_quoted_field_with_separator_and_escape() {
        let records = tokenize("\"Saturn, the \"\"ringed\"\" one\",1\n").unwrap();
        let field = &records[0].fields()[0];
        assert_eq!(field.text(), "Saturn, the \"ringed\" one");
        assert!(field.is_quoted());
        assert_eq!(field.span(), Span::new(0..28));
        assert_eq!(records[0].fields()[1].text(), "1");
    }

    #[test]
    fn test_quoted_field_spanning_lines() {
        let records = tokenize("\"line\nbreak\",x\n").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].fields()[0].text(), "line\nbreak");
    }

    #[test]
    fn test_byte_order_mark_skipped() {
        let records = tokenize("\u{FEFF}eName\nSun\n").unwrap();
        assert_eq!(texts(&records[0]), ["eName"]);
        assert_eq!(records[0].span().start(), 3);
    }

    #[test]
    fn test_blank_line_record() {
        let records = tokenize("a\n\n  \nb\n").unwrap();
        assert_eq!(records.len(), 4);
        assert!(records[1].is_blank());
        assert!(records[2].is_blank());
        assert!(!records[3].is_blank());
    }

    #[test]
    fn test_unterminated_quote() {
        let err = tokenize("a,b\n\"Io,1\n").unwrap_err();
        let diag = &err.diagnostics()[0];
        assert_eq!(diag.code(), Some(ErrorCode::E001));
        assert_eq!(diag.labels()[0].span().start(), 4);
    }

    #[test]
    fn test_text_after_closing_quote() {
        let err = tokenize("\"Io\"x,1\n").unwrap_err();
        let diag = &err.diagnostics()[0];
        assert_eq!(diag.code(), Some(ErrorCode::E002));
        assert_eq!(diag.labels()[0].span().start(), 4);
    }

    #[test]
    fn test_recovers_and_reports_every_broken_row() {
        let err = tokenize("\"a\"b,1\nok,2\n\"c\"d,3\n").unwrap_err();
        assert_eq!(err.diagnostics().len(), 2);
        assert!(
            err.diagnostics()
                .iter()
                .all(|d| d.code() == Some(ErrorCode::E002))
        );
    }
}

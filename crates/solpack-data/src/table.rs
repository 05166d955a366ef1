//! Header-keyed view over tokenized records.
//!
//! A [`Table`] checks the shape of a dataset: it needs a header, header
//! names must be unique and every data row must carry exactly one field per
//! column. Blank lines are ignored.

use indexmap::IndexMap;
use log::debug;

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    lexer::{Field, Record},
    span::Span,
};

/// A validated header plus its data rows.
#[derive(Debug)]
pub struct Table {
    columns: IndexMap<String, usize>,
    header_span: Span,
    rows: Vec<Row>,
}

/// A data row with one field per column.
#[derive(Debug)]
pub struct Row {
    fields: Vec<Field>,
    span: Span,
}

impl Row {
    /// Raw text of the field at `column`.
    pub fn get(&self, column: usize) -> Option<&str> {
        self.fields.get(column).map(Field::text)
    }

    /// Span of the field at `column`, or of the whole row when out of range.
    pub fn span_of(&self, column: usize) -> Span {
        self.fields.get(column).map_or(self.span, Field::span)
    }

    pub fn span(&self) -> Span {
        self.span
    }
}

impl Table {
    /// Builds a table from tokenized records.
    ///
    /// # Errors
    ///
    /// - E100 when there is no header row
    /// - E102 for each repeated header name
    /// - E101 for each data row whose field count differs from the header
    pub fn from_records(records: Vec<Record>) -> Result<Self, ParseError> {
        let mut records = records.into_iter().filter(|r| !r.is_blank());

        let Some(header) = records.next() else {
            return Err(Diagnostic::error("dataset is empty")
                .with_code(ErrorCode::E100)
                .with_label(Span::new(0..0), ErrorCode::E100.description())
                .with_help("the first line must name the columns, starting with `eName`")
                .into());
        };

        let mut diagnostics = DiagnosticCollector::new();
        let header_span = header.span();
        let mut columns: IndexMap<String, usize> = IndexMap::new();
        let mut column_spans: Vec<Span> = Vec::new();

        for (idx, field) in header.fields().iter().enumerate() {
            let name = field.text().trim().to_string();
            if let Some(&first) = columns.get(&name) {
                diagnostics.emit(
                    Diagnostic::error(format!("column `{name}` appears more than once"))
                        .with_code(ErrorCode::E102)
                        .with_label(field.span(), ErrorCode::E102.description())
                        .with_secondary_label(column_spans[first], "first declared here")
                        .with_help("rename or remove one of the columns"),
                );
            } else {
                columns.insert(name, idx);
            }
            column_spans.push(field.span());
        }

        let width = header.fields().len();
        let mut rows = Vec::new();
        for record in records {
            let fields = record.fields();
            let count = fields.len();
            if count != width {
                let (span, label) = match (fields.get(width), fields.last()) {
                    (Some(extra), Some(last)) => (
                        extra.span().union(last.span()),
                        format!("{} field(s) past the last column", count - width),
                    ),
                    (None, Some(last)) => {
                        let missing = header.fields()[count].text().trim();
                        (last.span(), format!("expected `{missing}` after this field"))
                    }
                    (_, None) => (record.span(), ErrorCode::E101.description().to_string()),
                };
                diagnostics.emit(
                    Diagnostic::error(format!(
                        "row has {count} fields but the header declares {width}"
                    ))
                    .with_code(ErrorCode::E101)
                    .with_label(span, label)
                    .with_secondary_label(header_span, "header declared here")
                    .with_help("every row needs one field per header column"),
                );
                continue;
            }
            let span = record.span();
            rows.push(Row {
                fields: record.into_fields(),
                span,
            });
        }

        diagnostics.finish()?;

        debug!(columns = columns.len(), rows = rows.len(); "Dataset table built");
        Ok(Self {
            columns,
            header_span,
            rows,
        })
    }

    /// Index of a column by its header name.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.columns.get(name).copied()
    }

    /// Header names in source order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn header_span(&self) -> Span {
        self.header_span
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}

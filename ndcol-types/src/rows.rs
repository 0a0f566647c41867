use ndcol_result::{Error, Result};

/// Inclusive span of row numbers `start..=end`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RowSpan {
    pub start: u64,
    pub end: u64,
}

impl RowSpan {
    pub fn new(start: u64, end: u64) -> Result<Self> {
        if end < start {
            return Err(Error::InvalidArgumentError(format!(
                "row span end {end} precedes start {start}"
            )));
        }
        let span = Self { start, end };
        span.row_count()?;
        Ok(span)
    }

    /// Rows in the span. Fails for a span covering every `u64` row, whose
    /// count does not fit in a `u64`.
    pub fn row_count(&self) -> Result<u64> {
        self.end
            .checked_sub(self.start)
            .and_then(|d| d.checked_add(1))
            .ok_or_else(|| {
                Error::InvalidArgumentError(format!(
                    "row span {}..={} has no representable row count",
                    self.start, self.end
                ))
            })
    }
}

/// A contiguous, non-empty run of rows as an engine addresses it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RowRange {
    pub start: u64,
    pub count: u64,
}

impl RowRange {
    pub fn single(row: u64) -> Self {
        Self {
            start: row,
            count: 1,
        }
    }

    /// Last row of the range, `None` for an empty range.
    pub fn last_row(&self) -> Result<Option<u64>> {
        if self.count == 0 {
            return Ok(None);
        }
        self.start
            .checked_add(self.count - 1)
            .map(Some)
            .ok_or_else(|| {
                Error::InvalidArgumentError(format!(
                    "{} rows from row {} run past the last addressable row",
                    self.count, self.start
                ))
            })
    }
}

impl TryFrom<RowSpan> for RowRange {
    type Error = Error;

    fn try_from(span: RowSpan) -> Result<Self> {
        Ok(Self {
            start: span.start,
            count: span.row_count()?,
        })
    }
}

/// The rows a multi-row request addresses, as an ordered list of spans.
///
/// The table layer may hand over arbitrary row sets; whether they can be
/// served in one engine call is decided by the column layer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RowSelector {
    spans: Vec<RowSpan>,
}

impl RowSelector {
    pub fn single(row: u64) -> Self {
        Self {
            spans: vec![RowSpan {
                start: row,
                end: row,
            }],
        }
    }

    /// Rows `start..=end`.
    pub fn span(start: u64, end: u64) -> Result<Self> {
        Ok(Self {
            spans: vec![RowSpan::new(start, end)?],
        })
    }

    pub fn from_spans(spans: Vec<RowSpan>) -> Self {
        Self { spans }
    }

    /// Build from explicit row numbers, merging runs of consecutive rows.
    ///
    /// `[3, 4, 5]` becomes one span; `[1, 3]` becomes two.
    pub fn from_rows(rows: &[u64]) -> Self {
        let mut spans: Vec<RowSpan> = Vec::new();
        for &row in rows {
            match spans.last_mut() {
                Some(last) if last.end.checked_add(1) == Some(row) => last.end = row,
                _ => spans.push(RowSpan {
                    start: row,
                    end: row,
                }),
            }
        }
        Self { spans }
    }

    #[inline]
    pub fn spans(&self) -> &[RowSpan] {
        &self.spans
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn row_count(&self) -> Result<u64> {
        self.spans.iter().try_fold(0u64, |total, span| {
            total.checked_add(span.row_count()?).ok_or_else(|| {
                Error::InvalidArgumentError("row selector count overflows u64".into())
            })
        })
    }
}

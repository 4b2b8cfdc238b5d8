//! Batch assembly: one generic record-driving loop that writes into a
//! row-major, column-major, or list-of-records output, substituting
//! labels for positional indices at write time.
//!
//! The three layouts and four label types would naively be twelve copies
//! of the same loop; instead the layout is an addressing strategy inside
//! [`Batch`] and the label type is a projection closure, so there is
//! exactly one loop (`drive`).

use anyhow::{ensure, Result};
use tracing::debug;

/// Output shape for a batch of records.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    /// Records stacked along rows of a d×k matrix.
    Row,
    /// Records stacked along columns of a k×d matrix.
    Column,
    /// One vector per record.
    List,
}

/// Optional lookup table substituting labels for positional indices.
/// `None` means records carry raw 1-based indices.
#[derive(Clone, Debug)]
pub enum LabelTable {
    None,
    Int(Vec<i64>),
    Real(Vec<f64>),
    Str(Vec<String>),
}

impl LabelTable {
    fn check_len(&self, n: usize) -> Result<()> {
        let len = match self {
            LabelTable::None => return Ok(()),
            LabelTable::Int(v) => v.len(),
            LabelTable::Real(v) => v.len(),
            LabelTable::Str(v) => v.len(),
        };
        ensure!(
            len >= n,
            "label table has {len} entries but {n} are required"
        );
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Storage<T> {
    Dense(Vec<T>),
    Records(Vec<Vec<T>>),
}

/// A batch of fixed-width records in one of three layouts.
///
/// `Row` stores a d×k matrix row-major, `Column` a k×d matrix row-major
/// (records along columns), `List` one `Vec` per record. When the source
/// runs out before `d` records are produced the batch is shrunk to the
/// records actually produced, never padded.
#[derive(Clone, Debug, PartialEq)]
pub struct Batch<T> {
    layout: Layout,
    width: usize,
    capacity: usize,
    len: usize,
    storage: Storage<T>,
}

impl<T: Clone + Default> Batch<T> {
    pub(crate) fn with_capacity(layout: Layout, width: usize, capacity: usize) -> Self {
        let storage = match layout {
            Layout::Row | Layout::Column => Storage::Dense(vec![T::default(); width * capacity]),
            Layout::List => Storage::Records(Vec::with_capacity(capacity)),
        };
        Self {
            layout,
            width,
            capacity,
            len: 0,
            storage,
        }
    }

    pub(crate) fn push_record(&mut self, values: impl Iterator<Item = T>) {
        let j = self.len;
        match &mut self.storage {
            Storage::Dense(data) => {
                if self.layout == Layout::Row {
                    for (i, v) in values.enumerate() {
                        data[j * self.width + i] = v;
                    }
                } else {
                    for (i, v) in values.enumerate() {
                        data[i * self.capacity + j] = v;
                    }
                }
            }
            Storage::Records(records) => records.push(values.collect()),
        }
        self.len += 1;
    }

    /// Shrink the batch to the records actually produced. Column-major
    /// data has to be repacked so record j stays column j.
    pub(crate) fn finish(mut self) -> Self {
        if self.len == self.capacity {
            return self;
        }
        match &mut self.storage {
            Storage::Dense(data) => {
                if self.layout == Layout::Row {
                    data.truncate(self.len * self.width);
                } else {
                    let mut packed = Vec::with_capacity(self.width * self.len);
                    for i in 0..self.width {
                        for j in 0..self.len {
                            packed.push(data[i * self.capacity + j].clone());
                        }
                    }
                    *data = packed;
                }
            }
            Storage::Records(records) => records.truncate(self.len),
        }
        self.capacity = self.len;
        self
    }
}

impl<T: Clone> Batch<T> {
    /// Record `j` as an owned vector, independent of layout.
    pub fn record(&self, j: usize) -> Vec<T> {
        match &self.storage {
            Storage::Records(records) => records[j].clone(),
            Storage::Dense(data) => match self.layout {
                Layout::Column => (0..self.width)
                    .map(|i| data[i * self.capacity + j].clone())
                    .collect(),
                _ => data[j * self.width..(j + 1) * self.width].to_vec(),
            },
        }
    }
}

impl<T> Batch<T> {
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Elements per record (k).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Records produced.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Dense backing storage for the row/column layouts; empty for lists.
    pub fn as_slice(&self) -> &[T] {
        match &self.storage {
            Storage::Dense(data) => data,
            Storage::Records(_) => &[],
        }
    }

    /// The per-record vectors of a list-layout batch.
    pub fn records(&self) -> Option<&[Vec<T>]> {
        match &self.storage {
            Storage::Records(records) => Some(records),
            Storage::Dense(_) => None,
        }
    }
}

/// Batch with labels substituted; the variant mirrors the label table
/// (no labels ⇒ raw 1-based indices).
#[derive(Clone, Debug, PartialEq)]
pub enum BatchValues {
    Index(Batch<u32>),
    Int(Batch<i64>),
    Real(Batch<f64>),
    Str(Batch<String>),
}

impl BatchValues {
    /// Records produced.
    pub fn len(&self) -> usize {
        match self {
            BatchValues::Index(b) => b.len(),
            BatchValues::Int(b) => b.len(),
            BatchValues::Real(b) => b.len(),
            BatchValues::Str(b) => b.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result of one resumable batch call.
#[derive(Clone, Debug)]
pub struct BatchResult {
    pub values: BatchValues,
    /// True when the underlying sequence ran out during this call. The
    /// truncated batch is still valid output.
    pub exhausted: bool,
}

/// A source of successive records, as 0-based label indices.
pub(crate) trait RowSource {
    fn advance(&mut self) -> Option<&[u32]>;
}

fn drive<T: Clone + Default, S: RowSource>(
    source: &mut S,
    width: usize,
    capacity: usize,
    layout: Layout,
    project: impl Fn(u32) -> T,
) -> (Batch<T>, bool) {
    let mut batch = Batch::with_capacity(layout, width, capacity);
    let mut exhausted = false;
    for _ in 0..capacity {
        match source.advance() {
            Some(row) => batch.push_record(row.iter().map(|&v| project(v))),
            None => {
                exhausted = true;
                break;
            }
        }
    }
    if exhausted && batch.len() < capacity {
        debug!(
            produced = batch.len(),
            requested = capacity,
            "sequence exhausted, truncating batch"
        );
    }
    (batch.finish(), exhausted)
}

/// Drain up to `capacity` records from `source`, projecting positional
/// indices through `labels`. `n` is the alphabet size the label table
/// must cover.
pub(crate) fn fill_batch<S: RowSource>(
    source: &mut S,
    n: usize,
    width: usize,
    capacity: usize,
    layout: Layout,
    labels: &LabelTable,
) -> Result<BatchResult> {
    labels.check_len(n)?;
    let (values, exhausted) = match labels {
        LabelTable::None => {
            let (b, e) = drive(source, width, capacity, layout, |v| v + 1);
            (BatchValues::Index(b), e)
        }
        LabelTable::Int(t) => {
            let (b, e) = drive(source, width, capacity, layout, |v| t[v as usize]);
            (BatchValues::Int(b), e)
        }
        LabelTable::Real(t) => {
            let (b, e) = drive(source, width, capacity, layout, |v| t[v as usize]);
            (BatchValues::Real(b), e)
        }
        LabelTable::Str(t) => {
            let (b, e) = drive(source, width, capacity, layout, |v| t[v as usize].clone());
            (BatchValues::Str(b), e)
        }
    };
    Ok(BatchResult { values, exhausted })
}

//! Artifact filtering for decoded content streams

use std::borrow::Borrow;
use lopdf::content::Operation;
use crate::pdf::scanner::{marked_content_tag, skip_marked_content, BDC, BMC};

/// Marked-content tag for page furniture
pub const ARTIFACT_TAG: &[u8] = b"Artifact";

/// Options controlling which regions are removed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Also remove `BDC /Artifact <<...>>` regions, not just `BMC /Artifact`
    pub match_bdc: bool,
    /// Treat an artifact region without a closing `EMC` as an error
    pub strict: bool,
}

/// Counters collected while filtering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    /// Top-level artifact regions removed
    pub regions_removed: usize,
    /// Operations dropped, openers and closers included
    pub operations_removed: usize,
    /// Artifact regions that ran to the end of the stream
    pub unterminated: usize,
}

impl FilterStats {
    /// Fold another set of counters into this one
    pub fn absorb(&mut self, other: FilterStats) {
        self.regions_removed += other.regions_removed;
        self.operations_removed += other.operations_removed;
        self.unterminated += other.unterminated;
    }
}

/// Whether `op` opens a region that should be removed
pub fn is_artifact_opener(op: &Operation, options: &FilterOptions) -> bool {
    let opener = op.operator == BMC || (options.match_bdc && op.operator == BDC);
    opener && marked_content_tag(op) == Some(ARTIFACT_TAG)
}

/// Iterator adapter that drops artifact regions
///
/// Everything that is not inside a top-level artifact region is yielded
/// unchanged and in order, including non-artifact `BMC`/`BDC` ... `EMC`
/// blocks. The region skip consumes from the same iterator, so dropped
/// operations are never seen again.
pub struct ArtifactFilter<I> {
    ops: I,
    options: FilterOptions,
    stats: FilterStats,
}

impl<I> ArtifactFilter<I>
where
    I: Iterator,
    I::Item: Borrow<Operation>,
{
    pub fn new<T>(ops: T, options: FilterOptions) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            ops: ops.into_iter(),
            options,
            stats: FilterStats::default(),
        }
    }

    /// Counters for what has been dropped so far
    pub fn stats(&self) -> FilterStats {
        self.stats
    }
}

impl<I> Iterator for ArtifactFilter<I>
where
    I: Iterator,
    I::Item: Borrow<Operation>,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let item = self.ops.next()?;
            if !is_artifact_opener(item.borrow(), &self.options) {
                return Some(item);
            }

            let skipped = skip_marked_content(&mut self.ops);
            self.stats.regions_removed += 1;
            self.stats.operations_removed += 1 + skipped.operations;
            if !skipped.closed {
                self.stats.unterminated += 1;
            }
        }
    }
}

/// Filter a whole instruction sequence and collect the result
///
/// # Example
///
/// ```
/// use lopdf::content::Operation;
/// use lopdf::Object;
/// use pdf_deartifact::pdf::{filter_operations, FilterOptions};
///
/// let ops = vec![
///     Operation::new("BMC", vec![Object::Name(b"Artifact".to_vec())]),
///     Operation::new("RG", vec![1.into(), 0.into(), 0.into()]),
///     Operation::new("EMC", vec![]),
///     Operation::new("f", vec![]),
/// ];
/// let (kept, stats) = filter_operations(ops, &FilterOptions::default());
///
/// assert_eq!(kept.len(), 1);
/// assert_eq!(stats.regions_removed, 1);
/// ```
pub fn filter_operations(ops: Vec<Operation>, options: &FilterOptions) -> (Vec<Operation>, FilterStats) {
    let mut filter = ArtifactFilter::new(ops, *options);
    let kept: Vec<Operation> = filter.by_ref().collect();
    (kept, filter.stats())
}

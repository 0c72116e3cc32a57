//! Marked-content region scanning
//!
//! Content streams delimit marked content with `BMC`/`BDC` and a matching
//! `EMC`. Regions nest arbitrarily, so finding the end of one means counting
//! every nested opener on the way.

use std::borrow::Borrow;
use lopdf::content::Operation;
use lopdf::Object;

/// Begin marked content (one operand: tag)
pub const BMC: &str = "BMC";
/// Begin marked content with a property list (two operands: tag, properties)
pub const BDC: &str = "BDC";
/// End marked content
pub const EMC: &str = "EMC";

/// True for `BMC` and `BDC`
pub fn opens_marked_content(op: &Operation) -> bool {
    op.operator == BMC || op.operator == BDC
}

/// True for `EMC`
pub fn closes_marked_content(op: &Operation) -> bool {
    op.operator == EMC
}

/// The tag of a marked-content opener, i.e. its first operand when that is a name
pub fn marked_content_tag(op: &Operation) -> Option<&[u8]> {
    match op.operands.first() {
        Some(Object::Name(name)) => Some(name.as_slice()),
        _ => None,
    }
}

/// What [`skip_marked_content`] consumed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Skipped {
    /// Operations taken from the iterator, including the closing `EMC`
    pub operations: usize,
    /// False when the iterator ran out before the matching `EMC`
    pub closed: bool,
}

/// Consume the rest of a marked-content region
///
/// `ops` must be positioned just after the opening `BMC`/`BDC`. On return it
/// points just past the matching `EMC`; nested regions are consumed along the
/// way. Depth is tracked with a counter rather than recursion so deeply nested
/// input cannot exhaust the stack.
///
/// A stream that ends before the region closes is not an error here: the scan
/// stops at the end of the iterator and reports `closed: false`.
///
/// # Example
///
/// ```
/// use lopdf::content::Operation;
/// use pdf_deartifact::pdf::skip_marked_content;
///
/// let ops = vec![
///     Operation::new("RG", vec![1.into(), 0.into(), 0.into()]),
///     Operation::new("EMC", vec![]),
///     Operation::new("f", vec![]),
/// ];
/// let mut iter = ops.into_iter();
/// let skipped = skip_marked_content(&mut iter);
///
/// assert!(skipped.closed);
/// assert_eq!(skipped.operations, 2);
/// assert_eq!(iter.next().map(|op| op.operator), Some("f".to_string()));
/// ```
pub fn skip_marked_content<I>(ops: &mut I) -> Skipped
where
    I: Iterator,
    I::Item: Borrow<Operation>,
{
    let mut depth = 1usize;
    let mut operations = 0;

    for item in ops.by_ref() {
        operations += 1;
        let op: &Operation = item.borrow();

        if closes_marked_content(op) {
            depth -= 1;
            if depth == 0 {
                return Skipped { operations, closed: true };
            }
        } else if opens_marked_content(op) {
            depth += 1;
        }
    }

    Skipped { operations, closed: false }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(operator: &str, operands: Vec<Object>) -> Operation {
        Operation::new(operator, operands)
    }

    fn name(tag: &str) -> Object {
        Object::Name(tag.as_bytes().to_vec())
    }

    #[test]
    fn test_skip_flat_region() {
        let ops = vec![
            op("RG", vec![1.into(), 0.into(), 0.into()]),
            op("EMC", vec![]),
            op("re", vec![0.into(), 0.into(), 100.into(), 100.into()]),
        ];
        let mut iter = ops.into_iter();

        let skipped = skip_marked_content(&mut iter);
        assert_eq!(skipped, Skipped { operations: 2, closed: true });

        let rest: Vec<String> = iter.map(|op| op.operator).collect();
        assert_eq!(rest, vec!["re"]);
    }

    #[test]
    fn test_skip_nested_regions() {
        // BMC /Artifact was consumed by the caller
        let ops = vec![
            op("BDC", vec![name("Span"), Object::Dictionary(lopdf::Dictionary::new())]),
            op("BMC", vec![name("Inner")]),
            op("Tj", vec![Object::string_literal("x")]),
            op("EMC", vec![]),
            op("EMC", vec![]),
            op("f", vec![]),
            op("EMC", vec![]),
            op("S", vec![]),
        ];
        let mut iter = ops.into_iter();

        let skipped = skip_marked_content(&mut iter);
        assert!(skipped.closed);
        assert_eq!(skipped.operations, 7);
        assert_eq!(iter.next().map(|op| op.operator), Some("S".to_string()));
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_skip_immediate_emc() {
        let ops = vec![op("EMC", vec![]), op("q", vec![])];
        let mut iter = ops.into_iter();

        let skipped = skip_marked_content(&mut iter);
        assert_eq!(skipped, Skipped { operations: 1, closed: true });
        assert_eq!(iter.next().map(|op| op.operator), Some("q".to_string()));
    }

    #[test]
    fn test_skip_unterminated_stops_at_end() {
        let ops = vec![
            op("BMC", vec![name("Inner")]),
            op("EMC", vec![]),
            op("f", vec![]),
        ];
        let mut iter = ops.into_iter();

        let skipped = skip_marked_content(&mut iter);
        assert_eq!(skipped, Skipped { operations: 3, closed: false });
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_skip_empty_iterator() {
        let mut iter = std::iter::empty::<Operation>();
        assert_eq!(skip_marked_content(&mut iter), Skipped::default());
    }

    #[test]
    fn test_skip_borrowed_operations() {
        let ops = vec![op("n", vec![]), op("EMC", vec![]), op("Q", vec![])];
        let mut iter = ops.iter();

        let skipped = skip_marked_content(&mut iter);
        assert!(skipped.closed);
        assert_eq!(iter.next().map(|op| op.operator.as_str()), Some("Q"));
    }

    #[test]
    fn test_skip_deep_nesting() {
        let depth = 100_000;
        let mut ops: Vec<Operation> = (0..depth).map(|_| op("BMC", vec![name("N")])).collect();
        ops.extend((0..=depth).map(|_| op("EMC", vec![])));
        ops.push(op("f", vec![]));
        let mut iter = ops.into_iter();

        let skipped = skip_marked_content(&mut iter);
        assert!(skipped.closed);
        assert_eq!(skipped.operations, 2 * depth + 1);
        assert_eq!(iter.next().map(|op| op.operator), Some("f".to_string()));
    }

    #[test]
    fn test_marked_content_tag() {
        assert_eq!(marked_content_tag(&op("BMC", vec![name("Artifact")])), Some(&b"Artifact"[..]));
        assert_eq!(marked_content_tag(&op("BMC", vec![Object::string_literal("Artifact")])), None);
        assert_eq!(marked_content_tag(&op("BMC", vec![])), None);
    }
}

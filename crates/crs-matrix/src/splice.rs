//! Parallel-array splice primitive
//!
//! CRS storage keeps column indices and values in two parallel arrays. Every
//! growth of those arrays goes through [`splice_pair`], which builds fresh
//! storage as `prefix ++ inserted ++ suffix` for both arrays at once. The
//! cost is always proportional to the full length of the sources.
//!
//! # Examples
//!
//! ```
//! use crs_matrix::splice::splice_pair;
//!
//! let (cols, vals) = splice_pair(&[0, 3], &[1.0, 2.0], 1, &[7, 8], &[5.0, 6.0]).unwrap();
//! assert_eq!(cols, vec![0, 7, 8, 3]);
//! assert_eq!(vals, vec![1.0, 5.0, 6.0, 2.0]);
//! ```

use crate::error::SpliceError;

/// Splice `new_first`/`new_second` into the parallel sources at `offset`
///
/// Returns two newly allocated vectors of length `L + k` holding elements
/// `[0, offset)` of the sources, then the `k` inserted elements, then
/// `[offset, L)`. The sources are never mutated.
///
/// # Errors
///
/// - the two sources differ in length
/// - the two inserted slices differ in length
/// - `offset` is greater than the source length
pub fn splice_pair<A: Clone, B: Clone>(
    first: &[A],
    second: &[B],
    offset: usize,
    new_first: &[A],
    new_second: &[B],
) -> Result<(Vec<A>, Vec<B>), SpliceError> {
    if first.len() != second.len() {
        return Err(SpliceError::SourceLength {
            first: first.len(),
            second: second.len(),
        });
    }
    if new_first.len() != new_second.len() {
        return Err(SpliceError::InsertLength {
            first: new_first.len(),
            second: new_second.len(),
        });
    }
    if offset > first.len() {
        return Err(SpliceError::Offset {
            offset,
            len: first.len(),
        });
    }

    Ok((
        splice_one(first, offset, new_first),
        splice_one(second, offset, new_second),
    ))
}

fn splice_one<X: Clone>(source: &[X], offset: usize, inserted: &[X]) -> Vec<X> {
    let mut out = Vec::with_capacity(source.len() + inserted.len());
    out.extend_from_slice(&source[..offset]);
    out.extend_from_slice(inserted);
    out.extend_from_slice(&source[offset..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splice_middle() {
        let (a, b) = splice_pair(&[1, 2, 3], &['a', 'b', 'c'], 2, &[9], &['z']).unwrap();
        assert_eq!(a, vec![1, 2, 9, 3]);
        assert_eq!(b, vec!['a', 'b', 'z', 'c']);
    }

    #[test]
    fn test_splice_front_and_back() {
        let (a, _) = splice_pair(&[1, 2], &[0.0, 0.0], 0, &[7, 8], &[1.0, 1.0]).unwrap();
        assert_eq!(a, vec![7, 8, 1, 2]);

        let (a, b) = splice_pair(&[1, 2], &[0.5, 0.25], 2, &[7], &[1.0]).unwrap();
        assert_eq!(a, vec![1, 2, 7]);
        assert_eq!(b, vec![0.5, 0.25, 1.0]);
    }

    #[test]
    fn test_splice_empty() {
        let (a, b) = splice_pair::<usize, f64>(&[], &[], 0, &[], &[]).unwrap();
        assert!(a.is_empty());
        assert!(b.is_empty());

        let (a, b) = splice_pair(&[4usize], &[2.0], 1, &[], &[]).unwrap();
        assert_eq!(a, vec![4]);
        assert_eq!(b, vec![2.0]);
    }

    #[test]
    fn test_splice_sources_untouched() {
        let cols = vec![1usize, 2];
        let vals = vec![1.0f32, 2.0];
        let _ = splice_pair(&cols, &vals, 1, &[5], &[5.0]).unwrap();
        assert_eq!(cols, vec![1, 2]);
        assert_eq!(vals, vec![1.0, 2.0]);
    }

    #[test]
    fn test_splice_errors() {
        assert_eq!(
            splice_pair(&[1, 2], &[1.0], 0, &[], &[]).unwrap_err(),
            SpliceError::SourceLength {
                first: 2,
                second: 1
            }
        );
        assert_eq!(
            splice_pair(&[1], &[1.0], 0, &[2, 3], &[2.0]).unwrap_err(),
            SpliceError::InsertLength {
                first: 2,
                second: 1
            }
        );
        assert_eq!(
            splice_pair(&[1], &[1.0], 2, &[], &[]).unwrap_err(),
            SpliceError::Offset { offset: 2, len: 1 }
        );
    }
}

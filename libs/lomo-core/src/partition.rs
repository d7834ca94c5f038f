//! Splitting an ordered vocabulary into lessons.

/// Split `items` into consecutive chunks of `chunk_size`.
///
/// Every chunk holds exactly `chunk_size` items except the last, which holds
/// the remainder. Order is preserved and an empty input yields no chunks.
/// A `chunk_size` of zero is treated as one.
pub fn partition<T: Clone>(items: &[T], chunk_size: usize) -> Vec<Vec<T>> {
    items
        .chunks(chunk_size.max(1))
        .map(|chunk| chunk.to_vec())
        .collect()
}

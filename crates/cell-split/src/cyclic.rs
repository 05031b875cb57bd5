//! Wrap-around indexing over a fixed-length sequence.

/// A read-only view of a slice where every integer is a valid index,
/// taken modulo the slice length.
#[derive(Debug, Clone, Copy)]
pub struct Cyclic<'a, T> {
    items: &'a [T],
}

impl<'a, T> Cyclic<'a, T> {
    /// Wraps a slice. An empty slice gives an empty view: [`Cyclic::sublist`]
    /// and [`Cyclic::edges`] yield nothing and [`Cyclic::get`] panics.
    pub fn new(items: &'a [T]) -> Self {
        Self { items }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the element at `index` modulo the length. Negative indices
    /// count back from the end.
    ///
    /// # Panics
    /// Panics if the view is empty.
    #[inline]
    pub fn get(&self, index: isize) -> &'a T {
        &self.items[self.to_index(index)]
    }

    /// Elements from `begin` (inclusive) to `end` (exclusive), walking
    /// forward and wrapping past the end as often as needed. If `end` lies
    /// before `begin` it is advanced by whole lengths until it does not.
    /// An empty view yields nothing.
    pub fn sublist(&self, begin: isize, end: isize) -> impl Iterator<Item = &'a T> + '_ {
        let len = self.items.len() as isize;
        let mut end = if len == 0 { begin } else { end };
        if begin > end {
            end += (begin - end + len - 1) / len * len;
        }
        (begin..end).map(move |i| self.get(i))
    }

    /// Iterates over the edges `(v[i], v[i + 1])`, closing the loop with
    /// `(v[n - 1], v[0])`.
    pub fn edges(&self) -> impl Iterator<Item = (&'a T, &'a T)> + '_ {
        (0..self.items.len() as isize).map(move |i| (self.get(i), self.get(i + 1)))
    }

    fn to_index(&self, index: isize) -> usize {
        index.rem_euclid(self.items.len() as isize) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_wraps_both_directions() {
        let items = [10, 20, 30];
        let cyclic = Cyclic::new(&items);
        assert_eq!(*cyclic.get(0), 10);
        assert_eq!(*cyclic.get(3), 10);
        assert_eq!(*cyclic.get(5), 30);
        assert_eq!(*cyclic.get(-1), 30);
        assert_eq!(*cyclic.get(-4), 30);
    }

    #[test]
    fn sublist_wraps_past_end() {
        let items = [0, 1, 2, 3, 4];
        let cyclic = Cyclic::new(&items);
        assert_eq!(cyclic.sublist(1, 3).copied().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(cyclic.sublist(3, 1).copied().collect::<Vec<_>>(), vec![3, 4, 0]);
        assert_eq!(cyclic.sublist(2, 2).count(), 0);
    }

    #[test]
    fn empty_view_yields_nothing() {
        let items: [u8; 0] = [];
        let cyclic = Cyclic::new(&items);
        assert!(cyclic.is_empty());
        assert_eq!(cyclic.sublist(3, 1).count(), 0);
        assert_eq!(cyclic.sublist(0, 4).count(), 0);
        assert_eq!(cyclic.edges().count(), 0);
    }

    #[test]
    fn sublist_end_far_before_begin() {
        let items = [0, 1, 2];
        let cyclic = Cyclic::new(&items);
        assert_eq!(cyclic.sublist(2, -6).copied().collect::<Vec<_>>(), vec![2]);
        assert_eq!(cyclic.sublist(1, -3).copied().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn edges_close_the_loop() {
        let items = ['a', 'b', 'c'];
        let edges: Vec<_> = Cyclic::new(&items).edges().map(|(a, b)| (*a, *b)).collect();
        assert_eq!(edges, vec![('a', 'b'), ('b', 'c'), ('c', 'a')]);
    }
}

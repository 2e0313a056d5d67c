use std::cmp::Ordering;
use std::fmt;

/// A binary min-heap ordered by a custom comparator.
///
/// Unlike `std::collections::BinaryHeap`, the comparator may borrow external data (the sweep
/// orders events by looking up site coordinates), and arbitrary elements can be removed or
/// rewritten in place.
pub struct Heap<T, F> {
    data: Vec<T>,
    cmp: F,
}
impl<T, F: Fn(&T, &T) -> Ordering> Heap<T, F> {
    pub fn new(cmp: F) -> Self {
        Heap {
            data: Vec::new(),
            cmp,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    pub fn push(&mut self, value: T) {
        self.data.push(value);
        self.sift_up(self.data.len() - 1);
    }

    pub fn pop(&mut self) -> Option<T> {
        if self.data.is_empty() {
            return None;
        }
        Some(self.remove_at(0))
    }

    /// Remove the first element, in storage order, that matches `pred`.
    pub fn remove_where(&mut self, pred: impl Fn(&T) -> bool) -> Option<T> {
        let index = self.data.iter().position(pred)?;
        Some(self.remove_at(index))
    }

    /// Rewrite the first element matching `pred` with `update`, keeping the heap ordered.
    ///
    /// Returns whether an element matched.
    pub fn update_where(&mut self, pred: impl Fn(&T) -> bool, update: impl FnOnce(&mut T)) -> bool {
        let Some(mut value) = self.remove_where(pred) else {
            return false;
        };
        update(&mut value);
        self.push(value);
        true
    }

    fn remove_at(&mut self, index: usize) -> T {
        let ret = self.data.swap_remove(index);
        if index < self.data.len() {
            let i = self.sift_up(index);
            self.sift_down(i);
        }
        ret
    }

    fn less(&self, a: usize, b: usize) -> bool {
        (self.cmp)(&self.data[a], &self.data[b]) == Ordering::Less
    }

    /// Returns the final position of the element.
    fn sift_up(&mut self, mut i: usize) -> usize {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self.less(i, parent) {
                break;
            }
            self.data.swap(i, parent);
            i = parent;
        }
        i
    }

    fn sift_down(&mut self, mut i: usize) {
        loop {
            let l = 2 * i + 1;
            let r = l + 1;
            if l >= self.data.len() {
                return;
            }
            let child = if r < self.data.len() && self.less(r, l) {
                r
            } else {
                l
            };
            if !self.less(child, i) {
                return;
            }
            self.data.swap(i, child);
            i = child;
        }
    }
}

impl<T: fmt::Debug, F> fmt::Debug for Heap<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(&self.data).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn drain<F: Fn(&u32, &u32) -> Ordering>(mut heap: Heap<u32, F>) -> Vec<u32> {
        let mut out = vec![];
        while let Some(item) = heap.pop() {
            out.push(item);
        }
        out
    }

    #[test]
    fn pops_in_order() {
        let mut heap = Heap::new(|a: &i32, b: &i32| a.cmp(b));
        assert_eq!(heap.pop(), None);
        heap.push(3);
        heap.push(2);
        heap.push(1);
        heap.push(4);
        assert_eq!(heap.len(), 4);
        assert_eq!(heap.peek(), Some(&1));
        assert_eq!(heap.pop(), Some(1));
        assert_eq!(heap.pop(), Some(2));
        assert_eq!(heap.pop(), Some(3));
        assert_eq!(heap.pop(), Some(4));
        assert_eq!(heap.len(), 0);
    }

    #[test]
    fn update_reorders() {
        let mut heap = Heap::new(u32::cmp);
        for i in [5, 1, 9, 3] {
            heap.push(i);
        }
        assert!(heap.update_where(|&x| x == 9, |x| *x = 0));
        assert!(!heap.update_where(|&x| x == 42, |x| *x = 0));
        assert_eq!(drain(heap), vec![0, 1, 3, 5]);
    }

    proptest! {
        #[test]
        fn always_sort(mut items: Vec<u32>) {
            let mut heap = Heap::new(u32::cmp);

            for item in items.iter().copied() {
                heap.push(item);
            }

            items.sort();

            prop_assert_eq!(items, drain(heap));
        }

        #[test]
        fn remove_keeps_order(mut items: Vec<u32>, pick: prop::sample::Index) {
            prop_assume!(!items.is_empty());
            let mut heap = Heap::new(u32::cmp);
            for item in items.iter().copied() {
                heap.push(item);
            }

            let target = items[pick.index(items.len())];
            prop_assert_eq!(heap.remove_where(|&x| x == target), Some(target));

            let pos = items.iter().position(|&x| x == target).unwrap();
            items.remove(pos);
            items.sort();

            prop_assert_eq!(items, drain(heap));
        }
    }
}

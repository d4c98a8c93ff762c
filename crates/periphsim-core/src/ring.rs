//! Fixed-capacity byte ring buffer with one slot sacrificed.
//!
//! `head == tail` means empty, and the buffer is full when advancing `head`
//! would land on `tail`. This keeps full and empty distinct with two cursors
//! and no separate count, so at most `N - 1` bytes are held at once.

/// Byte ring buffer with `N` slots (usable capacity `N - 1`).
#[derive(Debug, Clone)]
pub struct RingBuffer<const N: usize> {
    slots: [u8; N],
    /// Next free slot.
    head: usize,
    /// Next byte to deliver.
    tail: usize,
}

impl<const N: usize> RingBuffer<N> {
    const MIN_SLOTS: () = assert!(N >= 2, "ring buffer needs at least 2 slots");

    pub const fn new() -> Self {
        let () = Self::MIN_SLOTS;
        Self {
            slots: [0; N],
            head: 0,
            tail: 0,
        }
    }

    /// Reset both cursors and zero the contents.
    pub fn clear(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.slots.fill(0);
    }

    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    pub fn is_full(&self) -> bool {
        (self.head + 1) % N == self.tail
    }

    /// Number of bytes waiting to be popped.
    pub fn len(&self) -> usize {
        (self.head + N - self.tail) % N
    }

    /// Usable capacity.
    pub const fn capacity(&self) -> usize {
        N - 1
    }

    /// Store one byte at `head`. Returns `false` and leaves the buffer untouched when full.
    pub fn push(&mut self, byte: u8) -> bool {
        let next_head = (self.head + 1) % N;
        if next_head == self.tail {
            return false;
        }
        self.slots[self.head] = byte;
        self.head = next_head;
        true
    }

    pub fn pop(&mut self) -> Option<u8> {
        if self.is_empty() {
            return None;
        }
        let byte = self.slots[self.tail];
        self.tail = (self.tail + 1) % N;
        Some(byte)
    }

    /// Push bytes in order until the buffer fills up; returns how many were stored.
    pub fn push_slice(&mut self, bytes: &[u8]) -> usize {
        bytes.iter().take_while(|&&byte| self.push(byte)).count()
    }
}

impl<const N: usize> Default for RingBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let mut ring = RingBuffer::<8>::new();
        assert!(ring.is_empty());
        assert_eq!(ring.len(), 0);
        assert_eq!(ring.capacity(), 7);
        assert_eq!(ring.pop(), None);
    }

    #[test]
    fn one_slot_is_sacrificed() {
        let mut ring = RingBuffer::<4>::new();
        assert_eq!(ring.push_slice(&[1, 2, 3, 4, 5]), 3);
        assert!(ring.is_full());
        assert!(!ring.push(9));
        assert_eq!(ring.len(), 3);
    }

    #[test]
    fn fifo_across_wraparound() {
        let mut ring = RingBuffer::<4>::new();
        let mut next = 0u8;
        let mut expected = 0u8;
        for _ in 0..10 {
            while ring.push(next) {
                next = next.wrapping_add(1);
            }
            for _ in 0..2 {
                assert_eq!(ring.pop(), Some(expected));
                expected = expected.wrapping_add(1);
            }
        }
        while let Some(byte) = ring.pop() {
            assert_eq!(byte, expected);
            expected = expected.wrapping_add(1);
        }
        assert_eq!(expected, next);
    }

    #[test]
    fn len_tracks_pushes_minus_pops() {
        let mut ring = RingBuffer::<16>::new();
        let mut count = 0usize;
        for round in 0..40usize {
            if round % 3 == 0 {
                if ring.pop().is_some() {
                    count -= 1;
                }
            } else if ring.push(round as u8) {
                count += 1;
            }
            assert_eq!(ring.len(), count);
            assert!(ring.len() <= ring.capacity());
        }
    }

    #[test]
    fn clear_resets_cursors() {
        let mut ring = RingBuffer::<4>::new();
        ring.push_slice(&[7, 8]);
        ring.pop();
        ring.clear();
        assert!(ring.is_empty());
        assert_eq!(ring.push_slice(&[1, 2, 3]), 3);
        assert_eq!(ring.pop(), Some(1));
    }
}

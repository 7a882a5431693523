//! Bubble buffer - per-node status bitmap
//!
//! One bit per hierarchy node, packed into 32-bit words. A set bit means
//! the node is currently involved in a pending bubble (reorder) operation.
//! Worker lanes set the bit for nodes they are relocating, do their
//! hierarchy writes, then clear it; other lanes test bits before touching
//! a node to decide whether to wait, skip, or retry.
//!
//! Mutation is only ever a masked atomic OR/AND on the whole containing
//! word, never a plain read-modify-write, since unrelated lanes mutate
//! neighboring bits of the same word concurrently. Reads are snapshots:
//! a lane observing a clear bit gets no promise it stays clear. Retry and
//! wait policy belongs to the caller and must be bounded.

use std::sync::atomic::{AtomicU32, Ordering};

/// Bits per bitmap word
pub const BITS_PER_WORD: u32 = 32;

/// Per-node status bitmap shared by all worker lanes of a reorder pass
pub struct BubbleBuffer {
    words: Vec<AtomicU32>,
    node_count: u32,
}

impl BubbleBuffer {
    /// Create a zeroed bitmap covering `node_count` nodes
    pub fn new(node_count: u32) -> Self {
        let word_count = node_count.div_ceil(BITS_PER_WORD) as usize;
        let mut words = Vec::with_capacity(word_count);
        words.resize_with(word_count, || AtomicU32::new(0));
        Self { words, node_count }
    }

    /// Number of nodes covered by this bitmap
    pub fn node_count(&self) -> u32 {
        self.node_count
    }

    /// Number of backing 32-bit words
    pub fn word_count(&self) -> u32 {
        self.words.len() as u32
    }

    /// Word containing `node_index`'s bit
    #[inline]
    pub fn word_index(node_index: u32) -> u32 {
        node_index / BITS_PER_WORD
    }

    /// Bit position of `node_index` within its word
    ///
    /// The bit space is grouped into 8-bit sub-bytes within each word;
    /// the decomposition collapses to `node_index % 32`. Set, clear, and
    /// test all go through this one function, so the write and read
    /// paths cannot disagree on where a node's bit lives.
    #[inline]
    pub fn bit_offset(node_index: u32) -> u32 {
        let sub_byte = (node_index % BITS_PER_WORD) / 8;
        let bit_in_byte = node_index % 8;
        sub_byte * 8 + bit_in_byte
    }

    /// Atomically set node's status bit (mark a bubble in progress)
    ///
    /// Idempotent; safe against concurrent set/clear of sibling bits in
    /// the same word. The acquire side pairs with the previous owner's
    /// releasing `clear_bit`.
    pub fn set_bit(&self, node_index: u32) {
        debug_assert!(node_index < self.node_count);
        let mask = 1u32 << Self::bit_offset(node_index);
        self.words[Self::word_index(node_index) as usize].fetch_or(mask, Ordering::AcqRel);
    }

    /// Atomically clear node's status bit (bubble finished)
    ///
    /// Idempotent. The release makes the hierarchy writes done while the
    /// bit was held visible to the lane whose acquiring `set_bit` or
    /// `test_bit` observes the cleared bit.
    pub fn clear_bit(&self, node_index: u32) {
        debug_assert!(node_index < self.node_count);
        let mask = 1u32 << Self::bit_offset(node_index);
        self.words[Self::word_index(node_index) as usize].fetch_and(!mask, Ordering::AcqRel);
    }

    /// Test a single node's status bit
    ///
    /// Snapshot read; the value may be stale by the time the caller acts
    /// on it. Loads with acquire so a `false` observed after another
    /// lane's `clear_bit` also sees that lane's hierarchy writes.
    pub fn test_bit(&self, node_index: u32) -> bool {
        debug_assert!(node_index < self.node_count);
        let word = self.words[Self::word_index(node_index) as usize].load(Ordering::Acquire);
        (word >> Self::bit_offset(node_index)) & 1 != 0
    }

    /// Read one full word for coarse scanning ("any of these 32 bubbling?")
    ///
    /// Relaxed advisory snapshot; not consistent across concurrent
    /// writers and carries no ordering. Use `test_bit` before acting on
    /// an individual node.
    pub fn read_word(&self, word_index: u32) -> u32 {
        self.words[word_index as usize].load(Ordering::Relaxed)
    }

    /// Re-zero every word between passes
    ///
    /// Exclusive access means no lanes are live, so plain stores suffice.
    pub fn reset(&mut self) {
        for word in &mut self.words {
            *word.get_mut() = 0;
        }
        log::debug!("Reset bubble buffer ({} words)", self.words.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_offset_consistency() {
        // The write and read paths share word_index/bit_offset; pin the
        // identity they must compute.
        for n in 0..1024u32 {
            assert_eq!(BubbleBuffer::bit_offset(n), n % 32, "bit offset for {}", n);
            assert_eq!(BubbleBuffer::word_index(n), n / 32, "word index for {}", n);
        }
    }

    #[test]
    fn test_sizing() {
        assert_eq!(BubbleBuffer::new(1).word_count(), 1);
        assert_eq!(BubbleBuffer::new(32).word_count(), 1);
        assert_eq!(BubbleBuffer::new(33).word_count(), 2);
        assert_eq!(BubbleBuffer::new(40).word_count(), 2);
        assert_eq!(BubbleBuffer::new(64).word_count(), 2);
    }

    #[test]
    fn test_set_read_round_trip() {
        for n in [0u32, 7, 8, 15, 16, 23, 24, 31, 32, 63] {
            let bubbles = BubbleBuffer::new(64);
            bubbles.set_bit(n);
            assert!(bubbles.test_bit(n));
            // No sibling bit in the same word may be disturbed
            let word_base = (n / 32) * 32;
            for m in word_base..word_base + 32 {
                if m != n {
                    assert!(!bubbles.test_bit(m), "bit {} aliased onto {}", n, m);
                }
            }
        }
    }

    #[test]
    fn test_clear_read_round_trip() {
        let bubbles = BubbleBuffer::new(64);
        bubbles.set_bit(42);
        bubbles.clear_bit(42);
        assert!(!bubbles.test_bit(42));
    }

    #[test]
    fn test_set_idempotent() {
        let bubbles = BubbleBuffer::new(64);
        bubbles.set_bit(9);
        let once = (bubbles.read_word(0), bubbles.read_word(1));
        bubbles.set_bit(9);
        assert_eq!((bubbles.read_word(0), bubbles.read_word(1)), once);
    }

    #[test]
    fn test_clear_idempotent_and_noop_on_clear_bit() {
        let bubbles = BubbleBuffer::new(64);
        bubbles.set_bit(3);
        let before = bubbles.read_word(0);
        // Clearing an already-clear bit leaves the word unchanged
        bubbles.clear_bit(4);
        assert_eq!(bubbles.read_word(0), before);
        bubbles.clear_bit(3);
        let after = bubbles.read_word(0);
        bubbles.clear_bit(3);
        assert_eq!(bubbles.read_word(0), after);
        assert_eq!(after, 0);
    }

    #[test]
    fn test_word_read_consistency() {
        for n in [0u32, 5, 13, 21, 29, 31, 37, 63] {
            let bubbles = BubbleBuffer::new(64);
            bubbles.set_bit(n);
            assert_eq!(bubbles.read_word(n / 32), 1 << (n % 32));
        }
    }

    #[test]
    fn test_two_word_scenario() {
        // element_count = 40 -> 2 words; 37 % 32 = 5
        let bubbles = BubbleBuffer::new(40);
        assert_eq!(bubbles.word_count(), 2);
        bubbles.set_bit(5);
        bubbles.set_bit(37);
        assert_eq!(bubbles.read_word(0), 0x20);
        assert_eq!(bubbles.read_word(1), 0x20);
        assert!(bubbles.test_bit(5));
        assert!(bubbles.test_bit(37));
        assert!(!bubbles.test_bit(6));
    }

    #[test]
    fn test_no_cross_bit_interference_concurrent() {
        // Every lane sets one bit; many lanes share each word. All 256
        // bits must come out set in every interleaving.
        let bubbles = BubbleBuffer::new(256);
        std::thread::scope(|s| {
            for lane in 0..8u32 {
                let bubbles = &bubbles;
                s.spawn(move || {
                    for n in (lane..256).step_by(8) {
                        bubbles.set_bit(n);
                    }
                });
            }
        });
        for n in 0..256 {
            assert!(bubbles.test_bit(n), "bit {} lost under contention", n);
        }
    }

    #[test]
    fn test_concurrent_set_clear_disjoint_bits() {
        // One lane sets even bits while another clears odd bits of the
        // same words; neither may clobber the other's bits.
        let bubbles = BubbleBuffer::new(64);
        for n in (1..64).step_by(2) {
            bubbles.set_bit(n);
        }
        std::thread::scope(|s| {
            let b = &bubbles;
            s.spawn(move || {
                for n in (0..64).step_by(2) {
                    b.set_bit(n);
                }
            });
            s.spawn(move || {
                for n in (1..64).step_by(2) {
                    b.clear_bit(n);
                }
            });
        });
        for n in 0..64 {
            assert_eq!(bubbles.test_bit(n), n % 2 == 0);
        }
    }

    #[test]
    fn test_reset() {
        let mut bubbles = BubbleBuffer::new(100);
        bubbles.set_bit(0);
        bubbles.set_bit(64);
        bubbles.set_bit(99);
        bubbles.reset();
        for w in 0..bubbles.word_count() {
            assert_eq!(bubbles.read_word(w), 0);
        }
    }
}

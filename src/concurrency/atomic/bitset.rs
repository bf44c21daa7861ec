//! Branded atomic bitsets.
//!
//! This is a dense alternative to `Vec<AtomicBool>` for per-vertex flags. Words are
//! shared by neighboring vertices, so every bit write is an atomic RMW on the word;
//! two workers writing different bits of one word never lose each other's update.

use core::sync::atomic::Ordering;

use super::GhostAtomicUsize;

/// A branded, word-packed atomic bitset.
pub struct GhostAtomicBitset<'brand> {
    bits: usize,
    words: Vec<GhostAtomicUsize<'brand>>,
}

impl<'brand> GhostAtomicBitset<'brand> {
    /// Creates a new bitset with `bits` bits, all cleared.
    pub fn new(bits: usize) -> Self {
        let word_bits = usize::BITS as usize;
        let words_len = bits.div_ceil(word_bits);
        let words = (0..words_len).map(|_| GhostAtomicUsize::new(0)).collect();
        Self { bits, words }
    }

    /// Number of bits.
    pub fn len_bits(&self) -> usize {
        self.bits
    }

    /// Clears all bits.
    pub fn clear_all(&self) {
        for w in &self.words {
            w.store(0, Ordering::Relaxed);
        }
    }

    /// Returns whether `bit` is set.
    ///
    /// # Panics
    /// Panics if `bit >= len_bits()`.
    #[inline]
    pub fn is_set(&self, bit: usize) -> bool {
        assert!(bit < self.bits, "bit {bit} out of bounds for {}", self.bits);
        let (word, mask) = bit_word_mask(bit);
        (self.words[word].load(Ordering::Relaxed) & mask) != 0
    }

    /// Sets `bit`. Setting an already-set bit is a no-op, so concurrent setters of
    /// the same bit are harmless.
    ///
    /// # Panics
    /// Panics if `bit >= len_bits()`.
    #[inline]
    pub fn set(&self, bit: usize, order: Ordering) {
        assert!(bit < self.bits, "bit {bit} out of bounds for {}", self.bits);
        let (word, mask) = bit_word_mask(bit);
        self.words[word].fetch_or(mask, order);
    }

    /// Clears `bit`.
    ///
    /// # Panics
    /// Panics if `bit >= len_bits()`.
    #[inline]
    pub fn clear(&self, bit: usize, order: Ordering) {
        assert!(bit < self.bits, "bit {bit} out of bounds for {}", self.bits);
        let (word, mask) = bit_word_mask(bit);
        self.words[word].fetch_and(!mask, order);
    }

    /// Returns `true` if any bit is set.
    pub fn any(&self) -> bool {
        self.words.iter().any(|w| w.load(Ordering::Relaxed) != 0)
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.words
            .iter()
            .map(|w| w.load(Ordering::Relaxed).count_ones() as usize)
            .sum()
    }

    /// Iterates over set bits in ascending order.
    ///
    /// The iterator reads each word once; concurrent writers may or may not be
    /// observed. Callers iterate between rounds, when no worker is writing.
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + use<'_, 'brand> {
        let word_bits = usize::BITS as usize;
        self.words.iter().enumerate().flat_map(move |(wi, w)| {
            let mut word = w.load(Ordering::Relaxed);
            core::iter::from_fn(move || {
                if word == 0 {
                    return None;
                }
                let tz = word.trailing_zeros() as usize;
                word &= word - 1;
                Some(wi * word_bits + tz)
            })
        })
    }
}

#[inline(always)]
fn bit_word_mask(bit: usize) -> (usize, usize) {
    // `usize::BITS` is always a power of two (32 or 64).
    #[cfg(target_pointer_width = "64")]
    {
        (bit >> 6, 1usize << (bit & 63))
    }
    #[cfg(target_pointer_width = "32")]
    {
        (bit >> 5, 1usize << (bit & 31))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_clear_roundtrip_across_word_boundary() {
        let bits = GhostAtomicBitset::new(130);
        for b in [0, 63, 64, 65, 129] {
            assert!(!bits.is_set(b));
            bits.set(b, Ordering::Relaxed);
            assert!(bits.is_set(b));
        }
        assert_eq!(bits.count_ones(), 5);
        assert_eq!(bits.iter_ones().collect::<Vec<_>>(), vec![0, 63, 64, 65, 129]);

        bits.clear(64, Ordering::Relaxed);
        assert!(!bits.is_set(64));
        assert!(bits.is_set(63));
        assert!(bits.is_set(65));

        bits.clear_all();
        assert!(!bits.any());
        assert_eq!(bits.iter_ones().count(), 0);
    }

    #[test]
    fn iter_ones_borrows_a_solve_branded_set() {
        let ones = crate::token::SolveToken::new(|_token| {
            let bits = GhostAtomicBitset::new(70);
            bits.set(69, Ordering::Relaxed);
            bits.set(2, Ordering::Relaxed);
            let ones: Vec<usize> = bits.iter_ones().collect();
            ones
        });
        assert_eq!(ones, vec![2, 69]);
    }

    #[test]
    fn concurrent_setters_on_shared_word_do_not_lose_bits() {
        let bits = GhostAtomicBitset::new(64);
        std::thread::scope(|s| {
            for t in 0..4 {
                let bits = &bits;
                s.spawn(move || {
                    for b in (t..64).step_by(4) {
                        bits.set(b, Ordering::Relaxed);
                    }
                });
            }
        });
        assert_eq!(bits.count_ones(), 64);
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_panics() {
        let bits = GhostAtomicBitset::new(10);
        bits.set(10, Ordering::Relaxed);
    }
}

use std::fmt;

/// Bit slot assigned to a light group.
pub type GroupBit = u8;

pub const WORD_BITS: u32 = 32;
pub const MASK_WORDS: usize = 4;

/// Fixed 128-bit group mask stored as four 32-bit words, word 0 holding the lowest slots.
///
/// Slot `b` lives in word `b / 32` at shift `(b + 1) % 32`. The shift is one higher than the
/// slot's offset within its word and wraps, so slot 31 lands on shift 0 of word 0 and the
/// default slot 127 lands on shift 0 of word 3. Shaders read the same layout.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PackedMask([u32; MASK_WORDS]);

impl PackedMask {
    pub const EMPTY: PackedMask = PackedMask([0; MASK_WORDS]);

    pub const fn from_words(words: [u32; MASK_WORDS]) -> Self {
        Self(words)
    }

    #[inline]
    pub const fn words(&self) -> [u32; MASK_WORDS] {
        self.0
    }

    #[inline]
    fn slot(bit: GroupBit) -> (usize, u32) {
        let bit = bit as u32;
        ((bit / WORD_BITS) as usize, (bit + 1) % WORD_BITS)
    }

    /// Set slot `bit`. Slots past the last word are ignored.
    #[inline]
    pub fn set(&mut self, bit: GroupBit) {
        let (index, shift) = Self::slot(bit);
        if index >= MASK_WORDS {
            return;
        }
        self.0[index] |= 1 << shift;
    }

    #[inline]
    pub fn contains(&self, bit: GroupBit) -> bool {
        let (index, shift) = Self::slot(bit);
        index < MASK_WORDS && self.0[index] & (1 << shift) != 0
    }

    #[inline]
    pub fn clear(&mut self) {
        self.0 = [0; MASK_WORDS];
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|w| *w == 0)
    }

    pub fn count_ones(&self) -> u32 {
        self.0.iter().map(|w| w.count_ones()).sum()
    }

    pub fn is_subset_of(&self, other: &PackedMask) -> bool {
        self.0.iter().zip(other.0.iter()).all(|(a, b)| a & !b == 0)
    }

    /// Bitwise test a render pass uses to decide whether a light reaches a material.
    pub fn intersects(&self, other: &PackedMask) -> bool {
        self.0.iter().zip(other.0.iter()).any(|(a, b)| a & b != 0)
    }
}

impl fmt::Display for PackedMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [w0, w1, w2, w3] = self.0;
        write!(f, "{:08x} {:08x} {:08x} {:08x}", w0, w1, w2, w3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_shift_is_offset_by_one() {
        let mut m = PackedMask::EMPTY;
        m.set(0);
        assert_eq!(m.words(), [1 << 1, 0, 0, 0]);

        let mut m = PackedMask::EMPTY;
        m.set(31);
        assert_eq!(m.words(), [1, 0, 0, 0]);

        let mut m = PackedMask::EMPTY;
        m.set(32);
        assert_eq!(m.words(), [0, 1 << 1, 0, 0]);

        let mut m = PackedMask::EMPTY;
        m.set(127);
        assert_eq!(m.words(), [0, 0, 0, 1]);
    }

    #[test]
    fn every_slot_is_distinct() {
        let mut seen = PackedMask::EMPTY;
        for bit in 0..=127u8 {
            assert!(!seen.contains(bit), "slot {} collides", bit);
            seen.set(bit);
        }
        assert_eq!(seen.count_ones(), 128);
    }

    #[test]
    fn out_of_range_slot_is_ignored() {
        let mut m = PackedMask::EMPTY;
        m.set(128);
        m.set(255);
        assert!(m.is_empty());
        assert!(!m.contains(200));
    }

    #[test]
    fn subset_and_intersection() {
        let a = PackedMask::from_words([2, 0, 0, 1]);
        let b = PackedMask::from_words([2, 4, 0, 1]);
        assert!(a.is_subset_of(&b));
        assert!(!b.is_subset_of(&a));
        assert!(a.intersects(&b));
        assert!(!PackedMask::EMPTY.intersects(&b));
        assert!(PackedMask::EMPTY.is_subset_of(&a));
    }

    #[test]
    fn display_lists_words_low_first() {
        let m = PackedMask::from_words([2, 0, 0, 1]);
        assert_eq!(m.to_string(), "00000002 00000000 00000000 00000001");
    }
}

use alloc::vec::Vec;

const WORD_BITS: usize = u64::BITS as usize;

/// A growable set of small non-negative integers, one bit per value.
///
/// Sampling treats it as a sparse domain: positions are drawn over the whole
/// backing capacity until one lands on a member.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BitSet {
    words: Vec<u64>,
    len: usize,
}

impl BitSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty set able to hold values below `bits` without
    /// reallocating.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            words: alloc::vec![0; bits.div_ceil(WORD_BITS)],
            len: 0,
        }
    }

    /// Number of values in the set.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of representable values, a multiple of 64.
    pub fn capacity(&self) -> usize {
        self.words.len() * WORD_BITS
    }

    pub fn contains(&self, value: usize) -> bool {
        self.words
            .get(value / WORD_BITS)
            .is_some_and(|word| word & (1 << (value % WORD_BITS)) != 0)
    }

    /// Add `value`, growing the backing storage if needed. Returns whether it
    /// was newly inserted.
    pub fn insert(&mut self, value: usize) -> bool {
        let index = value / WORD_BITS;
        if index >= self.words.len() {
            self.words.resize(index + 1, 0);
        }
        let mask = 1 << (value % WORD_BITS);
        let fresh = self.words[index] & mask == 0;
        self.words[index] |= mask;
        self.len += usize::from(fresh);
        fresh
    }

    /// Remove `value`. Returns whether it was present. Capacity is kept.
    pub fn remove(&mut self, value: usize) -> bool {
        let Some(word) = self.words.get_mut(value / WORD_BITS) else {
            return false;
        };
        let mask = 1 << (value % WORD_BITS);
        let present = *word & mask != 0;
        *word &= !mask;
        self.len -= usize::from(present);
        present
    }

    /// Iterate over the members in increasing order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(index, &word)| {
            let mut rest = word;
            core::iter::from_fn(move || {
                if rest == 0 {
                    return None;
                }
                let bit = rest.trailing_zeros() as usize;
                rest &= rest - 1;
                Some(index * WORD_BITS + bit)
            })
        })
    }
}

impl FromIterator<usize> for BitSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Extend<usize> for BitSet {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

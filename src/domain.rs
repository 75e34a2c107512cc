//! Uniform sampling from collections.
//!
//! Every collection is seen as an index space `0..size()` plus a projection
//! from index to element. Dense domains (slices, arrays, tuples, ordered
//! containers) project every index to an element, so one bounded draw is
//! enough. Sparse domains ([`BitSet`], `str`) leave some indices vacant and are
//! sampled by drawing over the whole index space until an occupied index comes
//! up.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;

use crate::bitset::BitSet;
use crate::error::{Error, Result};
use crate::generator::GeneratorCore;
use crate::uniform::UniformInt;

/// A collection that can be sampled uniformly by a [`GeneratorCore`].
pub trait Domain {
    type Item;

    /// Size of the index space draws are made over. For sparse domains this
    /// is the backing capacity, not the number of elements.
    fn size(&self) -> usize;

    /// Map an index in `0..size()` to its element, or `None` for a vacant
    /// slot.
    fn project(&self, index: usize) -> Option<Self::Item>;

    /// Whether no index projects to an element.
    fn is_empty(&self) -> bool;

    /// Draw one element uniformly.
    ///
    /// Fails with [`Error::EmptyDomain`] instead of looping forever when the
    /// domain has no elements.
    fn sample(&self, core: GeneratorCore) -> Result<(Self::Item, GeneratorCore)> {
        if self.is_empty() {
            return Err(Error::EmptyDomain);
        }
        let last = self.size() - 1;
        let mut core = core;
        let mut attempts = 1u32;
        loop {
            let (index, next) = usize::draw_inclusive(core, 0, last);
            core = next;
            if let Some(item) = self.project(index) {
                if attempts > 1 {
                    tracing::trace!(attempts, size = self.size(), "sparse sample accepted");
                }
                return Ok((item, core));
            }
            attempts = attempts.saturating_add(1);
        }
    }
}

impl<'a, T> Domain for &'a [T] {
    type Item = &'a T;

    fn size(&self) -> usize {
        self.len()
    }

    fn project(&self, index: usize) -> Option<Self::Item> {
        self.get(index)
    }

    fn is_empty(&self) -> bool {
        <[T]>::is_empty(self)
    }
}

impl<'a, T, const N: usize> Domain for &'a [T; N] {
    type Item = &'a T;

    fn size(&self) -> usize {
        N
    }

    fn project(&self, index: usize) -> Option<Self::Item> {
        self.get(index)
    }

    fn is_empty(&self) -> bool {
        N == 0
    }
}

impl<'a, T> Domain for &'a Vec<T> {
    type Item = &'a T;

    fn size(&self) -> usize {
        self.len()
    }

    fn project(&self, index: usize) -> Option<Self::Item> {
        self.get(index)
    }

    fn is_empty(&self) -> bool {
        Vec::is_empty(self)
    }
}

/// Uniform over characters: byte positions are drawn until one starts a
/// character, and every character has exactly one starting position.
impl Domain for &str {
    type Item = char;

    fn size(&self) -> usize {
        self.len()
    }

    fn project(&self, index: usize) -> Option<char> {
        self.get(index..)?.chars().next()
    }

    fn is_empty(&self) -> bool {
        str::is_empty(self)
    }
}

impl Domain for &BitSet {
    type Item = usize;

    fn size(&self) -> usize {
        self.capacity()
    }

    fn project(&self, index: usize) -> Option<usize> {
        self.contains(index).then_some(index)
    }

    fn is_empty(&self) -> bool {
        BitSet::is_empty(self)
    }
}

// Ordered and hashed containers do not expose their storage, so they are
// indexed by position in iteration order.

impl<'a, K, V> Domain for &'a BTreeMap<K, V> {
    type Item = (&'a K, &'a V);

    fn size(&self) -> usize {
        self.len()
    }

    fn project(&self, index: usize) -> Option<Self::Item> {
        self.iter().nth(index)
    }

    fn is_empty(&self) -> bool {
        BTreeMap::is_empty(self)
    }
}

impl<'a, T> Domain for &'a BTreeSet<T> {
    type Item = &'a T;

    fn size(&self) -> usize {
        self.len()
    }

    fn project(&self, index: usize) -> Option<Self::Item> {
        self.iter().nth(index)
    }

    fn is_empty(&self) -> bool {
        BTreeSet::is_empty(self)
    }
}

#[cfg(feature = "std")]
impl<'a, K, V, S> Domain for &'a std::collections::HashMap<K, V, S> {
    type Item = (&'a K, &'a V);

    fn size(&self) -> usize {
        self.len()
    }

    fn project(&self, index: usize) -> Option<Self::Item> {
        self.iter().nth(index)
    }

    fn is_empty(&self) -> bool {
        std::collections::HashMap::is_empty(self)
    }
}

#[cfg(feature = "std")]
impl<'a, T, S> Domain for &'a std::collections::HashSet<T, S> {
    type Item = &'a T;

    fn size(&self) -> usize {
        self.len()
    }

    fn project(&self, index: usize) -> Option<Self::Item> {
        self.iter().nth(index)
    }

    fn is_empty(&self) -> bool {
        std::collections::HashSet::is_empty(self)
    }
}

impl<'a, T> Domain for &'a (T,) {
    type Item = &'a T;

    fn size(&self) -> usize {
        1
    }

    fn project(&self, index: usize) -> Option<Self::Item> {
        (index == 0).then_some(&self.0)
    }

    fn is_empty(&self) -> bool {
        false
    }

    fn sample(&self, core: GeneratorCore) -> Result<(Self::Item, GeneratorCore)> {
        Ok((&self.0, core))
    }
}

impl<'a, T> Domain for &'a (T, T) {
    type Item = &'a T;

    fn size(&self) -> usize {
        2
    }

    fn project(&self, index: usize) -> Option<Self::Item> {
        [&self.0, &self.1].get(index).copied()
    }

    fn is_empty(&self) -> bool {
        false
    }

    fn sample(&self, core: GeneratorCore) -> Result<(Self::Item, GeneratorCore)> {
        let (first, core) = core.draw::<bool>();
        Ok((if first { &self.0 } else { &self.1 }, core))
    }
}

impl<'a, T> Domain for &'a (T, T, T) {
    type Item = &'a T;

    fn size(&self) -> usize {
        3
    }

    fn project(&self, index: usize) -> Option<Self::Item> {
        [&self.0, &self.1, &self.2].get(index).copied()
    }

    fn is_empty(&self) -> bool {
        false
    }

    fn sample(&self, core: GeneratorCore) -> Result<(Self::Item, GeneratorCore)> {
        let (index, core) = u8::draw_inclusive(core, 0, 2);
        Ok(match index {
            0 => (&self.0, core),
            1 => (&self.1, core),
            _ => (&self.2, core),
        })
    }
}

macro_rules! tuple_domain {
    (@elem $idx:tt $ty:ident) => { $ty };
    ($($len:literal => ($($idx:tt),+);)*) => {$(
        impl<'a, T> Domain for &'a ($(tuple_domain!(@elem $idx T),)+) {
            type Item = &'a T;

            fn size(&self) -> usize {
                $len
            }

            fn project(&self, index: usize) -> Option<Self::Item> {
                [$(&self.$idx),+].get(index).copied()
            }

            fn is_empty(&self) -> bool {
                false
            }
        }
    )*};
}

tuple_domain! {
    4 => (0, 1, 2, 3);
    5 => (0, 1, 2, 3, 4);
    6 => (0, 1, 2, 3, 4, 5);
    7 => (0, 1, 2, 3, 4, 5, 6);
    8 => (0, 1, 2, 3, 4, 5, 6, 7);
}

impl GeneratorCore {
    /// Draw one element of `domain` uniformly.
    ///
    /// # Examples
    /// ```
    /// use jsf_rng::{seeds, BitSet, GeneratorCore, MixingStrength};
    ///
    /// let core = GeneratorCore::from_seeds(&seeds![3u16, 4u16], MixingStrength::Medium)?;
    /// let (suit, core) = core.sample(&["clubs", "diamonds", "hearts", "spades"])?;
    /// let (letter, core) = core.sample("añb")?;
    /// let primes: BitSet = [2, 3, 5, 7].into_iter().collect();
    /// let (prime, _) = core.sample(&primes)?;
    /// assert!(primes.contains(prime));
    /// # let _ = (suit, letter);
    /// # Ok::<(), jsf_rng::Error>(())
    /// ```
    pub fn sample<D: Domain>(self, domain: D) -> Result<(D::Item, Self)> {
        domain.sample(self)
    }
}

use std::hash::{BuildHasher, Hash, Hasher};

const SEED: u64 = 41;
const FACTOR: u64 = 59;

/// Order-sensitive, non-cryptographic hasher: starts at a fixed seed and folds
/// every written word as `state * 59 + word`, wrapping on overflow.
///
/// Integers are folded by value, so the result doesn't depend on the host's
/// endianness.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeededHasher {
    state: u64,
}

impl Default for SeededHasher {
    fn default() -> Self {
        Self { state: SEED }
    }
}

impl SeededHasher {
    #[inline]
    fn fold(&mut self, word: u64) {
        self.state = self.state.wrapping_mul(FACTOR).wrapping_add(word);
    }
}

impl Hasher for SeededHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for chunk in bytes.chunks(8) {
            let mut word = [0u8; 8];
            word[..chunk.len()].copy_from_slice(chunk);
            self.fold(u64::from_le_bytes(word));
        }
    }

    fn write_u8(&mut self, i: u8) {
        self.fold(u64::from(i));
    }

    fn write_u16(&mut self, i: u16) {
        self.fold(u64::from(i));
    }

    fn write_u32(&mut self, i: u32) {
        self.fold(u64::from(i));
    }

    fn write_u64(&mut self, i: u64) {
        self.fold(i);
    }

    #[allow(clippy::cast_possible_truncation)]
    fn write_u128(&mut self, i: u128) {
        self.fold(i as u64);
        self.fold((i >> 64) as u64);
    }

    fn write_usize(&mut self, i: usize) {
        self.fold(i as u64);
    }
}

/// [`BuildHasher`] for using [`SeededHasher`] in hash maps and sets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildSeededHasher;

impl BuildHasher for BuildSeededHasher {
    type Hasher = SeededHasher;

    fn build_hasher(&self) -> Self::Hasher {
        SeededHasher::default()
    }
}

/// Hash of every declared field, in declaration order.
///
/// Built on the model's `Hash` impl, so `a == b` implies equal hashes.
#[must_use]
pub fn structural_hash<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = SeededHasher::default();
    value.hash(&mut hasher);
    hasher.finish()
}

//! Incremental polynomial hashing.
//!
//! A [`HashFolder`] keeps a running 32-bit value and a prime multiplier. Every folded contribution updates the value as `value = multiplier * value + contribution`, with wrapping arithmetic, which makes the result sensitive to the order of contributions. Nodes and trees of this crate build their structural hash codes with it.

use core::hash::{Hash, Hasher};
use std::collections::hash_map::DefaultHasher;
use rand::Rng;
use thiserror::Error;
use crate::ErrorKind;

/// The primes from 31 to 601 inclusive, from which multipliers of randomly seeded folders are drawn.
pub const PRIMES: [i32; 100] = [
    31, 37, 41, 43, 47, 53, 59, 61, 67, 71,
    73, 79, 83, 89, 97, 101, 103, 107, 109, 113,
    127, 131, 137, 139, 149, 151, 157, 163, 167, 173,
    179, 181, 191, 193, 197, 199, 211, 223, 227, 229,
    233, 239, 241, 251, 257, 263, 269, 271, 277, 281,
    283, 293, 307, 311, 313, 317, 331, 337, 347, 349,
    353, 359, 367, 373, 379, 383, 389, 397, 401, 409,
    419, 421, 431, 433, 439, 443, 449, 457, 461, 463,
    467, 479, 487, 491, 499, 503, 509, 521, 523, 541,
    547, 557, 563, 569, 571, 577, 587, 593, 599, 601,
];

/// The error type for constructing and feeding a [`HashFolder`].
///
/// [`HashFolder`]: struct.HashFolder.html " "
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Error)]
pub enum HashFolderError {
    /// The initial value was zero or negative.
    #[error("{0} is not positive")]
    NotPositive(i32),
    /// The multiplier was not a prime number.
    #[error("{0} is not a valid prime")]
    NotPrime(i32),
    /// An iterator was required but none was supplied.
    #[error("no iterator was supplied")]
    AbsentIterator,
}
impl HashFolderError {
    /// Returns the category of the error.
    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidArgument
    }
}

/// An accumulator folding hash contributions into a running polynomial hash value.
///
/// # Example
/// ```rust
/// use kindling::HashFolder;
///
/// let mut folder = HashFolder::with_multiplier(1, 31).unwrap();
/// folder.fold(None::<&str>);
/// assert_eq!(folder.hash_value(), 31);
/// folder.fold_code(1);
/// assert_eq!(folder.hash_value(), 962);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct HashFolder {
    multiplier: i32,
    value: i32,
}
impl HashFolder {
    /// Creates a folder with the initial value 1 and a multiplier picked at random from [`PRIMES`].
    ///
    /// [`PRIMES`]: constant.PRIMES.html " "
    #[inline]
    pub fn new() -> Self {
        Self {
            multiplier: random_prime(),
            value: 1,
        }
    }
    /// Creates a folder with the specified initial value and a multiplier picked at random from [`PRIMES`].
    ///
    /// # Errors
    /// Fails with `NotPositive` if `initial` is less than 1.
    ///
    /// [`PRIMES`]: constant.PRIMES.html " "
    pub fn with_initial(initial: i32) -> Result<Self, HashFolderError> {
        Ok(Self {
            multiplier: random_prime(),
            value: check_positive(initial)?,
        })
    }
    /// Creates a folder with the specified initial value and multiplier.
    ///
    /// # Errors
    /// Fails with `NotPositive` if `initial` is less than 1 and with `NotPrime` if `multiplier` is not a prime number.
    pub fn with_multiplier(initial: i32, multiplier: i32) -> Result<Self, HashFolderError> {
        let value = check_positive(initial)?;
        if !is_prime(multiplier) {
            return Err(HashFolderError::NotPrime(multiplier));
        }
        Ok(Self { multiplier, value })
    }
    /// Skips validation, for multipliers known to be prime.
    #[inline(always)]
    pub(crate) const fn from_parts(value: i32, multiplier: i32) -> Self {
        Self { multiplier, value }
    }

    /// Folds the hash of an object into the value. An absent object contributes 0.
    ///
    /// Equal objects make equal contributions, even across independently constructed folders.
    #[inline]
    pub fn fold<H: Hash + ?Sized>(&mut self, object: Option<&H>) {
        self.fold_code(object.map_or(0, hash_of));
    }
    /// Folds a precomputed hash code into the value.
    #[inline]
    pub fn fold_code(&mut self, code: i32) {
        self.value = self.multiplier.wrapping_mul(self.value).wrapping_add(code);
    }
    /// Folds every element of a collection in iteration order. Does nothing if the collection is absent.
    pub fn bulk_fold<I>(&mut self, items: Option<I>)
    where
        I: IntoIterator,
        I::Item: Hash,
    {
        if let Some(items) = items {
            for item in items {
                self.fold(Some(&item));
            }
        }
    }
    /// Folds every element produced by an iterator.
    ///
    /// # Errors
    /// Unlike [`bulk_fold`], an absent iterator is not a no-op and fails with `AbsentIterator`.
    ///
    /// [`bulk_fold`]: #method.bulk_fold " "
    pub fn bulk_fold_iter<I>(&mut self, iter: Option<I>) -> Result<(), HashFolderError>
    where
        I: Iterator,
        I::Item: Hash,
    {
        let iter = iter.ok_or(HashFolderError::AbsentIterator)?;
        for item in iter {
            self.fold(Some(&item));
        }
        Ok(())
    }

    /// Returns the current hash value.
    #[inline(always)]
    pub const fn hash_value(&self) -> i32 {
        self.value
    }
    /// Returns the prime multiplier.
    #[inline(always)]
    pub const fn multiplier(&self) -> i32 {
        self.multiplier
    }
}
impl Default for HashFolder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Returns `true` if `n` is a prime number. Negative numbers, 0 and 1 are not.
pub const fn is_prime(n: i32) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut divisor = 3_i32;
    while let Some(square) = divisor.checked_mul(divisor) {
        if square > n {
            break;
        }
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

const fn check_positive(value: i32) -> Result<i32, HashFolderError> {
    if value < 1 {
        Err(HashFolderError::NotPositive(value))
    } else {
        Ok(value)
    }
}

fn random_prime() -> i32 {
    PRIMES[rand::thread_rng().gen_range(0..PRIMES.len())]
}

/// `DefaultHasher::new` uses fixed keys, so digests are stable within one build.
fn hash_of<H: Hash + ?Sized>(object: &H) -> i32 {
    let mut hasher = DefaultHasher::new();
    object.hash(&mut hasher);
    let digest = hasher.finish();
    (digest ^ (digest >> 32)) as i32
}

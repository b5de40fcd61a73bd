use core::{error, fmt, slice};

use subtle::{Choice, ConstantTimeEq};
#[cfg(feature = "zeroize")]
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{backend::FieldElement, precomp::Precomputed};

/// The size in bytes of a Poly1305 key.
pub const KEY_SIZE: usize = 32;

/// The size in bytes of a Poly1305 block.
pub const BLOCK_SIZE: usize = 16;

/// The size in bytes of a Poly1305 tag.
pub const TAG_SIZE: usize = 16;

/// Clears the bits of `r` that RFC 8439 requires to be zero.
const CLAMP: u128 = 0x0fff_fffc_0fff_fffc_0fff_fffc_0fff_ffff;

/// The length of the key is not [`KEY_SIZE`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct InvalidKeyLength;

impl fmt::Display for InvalidKeyLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid key length")
    }
}

impl error::Error for InvalidKeyLength {}

/// A Poly1305 one-time key.
///
/// The first half is the multiplier `r`, clamped when the key
/// is created. The second half is the pad `s` added to the
/// final result.
#[derive(Clone)]
pub struct Key {
    pub(crate) r: u128,
    pub(crate) s: u128,
}

impl Key {
    /// Creates a Poly1305 key.
    #[allow(
        clippy::indexing_slicing,
        reason = "The compiler can prove the slices are in bounds."
    )]
    pub fn new(key: &[u8; KEY_SIZE]) -> Self {
        let mut r = [0u8; 16];
        let mut s = [0u8; 16];
        r.copy_from_slice(&key[..16]);
        s.copy_from_slice(&key[16..]);
        Self {
            r: u128::from_le_bytes(r) & CLAMP,
            s: u128::from_le_bytes(s),
        }
    }

    /// Creates a Poly1305 key from a slice.
    ///
    /// It returns [`InvalidKeyLength`] if `key` is not exactly
    /// [`KEY_SIZE`] bytes long.
    pub fn from_slice(key: &[u8]) -> Result<Self, InvalidKeyLength> {
        let key: &[u8; KEY_SIZE] = key.try_into().map_err(|_| InvalidKeyLength)?;
        Ok(Self::new(key))
    }
}

impl TryFrom<&[u8]> for Key {
    type Error = InvalidKeyLength;

    #[inline]
    fn try_from(key: &[u8]) -> Result<Self, Self::Error> {
        Self::from_slice(key)
    }
}

impl From<&[u8; KEY_SIZE]> for Key {
    #[inline]
    fn from(key: &[u8; KEY_SIZE]) -> Self {
        Self::new(key)
    }
}

#[cfg(feature = "zeroize")]
#[cfg_attr(docsrs, doc(cfg(feature = "zeroize")))]
impl ZeroizeOnDrop for Key {}

impl Drop for Key {
    fn drop(&mut self) {
        #[cfg(feature = "zeroize")]
        {
            self.r.zeroize();
            self.s.zeroize();
        }
        #[cfg(not(feature = "zeroize"))]
        {
            self.r ^= self.r;
            self.s ^= self.s;
        }
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key").finish_non_exhaustive()
    }
}

/// An implementation of Poly1305.
///
/// Poly1305 evaluates the message as a polynomial over the
/// prime field `GF(2¹³⁰ - 5)`. Each 16-byte chunk of the
/// message, with a one bit appended above its last byte, is a
/// coefficient; the polynomial is evaluated at the clamped
/// `r`:
///
/// ```text
/// acc = (acc + chunk) * r mod 2^130 - 5
/// ```
///
/// The tag is `(acc + s) mod 2^128`.
///
/// An instance holds only the key material, so [`tag`] takes
/// `&self` and can be called any number of times. It is still
/// the caller's job to use each key for a single message.
///
/// For more information on Poly1305, see [RFC 8439].
///
/// [`tag`]: Poly1305::tag
/// [RFC 8439]: https://datatracker.ietf.org/doc/html/rfc8439
#[derive(Clone)]
pub struct Poly1305<B = Precomputed> {
    state: B,
    s: u128,
}

impl<B: Backend> Poly1305<B> {
    /// Creates an instance of Poly1305.
    #[inline]
    pub fn new(key: &Key) -> Self {
        Self {
            state: B::new(key),
            s: key.s,
        }
    }

    /// Creates an instance of Poly1305 from a key slice.
    ///
    /// It returns [`InvalidKeyLength`] if `key` is not exactly
    /// [`KEY_SIZE`] bytes long.
    pub fn new_from_slice(key: &[u8]) -> Result<Self, InvalidKeyLength> {
        let key = Key::from_slice(key)?;
        Ok(Self::new(&key))
    }

    /// Computes the authentication tag for `msg`.
    ///
    /// The message may have any length, including zero.
    #[allow(
        clippy::indexing_slicing,
        reason = "`tail` is shorter than `BLOCK_SIZE`."
    )]
    pub fn tag(&self, msg: &[u8]) -> Tag {
        let (head, tail) = as_blocks(msg);
        let mut acc = FieldElement::default();
        if !head.is_empty() {
            acc = self.state.update_blocks(acc, head);
        }
        if !tail.is_empty() {
            let mut block = [0u8; BLOCK_SIZE];
            block[..tail.len()].copy_from_slice(tail);
            block[tail.len()] = 1;
            acc = self.state.update_padded(acc, &block);
        }
        Tag(acc.finalize(self.s))
    }

    /// Reports whether the authentication tag for `msg` matches
    /// `expected_tag`.
    #[inline]
    pub fn verify(&self, msg: &[u8], expected_tag: &Tag) -> Choice {
        self.tag(msg).ct_eq(expected_tag)
    }
}

#[cfg(feature = "zeroize")]
#[cfg_attr(docsrs, doc(cfg(feature = "zeroize")))]
impl<T> ZeroizeOnDrop for Poly1305<T> {}

impl<T> Drop for Poly1305<T> {
    fn drop(&mut self) {
        #[cfg(feature = "zeroize")]
        {
            self.s.zeroize();
        }
        #[cfg(not(feature = "zeroize"))]
        {
            self.s ^= self.s;
        }
    }
}

impl<T> fmt::Debug for Poly1305<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Poly1305").finish_non_exhaustive()
    }
}

/// A Poly1305 backend.
///
/// See [`Lite`][crate::Lite] or [`Precomputed`].
pub trait Backend: Sealed {}

mod private {
    use super::{FieldElement, Key, BLOCK_SIZE};

    #[doc(hidden)]
    pub trait Sealed: Clone + Sized {
        fn new(key: &Key) -> Self;
        fn update_blocks(&self, acc: FieldElement, blocks: &[[u8; BLOCK_SIZE]]) -> FieldElement;
        fn update_padded(&self, acc: FieldElement, block: &[u8; BLOCK_SIZE]) -> FieldElement;
    }
}
pub(crate) use private::Sealed;

/// An authentication tag.
#[derive(Copy, Clone, Debug)]
pub struct Tag(pub(crate) [u8; TAG_SIZE]);

impl ConstantTimeEq for Tag {
    #[inline]
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl From<Tag> for [u8; TAG_SIZE] {
    #[inline]
    fn from(tag: Tag) -> Self {
        tag.0
    }
}

impl From<[u8; TAG_SIZE]> for Tag {
    #[inline]
    fn from(tag: [u8; TAG_SIZE]) -> Self {
        Self(tag)
    }
}

impl AsRef<[u8]> for Tag {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// See https://doc.rust-lang.org/std/primitive.slice.html#method.as_chunks
const fn as_blocks(blocks: &[u8]) -> (&[[u8; BLOCK_SIZE]], &[u8]) {
    #[allow(clippy::arithmetic_side_effects)]
    let len_rounded_down = (blocks.len() / BLOCK_SIZE) * BLOCK_SIZE;
    // SAFETY: The rounded-down value is always the same or
    // smaller than the original length, and thus must be
    // in-bounds of the slice.
    let (head, tail) = unsafe { blocks.split_at_unchecked(len_rounded_down) };
    let new_len = head.len() / BLOCK_SIZE;
    // SAFETY: We cast a slice of `new_len * N` elements into
    // a slice of `new_len` many `N` elements chunks.
    let head = unsafe { slice::from_raw_parts(head.as_ptr().cast(), new_len) };
    (head, tail)
}

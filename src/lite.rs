#[cfg(feature = "zeroize")]
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{
    backend::FieldElement,
    poly::{Backend, Key, Sealed, BLOCK_SIZE},
};

/// Poly1305 without precomputed powers of `r`.
pub struct Lite {
    /// The clamped key.
    r: FieldElement,
}

impl Backend for Lite {}
impl Sealed for Lite {
    #[inline]
    fn new(key: &Key) -> Self {
        Self {
            r: FieldElement::from_u128(key.r),
        }
    }

    #[allow(clippy::arithmetic_side_effects)]
    fn update_blocks(
        &self,
        mut acc: FieldElement,
        blocks: &[[u8; BLOCK_SIZE]],
    ) -> FieldElement {
        for block in blocks {
            acc = (acc + FieldElement::from_block(block)) * self.r;
        }
        acc
    }

    #[allow(clippy::arithmetic_side_effects)]
    #[inline]
    fn update_padded(&self, acc: FieldElement, block: &[u8; BLOCK_SIZE]) -> FieldElement {
        (acc + FieldElement::from_padded(block)) * self.r
    }
}

impl Clone for Lite {
    #[inline]
    fn clone(&self) -> Self {
        Self { r: self.r }
    }

    #[inline]
    fn clone_from(&mut self, other: &Self) {
        self.r = other.r;
    }
}

#[cfg(feature = "zeroize")]
#[cfg_attr(docsrs, doc(cfg(feature = "zeroize")))]
impl ZeroizeOnDrop for Lite {}

impl Drop for Lite {
    fn drop(&mut self) {
        #[cfg(feature = "zeroize")]
        {
            self.r.zeroize();
        }
        #[cfg(not(feature = "zeroize"))]
        {
            self.r = FieldElement::default();
        }
    }
}

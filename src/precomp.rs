#[cfg(feature = "zeroize")]
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{
    backend::FieldElement,
    poly::{Backend, Key, Sealed, BLOCK_SIZE},
};

/// The number of blocks folded per reduction.
const LANES: usize = 4;

/// Poly1305 with precomputed powers of `r`.
///
/// This is faster than [`Lite`][crate::Lite] for long messages
/// since it only reduces once every four blocks, but is four
/// times larger.
pub struct Precomputed {
    /// `[r^4, r^3, r^2, r]`.
    pow: [FieldElement; LANES],
}

impl Backend for Precomputed {}
impl Sealed for Precomputed {
    #[allow(clippy::arithmetic_side_effects)]
    fn new(key: &Key) -> Self {
        let pow = {
            let r = FieldElement::from_u128(key.r);
            let mut prev = r;
            let mut pow: [FieldElement; LANES] = Default::default();
            for (i, v) in pow.iter_mut().rev().enumerate() {
                *v = r;
                if i > 0 {
                    *v *= prev;
                }
                prev = *v;
            }
            pow
        };
        Self { pow }
    }

    fn update_blocks(&self, acc: FieldElement, blocks: &[[u8; BLOCK_SIZE]]) -> FieldElement {
        polymul_series(acc, &self.pow, blocks)
    }

    #[allow(clippy::arithmetic_side_effects)]
    #[inline]
    fn update_padded(&self, acc: FieldElement, block: &[u8; BLOCK_SIZE]) -> FieldElement {
        let [.., r] = self.pow;
        (acc + FieldElement::from_padded(block)) * r
    }
}

/// Folds `blocks` into `acc`.
///
/// Four sequential steps
///
/// ```text
/// ((((acc + m0)*r + m1)*r + m2)*r + m3)*r
/// ```
///
/// are the same polynomial as
///
/// ```text
/// (acc + m0)*r^4 + m1*r^3 + m2*r^2 + m3*r
/// ```
///
/// whose four products can be summed before a single
/// reduction.
#[allow(clippy::arithmetic_side_effects)]
fn polymul_series(
    mut acc: FieldElement,
    pow: &[FieldElement; LANES],
    mut blocks: &[[u8; BLOCK_SIZE]],
) -> FieldElement {
    let [r4, r3, r2, r] = *pow;

    // Handle wide chunks.
    while let Some(([m0, m1, m2, m3], rest)) = blocks.split_first_chunk::<LANES>() {
        let mut d = (acc + FieldElement::from_block(m0)).mul_wide(r4);
        d += FieldElement::from_block(m1).mul_wide(r3);
        d += FieldElement::from_block(m2).mul_wide(r2);
        d += FieldElement::from_block(m3).mul_wide(r);
        acc = d.reduce();
        blocks = rest;
    }

    // Handle singles.
    for block in blocks {
        acc = (acc + FieldElement::from_block(block)) * r;
    }

    acc
}

impl Clone for Precomputed {
    #[inline]
    fn clone(&self) -> Self {
        Self { pow: self.pow }
    }

    #[inline]
    fn clone_from(&mut self, other: &Self) {
        self.pow = other.pow;
    }
}

#[cfg(feature = "zeroize")]
#[cfg_attr(docsrs, doc(cfg(feature = "zeroize")))]
impl ZeroizeOnDrop for Precomputed {}

impl Drop for Precomputed {
    fn drop(&mut self) {
        #[cfg(feature = "zeroize")]
        {
            self.pow.zeroize();
        }
        #[cfg(not(feature = "zeroize"))]
        {
            self.pow = Default::default();
        }
    }
}

//! Poly1305 per [RFC 8439].
//!
//! ```
//! use polyauth::{Poly1305, Tag};
//!
//! let key = [7u8; polyauth::KEY_SIZE];
//! let mac: Poly1305 = Poly1305::new_from_slice(&key)?;
//! let tag: Tag = mac.tag(b"Cryptographic Forum Research Group");
//! assert!(bool::from(mac.verify(b"Cryptographic Forum Research Group", &tag)));
//! # Ok::<(), polyauth::InvalidKeyLength>(())
//! ```
//!
//! [RFC 8439]: https://datatracker.ietf.org/doc/html/rfc8439

#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(not(any(test, doctest, feature = "std")), no_std)]
#![cfg_attr(not(any(feature = "std", test)), deny(clippy::std_instead_of_core))]

mod backend;
mod lite;
mod poly;
mod precomp;

pub use lite::Lite;
pub use poly::{Backend, InvalidKeyLength, Key, Poly1305, Tag, BLOCK_SIZE, KEY_SIZE, TAG_SIZE};
pub use precomp::Precomputed;

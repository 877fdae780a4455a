//! The bit-source seam.
//!
//! Everything that feeds the block assembler implements [`BitSource`]: the
//! Sturmian word, a single rotation channel, and the multichannel scheduler.

/// An infinite, deterministic stream of 0/1 bits.
///
/// Implementations never fail and never end. Each call returns exactly one
/// bit, either `0` or `1`.
pub trait BitSource {
    /// Produces the next bit.
    fn next_bit(&mut self) -> u8;
}

impl<S: BitSource + ?Sized> BitSource for &mut S {
    #[inline]
    fn next_bit(&mut self) -> u8 {
        (**self).next_bit()
    }
}

impl<S: BitSource + ?Sized> BitSource for Box<S> {
    #[inline]
    fn next_bit(&mut self) -> u8 {
        (**self).next_bit()
    }
}

//! Double-buffered predicted positions for race-free constraint projection.

use alloc::vec;
use alloc::vec::Vec;
use glam::Vec3;

/// A pair of predicted-position buffers used alternately as input and output
/// of constraint projection.
///
/// Constraints in one color batch read the `read` generation and apply
/// corrections to the `write` generation, so batch members never observe each
/// other's writes mid-pass; across batches the corrections accumulate in the
/// write generation. [`copy_forward`] publishes the write generation for the
/// next iteration to read.
///
/// [`copy_forward`]: PredictedPair::copy_forward
#[derive(Debug, Clone)]
pub struct PredictedPair {
    read: Vec<Vec3>,
    write: Vec<Vec3>,
}

impl PredictedPair {
    /// Create a zeroed pair for `len` vertices.
    pub fn new(len: usize) -> Self {
        PredictedPair {
            read: vec![Vec3::ZERO; len],
            write: vec![Vec3::ZERO; len],
        }
    }

    pub fn len(&self) -> usize {
        self.read.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read.is_empty()
    }

    /// Copy `values` into both generations, the seed state for projection.
    ///
    /// Seeding both sides matters: vertices untouched by any constraint in a
    /// pass must still carry their predicted position in the write
    /// generation when it is published.
    pub fn seed(&mut self, values: &[Vec3]) {
        self.read.copy_from_slice(values);
        self.write.copy_from_slice(values);
    }

    /// Seed both generations from a per-vertex function, without an
    /// intermediate buffer.
    pub fn seed_with(&mut self, mut f: impl FnMut(usize) -> Vec3) {
        for (i, slot) in self.write.iter_mut().enumerate() {
            *slot = f(i);
        }
        self.read.copy_from_slice(&self.write);
    }

    /// The generation constraints read from.
    pub fn read(&self) -> &[Vec3] {
        &self.read
    }

    /// The generation constraints write into.
    pub fn write(&self) -> &[Vec3] {
        &self.write
    }

    pub fn write_mut(&mut self) -> &mut [Vec3] {
        &mut self.write
    }

    /// Borrow both generations at once: the read snapshot and the mutable
    /// write side.
    pub fn split(&mut self) -> (&[Vec3], &mut [Vec3]) {
        (&self.read, &mut self.write)
    }

    /// Publish the write generation into the read generation.
    pub fn copy_forward(&mut self) {
        self.read.copy_from_slice(&self.write);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_fills_both_generations() {
        let mut pair = PredictedPair::new(3);
        let values = [Vec3::X, Vec3::Y, Vec3::Z];
        pair.seed(&values);
        assert_eq!(pair.read(), &values);
        assert_eq!(pair.write(), &values);
    }

    #[test]
    fn copy_forward_publishes_writes() {
        let mut pair = PredictedPair::new(2);
        pair.seed(&[Vec3::ZERO, Vec3::ZERO]);
        pair.write_mut()[1] = Vec3::new(1.0, 2.0, 3.0);

        // Reads are unaffected until the copy runs.
        assert_eq!(pair.read()[1], Vec3::ZERO);
        pair.copy_forward();
        assert_eq!(pair.read()[1], Vec3::new(1.0, 2.0, 3.0));
    }
}

//! Flat tensor container for encoded boards.

use serde::{Deserialize, Serialize};

/// An encoded board as a flat tensor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncodedBoard {
    /// Flattened tensor data (row-major order).
    pub tensor: Vec<f32>,

    /// Shape of the tensor, `[planes, length, width]`.
    pub shape: Vec<usize>,
}

impl EncodedBoard {
    /// Create a new encoded board.
    pub fn new(tensor: Vec<f32>, shape: Vec<usize>) -> Self {
        debug_assert_eq!(
            tensor.len(),
            shape.iter().product::<usize>(),
            "Tensor length must match shape product"
        );
        Self { tensor, shape }
    }

    /// Create a zero-filled tensor with the given shape.
    pub fn zeros(shape: Vec<usize>) -> Self {
        let size = shape.iter().product();
        Self {
            tensor: vec![0.0; size],
            shape,
        }
    }

    /// Get the total number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tensor.len()
    }

    /// Check if the tensor is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tensor.is_empty()
    }

    /// Get element at a flat index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f32> {
        self.tensor.get(index).copied()
    }

    /// Get element `(plane, x, z)` of a three-dimensional tensor.
    #[must_use]
    pub fn at(&self, plane: usize, x: usize, z: usize) -> Option<f32> {
        let [_, length, width] = self.shape[..] else {
            return None;
        };
        if x >= length || z >= width {
            return None;
        }
        self.get((plane * length + x) * width + z)
    }

    /// Sum of one plane.
    #[must_use]
    pub fn plane_sum(&self, plane: usize) -> f32 {
        let [_, length, width] = self.shape[..] else {
            return 0.0;
        };
        let size = length * width;
        self.tensor
            .iter()
            .skip(plane * size)
            .take(size)
            .sum()
    }
}

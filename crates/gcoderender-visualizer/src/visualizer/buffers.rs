//! Fixed-capacity geometry buffers
//!
//! Capacity is reserved once before the parse and never grows; the fill
//! length is tracked separately. Only the filled part is ever exposed.

use bytemuck::Pod;
use gcoderender_core::GcodeError;

/// Append-only buffer with a hard capacity
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryBuffer<T: Pod> {
    name: &'static str,
    data: Vec<T>,
    capacity: usize,
}

impl<T: Pod> GeometryBuffer<T> {
    /// Reserve room for exactly `capacity` elements
    ///
    /// # Errors
    /// [`GcodeError::BufferCapacityExceeded`] if the allocation cannot be
    /// made; `capacity` in the error is the largest element count a buffer
    /// of `T` can address.
    pub fn with_capacity(name: &'static str, capacity: usize) -> Result<Self, GcodeError> {
        let mut data = Vec::new();
        data.try_reserve_exact(capacity)
            .map_err(|_| GcodeError::BufferCapacityExceeded {
                buffer: name,
                capacity: Self::max_elements(),
                requested: capacity,
            })?;
        Ok(Self {
            name,
            data,
            capacity,
        })
    }

    /// Largest element count a single allocation of `T` can hold
    pub fn max_elements() -> usize {
        isize::MAX as usize / std::mem::size_of::<T>().max(1)
    }

    /// Append elements at the fill cursor
    ///
    /// # Errors
    /// [`GcodeError::BufferCapacityExceeded`] if the elements do not fit;
    /// nothing is written in that case.
    pub fn push_slice(&mut self, items: &[T]) -> Result<(), GcodeError> {
        let requested = self.data.len() + items.len();
        if requested > self.capacity {
            return Err(GcodeError::BufferCapacityExceeded {
                buffer: self.name,
                capacity: self.capacity,
                requested,
            });
        }
        self.data.extend_from_slice(items);
        Ok(())
    }

    /// Filled elements
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Filled elements as raw bytes, for upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// Number of filled elements
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Reserved elements
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn remaining(&self) -> usize {
        self.capacity - self.data.len()
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

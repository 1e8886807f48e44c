//! Per-pool instance buffers handed to the rendering backend
//!
//! One batch per pool, sized once. `flush` rewrites every slot in place
//! from the animator's transforms, so a frame costs O(entities) and never
//! allocates.

use bytemuck::{Pod, Zeroable};
use crate::math::Mat4;
use crate::pool::EntityPool;
use crate::error::Result;

/// Column-major model matrix, one per instance (matches `a_instance_matrix`)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceMatrix {
    pub cols: [f32; 16],
}

/// RGB color, one per instance (matches `a_instance_color`)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceColor {
    pub rgb: [f32; 3],
}

pub const FLOATS_PER_MATRIX: usize = 16;
pub const FLOATS_PER_COLOR: usize = 3;

/// Backend that consumes batches. Implementations never read back.
pub trait InstanceSink {
    /// Upload `batch` into the backend slot reserved for pool `slot`
    fn submit(&mut self, slot: usize, batch: &InstanceBatch) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct InstanceBatch {
    matrices: Vec<InstanceMatrix>,
    colors: Vec<InstanceColor>,
    dirty: bool,
}

impl InstanceBatch {
    /// Zeroed batch for `capacity` instances
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            matrices: vec![InstanceMatrix::zeroed(); capacity],
            colors: vec![InstanceColor::zeroed(); capacity],
            dirty: false,
        }
    }

    pub fn for_pool(pool: &EntityPool) -> Self {
        Self::with_capacity(pool.len())
    }

    pub fn capacity(&self) -> usize {
        self.matrices.len()
    }

    /// Compose every entity's transform into its slot and mark both buffers
    /// changed. Entities beyond capacity are ignored.
    pub fn flush(&mut self, pool: &EntityPool) -> &Self {
        debug_assert_eq!(pool.len(), self.capacity(), "batch sized for a different pool");

        let slots = self.matrices.iter_mut().zip(self.colors.iter_mut());
        for (entity, (matrix, color)) in pool.entities().iter().zip(slots) {
            let t = entity.transform();
            matrix.cols = Mat4::compose(t.position, t.rotation, t.scale).data;
            color.rgb = entity.color().to_array();
        }

        self.dirty = true;
        self
    }

    /// Whether the buffers changed since the backend last took them
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn matrices(&self) -> &[InstanceMatrix] {
        &self.matrices
    }

    pub fn colors(&self) -> &[InstanceColor] {
        &self.colors
    }

    /// Flat float views for GPU upload: (matrices, colors)
    pub fn as_f32_slices(&self) -> (&[f32], &[f32]) {
        (
            bytemuck::cast_slice(&self.matrices),
            bytemuck::cast_slice(&self.colors),
        )
    }

    /// Raw bytes of both buffers, for comparing frames
    pub fn as_bytes(&self) -> (&[u8], &[u8]) {
        (
            bytemuck::cast_slice(&self.matrices),
            bytemuck::cast_slice(&self.colors),
        )
    }
}

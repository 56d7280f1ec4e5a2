use thiserror::Error;

/// Error types for `GrowVec` operations
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum GrowVecError {
    /// The global allocator could not satisfy an allocation request
    #[error("Out of memory: allocation of {bytes} bytes failed")]
    OutOfMemory {
        /// Size of the failed request in bytes
        bytes: usize,
    },
    /// The requested element count cannot be represented as a memory layout
    #[error("Capacity overflow: {elements} elements exceed addressable memory")]
    CapacityOverflow {
        /// Number of elements requested
        elements: usize,
    },
    /// Insert position is beyond the current vector length
    #[error("Index out of bounds: index {index} is beyond vector length {len}")]
    IndexOutOfBounds {
        /// Position that was requested
        index: usize,
        /// Current length of the vector
        len: usize,
    },
}

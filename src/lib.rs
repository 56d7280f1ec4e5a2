#![no_std]

//! `GrowVec`: a growable array built on an owned raw buffer, with fallible
//! allocation.
//!
//! The crate separates two concerns the way a hand-built vector has to:
//! a raw storage layer that owns an uninitialized block and knows how many
//! slots at the front are constructed, and the vector on top of it that owns
//! the growth policy, ordering, and every element move. Uninitialized memory
//! never crosses the public surface.
//!
//! Every allocating operation returns a `Result` and leaves the vector
//! untouched on failure; there is no aborting allocation path. `std::vec::Vec`
//! is not used anywhere in the implementation.
//!
//! ```
//! use growvec::GrowVec;
//!
//! let mut numbers: GrowVec<i32> = GrowVec::new();
//! assert_eq!(numbers.capacity(), 0); // empty vectors do not allocate
//!
//! numbers.push(1).unwrap();
//! numbers.push(2).unwrap();
//! numbers.push(4).unwrap();
//! numbers.insert(2, 3).unwrap();
//!
//! assert_eq!(numbers.as_slice(), &[1, 2, 3, 4]);
//! assert_eq!(numbers.pop(), Some(4));
//! ```
//!
//! # Growth
//!
//! Appending to a full vector doubles the capacity (1 from empty). Capacity
//! only ever grows; `pop`, `remove`, `truncate`, and `clear` drop elements
//! but keep the block. [`GrowVec::reserve`] takes an absolute capacity and
//! is the single reallocation point of the crate.
//!
//! ```
//! use growvec::GrowVec;
//!
//! let mut v: GrowVec<u8> = GrowVec::new();
//! for byte in 0..4 {
//!     v.push(byte).unwrap();
//! }
//! assert_eq!(v.capacity(), 4); // 0 -> 1 -> 2 -> 4
//! v.push(4).unwrap();
//! assert_eq!(v.capacity(), 8);
//! ```
//!
//! # Invalidation
//!
//! Any capacity-changing operation replaces the backing block, so every raw
//! pointer previously obtained from [`GrowVec::as_ptr`] is invalidated by
//! it. References and slices are covered by the borrow checker; the raw
//! pointer rule is the caller's to uphold.
//!
//! # Value semantics
//!
//! Deep copy is explicit and fallible ([`GrowVec::try_clone`]); moving is
//! ordinary Rust move, and [`GrowVec::take`] hands the contents over while
//! leaving the source empty and reusable.
//!
//! ```
//! use growvec::GrowVec;
//!
//! let mut original = GrowVec::try_from([1, 2, 3, 4]).unwrap();
//! let mut copy = original.try_clone().unwrap();
//! copy.push(5).unwrap();
//! assert_eq!(original.len(), 4); // independent allocations
//!
//! let moved = original.take();
//! assert_eq!(original.len(), 0);
//! assert_eq!(original.capacity(), 0);
//! assert_eq!(moved.as_slice(), &[1, 2, 3, 4]);
//! ```
//!
//! # `no_std`
//!
//! The crate is `no_std` and needs only the global allocator (`alloc`).
//! Enable the `std` feature to forward it to `thiserror`:
//!
//! ```toml
//! [dependencies]
//! growvec = { version = "0.1", features = ["std"] }
//! ```

extern crate alloc;

mod core;
mod error;
mod iter;
mod raw;

// Re-export public types and traits
pub use crate::core::GrowVec;
pub use crate::error::GrowVecError;
pub use crate::iter::IntoIter;

//! This module defines the core, strongly-typed data representations used
//! throughout the slate engine.
//!
//! It includes the canonical `DataType` enum, which is the narrow seam to the
//! external type/schema system: the engine consumes only an element's byte
//! width and its fixed-vs-variable-width classification, never richer schema
//! information. It also hosts `MaskAllocationPolicy`, the knob governing
//! validity-buffer creation on allocation.

pub mod data_type;

// Re-export the main type(s) for easier access.
pub use data_type::{DataType, MaskAllocationPolicy};

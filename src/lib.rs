//! This file is the root of the `slate_core` Rust crate.
//!
//! Its responsibilities are strictly limited to:
//! 1.  Declaring all the top-level modules of our library (`kernels`, `column`,
//!     etc.) so the Rust compiler knows they exist.
//! 2.  Re-exporting the data model and the operation set that together form
//!     the public contract of the engine.
//!
//! The engine itself is stateless: every operation (except the single
//! in-place range copy) is a pure transform from immutable inputs to a new,
//! independently owned output.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//==================================================================================
// 1. Module Declarations
//==================================================================================
#[macro_use]
mod observability; // Make macros available throughout the crate

pub mod column;
pub mod error;
pub mod exec;
pub mod kernels;
pub mod null_handling;
pub mod storage;
pub mod table;
pub mod types;

mod utils;

//==================================================================================
// 2. Public Contract
//==================================================================================
pub use column::{Column, ColumnView, MutableColumnView, Scalar};
pub use error::{Result, SlateError};
pub use exec::{ExecContext, TaskQueue};
pub use kernels::{
    allocate_like, boolean_mask_scatter, boolean_mask_scatter_scalars, contiguous_split,
    copy_if_else, copy_if_else_scalar_left, copy_if_else_scalar_right, copy_if_else_scalars,
    copy_range, copy_range_in_place, empty_like, empty_like_table, gather, scatter,
    scatter_scalars, shift, slice_column, slice_table, split_column, split_table, PackedTable,
    RowRef, VariableWidthKernel,
};
pub use storage::{Allocator, Buffer, HostAllocator};
pub use table::{Table, TableView};
pub use types::{DataType, MaskAllocationPolicy};

/// Turns on verbose engine logging for the current process.
///
/// Diagnostics go through the `log` facade; this installs an `env_logger`
/// backend at `debug` level unless one is already installed.
pub fn enable_verbose_logging() {
    let _ = env_logger::Builder::new()
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}

//! This module provides observability and diagnostics capabilities for the
//! rearrangement and packing engines.
//!
//! The packing engine in particular makes layout decisions (region sizes,
//! alignment padding, partition counts) that are invisible in its output.
//! This module provides structured logging hooks to make that behavior
//! transparent and debuggable. The `log_metric!` macro is the primary tool.
//!
//! It is a zero-cost abstraction: the `#[cfg(debug_assertions)]` attribute ensures
//! that the macro and all calls to it are completely compiled out of release builds,
//! imposing no performance penalty in production.

/// Logs a structured key-value metric string to stdout, only in debug builds.
///
/// # Example
/// ```
/// use slate_core::log_metric;
/// let partitions = 4;
/// log_metric!("event"="contiguous_split", "partitions"=&partitions);
/// ```
#[macro_export]
macro_rules! log_metric {
    ($($key:literal = $value:expr),+ $(,)?) => {
        #[cfg(debug_assertions)]
        {
            // Collect each pair as a JSON string fragment
            let mut parts = Vec::new();
            $(
                parts.push(format!("\"{}\": \"{}\"", $key, $value));
            )+

            let output = format!("SLATE_METRIC: {{ {} }}", parts.join(", "));
            println!("{}", output);
        }
    };
}

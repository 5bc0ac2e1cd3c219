//! Stack growth for deeply nested input.
//!
//! Every recursive grammar entry runs through [`ensure_sufficient_stack`],
//! so a source with thousands of nested parentheses grows the stack instead
//! of overflowing it. The nesting limit in `ParserConfig` is a separate,
//! user-visible bound; this only keeps the process alive until that bound
//! is reached.

/// Grow the stack when less than this remains (100 KiB).
const RED_ZONE: usize = 100 * 1024;

/// Size of each new stack segment (1 MiB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

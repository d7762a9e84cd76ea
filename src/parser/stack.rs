//! Stack safety for recursive parsing.
//!
//! The nesting limit in the parser bounds recursion depth, but a single
//! level can span several handler frames, so recursive entry points also
//! move onto a heap-allocated segment when the thread runs low.

const RED_ZONE: usize = 100 * 1024; // 100KB
const STACK_PER_RECURSION: usize = 1024 * 1024; // 1MB

/// Runs `f`, growing the stack first if less than the red zone is left.
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

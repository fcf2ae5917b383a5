use shadow_rs::shadow;

shadow!(build);

// Internals
// ---------
pub mod data_structures;
pub mod derank;
pub mod heap_primitives;

// Graphs and routes
// -----------------
pub mod cost;
pub mod error;
pub mod graph;
pub mod heuristic;
pub mod path;

// Measurements
// ------------
pub mod instrument;
pub mod metrics;
pub mod profiling;

// Algorithms
// ----------
pub mod algorithms;
pub mod frontier;

// Inputs and comparisons
// ----------------------
pub mod benchmark;
pub mod generators;
pub mod loader;

#[cfg(test)]
mod testing;

#[cfg(test)]
#[global_allocator]
static TEST_ALLOC: profiling::PeakAlloc<std::alloc::System> =
    profiling::PeakAlloc::new(std::alloc::System);

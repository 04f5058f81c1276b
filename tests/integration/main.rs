//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a slice of the
//! firmware against mock adapters.  All tests run on the host (x86_64)
//! with no real hardware required.

mod arbitration_tests;
mod mock_hw;
mod pipeline_tests;

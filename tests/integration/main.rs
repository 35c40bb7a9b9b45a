//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises the bridge end to end
//! against the in-memory link.  All tests run on the host with no UART
//! required.

mod mock_link;
mod queue_tests;
mod session_flow_tests;

//! Orchestrator test suite.

mod helpers;

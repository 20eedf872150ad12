//! Unit tests for the experience module.

//! Integration tests for read-guard

mod read_tests;

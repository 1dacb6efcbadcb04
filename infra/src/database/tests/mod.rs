//! Unit tests for the database module

//! Unit tests for the flow service

mod mocks;

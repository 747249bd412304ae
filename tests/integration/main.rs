//! Integration tests for the HTTP client and the services on top of it

mod api_tests;
mod live_tests;
mod stub;

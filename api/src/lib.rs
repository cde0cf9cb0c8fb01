//! # FlowGate API
//!
//! The HTTP surface of the FlowGate backend. A single gateway
//! middleware fronts every route, applying sliding-window rate
//! limiting to API traffic and stamping security headers on each
//! response; behind it sit the message relay endpoint and the
//! step-flow endpoints.

pub mod app;
pub mod middleware;
pub mod routes;

//! Infrastructure Layer

pub mod client;

pub use client::ReqwestUpstream;

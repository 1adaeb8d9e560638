pub mod client;

pub use client::{EnsClient, EnsError, ENS_API_BASE};

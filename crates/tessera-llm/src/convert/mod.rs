//! Conversion between canonical types and provider wire formats

pub mod anthropic;

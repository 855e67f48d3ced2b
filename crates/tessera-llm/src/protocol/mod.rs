//! Wire format types for the Anthropic API
//!
//! Pure serde structs matching the provider's JSON. They are used only at
//! the boundary and never flow through the gateway internally.

pub mod anthropic;

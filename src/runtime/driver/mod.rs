//! Terminal drivers that own an [`AlertRuntime`](super::AlertRuntime).

pub mod cli;

//! Cross-context message actions.
//!
//! Every action is a request/response pair. Responses always carry
//! `success`; failures add `error`, successes add action-specific fields.

mod action;
mod response;

pub use action::Action;
pub use response::ActionResponse;

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;

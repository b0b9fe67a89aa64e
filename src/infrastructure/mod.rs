//! Infrastructure: filesystem layout and artifact discovery

pub mod artifacts;
pub mod layout;

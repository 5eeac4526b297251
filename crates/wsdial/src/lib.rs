//! Top-level facade crate for wsdial.
//!
//! Re-exports the wire contracts and the client runtime so users can depend on a single crate.

pub mod core {
    pub use wsdial_core::*;
}

pub mod client {
    pub use wsdial_client::*;
}

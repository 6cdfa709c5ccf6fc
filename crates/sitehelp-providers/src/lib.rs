//! Responder strategies behind the `sitehelp_core::Responder` seam.

pub use sitehelp_core::{Responder, ResponderError};

mod provider;
mod remote;

pub use provider::ChatProvider;
pub use remote::{RemoteResponder, NO_REPLY_PLACEHOLDER};

#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

pub use homepage_links_core as core;
pub use homepage_links_k8s_api as k8s;
pub use homepage_links_k8s_discovery as discovery;

mod args;
pub mod server;

pub use self::{args::Args, server::Server};

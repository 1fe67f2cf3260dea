//! Catalog Editor - product composition and synchronization
//!
//! - [`draft`]: local product aggregate and its pure mutation operations
//! - [`sync`]: phased persistence of a draft through a [`ProductGateway`](storefront_client::ProductGateway)
//! - [`flow`]: create and edit flows with post-run reload and user notices

pub mod config;
pub mod draft;
pub mod flow;
pub mod logger;
pub mod manifest;
pub mod sync;

pub use config::Config;
pub use draft::{ProductBase, ProductDraft};
pub use flow::{CreateFlow, EditSession, FlowResult, Notice, NoticeLevel};
pub use sync::{ProductSync, SyncError, SyncOptions, SyncOutcome, SyncStatus};

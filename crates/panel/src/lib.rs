mod backend;
mod client;
mod errors;
mod models;

#[cfg(test)]
mod stub;

pub use backend::{PanelApi, ServerPage};
pub use client::{PanelClient, API_ACCEPT};
pub use errors::PanelError;
pub use models::{
    EggAttributes, FileAttributes, ListResponse, Pagination, ServerAttributes, SignedUrl,
};

pub mod client;
pub mod list;
pub mod types;

pub use client::AdminClient;
pub use list::ListController;

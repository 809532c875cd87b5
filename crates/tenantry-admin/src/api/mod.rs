//! Backend access for the browser console

mod client;
mod files;

pub use client::{api_base, clear_token, save_api_url, save_token, HttpStore};
pub use files::{read_as_data_url, read_as_text, BrowserFile};

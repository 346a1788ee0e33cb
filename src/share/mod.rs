//! Shareable links that encode the calculator settings

mod clipboard;
mod link;

pub(crate) use clipboard::copy_to_clipboard;
pub(crate) use link::{from_share_url, share_url};

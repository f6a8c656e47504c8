#![forbid(unsafe_code)]

pub mod articles;
pub mod badges;
pub mod cli;
pub mod credential;
pub mod fetch;
pub mod filter;
pub mod fixture;
pub mod formats;
pub mod logging;
pub mod media;
pub mod util;

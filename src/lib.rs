pub mod answer;
pub mod ask;
pub mod bot;
pub mod config;
pub mod error;
pub mod history;
pub mod imagine;
pub mod mention;
pub mod openwebui;
pub mod pager;

pub use bot::run;

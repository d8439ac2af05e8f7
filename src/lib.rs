pub mod catalog;
pub mod clipboard;
pub mod debounce;
pub mod filter;
pub mod gui;
pub mod logging;
pub mod popup;
pub mod session;
pub mod settings;
pub mod status;

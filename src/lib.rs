pub mod architecture;
pub mod command;
pub mod config;
pub mod document;
pub mod error;
pub mod logging;
pub mod model;
pub mod native;
pub mod normalize;
pub mod notification;
pub mod session;
pub mod transport;
pub mod view;

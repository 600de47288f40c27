pub mod boundary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git_ops;
pub mod release;
pub mod resolver;
pub mod ui;

pub use error::{PublishError, Result};
pub use resolver::{resolve, TagOptions};

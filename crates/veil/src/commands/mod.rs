pub mod apply;
pub mod init;
pub mod inspect;
pub mod list;
mod options;

pub mod init;
pub mod train;
pub mod validate;

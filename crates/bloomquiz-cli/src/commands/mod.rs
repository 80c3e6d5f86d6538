pub mod init;
pub mod interactive;

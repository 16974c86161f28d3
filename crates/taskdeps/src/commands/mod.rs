//! Command implementations that are part of the library API.

pub mod init;

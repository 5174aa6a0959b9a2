pub mod init;
pub mod review;
pub mod score;
pub mod validate;

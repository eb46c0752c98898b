pub mod config;
pub mod datetime;
pub mod response;
pub mod storage_header;

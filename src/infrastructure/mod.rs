pub mod observability;
pub mod recognition;
pub mod storage;
pub mod transcode;

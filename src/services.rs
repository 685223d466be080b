pub mod control;
pub mod listing;
pub mod storage;
pub mod uploader;

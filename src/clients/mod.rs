pub mod batch;
pub mod http;
pub mod oauth;
pub mod storage;

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod utils;

pub use clients::{
    batch::BatchSender,
    http::{HttpClient, ReqwestHttpClient},
    storage::{FileStore, LocalFileStore},
};
pub use config::Config;
pub use error::{FcmBatchError, Result};

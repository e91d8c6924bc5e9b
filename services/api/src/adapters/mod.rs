pub mod db;
pub mod http_api;
pub mod local_fs;

pub use db::DbAdapter;
pub use http_api::ReqwestApiAdapter;
pub use local_fs::{LocalFileAdapter, LocalSessionAdapter};

pub mod config;
pub mod error;
pub mod page;

pub use config::AppConfig;
pub use error::PushError;
pub use page::PageData;

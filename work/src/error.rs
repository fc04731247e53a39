use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkError {
    #[error("nonce space exhausted without meeting the work target")]
    Exhausted,

    #[error("failed to build work thread pool: {0}")]
    ThreadPool(String),
}

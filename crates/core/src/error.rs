use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("dataset root has no categories")]
    EmptyDataset,
}

use thiserror::Error;

pub type NtResult<T> = Result<T, NtError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NtError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },
}

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddFieldError {
    #[error("every existing field must be named before adding another")]
    UnnamedFieldExists,
}

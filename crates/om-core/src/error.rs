use thiserror::Error;

pub type OmResult<T> = Result<T, OmError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OmError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Shape mismatch for {what} (expected length {expected}, found {found})")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_mismatch_display() {
        let err = OmError::ShapeMismatch {
            what: "p1",
            expected: 3,
            found: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("p1"));
        assert!(msg.contains("expected length 3"));
    }
}

pub type BounceResult<T> = Result<T, BounceError>;

#[derive(thiserror::Error, Debug)]
pub enum BounceError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(String),

    #[error("external process error: {0}")]
    External(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BounceError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    pub fn external(msg: impl Into<String>) -> Self {
        Self::External(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            BounceError::config("x")
                .to_string()
                .contains("configuration error:")
        );
        assert!(BounceError::io("x").to_string().contains("i/o error:"));
        assert!(
            BounceError::external("x")
                .to_string()
                .contains("external process error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = BounceError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}

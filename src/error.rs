use std::error;
use std::fmt;
use std::result;

/// Errors raised while constructing a set.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// The xorshift generator behind a treap cannot be seeded with all zeros.
    ZeroSeed,
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::ZeroSeed => write!(f, "priority generator seed must not be all zeros"),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn test_display() {
        assert_eq!(
            Error::ZeroSeed.to_string(),
            "priority generator seed must not be all zeros",
        );
    }
}

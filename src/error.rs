use thiserror::Error;

/// Failures reported by builders, positional accessors, and the search helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Two buffered entries carry equal keys.
    #[error("duplicate key")]
    DuplicateKey,

    /// Two buffered entries carry equal values while building a bi-map.
    #[error("duplicate value in bi-map")]
    DuplicateValue,

    /// A positional accessor was given an index past the end of the container.
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A search or slice range starts after it ends.
    #[error("range start {from} is greater than range end {to}")]
    InvalidRange { from: usize, to: usize },
}

pub type Result<T, E = Error> = core::result::Result<T, E>;

pub(crate) const fn check_index(index: usize, len: usize) -> Result<usize> {
    if index < len {
        Ok(index)
    } else {
        Err(Error::IndexOutOfBounds { index, len })
    }
}

pub(crate) const fn check_range(from: usize, to: usize, len: usize) -> Result<()> {
    if from > to {
        Err(Error::InvalidRange { from, to })
    } else if to > len {
        Err(Error::IndexOutOfBounds { index: to, len })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_condition() {
        assert_eq!("duplicate key", Error::DuplicateKey.to_string());
        assert_eq!(
            "duplicate value in bi-map",
            Error::DuplicateValue.to_string()
        );
        assert_eq!(
            "index 4 out of bounds for length 3",
            Error::IndexOutOfBounds { index: 4, len: 3 }.to_string()
        );
    }

    #[test]
    fn check_index_rejects_len() {
        assert_eq!(Ok(2), check_index(2, 3));
        assert_eq!(
            Err(Error::IndexOutOfBounds { index: 3, len: 3 }),
            check_index(3, 3)
        );
    }

    #[test]
    fn check_range_rejects_inverted_and_overlong() {
        assert!(check_range(0, 0, 0).is_ok());
        assert!(check_range(1, 3, 3).is_ok());
        assert_eq!(
            Err(Error::InvalidRange { from: 2, to: 1 }),
            check_range(2, 1, 3)
        );
        assert_eq!(
            Err(Error::IndexOutOfBounds { index: 4, len: 3 }),
            check_range(0, 4, 3)
        );
    }
}

use crate::{Error, Result};

/// Tri-state cursor shared by the adaptors that must compute an element
/// before they can answer `has_next()`.
///
/// `Unknown` means nothing has been computed since the last `next()`.
#[derive(Debug, Clone, Default)]
pub(crate) enum Lookahead<T> {
    #[default]
    Unknown,
    Exhausted,
    Ready(T),
}

impl<T> Lookahead<T> {
    /// Computes the next element with `compute` unless it is already known.
    /// Returns whether an element is ready.
    ///
    /// An `Err` from `compute` leaves the cursor `Unknown`.
    #[inline]
    pub(crate) fn fill(&mut self, compute: impl FnOnce() -> Result<Option<T>>) -> Result<bool> {
        if let Self::Unknown = self {
            *self = match compute()? {
                Some(item) => Self::Ready(item),
                None => Self::Exhausted,
            };
        }
        Ok(matches!(self, Self::Ready(_)))
    }

    /// Consumes the ready element, resetting the cursor to `Unknown`.
    #[inline]
    pub(crate) fn take(&mut self) -> Result<T> {
        match std::mem::take(self) {
            Self::Ready(item) => Ok(item),
            Self::Exhausted => {
                *self = Self::Exhausted;
                Err(Error::Empty)
            }
            Self::Unknown => Err(Error::Empty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_once_until_taken() {
        let mut calls = 0;
        let mut lookahead = Lookahead::Unknown;

        for _ in 0..3 {
            let ready = lookahead
                .fill(|| {
                    calls += 1;
                    Ok(Some(7))
                })
                .unwrap();
            assert!(ready);
        }
        assert_eq!(calls, 1);
        assert_eq!(lookahead.take().unwrap(), 7);
        assert!(matches!(lookahead, Lookahead::Unknown));
    }

    #[test]
    fn exhaustion_sticks() {
        let mut lookahead = Lookahead::<i32>::Unknown;
        assert!(!lookahead.fill(|| Ok(None)).unwrap());
        assert!(matches!(lookahead, Lookahead::Exhausted));
        assert!(!lookahead.fill(|| panic!("must not recompute")).unwrap());
        assert!(lookahead.take().unwrap_err().is_empty());
        assert!(matches!(lookahead, Lookahead::Exhausted));
    }

    #[test]
    fn failure_leaves_unknown() {
        let mut lookahead = Lookahead::<i32>::Unknown;
        assert!(lookahead.fill(|| Err(Error::Closed)).is_err());
        assert!(matches!(lookahead, Lookahead::Unknown));
    }
}

/// A deferred, resettable computed value.
///
/// Derived properties (resolved typeface, resolved size, bound cells) are
/// computed at most once per mutation epoch: computed on first read, reset
/// explicitly by every mutator that affects them, recomputed on the next
/// read. The two states are explicit so call sites cannot rely on implicit
/// memoization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResettableLazy<T> {
    /// No value has been computed since construction or the last reset.
    #[default]
    Unevaluated,
    /// The cached result of the last computation.
    Evaluated(T),
}

impl<T> ResettableLazy<T> {
    /// Create an unevaluated value.
    #[inline]
    pub fn new() -> Self {
        ResettableLazy::Unevaluated
    }

    /// Return the cached value, if one has been computed.
    #[inline]
    pub fn get(&self) -> Option<&T> {
        match self {
            ResettableLazy::Unevaluated => None,
            ResettableLazy::Evaluated(value) => Some(value),
        }
    }

    /// Return the cached value mutably, if one has been computed.
    #[inline]
    pub fn get_mut(&mut self) -> Option<&mut T> {
        match self {
            ResettableLazy::Unevaluated => None,
            ResettableLazy::Evaluated(value) => Some(value),
        }
    }

    /// Store a computed value, returning a reference to it.
    #[inline]
    pub fn set(&mut self, value: T) -> &T {
        *self = ResettableLazy::Evaluated(value);
        match self {
            ResettableLazy::Evaluated(value) => value,
            ResettableLazy::Unevaluated => unreachable!(),
        }
    }

    /// Return the cached value, computing and caching it first if absent.
    #[inline]
    pub fn get_or_set_with(&mut self, compute: impl FnOnce() -> T) -> &T {
        if matches!(self, ResettableLazy::Unevaluated) {
            *self = ResettableLazy::Evaluated(compute());
        }
        match self {
            ResettableLazy::Evaluated(value) => value,
            ResettableLazy::Unevaluated => unreachable!(),
        }
    }

    /// Discard the cached value; the next read recomputes.
    #[inline]
    pub fn reset(&mut self) {
        *self = ResettableLazy::Unevaluated;
    }

    /// Whether a value is currently cached.
    #[inline]
    pub fn is_evaluated(&self) -> bool {
        matches!(self, ResettableLazy::Evaluated(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unevaluated_until_first_read() {
        let mut lazy: ResettableLazy<i32> = ResettableLazy::new();
        assert!(!lazy.is_evaluated());
        assert_eq!(lazy.get(), None);

        assert_eq!(*lazy.get_or_set_with(|| 42), 42);
        assert!(lazy.is_evaluated());
        assert_eq!(lazy.get(), Some(&42));
    }

    #[test]
    fn test_computed_once_per_epoch() {
        let mut lazy: ResettableLazy<i32> = ResettableLazy::new();
        let mut calls = 0;
        for _ in 0..3 {
            lazy.get_or_set_with(|| {
                calls += 1;
                7
            });
        }
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_reset_forces_recompute() {
        let mut lazy: ResettableLazy<i32> = ResettableLazy::new();
        lazy.get_or_set_with(|| 1);
        lazy.reset();
        assert!(!lazy.is_evaluated());
        assert_eq!(*lazy.get_or_set_with(|| 2), 2);
    }
}

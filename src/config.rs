use fa_engine_macros::config;

/// Resolves a field of a partial config against its default.
pub trait FillWith<T> {
    fn fill_with(self, or: T) -> T;
}

impl<T> FillWith<Option<T>> for Option<T> {
    fn fill_with(self, or: Option<T>) -> Option<T> {
        match self {
            Some(t) => Some(t),
            None => or,
        }
    }
}

impl<T> FillWith<T> for Option<T> {
    fn fill_with(self, or: T) -> T {
        self.unwrap_or(or)
    }
}

config! {
    /// Limits and diagnostics for the antichain inclusion solver. The default
    /// is unbounded, bounds turn a long run into an `Unknown` result.
    pub struct AntichainConfig {
        timeout: Option<std::time::Duration> = None,
        max_iterations: Option<u64> = None,
        /// Emit every antichain insertion at trace level.
        trace_antichain: bool = false,
    }
}

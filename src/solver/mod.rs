pub mod antichain;

/// The outcome of a decision procedure. `True` and `False` carry the
/// respective certificate, `Unknown` the reason the procedure gave up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverStatus<T = (), F = (), U = ()> {
    True(T),
    False(F),
    Unknown(U),
}

impl<T, F, U> SolverStatus<T, F, U> {
    pub fn is_success(&self) -> bool {
        matches!(self, SolverStatus::True(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, SolverStatus::False(_))
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, SolverStatus::Unknown(_))
    }

    /// The answer as a boolean, `None` if the procedure gave up.
    pub fn decided(&self) -> Option<bool> {
        match self {
            SolverStatus::True(_) => Some(true),
            SolverStatus::False(_) => Some(false),
            SolverStatus::Unknown(_) => None,
        }
    }

    /// The certificate of a `False` status.
    pub fn failure(&self) -> Option<&F> {
        match self {
            SolverStatus::False(f) => Some(f),
            _ => None,
        }
    }

    pub fn map_failure<G>(self, f: impl FnOnce(F) -> G) -> SolverStatus<T, G, U> {
        match self {
            SolverStatus::True(t) => SolverStatus::True(t),
            SolverStatus::False(x) => SolverStatus::False(f(x)),
            SolverStatus::Unknown(u) => SolverStatus::Unknown(u),
        }
    }

    pub fn unwrap_failure(self) -> F {
        match self {
            SolverStatus::False(f) => f,
            SolverStatus::True(_) => panic!("unwrap_failure on a True status"),
            SolverStatus::Unknown(_) => panic!("unwrap_failure on an Unknown status"),
        }
    }
}

/// A status together with whatever the procedure recorded while running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverResult<T = (), F = (), U = (), Statistics = ()> {
    pub status: SolverStatus<T, F, U>,
    pub statistics: Statistics,
}

impl<T, F, U, Statistics> SolverResult<T, F, U, Statistics> {
    pub fn new(status: SolverStatus<T, F, U>, statistics: Statistics) -> Self {
        Self { status, statistics }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn is_failure(&self) -> bool {
        self.status.is_failure()
    }

    pub fn is_unknown(&self) -> bool {
        self.status.is_unknown()
    }

    pub fn decided(&self) -> Option<bool> {
        self.status.decided()
    }
}

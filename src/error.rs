#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// Input-domain error: the eligible pair set cannot produce a single bin
    /// meeting `minpts` (including the zero-pairs case).
    pub fn no_valid_pairs() -> Self {
        Self::new(3, "No valid pairs available for binning.")
    }

    /// Binning-degeneracy error: the uniform-width strategy derived a bin
    /// count of zero before any population filtering.
    pub fn zero_bins() -> Self {
        Self::new(4, "Uniform lag binning resolved zero bins.")
    }

    /// Numeric-guard error: a bin whose values have no variance on one side,
    /// so the correlation denominator would be zero.
    pub fn degenerate_bin(lag: f64) -> Self {
        Self::new(
            4,
            format!("Degenerate bin at lag {lag:.6}: zero variance in bin-local values."),
        )
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

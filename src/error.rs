//! The crate's configuration-error type.
//!
//! Every failure mode is a configuration problem detected before any array
//! work begins. The numeric path itself is infallible: missing values are
//! carried as NaN and silently reduce the averaging denominator.

/// The error type returned by generator constructors.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
}

/// The underlying internal error type
#[non_exhaustive]
#[derive(Clone, Debug)]
enum ErrorKind {
    /// An error that occurs when the requested statistic set is empty
    EmptyStatSet(EmptyStatSetError),
    /// An error that occurs when a statistic name is not part of the closed
    /// vocabulary
    UnknownStatName(UnknownStatNameError),
    /// An error that occurs when the scalar field and the scalar-consuming
    /// statistics disagree (one present without the other)
    ScalarMismatch(ScalarMismatchError),
    /// An error that occurs when the grid type, boundary policy, and spacing
    /// specification cannot be combined
    UnsupportedGrid(UnsupportedGridError),
    /// An error that occurs when the polar-map generator receives input it
    /// cannot handle (non-periodic, unevenly spaced, or non-uniform grids)
    PolarMapInput(PolarMapInputError),
    /// An error that occurs when a bin count of zero is requested
    BinCount(BinCountError),
}

// define constructor methods for Error
impl Error {
    /// produce an error indicating that the statistic set is empty
    pub(crate) fn empty_stat_set() -> Self {
        Error {
            kind: ErrorKind::EmptyStatSet(EmptyStatSetError),
        }
    }

    /// produce an error indicating that a statistic name isn't recognized
    pub(crate) fn unknown_stat_name(actual: String) -> Self {
        Error {
            kind: ErrorKind::UnknownStatName(UnknownStatNameError { actual }),
        }
    }

    /// produce an error indicating a scalar-field/statistic mismatch.
    ///
    /// `scalar_supplied` distinguishes "scalar given, no scalar statistic
    /// requested" from the converse.
    pub(crate) fn scalar_mismatch(scalar_supplied: bool) -> Self {
        Error {
            kind: ErrorKind::ScalarMismatch(ScalarMismatchError { scalar_supplied }),
        }
    }

    /// produce an error indicating an unsupported grid/boundary/spacing
    /// combination
    pub(crate) fn unsupported_grid(what: &'static str) -> Self {
        Error {
            kind: ErrorKind::UnsupportedGrid(UnsupportedGridError(what)),
        }
    }

    /// produce an error indicating unusable polar-map input
    pub(crate) fn polar_map_input(what: &'static str) -> Self {
        Error {
            kind: ErrorKind::PolarMapInput(PolarMapInputError(what)),
        }
    }

    /// produce an error indicating that a bin count of zero was requested
    pub(crate) fn bin_count() -> Self {
        Error {
            kind: ErrorKind::BinCount(BinCountError),
        }
    }
}

impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        self.kind.fmt(f)
    }
}

impl std::error::Error for ErrorKind {}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            ErrorKind::EmptyStatSet(ref err) => err.fmt(f),
            ErrorKind::UnknownStatName(ref err) => err.fmt(f),
            ErrorKind::ScalarMismatch(ref err) => err.fmt(f),
            ErrorKind::UnsupportedGrid(ref err) => err.fmt(f),
            ErrorKind::PolarMapInput(ref err) => err.fmt(f),
            ErrorKind::BinCount(ref err) => err.fmt(f),
        }
    }
}

/// An error that occurs when the requested statistic set is empty
#[derive(Clone, Debug)]
struct EmptyStatSetError;

impl std::error::Error for EmptyStatSetError {}

impl core::fmt::Display for EmptyStatSetError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "the statistic set is empty. Choices include: \
             ASF_V, ASF_S, LL, TT, SS, LLL, LTT, LSS"
        )
    }
}

/// An error that occurs when a statistic name isn't part of the closed
/// vocabulary
#[derive(Clone, Debug)]
struct UnknownStatNameError {
    actual: String,
}

impl std::error::Error for UnknownStatNameError {}

impl core::fmt::Display for UnknownStatNameError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "\"{}\" is not a structure-function name. Choices include: \
             ASF_V, ASF_S, LL, TT, SS, LLL, LTT, LSS",
            self.actual
        )
    }
}

/// An error that occurs when the scalar field and the scalar-consuming
/// statistics disagree
#[derive(Clone, Debug)]
struct ScalarMismatchError {
    scalar_supplied: bool,
}

impl std::error::Error for ScalarMismatchError {}

impl core::fmt::Display for ScalarMismatchError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if self.scalar_supplied {
            write!(
                f,
                "a scalar field was supplied, but no scalar-consuming \
                 statistic (ASF_S, SS, or LSS) was requested"
            )
        } else {
            write!(
                f,
                "a scalar-consuming statistic (ASF_S, SS, or LSS) was \
                 requested without supplying a scalar field"
            )
        }
    }
}

/// An error that occurs when the grid type, boundary policy, and spacing
/// specification cannot be combined
#[derive(Clone, Debug)]
struct UnsupportedGridError(&'static str);

impl std::error::Error for UnsupportedGridError {}

impl core::fmt::Display for UnsupportedGridError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unsupported grid configuration: {}", self.0)
    }
}

/// An error that occurs when the polar-map generator receives input it
/// cannot handle
#[derive(Clone, Debug)]
struct PolarMapInputError(&'static str);

impl std::error::Error for PolarMapInputError {}

impl core::fmt::Display for PolarMapInputError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "polar maps require periodic, evenly spaced data: {}", self.0)
    }
}

/// An error that occurs when a bin count of zero is requested
#[derive(Clone, Debug)]
struct BinCountError;

impl std::error::Error for BinCountError {}

impl core::fmt::Display for BinCountError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "the number of bins must be greater than zero")
    }
}

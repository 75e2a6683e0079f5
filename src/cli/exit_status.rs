use std::process::ExitCode;

/// Process exit status.
///
/// - `Success` (0): the command did what was asked
/// - `Failure` (1): it ran, but the result is not acceptable (error findings,
///   completion below the threshold, a catalog that does not parse)
/// - `Error` (2): it could not run (unknown locale, bad config, unreadable input)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}

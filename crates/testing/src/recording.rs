//! Recordings and cross-run coverage tracking
//!
//! A [`Recording`] is the ordered list of checks one execution performed.
//! Recordings of the same code path line up position by position: a run
//! that fails early is a prefix of the clean run. That is what makes
//! [`Recording::track_errors`] meaningful across runs taking different
//! branches.
//!
//! # Example
//!
//! ```ignore
//! tester.start_recording();
//! run_clean();
//! let mut master = tester.recording();
//!
//! for input in inputs {
//!     tester.start_recording();
//!     run(input);
//!     master.track_errors(&tester.recording())?;
//! }
//! assert!(master.all_errors_seen(), "unexercised: {:?}", master.uncovered());
//! ```

use crate::error::{Result, TrackError};
use crate::resolver::ResolvedSite;
use faultcheck_checker::{CallSite, Fault, Operation};
use regex::Regex;
use std::fmt;
use tracing::{debug, warn};

/// One tracked check.
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    operation: Option<Operation>,
    call_site: Option<CallSite>,
    error: Option<Fault>,
}

impl Site {
    /// Create a site with an optional observed error.
    pub fn new(operation: Operation, call_site: CallSite, error: Option<Fault>) -> Self {
        Site {
            operation: Some(operation),
            call_site: Some(call_site),
            error,
        }
    }

    pub(crate) fn resolved(resolved: ResolvedSite) -> Self {
        Site {
            operation: resolved.operation,
            call_site: resolved.call_site,
            error: None,
        }
    }

    /// Name of the checking operation, empty when unattributed.
    pub fn name(&self) -> &'static str {
        self.operation.map(|op| op.name()).unwrap_or("")
    }

    /// The checking operation, if attributed.
    pub fn operation(&self) -> Option<Operation> {
        self.operation
    }

    /// Location of the caller, if attributed.
    pub fn call_site(&self) -> Option<CallSite> {
        self.call_site
    }

    /// Error observed at this site.
    pub fn error(&self) -> Option<&Fault> {
        self.error.as_ref()
    }

    pub(crate) fn set_error(&mut self, error: Option<Fault>) {
        self.error = error;
    }

    fn same_position(&self, other: &Site) -> bool {
        self.operation == other.operation && self.call_site == other.call_site
    }
}

/// Ordered checks of one execution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recording {
    sites: Vec<Site>,
}

impl Recording {
    /// Create an empty recording
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a recording from explicit sites.
    pub fn from_sites(sites: Vec<Site>) -> Self {
        Recording { sites }
    }

    /// Number of recorded checks
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Whether no check was recorded
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Site at `index`
    pub fn get(&self, index: usize) -> Option<&Site> {
        self.sites.get(index)
    }

    /// Iterate sites in invocation order
    pub fn iter(&self) -> std::slice::Iter<'_, Site> {
        self.sites.iter()
    }

    /// Recorded sites
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// Whether the error at `index` matches the regular expression `pattern`.
    ///
    /// False when `index` is out of range, the site saw no error, or the
    /// pattern does not compile.
    pub fn error_matches(&self, index: usize, pattern: &str) -> bool {
        match Regex::new(pattern) {
            Ok(re) => self.error_matches_regex(index, &re),
            Err(e) => {
                warn!(target: "faultcheck::testing", pattern, error = %e, "Invalid error pattern");
                false
            }
        }
    }

    /// Whether the error at `index` matches a compiled pattern.
    pub fn error_matches_regex(&self, index: usize, re: &Regex) -> bool {
        self.get(index)
            .and_then(Site::error)
            .is_some_and(|fault| re.is_match(&fault.to_string()))
    }

    /// Merge the errors observed in `candidate` into this master recording.
    ///
    /// The candidate must be no longer than the master and agree on
    /// operation and call site at every position it has. Non-empty errors
    /// overwrite the master's; empty ones leave it untouched.
    pub fn track_errors(&mut self, candidate: &Recording) -> Result<()> {
        if candidate.len() > self.len() {
            return Err(TrackError::LengthMismatch {
                candidate: candidate.len(),
                master: self.len(),
            });
        }
        if let Some(index) = self
            .sites
            .iter()
            .zip(&candidate.sites)
            .position(|(master, observed)| !master.same_position(observed))
        {
            debug!(target: "faultcheck::testing", index, "Candidate diverges from master");
            return Err(TrackError::PositionMismatch { index });
        }
        for (master, observed) in self.sites.iter_mut().zip(&candidate.sites) {
            if let Some(error) = &observed.error {
                master.error = Some(error.clone());
            }
        }
        Ok(())
    }

    /// Whether every position has observed at least one error.
    pub fn all_errors_seen(&self) -> bool {
        self.sites.iter().all(|site| site.error.is_some())
    }

    /// Positions that have not yet observed an error.
    pub fn uncovered(&self) -> Vec<usize> {
        self.sites
            .iter()
            .enumerate()
            .filter(|(_, site)| site.error.is_none())
            .map(|(index, _)| index)
            .collect()
    }
}

impl<'a> IntoIterator for &'a Recording {
    type Item = &'a Site;
    type IntoIter = std::slice::Iter<'a, Site>;

    fn into_iter(self) -> Self::IntoIter {
        self.sites.iter()
    }
}

impl fmt::Display for Recording {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, site) in self.sites.iter().enumerate() {
            let name = match site.name() {
                "" => "?",
                name => name,
            };
            write!(f, "#{} {}", index, name)?;
            if let Some(at) = &site.call_site {
                write!(f, " @ {}", at)?;
            }
            match &site.error {
                Some(error) => writeln!(f, ": {}", error)?,
                None => writeln!(f)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(op: Operation, line: u32, error: Option<&str>) -> Site {
        Site::new(op, CallSite::new("app/src/gen.rs", line, 5), error.map(Fault::msg))
    }

    fn clean() -> Recording {
        Recording::from_sites(vec![
            site(Operation::True, 1, None),
            site(Operation::Truef, 2, None),
            site(Operation::Return, 3, None),
        ])
    }

    #[test]
    fn test_error_matches() {
        let rec = Recording::from_sites(vec![
            site(Operation::True, 1, None),
            site(Operation::Truef, 2, Some("truef error")),
        ]);
        assert!(rec.error_matches(1, "truef"));
        assert!(rec.error_matches(1, "^truef error$"));
        assert!(!rec.error_matches(1, "^error"));
        assert!(!rec.error_matches(0, "."));
        assert!(!rec.error_matches(2, "."));
    }

    #[test]
    fn test_error_matches_invalid_pattern() {
        let rec = Recording::from_sites(vec![site(Operation::True, 1, Some("x"))]);
        assert!(!rec.error_matches(0, "("));
    }

    #[test]
    fn test_track_errors_identical_is_noop() {
        let mut master = clean();
        let copy = master.clone();
        master.track_errors(&copy).unwrap();
        assert_eq!(master, copy);
    }

    #[test]
    fn test_track_errors_longer_candidate() {
        let mut master = Recording::from_sites(vec![site(Operation::True, 1, None)]);
        let err = master.track_errors(&clean()).unwrap_err();
        assert_eq!(
            err,
            TrackError::LengthMismatch {
                candidate: 3,
                master: 1
            }
        );
    }

    #[test]
    fn test_track_errors_divergent_site() {
        let mut master = clean();
        let candidate = Recording::from_sites(vec![
            site(Operation::True, 1, None),
            site(Operation::Truef, 9, Some("elsewhere")),
        ]);
        assert_eq!(
            master.track_errors(&candidate),
            Err(TrackError::PositionMismatch { index: 1 })
        );
        assert!(master.uncovered().len() == 3);
    }

    #[test]
    fn test_track_errors_divergent_operation() {
        let mut master = clean();
        let candidate = Recording::from_sites(vec![site(Operation::Error, 1, None)]);
        assert_eq!(
            master.track_errors(&candidate),
            Err(TrackError::PositionMismatch { index: 0 })
        );
    }

    #[test]
    fn test_track_errors_latest_wins_and_keeps_earlier() {
        let mut master = clean();
        let first = Recording::from_sites(vec![site(Operation::True, 1, Some("first"))]);
        let second = Recording::from_sites(vec![
            site(Operation::True, 1, None),
            site(Operation::Truef, 2, Some("second")),
        ]);
        let third = Recording::from_sites(vec![site(Operation::True, 1, Some("third"))]);

        master.track_errors(&first).unwrap();
        master.track_errors(&second).unwrap();
        assert!(master.error_matches(0, "^first$"));
        master.track_errors(&third).unwrap();
        assert!(master.error_matches(0, "^third$"));
        assert!(master.error_matches(1, "^second$"));
        assert_eq!(master.uncovered(), vec![2]);
        assert!(!master.all_errors_seen());
    }

    #[test]
    fn test_all_errors_seen() {
        assert!(Recording::new().all_errors_seen());
        let mut master = clean();
        assert!(!master.all_errors_seen());
        let full = Recording::from_sites(vec![
            site(Operation::True, 1, Some("a")),
            site(Operation::Truef, 2, Some("b")),
            site(Operation::Return, 3, Some("c")),
        ]);
        master.track_errors(&full).unwrap();
        assert!(master.all_errors_seen());
    }

    #[test]
    fn test_display() {
        let mut rec = clean();
        rec.sites.push(Site::resolved(ResolvedSite::unknown()));
        rec.sites[2].set_error(Some(Fault::msg("boom")));
        let text = rec.to_string();
        assert!(text.contains("#0 True @ app/src/gen.rs:1:5\n"));
        assert!(text.contains("#2 Return @ app/src/gen.rs:3:5: boom\n"));
        assert!(text.contains("#3 ?\n"));
    }
}

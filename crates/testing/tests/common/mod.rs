//! Shared workloads for harness integration tests.
//!
//! The workloads stand in for production code: they check through a
//! [`Checker`] slot and never know whether a test patched it.

#![allow(dead_code)]

use faultcheck_checker::{Checker, Fault};
use faultcheck_testing::Recording;

/// Operation name and error message each workload check produces on failure.
pub const EXPECTED: [(&str, &str); 5] = [
    ("True", "true error"),
    ("Truef", "truef error"),
    ("Return", "return error"),
    ("Error", "error check"),
    ("Output", "output error; output: 0"),
];

/// Route harness logs through the test writer.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn check_err(message: &str, pass: bool) -> Result<(), Fault> {
    if pass {
        Ok(())
    } else {
        Err(Fault::msg(message))
    }
}

fn check_return(message: &str, pass: bool) -> Result<i32, Fault> {
    check_err(message, pass).map(|()| 0)
}

/// Five checks, one per operation kind, each guarded by `pass[i]`.
pub fn error_gen(checker: &Checker, pass: &[bool]) -> Result<(), Fault> {
    checker.recover(|| {
        checker.is_true(pass[0], "true error");
        checker.is_true_fmt(pass[1], format_args!("truef {}", "error"));
        let _ = checker.value(check_return("return error", pass[2]));
        checker.error(check_err("error check", pass[3]));
        let _ = checker.output(0, check_err("output error", pass[4]));
    })
}

/// Five error checks named A through E.
pub fn five_checks(checker: &Checker, guards: &[bool; 5]) -> Result<(), Fault> {
    checker.recover(|| {
        checker.error(check_err("check A failed", guards[0]));
        checker.error(check_err("check B failed", guards[1]));
        checker.error(check_err("check C failed", guards[2]));
        checker.error(check_err("check D failed", guards[3]));
        checker.error(check_err("check E failed", guards[4]));
    })
}

/// One guard combination for [`error_gen`] and the sites it should record.
#[derive(Debug, Clone)]
pub struct GenCase {
    pub pass: Vec<bool>,
    /// (operation name, error message if the check fails)
    pub sites: Vec<(&'static str, Option<&'static str>)>,
}

/// All 32 guard combinations; bit `j` of the case index is `pass[j]`.
pub fn gen_cases() -> Vec<GenCase> {
    (0..1usize << 5)
        .map(|i| {
            let pass: Vec<bool> = (0..5).map(|j| i & (1 << j) != 0).collect();
            let mut sites = Vec::new();
            for (j, &ok) in pass.iter().enumerate() {
                let (name, message) = EXPECTED[j];
                sites.push((name, if ok { None } else { Some(message) }));
                if !ok {
                    break;
                }
            }
            GenCase { pass, sites }
        })
        .collect()
}

/// Assert that `obtained` records exactly the expected sites.
pub fn check_results(expected: &[(&str, Option<&str>)], obtained: &Recording) {
    assert_eq!(
        obtained.len(),
        expected.len(),
        "mismatched number of sites:\n{}",
        obtained
    );
    for (index, ((name, message), site)) in expected.iter().zip(obtained).enumerate() {
        assert_eq!(site.name(), *name, "function mismatch at #{}", index);
        assert!(site.call_site().is_some(), "unattributed site #{}", index);
        match message {
            None => assert!(site.error().is_none(), "unexpected error at #{}", index),
            Some(message) => assert_eq!(
                site.error().map(|e| e.to_string()).as_deref(),
                Some(*message),
                "wrong error at #{}",
                index
            ),
        }
    }
}

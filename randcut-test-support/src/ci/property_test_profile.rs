//! Property-test run profile parsing for CI and local overrides.
//!
//! Every proptest suite in the workspace reads its case count and fork mode
//! through [`ProptestRunProfile`], so one pair of environment variables tunes
//! them all.

use std::env;

/// Environment variable controlling proptest case counts.
pub const PROGTEST_CASES_ENV_KEY: &str = "PROGTEST_CASES";
/// Environment variable controlling proptest process forking.
pub const RANDCUT_PBT_FORK_ENV_KEY: &str = "RANDCUT_PBT_FORK";

/// Runtime profile for property-test execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Loads a profile from the process environment with provided defaults.
    ///
    /// Unparseable overrides are reported with `tracing::warn!` and replaced
    /// by the defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use randcut_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(64, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self::from_lookup(default_cases, default_fork, |key| env::var(key).ok())
    }

    /// Builds a profile from an arbitrary key lookup.
    ///
    /// # Examples
    ///
    /// ```
    /// use randcut_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::from_lookup(64, false, |key| {
    ///     (key == "PROGTEST_CASES").then(|| "8".to_owned())
    /// });
    /// assert_eq!(profile.cases(), 8);
    /// assert!(!profile.fork());
    /// ```
    #[must_use]
    pub fn from_lookup(
        default_cases: u32,
        default_fork: bool,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let cases = read_or_default(&lookup, PROGTEST_CASES_ENV_KEY, default_cases, parse_cases);
        let fork = read_or_default(&lookup, RANDCUT_PBT_FORK_ENV_KEY, default_fork, parse_bool);
        Self { cases, fork }
    }

    /// Number of cases to run per property.
    #[must_use]
    pub fn cases(&self) -> u32 {
        self.cases
    }

    /// Whether to run proptest cases in forked subprocesses.
    #[must_use]
    pub fn fork(&self) -> bool {
        self.fork
    }
}

fn read_or_default<T: Copy>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
    parser: fn(&str) -> Result<T, String>,
) -> T {
    let Some(raw) = lookup(key) else {
        return default;
    };
    parser(&raw).unwrap_or_else(|reason| {
        tracing::warn!(
            env = key,
            raw = %raw,
            reason = %reason,
            "invalid property-test profile override; using default",
        );
        default
    })
}

fn parse_cases(raw: &str) -> Result<u32, String> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err("cases must be > 0".to_owned()),
        Ok(cases) => Ok(cases),
        Err(error) => Err(format!("parse error: {error}")),
    }
}

fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err("expected one of: true/false/1/0/yes/no/on/off".to_owned()),
    }
}

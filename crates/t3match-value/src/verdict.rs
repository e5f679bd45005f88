use crate::ValueError;
use std::fmt;
use std::str::FromStr;

/// Test verdict, ordered by severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Verdict {
    #[default]
    None,
    Pass,
    Inconc,
    Fail,
    Error,
}

impl Verdict {
    pub const ALL: [Verdict; 5] = [
        Verdict::None,
        Verdict::Pass,
        Verdict::Inconc,
        Verdict::Fail,
        Verdict::Error,
    ];

    /// Combines two verdicts the way `setverdict` does: a verdict can only
    /// get worse.
    pub fn merge(self, other: Verdict) -> Verdict {
        self.max(other)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::None => "none",
            Verdict::Pass => "pass",
            Verdict::Inconc => "inconc",
            Verdict::Fail => "fail",
            Verdict::Error => "error",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verdict {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Verdict::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| ValueError::UnknownVerdict(s.to_string()))
    }
}

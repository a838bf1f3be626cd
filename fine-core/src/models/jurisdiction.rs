use std::fmt;

use serde::Serialize;

/// Two-letter region code: a U.S. state, the District of Columbia, or a
/// Canadian province hosting a cross-border team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct JurisdictionCode(&'static str);

const CANADIAN_PROVINCES: [&str; 5] = ["AB", "BC", "MB", "ON", "QC"];

impl JurisdictionCode {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    pub fn is_canadian_province(&self) -> bool {
        CANADIAN_PROVINCES.contains(&self.0)
    }
}

impl fmt::Display for JurisdictionCode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.pad(self.0)
    }
}

/// Response header that carries the outcome of every request.
pub const FAIRMATCH_STATUS_HEADER: &str = "X-Fairmatch-Status";
pub const FAIRMATCH_STATUS_HEALTHY: &str = "healthy";
pub const FAIRMATCH_STATUS_READY: &str = "ready";
pub const FAIRMATCH_STATUS_NOT_READY: &str = "not_ready";
pub const FAIRMATCH_STATUS_STORED: &str = "stored";
pub const FAIRMATCH_STATUS_OK: &str = "ok";
pub const FAIRMATCH_STATUS_ERROR: &str = "error";
pub const FAIRMATCH_STATUS_DISABLED: &str = "disabled";

/// Outcome of a `/match` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchStatus {
    GoodMatch,
    NotGoodMatch,
}

impl MatchStatus {
    pub fn from_decision(is_good_match: bool) -> Self {
        if is_good_match {
            MatchStatus::GoodMatch
        } else {
            MatchStatus::NotGoodMatch
        }
    }

    #[inline]
    pub fn as_header_value(&self) -> &'static str {
        match self {
            MatchStatus::GoodMatch => "GOOD_MATCH",
            MatchStatus::NotGoodMatch => "NOT_GOOD_MATCH",
        }
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_header_value())
    }
}

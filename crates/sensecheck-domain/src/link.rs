//! Link module
//!
//! A link carries two independent statuses: the reviewer's judgment
//! ([`LinkStatus`]) and the prober's observation ([`ValidationStatus`]).

/// Reviewer judgment on a link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkStatus {
    /// Not yet judged
    Unverified,
    /// Judged a valid source
    Valid,
    /// Judged invalid
    Invalid,
    /// Judged suspicious
    Suspicious,
}

impl LinkStatus {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkStatus::Unverified => "unverified",
            LinkStatus::Valid => "valid",
            LinkStatus::Invalid => "invalid",
            LinkStatus::Suspicious => "suspicious",
        }
    }

    /// Parse a status string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "unverified" => Some(LinkStatus::Unverified),
            "valid" => Some(LinkStatus::Valid),
            "invalid" => Some(LinkStatus::Invalid),
            "suspicious" => Some(LinkStatus::Suspicious),
            _ => None,
        }
    }
}

impl std::str::FromStr for LinkStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid link status: {}", s))
    }
}

/// Machine-probed liveness of a link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationStatus {
    /// Not probed yet
    Pending,
    /// Answered with 2xx
    Working,
    /// 404, 5xx or any other non-success status
    Broken,
    /// 401, 403 or 429
    Restricted,
    /// Transport failure
    Error,
}

impl ValidationStatus {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationStatus::Pending => "pending",
            ValidationStatus::Working => "working",
            ValidationStatus::Broken => "broken",
            ValidationStatus::Restricted => "restricted",
            ValidationStatus::Error => "error",
        }
    }

    /// Whether this status is the result of a finished probe
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ValidationStatus::Pending)
    }
}

/// What a single validation pass observed for one link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    /// Classified result
    pub status: ValidationStatus,
    /// Last HTTP status seen, if any response arrived
    pub http_status: Option<u16>,
    /// Human-readable explanation for anything other than `Working`
    pub error: Option<String>,
    /// Attempts made beyond the first
    pub retries_used: u32,
}

/// A hyperlink found in free text or chapter content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Identifier, unique within its chapter (or extraction call)
    pub id: String,
    /// Absolute URL with trailing punctuation removed
    pub url: String,
    /// Markdown anchor text, or a synthesized label for bare URLs
    pub anchor_text: String,
    /// Reviewer judgment
    pub status: LinkStatus,
    /// Probe result
    pub validation_status: ValidationStatus,
    /// Last HTTP status seen
    pub http_status: Option<u16>,
    /// Probe error message
    pub validation_error: Option<String>,
    /// Probe attempts beyond the first
    pub retries_used: u32,
}

impl Link {
    /// Create an unverified, unprobed link
    pub fn new(id: impl Into<String>, url: impl Into<String>, anchor_text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            anchor_text: anchor_text.into(),
            status: LinkStatus::Unverified,
            validation_status: ValidationStatus::Pending,
            http_status: None,
            validation_error: None,
            retries_used: 0,
        }
    }

    /// Record a probe outcome on this link
    ///
    /// While the link is still `Unverified`, a broken probe marks it
    /// `Invalid` and a restricted probe marks it `Suspicious`. A working probe
    /// never marks a link `Valid`; that stays a reviewer decision.
    pub fn apply_validation(&mut self, outcome: ValidationOutcome) {
        if self.status == LinkStatus::Unverified {
            match outcome.status {
                ValidationStatus::Broken => self.status = LinkStatus::Invalid,
                ValidationStatus::Restricted => self.status = LinkStatus::Suspicious,
                _ => {}
            }
        }
        self.validation_status = outcome.status;
        self.http_status = outcome.http_status;
        self.validation_error = outcome.error;
        self.retries_used = outcome.retries_used;
    }

    /// Whether a reviewer (or a derived validation) has judged this link
    pub fn is_verified(&self) -> bool {
        self.status != LinkStatus::Unverified
    }
}

pub mod mock_parser;

use crate::entities::profile::Experience;

/// Fields a parser managed to derive from a portfolio URL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedPortfolio {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub summary: Option<String>,
    pub experiences: Option<Vec<Experience>>,
}

impl ParsedPortfolio {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.summary.is_none()
            && self.experiences.is_none()
    }
}

pub trait PortfolioParser: Send + Sync {
    /// Derives whatever profile data it can from the URL. Never fails;
    /// an unrecognised URL yields an empty result.
    fn parse(&self, portfolio_url: &str) -> ParsedPortfolio;
}

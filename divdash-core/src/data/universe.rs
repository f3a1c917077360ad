//! Universe configuration: the ordered ticker list a run covers.
//!
//! The universe is stored as a TOML table with a single `tickers` array.
//! Order matters: it is the processing order, and the tie-break order for
//! records with equal yields.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered set of ticker symbols.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Universe {
    pub tickers: Vec<String>,
}

impl Universe {
    pub fn new<I, S>(tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tickers: tickers.into_iter().map(Into::into).collect(),
        }
    }

    pub fn symbols(&self) -> Vec<&str> {
        self.tickers.iter().map(|t| t.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }

    /// Trim and upper-case symbols, drop blanks and repeats (first wins).
    pub fn normalized(&self) -> Self {
        let mut seen = HashSet::new();
        let tickers = self
            .tickers
            .iter()
            .map(|t| t.trim().to_ascii_uppercase())
            .filter(|t| !t.is_empty())
            .filter(|t| seen.insert(t.clone()))
            .collect();
        Self { tickers }
    }

    /// Curated US dividend payers, grouped loosely by sector.
    pub fn default_dividend() -> Self {
        Self::new([
            // Energy
            "XOM", "CVX", "COP", "EOG", "PSX", "VLO", "MPC", "OKE", "WMB", "KMI",
            // Utilities
            "NEE", "DUK", "SO", "D", "AEP", "SRE", "EXC", "XEL", "ED", "WEC",
            // Real estate
            "O", "AMT", "PLD", "CCI", "SPG", "PSA", "WELL", "DLR", "VICI", "AVB",
            // Consumer staples
            "PG", "KO", "PEP", "PM", "MO", "CL", "KMB", "GIS", "K", "SJM",
            // Financials
            "JPM", "BAC", "WFC", "USB", "PNC", "TFC", "CFG", "FITB", "KEY", "RF",
            // Healthcare
            "JNJ", "PFE", "ABBV", "MRK", "BMY", "AMGN", "GILD", "MDT",
            // Industrials
            "MMM", "CAT", "EMR", "ITW", "SWK", "GD", "LMT", "RTX",
            // Telecom
            "VZ", "T", "TMUS",
            // Technology
            "AAPL", "MSFT", "AVGO", "TXN", "IBM", "CSCO", "INTC", "QCOM",
            // Materials
            "LIN", "APD", "NUE", "DOW",
        ])
    }
}

impl Default for Universe {
    fn default() -> Self {
        Self::default_dividend()
    }
}

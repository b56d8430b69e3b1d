//! Moving-average window definitions.
//!
//! This module defines [`MaWindow`], the fixed set of simple-moving-average
//! windows the price-trend classifier computes.

use serde::{Deserialize, Serialize};

/// A simple-moving-average window used by the price-trend classifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaWindow {
    /// 5 trading days (one week).
    Ma5,
    /// 25 trading days (roughly one month).
    Ma25,
    /// 75 trading days (roughly one quarter).
    Ma75,
    /// 200 trading days (roughly ten months).
    Ma200,
}

impl MaWindow {
    /// All classifier windows, shortest first.
    pub const ALL: [Self; 4] = [Self::Ma5, Self::Ma25, Self::Ma75, Self::Ma200];

    /// Window length in trading days.
    #[must_use]
    pub const fn days(self) -> usize {
        match self {
            Self::Ma5 => 5,
            Self::Ma25 => 25,
            Self::Ma75 => 75,
            Self::Ma200 => 200,
        }
    }

    /// Key under which this window appears in the output document.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Ma5 => "ma_5",
            Self::Ma25 => "ma_25",
            Self::Ma75 => "ma_75",
            Self::Ma200 => "ma_200",
        }
    }

    /// Returns true for windows that need several months of history.
    #[must_use]
    pub const fn is_long(self) -> bool {
        matches!(self, Self::Ma75 | Self::Ma200)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_match_keys() {
        for window in MaWindow::ALL {
            let suffix = window.key().strip_prefix("ma_").unwrap();
            assert_eq!(suffix.parse::<usize>().unwrap(), window.days());
        }
    }

    #[test]
    fn test_all_is_ascending() {
        let days: Vec<usize> = MaWindow::ALL.iter().map(|w| w.days()).collect();
        assert_eq!(days, vec![5, 25, 75, 200]);
    }
}

use crate::error::{Result, TreeError};

/// Weight-balance ratio `numerator / denominator`.
///
/// A branch whose child holds more than this fraction of its leaves is a
/// scapegoat. The allowed tree height after `n` insertions is
/// `floor(log(n) / log(denominator / numerator))`.
///
/// Ratios below 2/3 are rejected: a median rebuild of an odd-sized subtree
/// can then overshoot the height bound, leaving no scapegoat on the path.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BalanceConfig {
    pub numerator: usize,
    pub denominator: usize,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        BalanceConfig {
            numerator: 2,
            denominator: 3,
        }
    }
}

impl BalanceConfig {
    pub fn new(numerator: usize, denominator: usize) -> Result<Self> {
        let config = BalanceConfig {
            numerator,
            denominator,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        // 2/3 <= n/d < 1
        let valid = self.denominator > 0
            && 3 * self.numerator >= 2 * self.denominator
            && self.numerator < self.denominator;
        if valid {
            Ok(())
        } else {
            Err(TreeError::InvalidConfig {
                numerator: self.numerator,
                denominator: self.denominator,
            })
        }
    }

    pub fn max_height(&self, max_items: usize) -> usize {
        if max_items <= 1 {
            return 0;
        }
        let base = self.denominator as f64 / self.numerator as f64;
        ((max_items as f64).ln() / base.ln()).floor() as usize
    }

    pub fn is_scapegoat(&self, node_size: usize, child_size: usize) -> bool {
        self.denominator * child_size > self.numerator * node_size
    }
}

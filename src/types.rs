use serde::{Deserialize, Serialize};

/// Result of checking whether a component descriptor should be suppressed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockResult {
    pub should_block: bool,
    pub reason: String,
    pub category: BlockCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockCategory {
    GeneralAds,
    Buttons,
    Comments,
    Clean,
}

/// Statistics about suppressed components
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlockStats {
    pub total_evaluations: u64,
    pub blocked: u64,
    pub ads_blocked: u64,
    pub buttons_blocked: u64,
    pub comments_blocked: u64,
}

impl BlockStats {
    pub fn block_percentage(&self) -> f64 {
        if self.total_evaluations == 0 {
            0.0
        } else {
            (self.blocked as f64 / self.total_evaluations as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_percentage_handles_zero_evaluations() {
        assert_eq!(BlockStats::default().block_percentage(), 0.0);
    }

    #[test]
    fn block_percentage_is_a_ratio() {
        let stats = BlockStats {
            total_evaluations: 4,
            blocked: 1,
            ..Default::default()
        };
        assert_eq!(stats.block_percentage(), 25.0);
    }
}

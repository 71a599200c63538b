//! Canned reply selection.

use std::time::Duration;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::DelayRange;
use crate::error::ConfigError;

/// A reply chosen for delivery, together with its simulated latency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedReply {
    pub reply: String,
    pub delay: Duration,
}

/// Picks a reply and a simulated latency for it.
///
/// Selection is uniform over the reply set and independent of conversation
/// history; there is no reasoning backend behind it. The reply set and delay
/// range are validated at construction, so selection itself cannot fail.
#[derive(Debug, Clone)]
pub struct ResponseSelector {
    replies: Vec<String>,
    delay: DelayRange,
}

impl ResponseSelector {
    /// Creates a selector over a fixed reply set and delay range.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty reply set or an inverted delay range.
    /// Both are startup configuration errors, not runtime faults.
    pub fn new(replies: Vec<String>, delay: DelayRange) -> Result<Self, ConfigError> {
        if replies.is_empty() {
            return Err(ConfigError::EmptyReplySet);
        }
        if delay.min_ms > delay.max_ms {
            return Err(ConfigError::InvalidDelayRange {
                min_ms: delay.min_ms,
                max_ms: delay.max_ms,
            });
        }
        Ok(Self { replies, delay })
    }

    /// Draws a reply uniformly at random and a delay uniformly from the
    /// closed interval `[min_ms, max_ms]`.
    pub fn select(&self) -> SelectedReply {
        let mut rng = rand::thread_rng();
        // the set is non-empty by construction
        let reply = self
            .replies
            .choose(&mut rng)
            .cloned()
            .unwrap_or_default();
        let delay_ms = rng.gen_range(self.delay.min_ms..=self.delay.max_ms);
        SelectedReply {
            reply,
            delay: Duration::from_millis(delay_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replies() -> Vec<String> {
        vec!["one".to_string(), "two".to_string(), "three".to_string()]
    }

    #[test]
    fn degenerate_range_yields_exact_delay() {
        let selector =
            ResponseSelector::new(replies(), DelayRange { min_ms: 5, max_ms: 5 }).unwrap();
        for _ in 0..20 {
            assert_eq!(selector.select().delay, Duration::from_millis(5));
        }
    }

    #[test]
    fn selected_reply_is_a_member_of_the_set() {
        let set = replies();
        let selector =
            ResponseSelector::new(set.clone(), DelayRange { min_ms: 0, max_ms: 10 }).unwrap();
        for _ in 0..50 {
            let picked = selector.select();
            assert!(set.contains(&picked.reply));
            assert!(picked.delay <= Duration::from_millis(10));
        }
    }

    #[test]
    fn empty_reply_set_is_rejected() {
        let result = ResponseSelector::new(Vec::new(), DelayRange::default());
        assert!(matches!(result, Err(ConfigError::EmptyReplySet)));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let result = ResponseSelector::new(replies(), DelayRange { min_ms: 9, max_ms: 1 });
        assert!(matches!(
            result,
            Err(ConfigError::InvalidDelayRange { min_ms: 9, max_ms: 1 })
        ));
    }
}

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// When the hidden capture form becomes visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum RevealPolicy {
    /// Hidden until play; one timer started by the first play.
    DelayAfterPlay { delay_seconds: u64 },
    /// Long timer from page load, short timer from the first play; the
    /// earlier one wins.
    DelayAfterLoad {
        fallback_seconds: u64,
        after_play_seconds: u64,
    },
}

impl Default for RevealPolicy {
    fn default() -> Self {
        RevealPolicy::DelayAfterPlay { delay_seconds: 5 }
    }
}

impl RevealPolicy {
    /// Timer to start when the page loads, if any.
    pub fn on_load(&self) -> Option<Duration> {
        match self {
            RevealPolicy::DelayAfterPlay { .. } => None,
            RevealPolicy::DelayAfterLoad {
                fallback_seconds, ..
            } => Some(Duration::from_secs(*fallback_seconds)),
        }
    }

    /// Timer to start when playback starts.
    pub fn on_play(&self) -> Duration {
        match self {
            RevealPolicy::DelayAfterPlay { delay_seconds } => Duration::from_secs(*delay_seconds),
            RevealPolicy::DelayAfterLoad {
                after_play_seconds, ..
            } => Duration::from_secs(*after_play_seconds),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealReason {
    LoadTimer,
    PlayTimer,
    SkipVideo,
}

/// One-way `hidden -> visible` switch.
#[derive(Debug, Clone, Default)]
pub struct RevealLatch {
    revealed_by: Option<RevealReason>,
}

impl RevealLatch {
    pub fn is_visible(&self) -> bool {
        self.revealed_by.is_some()
    }

    pub fn revealed_by(&self) -> Option<RevealReason> {
        self.revealed_by
    }

    /// Returns `true` only for the call that flipped the latch.
    pub fn reveal(&mut self, reason: RevealReason) -> bool {
        if self.revealed_by.is_some() {
            return false;
        }
        self.revealed_by = Some(reason);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latch_flips_once() {
        let mut latch = RevealLatch::default();
        assert!(!latch.is_visible());
        assert!(latch.reveal(RevealReason::PlayTimer));
        assert!(!latch.reveal(RevealReason::LoadTimer));
        assert!(!latch.reveal(RevealReason::SkipVideo));
        assert!(latch.is_visible());
        assert_eq!(latch.revealed_by(), Some(RevealReason::PlayTimer));
    }

    #[test]
    fn test_policy_timers() {
        let play = RevealPolicy::DelayAfterPlay { delay_seconds: 5 };
        assert_eq!(play.on_load(), None);
        assert_eq!(play.on_play(), Duration::from_secs(5));

        let load = RevealPolicy::DelayAfterLoad {
            fallback_seconds: 600,
            after_play_seconds: 30,
        };
        assert_eq!(load.on_load(), Some(Duration::from_secs(600)));
        assert_eq!(load.on_play(), Duration::from_secs(30));
    }

    #[test]
    fn test_policy_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            reveal: RevealPolicy,
        }

        let parsed: Wrapper = toml::from_str(
            r#"
[reveal]
policy = "delay_after_load"
fallback_seconds = 900
after_play_seconds = 45
"#,
        )
        .unwrap();
        assert_eq!(
            parsed.reveal,
            RevealPolicy::DelayAfterLoad {
                fallback_seconds: 900,
                after_play_seconds: 45
            }
        );
    }
}

use serde::{Deserialize, Serialize};
use crate::local::{LocalMediaItem, NO_LOCAL_MATCH};

/// Comparable subset of a remote catalog entry
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemoteRecord {
    pub title: String,
    pub original_title: String,
    pub year: Option<i32>,
    pub external_id: Option<String>,
}

impl RemoteRecord {
    pub fn new(title: impl Into<String>, original_title: impl Into<String>, year: Option<i32>) -> Self {
        Self {
            title: title.into(),
            original_title: original_title.into(),
            year,
            external_id: None,
        }
    }

    pub fn with_external_id(mut self, external_id: impl Into<String>) -> Self {
        let id = external_id.into();
        self.external_id = if id.is_empty() { None } else { Some(id) };
        self
    }
}

/// Outcome of reconciling one remote record against the local index
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchResult {
    pub matched: bool,
    pub local_id: i64,
    pub play_count: u32,
    pub episode_count: Option<u32>,
    pub watched_episode_count: Option<u32>,
    /// Only set when matched and `episode_count` is non-zero
    pub unwatched_episode_count: Option<u32>,
    pub file_path: Option<String>,
}

impl MatchResult {
    pub fn unmatched() -> Self {
        Self {
            matched: false,
            local_id: NO_LOCAL_MATCH,
            play_count: 0,
            episode_count: None,
            watched_episode_count: None,
            unwatched_episode_count: None,
            file_path: None,
        }
    }

    /// Merge the watch state of a matched local item
    pub fn from_local(item: &LocalMediaItem) -> Self {
        let unwatched_episode_count = match item.episode_count {
            Some(total) if total > 0 => {
                Some(total.saturating_sub(item.watched_episode_count.unwrap_or(0)))
            }
            _ => None,
        };

        Self {
            matched: true,
            local_id: item.local_id,
            play_count: item.play_count,
            episode_count: item.episode_count,
            watched_episode_count: item.watched_episode_count,
            unwatched_episode_count,
            file_path: item.file_path.clone(),
        }
    }

    /// Library row ids start at 1, anything else is not playable locally
    pub fn is_local(&self) -> bool {
        self.local_id > 0
    }
}

impl Default for MatchResult {
    fn default() -> Self {
        Self::unmatched()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MediaKind;

    fn show(episodes: Option<u32>, watched: Option<u32>) -> LocalMediaItem {
        LocalMediaItem {
            kind: MediaKind::Show,
            title: "Dark".to_string(),
            original_title: "Dark".to_string(),
            year: Some(2017),
            external_id: None,
            local_id: 4,
            play_count: 1,
            episode_count: episodes,
            watched_episode_count: watched,
            file_path: None,
        }
    }

    #[test]
    fn test_unmatched_defaults() {
        let result = MatchResult::unmatched();
        assert!(!result.matched);
        assert_eq!(result.local_id, -1);
        assert_eq!(result.play_count, 0);
        assert_eq!(result.unwatched_episode_count, None);
        assert!(!result.is_local());
    }

    #[test]
    fn test_unwatched_computed_from_counters() {
        let result = MatchResult::from_local(&show(Some(26), Some(10)));
        assert_eq!(result.unwatched_episode_count, Some(16));
        assert!(result.is_local());
    }

    #[test]
    fn test_unwatched_absent_without_episode_data() {
        assert_eq!(MatchResult::from_local(&show(None, Some(3))).unwatched_episode_count, None);
        assert_eq!(MatchResult::from_local(&show(Some(0), Some(0))).unwatched_episode_count, None);
    }

    #[test]
    fn test_empty_external_id_is_none() {
        let record = RemoteRecord::new("Dune", "Dune", Some(2021)).with_external_id("");
        assert_eq!(record.external_id, None);
    }
}

//! Chat allow-list

use std::collections::BTreeSet;

use teloxide::types::ChatId;

use crate::config::ConfigError;

/// Fixed set of chat IDs allowed to upload torrents
///
/// An empty list rejects everyone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    ids: BTreeSet<i64>,
}

impl AllowList {
    pub fn new(ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    /// Parse a comma-separated list such as `"111, 222,,-100333"`
    ///
    /// Blank entries are skipped; anything else that is not an integer is an
    /// error rather than being silently dropped.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        raw.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<i64>()
                    .map_err(|_| ConfigError::InvalidChatId(part.to_string()))
            })
            .collect::<Result<BTreeSet<_>, _>>()
            .map(|ids| Self { ids })
    }

    pub fn is_authorized(&self, chat_id: ChatId) -> bool {
        self.ids.contains(&chat_id.0)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_authorized() {
        let list = AllowList::new([111, -100222]);
        assert!(list.is_authorized(ChatId(111)));
        assert!(list.is_authorized(ChatId(-100222)));
        assert!(!list.is_authorized(ChatId(222)));
        assert!(!list.is_authorized(ChatId(0)));
    }

    #[test]
    fn test_empty_list_rejects_all() {
        let list = AllowList::default();
        assert!(list.is_empty());
        for id in [0, 1, 111, -1, i64::MAX, i64::MIN] {
            assert!(!list.is_authorized(ChatId(id)));
        }
    }

    #[test]
    fn test_parse() {
        let list = AllowList::parse(" 111, 222 ,,-100333,111").unwrap();
        assert_eq!(list.len(), 3);
        assert!(list.is_authorized(ChatId(222)));
        assert!(list.is_authorized(ChatId(-100333)));

        assert!(AllowList::parse("").unwrap().is_empty());
        assert!(AllowList::parse(" , ,").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        match AllowList::parse("111,abc") {
            Err(ConfigError::InvalidChatId(value)) => assert_eq!(value, "abc"),
            other => panic!("Expected InvalidChatId, got {:?}", other),
        }
        assert!(AllowList::parse("1.5").is_err());
        assert!(AllowList::parse("@channel").is_err());
    }
}

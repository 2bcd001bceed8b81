//! 対局設定

use serde::{Deserialize, Serialize};

use crate::variant::Variant;

/// 対局設定
///
/// 省略した項目は変種の既定値を使う。JSON・TOMLなどから読み込める。
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameConfig {
    /// 同一局面の出現を許す回数。これを超えると千日手
    #[serde(default)]
    pub max_acceptable_repetitions: Option<usize>,
}

impl GameConfig {
    /// 千日手とみなすまでに許す出現回数
    pub fn max_acceptable_repetitions<V: Variant>(&self) -> usize {
        self.max_acceptable_repetitions.unwrap_or(V::MAX_ACCEPTABLE_REPETITIONS)
    }

    pub fn with_max_acceptable_repetitions(mut self, n: usize) -> Self {
        self.max_acceptable_repetitions = Some(n);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::{AnimalShogi, Shogi};

    #[test]
    fn test_variant_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.max_acceptable_repetitions::<AnimalShogi>(), 2);
        assert_eq!(config.max_acceptable_repetitions::<Shogi>(), 3);
        let config = config.with_max_acceptable_repetitions(1);
        assert_eq!(config.max_acceptable_repetitions::<Shogi>(), 1);
    }

    #[test]
    fn test_deserialize() {
        let config: GameConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, GameConfig::default());
        let config: GameConfig = toml::from_str("max_acceptable_repetitions = 4").unwrap();
        assert_eq!(config.max_acceptable_repetitions, Some(4));
        assert!(serde_json::from_str::<GameConfig>(r#"{"unknown": 1}"#).is_err());
    }
}

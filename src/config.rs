/*
 * Reverse geocoder for administrative region boundaries
 *
 *  Copyright (C) 2025 Hiroshi KUWAGATA <kgt9221@gmail.com>
 */

//!
//! エンジンの動作設定をまとめたモジュール
//!
//! 設定値の優先順位は「明示指定 > 環境変数 > デフォルト値」。
//!

use std::path::PathBuf;
use std::time::Duration;

use crate::level::Level;

#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

/// データルートのデフォルト値
pub const DEFAULT_GEO_DATA_PATH: &str = "./data/geodata";

/// 子区画キャッシュの有効期間のデフォルト値(秒)
pub const DEFAULT_TTL_SECS: u64 = 300;

/// データルートを指定する環境変数
pub const ENV_GEO_DATA_PATH: &str = "GEO_DATA_PATH";

/// 解決する階層を指定する環境変数
pub const ENV_LEVEL: &str = "JETGEO_LEVEL";

/// 市級キャッシュの有効期間(秒)を指定する環境変数
pub const ENV_CITY_TTL: &str = "JETGEO_CITY_TTL";

/// 区級キャッシュの有効期間(秒)を指定する環境変数
pub const ENV_DISTRICT_TTL: &str = "JETGEO_DISTRICT_TTL";

///
/// エンジンの動作設定
///
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// 境界データのルートディレクトリ
    pub geo_data_path: PathBuf,

    /// 解決する最も深い階層
    pub level: Level,

    /// 市級キャッシュの有効期間
    pub city_ttl: Duration,

    /// 区級キャッシュの有効期間
    pub district_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geo_data_path: PathBuf::from(DEFAULT_GEO_DATA_PATH),
            level: Level::District,
            city_ttl: Duration::from_secs(DEFAULT_TTL_SECS),
            district_ttl: Duration::from_secs(DEFAULT_TTL_SECS),
        }
    }
}

impl Config {
    ///
    /// 環境変数による設定の上書き
    ///
    /// # 引数
    /// * `base` - 上書き元の設定
    ///
    /// # 戻り値
    /// 環境変数で指定された項目を上書きした設定を返す。
    ///
    pub fn from_env(base: Config) -> Config {
        Self::from_lookup(base, |key| std::env::var(key).ok())
    }

    ///
    /// 任意の参照関数による設定の上書き
    ///
    /// # 引数
    /// * `base` - 上書き元の設定
    /// * `lookup` - 変数名から値を引く関数
    ///
    /// # 注記
    /// 空文字列や解釈できない値は無視し、元の値を残す。
    ///
    pub fn from_lookup<F>(base: Config, lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = base;
        let lookup = |key: &str| lookup(key).filter(|val| !val.trim().is_empty());

        if let Some(path) = lookup(ENV_GEO_DATA_PATH) {
            cfg.geo_data_path = PathBuf::from(path);
        }

        if let Some(val) = lookup(ENV_LEVEL) {
            match val.parse() {
                Ok(level) => cfg.level = level,
                Err(err) => warn!("ignore {}: {}", ENV_LEVEL, err),
            }
        }

        if let Some(ttl) = lookup(ENV_CITY_TTL)
            .and_then(|val| parse_secs(ENV_CITY_TTL, &val))
        {
            cfg.city_ttl = ttl;
        }

        if let Some(ttl) = lookup(ENV_DISTRICT_TTL)
            .and_then(|val| parse_secs(ENV_DISTRICT_TTL, &val))
        {
            cfg.district_ttl = ttl;
        }

        cfg
    }
}

///
/// 秒数表記の有効期間の解釈
///
fn parse_secs(key: &str, val: &str) -> Option<Duration> {
    match val.trim().parse::<u64>() {
        Ok(secs) => Some(Duration::from_secs(secs)),
        Err(err) => {
            warn!("ignore {}={}: {}", key, val, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();

        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.geo_data_path, PathBuf::from("./data/geodata"));
        assert_eq!(cfg.level, Level::District);
        assert_eq!(cfg.city_ttl, Duration::from_secs(300));
        assert_eq!(cfg.district_ttl, Duration::from_secs(300));
    }

    #[test]
    fn environment_overrides_defaults() {
        let cfg = Config::from_lookup(
            Config::default(),
            lookup_from(&[
                ("GEO_DATA_PATH", "/srv/geodata"),
                ("JETGEO_LEVEL", "city"),
                ("JETGEO_CITY_TTL", "60"),
                ("JETGEO_DISTRICT_TTL", "120"),
            ]),
        );

        assert_eq!(cfg.geo_data_path, PathBuf::from("/srv/geodata"));
        assert_eq!(cfg.level, Level::City);
        assert_eq!(cfg.city_ttl, Duration::from_secs(60));
        assert_eq!(cfg.district_ttl, Duration::from_secs(120));
    }

    #[test]
    fn empty_and_invalid_values_are_ignored() {
        let base = Config {
            level: Level::Province,
            ..Config::default()
        };

        let cfg = Config::from_lookup(
            base.clone(),
            lookup_from(&[
                ("GEO_DATA_PATH", ""),
                ("JETGEO_LEVEL", "street"),
                ("JETGEO_CITY_TTL", "five minutes"),
            ]),
        );

        assert_eq!(cfg, base);
    }
}

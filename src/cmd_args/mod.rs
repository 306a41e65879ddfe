/*
 * Reverse geocoder for administrative region boundaries
 *
 *  Copyright (C) 2025 Hiroshi KUWAGATA <kgt9221@gmail.com>
 */

//!
//! コマンドラインオプション関連の処理をまとめたモジュール
//!

mod logger;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};

use jetgeo::{Config, Level};

///
/// ログレベルを指し示す列挙子
///
#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
#[clap(rename_all = "SCREAMING_SNAKE_CASE")]
enum LogLevel {
    /// ログを記録しない
    Off,

    /// エラー情報以上のレベルを記録
    Error,

    /// 警告情報以上のレベルを記録
    Warn,

    /// 一般情報以上のレベルを記録
    Info,

    /// デバッグ情報以上のレベルを記録
    Debug,

    /// トレース情報以上のレベルを記録
    Trace,
}

///
/// コマンドラインオプションをまとめた構造体
///
#[derive(Parser, Debug, Clone)]
#[command(about = "Reverse geocoder for administrative region boundaries")]
#[command(version = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_COMMIT_HASH"),
    ")",
))]
#[command(long_about = None)]
pub(crate) struct Options {
    /// 記録するログレベルの指定
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL",
        default_value = "OFF", ignore_case = true)]
    log_level: LogLevel,

    /// 境界データのルートディレクトリ(環境変数GEO_DATA_PATHより優先)
    #[arg(short = 'd', long = "data", value_name = "DIR")]
    data: Option<PathBuf>,

    /// 解決する最も深い階層(province, city, district)
    #[arg(short = 'L', long = "level", value_name = "LEVEL")]
    level: Option<Level>,

    /// 市級キャッシュの有効期間(秒)
    #[arg(long = "city-ttl", value_name = "SECS")]
    city_ttl: Option<u64>,

    /// 区級キャッシュの有効期間(秒)
    #[arg(long = "district-ttl", value_name = "SECS")]
    district_ttl: Option<u64>,

    /// 結果をJSONで出力する
    #[arg(short = 'j', long = "json")]
    json: bool,

    /// 問い合わせる座標("緯度,経度"の形式)
    #[arg(value_name = "LAT,LNG", allow_hyphen_values = true)]
    coordinates: Vec<String>,
}

impl Options {
    ///
    /// ログレベルへのアクセサ
    ///
    fn log_level(&self) -> LogLevel {
        self.log_level
    }

    ///
    /// JSON出力指定へのアクセサ
    ///
    pub(crate) fn json(&self) -> bool {
        self.json
    }

    ///
    /// 問い合わせ座標へのアクセサ
    ///
    /// # 戻り値
    /// コマンドラインで指定された座標文字列のリスト
    ///
    pub(crate) fn coordinates(&self) -> &[String] {
        &self.coordinates
    }

    ///
    /// エンジン設定の生成
    ///
    /// # 戻り値
    /// デフォルト値に環境変数、コマンドラインの指定を順に重ねた設定を返す。
    ///
    pub(crate) fn config(&self) -> Config {
        let mut cfg = Config::from_env(Config::default());

        if let Some(path) = &self.data {
            cfg.geo_data_path = path.clone();
        }

        if let Some(level) = self.level {
            cfg.level = level;
        }

        if let Some(secs) = self.city_ttl {
            cfg.city_ttl = Duration::from_secs(secs);
        }

        if let Some(secs) = self.district_ttl {
            cfg.district_ttl = Duration::from_secs(secs);
        }

        cfg
    }

    ///
    /// 設定情報のバリデーション
    ///
    /// # 戻り値
    /// 設定情報に問題が無い場合は`Ok(())`を返す。問題があった場合はエラー情報
    /// を`Err()`でラップして返す。
    ///
    fn validate(&self) -> Result<()> {
        if self.coordinates.is_empty() {
            return Err(anyhow!("coordinates are not specified"));
        }

        Ok(())
    }
}

///
/// 座標文字列のパース
///
/// # 引数
/// * `s` - "緯度,経度"形式の文字列
///
/// # 戻り値
/// パースに成功した場合は緯度と経度をパックしたタプルを`Ok()`でラップして返
/// す。
///
pub(crate) fn parse_coordinate(s: &str) -> Result<(f64, f64)> {
    let (lat, lng) = s
        .split_once(',')
        .ok_or_else(|| anyhow!("expected LAT,LNG: {}", s))?;

    let lat = lat.trim().parse::<f64>()
        .map_err(|err| anyhow!("invalid latitude {:?}: {}", lat, err))?;
    let lng = lng.trim().parse::<f64>()
        .map_err(|err| anyhow!("invalid longitude {:?}: {}", lng, err))?;

    if !lat.is_finite() || !lng.is_finite() {
        return Err(anyhow!("coordinate out of range: {}", s));
    }

    Ok((lat, lng))
}

///
/// コマンドラインオプションのパース
///
/// # 戻り値
/// 処理に成功した場合はオプション設定をパックしたオブジェクトを`Ok()`でラップ
/// して返す。失敗した場合はエラー情報を`Err()`でラップして返す。
///
pub(super) fn parse() -> Result<Arc<Options>> {
    let opts = Options::parse();

    /*
     * 設定情報のバリデーション
     */
    opts.validate()?;

    /*
     * ログ機能の初期化
     */
    logger::init(&opts)?;

    /*
     * 設定情報の返却
     */
    Ok(Arc::new(opts))
}

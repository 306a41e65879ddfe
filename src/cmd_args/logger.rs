/*
 * Reverse geocoder for administrative region boundaries
 *
 *  Copyright (C) 2025 Hiroshi KUWAGATA <kgt9221@gmail.com>
 */

//!
//! ロガーの初期化処理をまとめたモジュール
//!

use anyhow::Result;
use log::LevelFilter;

use super::{LogLevel, Options};

///
/// ロガーの初期化
///
/// # 引数
/// * `opts` - 設定情報をパックしたオブジェクト
///
/// # 注記
/// ログレベルに`OFF`が指定されている場合は何もしない。出力先は標準エラー。
///
pub(super) fn init(opts: &Options) -> Result<()> {
    let filter = match opts.log_level() {
        LogLevel::Off => return Ok(()),
        LogLevel::Error => LevelFilter::Error,
        LogLevel::Warn => LevelFilter::Warn,
        LogLevel::Info => LevelFilter::Info,
        LogLevel::Debug => LevelFilter::Debug,
        LogLevel::Trace => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(filter)
        .format_timestamp_millis()
        .try_init()?;

    Ok(())
}

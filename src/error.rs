/*
 * Reverse geocoder for administrative region boundaries
 *
 *  Copyright (C) 2025 Hiroshi KUWAGATA <kgt9221@gmail.com>
 */

//!
//! ライブラリ全体で使用するエラー型をまとめたモジュール
//!

use std::path::PathBuf;

use thiserror::Error;

///
/// 境界データの読み込みおよび行政区画解決で発生するエラー
///
#[derive(Debug, Error)]
pub enum GeoError {
    /// ディレクトリまたはファイルの読み出しに失敗
    #[error("read {} failed: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// ファイル名から区画情報を取り出せない
    #[error("invalid filename: {0}")]
    FileName(String),

    /// 境界データ(JSON)の解析に失敗
    #[error("parse boundary {} failed: {source}", .path.display())]
    Boundary {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// 子区画ローダの失敗(ファイルシステム以外のローダ向け)
    #[error("load children of {parent_code} failed: {reason}")]
    Load { parent_code: String, reason: String },

    /// 未知の階層名
    #[error("unknown level: {0}")]
    InvalidLevel(String),
}

impl GeoError {
    ///
    /// I/Oエラーの生成
    ///
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

/// `GeoError`を使用する`Result`型の別名
pub type Result<T> = std::result::Result<T, GeoError>;

/*
 * Reverse geocoder for administrative region boundaries
 *
 *  Copyright (C) 2025 Hiroshi KUWAGATA <kgt9221@gmail.com>
 */

//!
//! 行政区画の階層(省・市・区)を表す列挙子をまとめたモジュール
//!

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::GeoError;

///
/// 行政区画の階層
///
/// # 注記
/// 比較演算は階層の深さを表す(`Province < City < District`)。エンジンはこの
/// 順序で「どの深さまで解決するか」を判定するため、定義順を入れ替えてはならな
/// い。
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// 省級
    Province = 0,

    /// 市級
    City = 1,

    /// 区級
    #[default]
    District = 2,
}

impl Level {
    /// 全階層(浅い順)
    pub const ALL: [Level; 3] = [Level::Province, Level::City, Level::District];

    ///
    /// 階層名へのアクセサ
    ///
    /// # 戻り値
    /// ファイル名の先頭トークンとして使われる小文字の階層名を返す
    ///
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Province => "province",
            Self::City => "city",
            Self::District => "district",
        }
    }

    ///
    /// データディレクトリ名へのアクセサ
    ///
    /// # 戻り値
    /// データルート直下の、この階層の境界ファイルを格納するディレクトリ名
    ///
    pub fn directory(&self) -> &'static str {
        self.as_str()
    }
}

// Displayトレイトの実装
impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// FromStrトレイトの実装
impl FromStr for Level {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "province" => Ok(Self::Province),
            "city" => Ok(Self::City),
            "district" => Ok(Self::District),
            // 未指定は最も細かい階層
            "" => Ok(Self::District),
            _ => Err(GeoError::InvalidLevel(s.to_string())),
        }
    }
}

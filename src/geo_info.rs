/*
 * Reverse geocoder for administrative region boundaries
 *
 *  Copyright (C) 2025 Hiroshi KUWAGATA <kgt9221@gmail.com>
 */

//!
//! 逆ジオコーディング結果を格納する構造体をまとめたモジュール
//!

use serde::Serialize;

use crate::level::Level;
use crate::region::Region;

///
/// 逆ジオコーディングの結果
///
/// # 注記
/// `adcode`は常に解決できた最も深い階層の区画コードを指す。`street`および
/// `street_code`は定義のみで値は設定されない。
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoInfo {
    /// 省・市・区の名称を連結した住所
    pub format_address: String,

    /// 省級区画名
    pub province: String,

    /// 省級区画コード
    pub province_code: String,

    /// 市級区画名
    pub city: String,

    /// 市級区画コード
    pub city_code: String,

    /// 区級区画名
    pub district: String,

    /// 区級区画コード
    pub district_code: String,

    /// 街道名(未使用)
    pub street: String,

    /// 街道コード(未使用)
    pub street_code: String,

    /// 最も深い階層の区画コード
    pub adcode: String,

    /// 解決できた階層
    pub level: Level,
}

impl GeoInfo {
    ///
    /// 省級区画からの結果の生成
    ///
    pub(crate) fn from_province(province: &Region) -> Self {
        Self {
            format_address: String::new(),
            province: province.name().to_string(),
            province_code: province.code().to_string(),
            city: String::new(),
            city_code: String::new(),
            district: String::new(),
            district_code: String::new(),
            street: String::new(),
            street_code: String::new(),
            adcode: province.code().to_string(),
            level: Level::Province,
        }
    }

    ///
    /// 市級区画の反映
    ///
    pub(crate) fn set_city(&mut self, city: &Region) {
        self.city = city.name().to_string();
        self.city_code = city.code().to_string();
        self.adcode = city.code().to_string();
        self.level = Level::City;
    }

    ///
    /// 区級区画の反映
    ///
    pub(crate) fn set_district(&mut self, district: &Region) {
        self.district = district.name().to_string();
        self.district_code = district.code().to_string();
        self.adcode = district.code().to_string();
        self.level = Level::District;
    }

    ///
    /// 住所文字列の組み立て
    ///
    /// # 注記
    /// 区切り文字は入れず、省・市・区の名称を単純に連結する。
    ///
    pub(crate) fn compose_address(&mut self) {
        self.format_address = format!("{}{}{}", self.province, self.city, self.district);
    }
}

/*
 * Reverse geocoder for administrative region boundaries
 *
 *  Copyright (C) 2025 Hiroshi KUWAGATA <kgt9221@gmail.com>
 */

//!
//! 緯度経度から省→市→区の順に行政区画を絞り込む逆ジオコーディングエンジン
//!

use std::collections::HashMap;
use std::path::PathBuf;

use crate::cache::LoadingCache;
use crate::config::Config;
use crate::error::Result;
use crate::geo_info::GeoInfo;
use crate::level::Level;
use crate::loader;
use crate::region::Region;

#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

///
/// 逆ジオコーディングエンジン
///
/// # 注記
/// 省級区画は生成時に全件読み込み、以降は変更しない。市級・区級は設定された
/// 階層に応じてキャッシュ経由で読み込む。複数スレッドから共有して使用できる。
///
pub struct Engine {
    /// 解決する最も深い階層
    level: Level,

    /// 区画コードをキーとした省級区画
    provinces: HashMap<String, Region>,

    /// 省級区画コード単位の市級区画キャッシュ
    city_cache: Option<LoadingCache>,

    /// 上位区画コード単位の区級区画キャッシュ
    district_cache: Option<LoadingCache>,
}

impl Engine {
    ///
    /// 設定に基づくエンジンの生成
    ///
    /// # 引数
    /// * `cfg` - 動作設定
    ///
    /// # 戻り値
    /// 処理に成功した場合は、生成したエンジンを`Ok()`でラップして返す。省級
    /// 区画の読み込みに失敗した場合はエラーを返す。
    ///
    pub fn new(cfg: &Config) -> Result<Self> {
        let provinces = loader::load_provinces(&cfg.geo_data_path)?;

        let city_cache = (cfg.level >= Level::City)
            .then(|| child_cache(cfg.geo_data_path.clone(), Level::City, cfg.city_ttl));

        let district_cache = (cfg.level >= Level::District)
            .then(|| child_cache(cfg.geo_data_path.clone(), Level::District, cfg.district_ttl));

        info!(
            "engine ready: level={} data={} provinces={}",
            cfg.level,
            cfg.geo_data_path.display(),
            provinces.len()
        );

        Ok(Self::from_parts(cfg.level, provinces, city_cache, district_cache))
    }

    ///
    /// 構成要素を指定したエンジンの生成
    ///
    /// # 引数
    /// * `level` - 解決する最も深い階層
    /// * `provinces` - 区画コードをキーとした省級区画
    /// * `city_cache` - 市級区画キャッシュ
    /// * `district_cache` - 区級区画キャッシュ
    ///
    pub fn from_parts(
        level: Level,
        provinces: HashMap<String, Region>,
        city_cache: Option<LoadingCache>,
        district_cache: Option<LoadingCache>,
    ) -> Self {
        Self {
            level,
            provinces,
            city_cache,
            district_cache,
        }
    }

    ///
    /// 解決する階層へのアクセサ
    ///
    pub fn level(&self) -> Level {
        self.level
    }

    ///
    /// 読み込み済みの省級区画数
    ///
    pub fn province_count(&self) -> usize {
        self.provinces.len()
    }

    ///
    /// 逆ジオコーディング
    ///
    /// # 引数
    /// * `lat` - 緯度
    /// * `lng` - 経度
    ///
    /// # 戻り値
    /// 点を含む省級区画が見つかった場合は結果を`Some()`でラップして返す。見つ
    /// からない場合は`None`を返す。
    ///
    /// # 注記
    /// 市級・区級で一致する区画が無い場合や、キャッシュの読み込みに失敗した
    /// 場合は、その手前の階層までの結果を返す(エラーにはしない)。省級区画の
    /// 境界が重なっている場合、どちらが選ばれるかは不定。
    ///
    pub fn reverse(&self, lat: f64, lng: f64) -> Option<GeoInfo> {
        /*
         * 省級区画の検索
         */
        let province = self.provinces.values().find(|r| r.contains(lat, lng))?;
        let mut info = GeoInfo::from_province(province);

        /*
         * 市級区画の検索
         */
        if self.level >= Level::City {
            if let Some(cache) = &self.city_cache {
                lookup_child(cache, province.code(), lat, lng, |city| info.set_city(city));
            }
        }

        /*
         * 区級区画の検索
         */
        if !info.adcode.is_empty() && self.level >= Level::District {
            if let Some(cache) = &self.district_cache {
                let parent = info.adcode.clone();
                lookup_child(cache, &parent, lat, lng, |district| info.set_district(district));
            }
        }

        info.compose_address();
        debug!("({}, {}) -> {} [{}]", lat, lng, info.format_address, info.adcode);

        Some(info)
    }
}

///
/// ファイルシステムから子区画を読み込むキャッシュの生成
///
fn child_cache(root: PathBuf, level: Level, ttl: std::time::Duration) -> LoadingCache {
    LoadingCache::new(ttl, move |parent: &str| -> Result<Vec<Region>> {
        loader::load_children(&root, level, parent)
    })
}

///
/// キャッシュ経由の子区画の検索
///
/// # 引数
/// * `cache` - 子区画キャッシュ
/// * `parent_code` - 親区画のコード
/// * `lat` - 緯度
/// * `lng` - 経度
/// * `found` - 点を含む子区画が見つかった場合に呼び出す関数
///
/// # 注記
/// キャッシュの読み込みエラーはログに残すのみで、呼び出し元には伝えない。
///
fn lookup_child<F>(cache: &LoadingCache, parent_code: &str, lat: f64, lng: f64, found: F)
where
    F: FnOnce(&Region),
{
    match cache.get(parent_code) {
        Ok(children) => {
            if let Some(child) = children.iter().find(|r| r.contains(lat, lng)) {
                found(child);
            }
        }

        Err(err) => {
            warn!("children of {} unavailable: {}", parent_code, err);
        }
    }
}

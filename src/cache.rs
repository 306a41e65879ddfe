/*
 * Reverse geocoder for administrative region boundaries
 *
 *  Copyright (C) 2025 Hiroshi KUWAGATA <kgt9221@gmail.com>
 */

//!
//! 親区画コード単位で子区画リストを保持する有効期限付きキャッシュ
//!
//! 市級・区級それぞれに独立したインスタンスを使用する。
//!

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

use crate::error::Result;
use crate::region::Region;

#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

/// キャッシュが返す子区画リスト(共有・不変)
pub type RegionList = Arc<[Region]>;

///
/// 親区画コードから子区画リストを読み込むローダ
///
/// # 注記
/// `Fn(&str) -> Result<Vec<Region>>`を満たすクロージャはそのままローダとして
/// 使用できる。
///
pub trait ChildLoader: Send + Sync {
    ///
    /// 子区画の読み込み
    ///
    /// # 引数
    /// * `parent_code` - 親区画のコード
    ///
    fn load(&self, parent_code: &str) -> Result<Vec<Region>>;
}

impl<F> ChildLoader for F
where
    F: Fn(&str) -> Result<Vec<Region>> + Send + Sync,
{
    fn load(&self, parent_code: &str) -> Result<Vec<Region>> {
        self(parent_code)
    }
}

///
/// キャッシュエントリ
///
struct CacheEntry {
    /// 子区画リスト
    regions: RegionList,

    /// 読み込み時刻
    loaded_at: Instant,
}

///
/// 読み込み機能付きキャッシュ
///
/// # 注記
/// 同じキーに対して期限切れ(または未登録)の状態で同時に問い合わせがあった
/// 場合、それぞれがローダを呼び出す(重複排除はしない)。後に書き込んだ結果が
/// 残る。また、エントリは削除されないため、問い合わせのあった親区画コードの
/// 数だけ増え続ける。
///
pub struct LoadingCache {
    /// エントリの有効期間
    ttl: Duration,

    /// 子区画ローダ
    loader: Box<dyn ChildLoader>,

    /// 親区画コードをキーとしたエントリ
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl LoadingCache {
    ///
    /// オブジェクトの生成
    ///
    /// # 引数
    /// * `ttl` - エントリの有効期間
    /// * `loader` - 子区画ローダ
    ///
    pub fn new(ttl: Duration, loader: impl ChildLoader + 'static) -> Self {
        Self {
            ttl,
            loader: Box::new(loader),
            entries: RwLock::new(HashMap::new()),
        }
    }

    ///
    /// エントリの有効期間へのアクセサ
    ///
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    ///
    /// 子区画リストの取得
    ///
    /// # 引数
    /// * `parent_code` - 親区画のコード
    ///
    /// # 戻り値
    /// 有効なエントリがあればそれを、無ければローダで読み込んだ結果を`Ok()`で
    /// ラップして返す。ローダが失敗した場合はそのエラーをそのまま返す。
    ///
    /// # 注記
    /// ローダの呼び出しはロックの外で行う。失敗時は既存のエントリ(期限切れ
    /// のもの)を更新しないので、次の呼び出しで再度読み込みを試みる。
    ///
    pub fn get(&self, parent_code: &str) -> Result<RegionList> {
        /*
         * 有効なエントリの検索
         */
        if let Some(entry) = self.entries.read().get(parent_code) {
            if entry.loaded_at.elapsed() < self.ttl {
                trace!("cache hit: {}", parent_code);
                return Ok(entry.regions.clone());
            }
        }

        /*
         * ローダによる読み込み
         */
        debug!("cache miss: {}", parent_code);
        let regions: RegionList = self.loader.load(parent_code)?.into();

        /*
         * エントリの更新
         */
        self.entries.write().insert(
            parent_code.to_string(),
            CacheEntry {
                regions: regions.clone(),
                loaded_at: Instant::now(),
            },
        );

        Ok(regions)
    }

    ///
    /// 保持しているエントリ数
    ///
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    ///
    /// エントリが空か否か
    ///
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

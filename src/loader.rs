/*
 * Reverse geocoder for administrative region boundaries
 *
 *  Copyright (C) 2025 Hiroshi KUWAGATA <kgt9221@gmail.com>
 */

//!
//! データディレクトリからの境界ファイル読み込み処理をまとめたモジュール
//!
//! ディレクトリ構成は以下の通り。
//!
//! ```text
//! <root>/province/province_<code>_<name>.json
//! <root>/city/city_<parentCode>_<code>_<name>.json
//! <root>/district/district_<parentCode>_<code>_<name>.json
//! ```
//!

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::error::{GeoError, Result};
use crate::level::Level;
use crate::region::{LatLng, Region};

#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

/// 境界ファイルの拡張子
const BOUNDARY_EXT: &str = "json";

///
/// ファイル名から取り出した区画情報
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RegionDescriptor {
    /// 階層
    pub(crate) level: Level,

    /// 親区画のコード(省級は`None`)
    pub(crate) parent_code: Option<String>,

    /// 区画コード
    pub(crate) code: String,

    /// 区画名
    pub(crate) name: String,
}

impl RegionDescriptor {
    ///
    /// ファイル名のパース
    ///
    /// # 引数
    /// * `file_name` - 拡張子付きのファイル名(ディレクトリ部分を含まない)
    ///
    /// # 戻り値
    /// パースに成功した場合は区画情報を`Ok()`でラップして返す。トークン数が
    /// 足りない場合や空のトークンがある場合はエラーを返す。
    ///
    /// # 注記
    /// 区画名は固定トークンより後ろ全てとするので、`_`を含んでもよい。
    ///
    pub(crate) fn parse(file_name: &str) -> Result<Self> {
        let invalid = || GeoError::FileName(file_name.to_string());

        let stem = Path::new(file_name)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(invalid)?;

        let (level, rest) = stem.split_once('_').ok_or_else(invalid)?;
        let level = match level {
            "province" => Level::Province,
            "city" => Level::City,
            "district" => Level::District,
            _ => return Err(invalid()),
        };

        let tokens = match level {
            Level::Province => rest.splitn(2, '_').collect::<Vec<_>>(),
            Level::City | Level::District => rest.splitn(3, '_').collect(),
        };

        if tokens.iter().any(|token| token.is_empty()) {
            return Err(invalid());
        }

        match (level, tokens.as_slice()) {
            (Level::Province, [code, name]) => Ok(Self {
                level,
                parent_code: None,
                code: code.to_string(),
                name: name.to_string(),
            }),

            (Level::City | Level::District, [parent, code, name]) => Ok(Self {
                level,
                parent_code: Some(parent.to_string()),
                code: code.to_string(),
                name: name.to_string(),
            }),

            _ => Err(invalid()),
        }
    }
}

///
/// 境界データ(リングのリスト)の読み込み
///
/// # 引数
/// * `path` - 境界ファイルへのパス
///
/// # 戻り値
/// 読み込みに成功した場合は、`{lat, lng}`の配列をリングとしたリストを
/// `Ok()`でラップして返す。
///
fn read_rings(path: &Path) -> Result<Vec<Vec<LatLng>>> {
    let file = File::open(path).map_err(|err| GeoError::io(path, err))?;

    serde_json::from_reader(BufReader::new(file)).map_err(|err| GeoError::Boundary {
        path: path.to_path_buf(),
        source: err,
    })
}

///
/// 境界ファイル1件の読み込み
///
/// # 引数
/// * `path` - 境界ファイルへのパス
/// * `expect` - 格納ディレクトリから期待される階層
///
/// # 戻り値
/// 読み込みに成功した場合は、生成した区画レコードを`Ok()`でラップして返す。
///
fn load_region(path: &Path, expect: Level) -> Result<Region> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| GeoError::FileName(path.display().to_string()))?;

    let desc = RegionDescriptor::parse(file_name)?;
    if desc.level != expect {
        return Err(GeoError::FileName(format!(
            "{} (found in {} directory)",
            file_name,
            expect.directory()
        )));
    }

    let rings = read_rings(path)?;
    trace!("{}: {} ring(s)", file_name, rings.len());

    Ok(Region::new(desc.name, desc.code, desc.parent_code, desc.level, &rings))
}

///
/// 階層ディレクトリ内の境界ファイルの列挙
///
/// # 引数
/// * `dir` - 階層ディレクトリへのパス
/// * `prefix` - ファイル名の先頭に要求する文字列
///
/// # 戻り値
/// 条件に合うファイルのパスをファイル名順に並べたリストを`Ok()`でラップして
/// 返す。
///
fn list_boundary_files(dir: &Path, prefix: &str) -> Result<Vec<PathBuf>> {
    let mut ret = Vec::new();

    for entry in fs::read_dir(dir).map_err(|err| GeoError::io(dir, err))? {
        let entry = entry.map_err(|err| GeoError::io(dir, err))?;
        let path = entry.path();

        if path.is_dir() {
            continue;
        }

        if path.extension().and_then(|ext| ext.to_str()) != Some(BOUNDARY_EXT) {
            continue;
        }

        let matched = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.starts_with(prefix))
            .unwrap_or(false);

        if matched {
            ret.push(path);
        }
    }

    ret.sort();
    Ok(ret)
}

///
/// 全省級区画の読み込み
///
/// # 引数
/// * `root` - データルートディレクトリへのパス
///
/// # 戻り値
/// 区画コードをキーとした省級区画レコードのハッシュマップを`Ok()`でラップし
/// て返す。
///
/// # 注記
/// 1ファイルでも読み込みに失敗した場合は全体を失敗とする。
///
pub fn load_provinces(root: impl AsRef<Path>) -> Result<HashMap<String, Region>> {
    let dir = root.as_ref().join(Level::Province.directory());
    let mut ret = HashMap::new();

    for path in list_boundary_files(&dir, "")? {
        let region = load_region(&path, Level::Province)?;
        ret.insert(region.code().to_string(), region);
    }

    info!("loaded {} province(s) from {}", ret.len(), dir.display());

    Ok(ret)
}

///
/// 子区画の読み込み
///
/// # 引数
/// * `root` - データルートディレクトリへのパス
/// * `level` - 読み込む階層(市級または区級)
/// * `parent_code` - 親区画のコード
///
/// # 戻り値
/// 親区画に属する区画レコードをファイル名順に並べたリストを`Ok()`でラップし
/// て返す。該当ファイルが無い場合は空のリストを返す(エラーではない)。
///
pub fn load_children(
    root: impl AsRef<Path>,
    level: Level,
    parent_code: &str,
) -> Result<Vec<Region>> {
    let dir = root.as_ref().join(level.directory());
    let prefix = format!("{}_{}_", level.as_str(), parent_code);

    let ret = list_boundary_files(&dir, &prefix)?
        .iter()
        .map(|path| load_region(path, level))
        .collect::<Result<Vec<_>>>()?;

    debug!("loaded {} {}(s) under {}", ret.len(), level, parent_code);

    Ok(ret)
}

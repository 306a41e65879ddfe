/*
 * Reverse geocoder for administrative region boundaries
 *
 *  Copyright (C) 2025 Hiroshi KUWAGATA <kgt9221@gmail.com>
 */

//!
//! プログラムのエントリポイント
//!

mod cmd_args;

use std::sync::Arc;

use anyhow::Result;

use cmd_args::Options;
use jetgeo::{Engine, GeoInfo};

#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

///
/// プログラムのエントリポイント
///
fn main() {
    let opts = match cmd_args::parse() {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("error: {}", err);
            std::process::exit(1);
        }
    };

    if let Err(err) = run(opts) {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}

///
/// プログラムの実行関数
///
/// # 引数
/// * `opts` - オプション情報をパックしたオブジェクト
///
/// # 戻り値
/// 処理に成功した場合は`Ok(())`を返す。失敗した場合はエラー情報を`Err()` でラ
/// ップして返す。
///
fn run(opts: Arc<Options>) -> Result<()> {
    /*
     * エンジンの生成(省級区画の読み込み)
     */
    let cfg = opts.config();
    info!("config: {:?}", cfg);

    let engine = Engine::new(&cfg)?;

    /*
     * 座標毎に問い合わせを実施
     */
    for coord in opts.coordinates() {
        let (lat, lng) = match cmd_args::parse_coordinate(coord) {
            Ok(pair) => pair,
            Err(err) => {
                eprintln!("{}: {}", coord, err);
                continue;
            }
        };

        match engine.reverse(lat, lng) {
            Some(info) => query_succeed(&opts, &info, lat, lng)?,
            None => query_not_found(lat, lng),
        }
    }

    Ok(())
}

///
/// 区画を解決できた場合の表示関数
///
/// # 引数
/// * `opts` - オプション情報をパックしたオブジェクト
/// * `info` - 逆ジオコーディング結果
/// * `lat` - 緯度
/// * `lng` - 経度
///
fn query_succeed(opts: &Options, info: &GeoInfo, lat: f64, lng: f64) -> Result<()> {
    if opts.json() {
        println!("{}", serde_json::to_string(info)?);

    } else {
        println!(
            "{} [{}] ({:.4}\u{00b0},{:.4}\u{00b0})",
            info.format_address,
            info.adcode,
            lat,
            lng
        );
    }

    Ok(())
}

///
/// 区画が見つからなかった場合の表示関数
///
/// # 引数
/// * `lat` - 緯度
/// * `lng` - 経度
///
fn query_not_found(lat: f64, lng: f64) {
    eprintln!("({:.4}\u{00b0},{:.4}\u{00b0}): not found", lat, lng);
}

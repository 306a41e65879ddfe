/*
 * Reverse geocoder for administrative region boundaries
 *
 *  Copyright (C) 2025 Hiroshi KUWAGATA <kgt9221@gmail.com>
 */

//!
//! 行政区画の境界データを用いた逆ジオコーディングライブラリ
//!
//! 緯度経度を含む省級区画を線形探索で求め、設定された階層に応じて市級・区級
//! の区画へと絞り込む。市級・区級の境界データは親区画単位で読み込み、有効期
//! 限付きのキャッシュに保持する。
//!

pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod geo_info;
pub mod level;
pub mod loader;
pub mod region;

pub use cache::{ChildLoader, LoadingCache, RegionList};
pub use config::Config;
pub use engine::Engine;
pub use error::{GeoError, Result};
pub use geo_info::GeoInfo;
pub use level::Level;
pub use loader::{load_children, load_provinces};
pub use region::{LatLng, Region};

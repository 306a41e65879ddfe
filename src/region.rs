/*
 * Reverse geocoder for administrative region boundaries
 *
 *  Copyright (C) 2025 Hiroshi KUWAGATA <kgt9221@gmail.com>
 */

//!
//! 行政区画1件分の識別情報と境界形状をまとめたモジュール
//!

use geo::{Contains, Coord, LineString, MultiPolygon, Point, Polygon, Winding};
use serde::Deserialize;

use crate::level::Level;

/// 問い合わせ点の経度に加えるずらし量(展開したリングとの照合用)
const LNG_SHIFTS: [f64; 3] = [0.0, 360.0, -360.0];

///
/// 境界リングを構成する1点
///
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LatLng {
    /// 緯度
    pub lat: f64,

    /// 経度
    pub lng: f64,
}

impl LatLng {
    ///
    /// オブジェクトの生成
    ///
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

///
/// 行政区画レコード
///
/// # 注記
/// 生成後は不変であり、複数スレッドからの同時参照が可能。
///
#[derive(Debug, Clone)]
pub struct Region {
    /// 区画名
    name: String,

    /// 区画コード
    code: String,

    /// 親区画のコード(省級は持たない)
    parent_code: Option<String>,

    /// 階層
    level: Level,

    /// 境界形状(飛び地を含む場合は複数のポリゴン)
    boundary: MultiPolygon<f64>,
}

impl Region {
    ///
    /// オブジェクトの生成
    ///
    /// # 引数
    /// * `name` - 区画名
    /// * `code` - 区画コード
    /// * `parent_code` - 親区画のコード
    /// * `level` - 階層
    /// * `rings` - 境界リングのリスト(1リングが1ポリゴンになる)
    ///
    /// # 戻り値
    /// 境界形状をコンパイルしたレコードを返す。
    ///
    /// # 注記
    /// 各リングは座標を正規化した上で反時計回りに揃えるので、入力データの巻
    /// き方向には依存しない。
    ///
    pub fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        parent_code: Option<String>,
        level: Level,
        rings: &[Vec<LatLng>],
    ) -> Self {
        let polygons = rings
            .iter()
            .map(|ring| Polygon::new(compile_ring(ring), vec![]))
            .collect::<Vec<_>>();

        Self {
            name: name.into(),
            code: code.into(),
            parent_code: parent_code.filter(|code| !code.is_empty()),
            level,
            boundary: MultiPolygon::new(polygons),
        }
    }

    ///
    /// 区画名へのアクセサ
    ///
    pub fn name(&self) -> &str {
        &self.name
    }

    ///
    /// 区画コードへのアクセサ
    ///
    pub fn code(&self) -> &str {
        &self.code
    }

    ///
    /// 親区画コードへのアクセサ
    ///
    pub fn parent_code(&self) -> Option<&str> {
        self.parent_code.as_deref()
    }

    ///
    /// 階層へのアクセサ
    ///
    pub fn level(&self) -> Level {
        self.level
    }

    ///
    /// 境界を構成するポリゴン数
    ///
    pub fn polygon_count(&self) -> usize {
        self.boundary.0.len()
    }

    ///
    /// キャッシュ上のグルーピングキー
    ///
    /// # 戻り値
    /// 親区画がある場合は`"<親コード>:<コード>"`、無い場合はコードのみ。
    ///
    pub fn cache_key(&self) -> String {
        match &self.parent_code {
            Some(parent) => format!("{}:{}", parent, self.code),
            None => self.code.clone(),
        }
    }

    ///
    /// 点の包含判定
    ///
    /// # 引数
    /// * `lat` - 緯度
    /// * `lng` - 経度
    ///
    /// # 戻り値
    /// 境界を構成するいずれかのポリゴンが点を含む場合は真を返す。
    ///
    /// # 注記
    /// 境界線上の点の扱いは`geo`の`Contains`に従う(境界上は偽)。判定自体は
    /// 経度・緯度平面上で行う。
    ///
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        if self.boundary.0.is_empty() {
            return false;
        }

        let base = normalize(lat, lng);

        // 経度180°を跨ぐリングは[-180, 180]の外側に展開されているので、
        // 問い合わせ点も1周分ずらした位置で判定する
        LNG_SHIFTS.iter().any(|shift| {
            let point = Point::new(base.x + shift, base.y);
            self.boundary.0.iter().any(|polygon| polygon.contains(&point))
        })
    }
}

///
/// 境界リングの構築
///
/// # 注記
/// 経度は隣接点との差が180°以内になるよう展開するので、経度180°を跨ぐリング
/// は[-180, 180]の外側にはみ出す。閉じていないリングは始点を末尾に追加して閉
/// じる。時計回りのリングは反転し、反時計回り(外周)に揃える。
///
fn compile_ring(ring: &[LatLng]) -> LineString<f64> {
    let mut coords = ring
        .iter()
        .map(|p| normalize(p.lat, p.lng))
        .collect::<Vec<_>>();

    unwrap_longitudes(&mut coords);

    if let (Some(first), Some(last)) = (coords.first(), coords.last()) {
        if first != last {
            coords.push(*first);
        }
    }

    let mut line = LineString::new(coords);
    if line.is_cw() {
        line.make_ccw_winding();
    }

    line
}

///
/// リングの経度の展開
///
/// # 注記
/// 先頭の点を基準に、各点の経度を直前の点から180°以内になるよう360°単位で
/// ずらす。南極のように極を囲むリングは展開しても閉じないので扱えない。
///
fn unwrap_longitudes(coords: &mut [Coord<f64>]) {
    let mut prev: Option<f64> = None;

    for coord in coords.iter_mut() {
        if let Some(prev) = prev {
            while coord.x - prev > 180.0 {
                coord.x -= 360.0;
            }
            while coord.x - prev < -180.0 {
                coord.x += 360.0;
            }
        }

        prev = Some(coord.x);
    }
}

///
/// 座標の正規化
///
/// # 注記
/// 緯度は[-90, 90]に丸め、経度は[-180, 180]に折り返す。境界点と問い合わせ点
/// の両方に同じ処理を適用しなければならない。
///
pub(crate) fn normalize(lat: f64, lng: f64) -> Coord<f64> {
    let lat = lat.clamp(-90.0, 90.0);

    let mut lng = lng % 360.0;
    if lng > 180.0 {
        lng -= 360.0;
    } else if lng < -180.0 {
        lng += 360.0;
    }

    Coord { x: lng, y: lat }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(lat0: f64, lng0: f64, lat1: f64, lng1: f64) -> Vec<LatLng> {
        vec![
            LatLng::new(lat0, lng0),
            LatLng::new(lat0, lng1),
            LatLng::new(lat1, lng1),
            LatLng::new(lat1, lng0),
        ]
    }

    #[test]
    fn contains_point_inside_square() {
        let region = Region::new(
            "Beijing",
            "110000",
            None,
            Level::Province,
            &[square(39.0, 116.0, 40.0, 117.0)],
        );

        assert!(region.contains(39.5, 116.5));
        assert!(!region.contains(0.0, 0.0));
        assert!(!region.contains(39.5, 118.0));
    }

    #[test]
    fn winding_order_does_not_matter() {
        let mut reversed = square(39.0, 116.0, 40.0, 117.0);
        reversed.reverse();

        let cw = Region::new("a", "1", None, Level::Province, &[reversed]);
        let ccw = Region::new(
            "b",
            "2",
            None,
            Level::Province,
            &[square(39.0, 116.0, 40.0, 117.0)],
        );

        assert!(cw.contains(39.5, 116.5));
        assert!(ccw.contains(39.5, 116.5));
        assert!(!cw.contains(41.0, 116.5));
    }

    #[test]
    fn any_part_of_multi_polygon_matches() {
        let region = Region::new(
            "Islands",
            "460000",
            None,
            Level::Province,
            &[square(18.0, 108.0, 20.0, 111.0), square(15.0, 111.0, 17.0, 113.0)],
        );

        assert_eq!(region.polygon_count(), 2);
        assert!(region.contains(19.0, 109.0));
        assert!(region.contains(16.0, 112.0));
        assert!(!region.contains(17.5, 110.0));
    }

    #[test]
    fn empty_boundary_contains_nothing() {
        let region = Region::new("empty", "0", None, Level::Province, &[]);
        assert!(!region.contains(0.0, 0.0));
    }

    #[test]
    fn query_longitude_is_wrapped() {
        let region = Region::new(
            "east",
            "1",
            None,
            Level::Province,
            &[square(-10.0, 170.0, 10.0, 179.0)],
        );

        // -185°は175°と同じ経線
        assert!(region.contains(0.0, -185.0));
        assert!(region.contains(0.0, 535.0));
    }

    #[test]
    fn ring_crossing_antimeridian() {
        let region = Region::new(
            "Chukotka",
            "870000",
            None,
            Level::Province,
            &[vec![
                LatLng::new(0.0, 175.0),
                LatLng::new(0.0, -175.0),
                LatLng::new(10.0, -175.0),
                LatLng::new(10.0, 175.0),
            ]],
        );

        assert!(region.contains(5.0, 179.0));
        assert!(region.contains(5.0, -179.0));
        assert!(region.contains(5.0, 180.0));
        assert!(!region.contains(5.0, 0.0));
        assert!(!region.contains(5.0, 170.0));
        assert!(!region.contains(5.0, -170.0));
        assert!(!region.contains(15.0, 179.0));
    }

    #[test]
    fn unwrap_keeps_neighbours_within_half_turn() {
        let mut coords = vec![
            Coord { x: 175.0, y: 0.0 },
            Coord { x: -175.0, y: 0.0 },
            Coord { x: -170.0, y: 5.0 },
            Coord { x: 175.0, y: 10.0 },
        ];
        unwrap_longitudes(&mut coords);

        let xs = coords.iter().map(|c| c.x).collect::<Vec<_>>();
        assert_eq!(xs, vec![175.0, 185.0, 190.0, 175.0]);
    }

    #[test]
    fn cache_key_includes_parent() {
        let province = Region::new("p", "110000", None, Level::Province, &[]);
        let city_a = Region::new("a", "0101", Some("110000".into()), Level::City, &[]);
        let city_b = Region::new("b", "0101", Some("120000".into()), Level::City, &[]);
        let orphan = Region::new("o", "0202", Some(String::new()), Level::City, &[]);

        assert_eq!(province.cache_key(), "110000");
        assert_eq!(city_a.cache_key(), "110000:0101");
        assert_ne!(city_a.cache_key(), city_b.cache_key());
        assert_eq!(orphan.parent_code(), None);
        assert_eq!(orphan.cache_key(), "0202");
    }

    #[test]
    fn normalize_clamps_and_wraps() {
        assert_eq!(normalize(95.0, 0.0), Coord { x: 0.0, y: 90.0 });
        assert_eq!(normalize(-95.0, 0.0), Coord { x: 0.0, y: -90.0 });
        assert_eq!(normalize(0.0, 190.0), Coord { x: -170.0, y: 0.0 });
        assert_eq!(normalize(0.0, -190.0), Coord { x: 170.0, y: 0.0 });
        assert_eq!(normalize(10.0, 120.0), Coord { x: 120.0, y: 10.0 });
    }
}

/*
 * Reverse geocoder for administrative region boundaries
 *
 *  Copyright (C) 2025 Hiroshi KUWAGATA <kgt9221@gmail.com>
 */

use std::process::Command;

///
/// ビルドスクリプトのエントリポイント
///
fn main() {
    /*
     * HEADが移動した場合のみ再実行
     */
    println!("cargo:rerun-if-changed=.git/HEAD");

    /*
     * バージョン表示用のコミットハッシュを埋め込む
     */
    println!("cargo:rustc-env=GIT_COMMIT_HASH={}", commit_hash());
}

///
/// コミットハッシュ取得関数
///
/// # 戻り値
/// ショートフォーマットのコミットハッシュ。取得できない場合(gitが無い、リポ
/// ジトリ外でのビルド等)は"unknown"を返す。
///
fn commit_hash() -> String {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output();

    match output {
        Ok(output) if output.status.success() => {
            match String::from_utf8(output.stdout) {
                Ok(hash) if !hash.trim().is_empty() => hash.trim().to_string(),
                _ => String::from("unknown"),
            }
        }

        _ => String::from("unknown"),
    }
}

//! カテゴリ正規化モジュール
//!
//! 商品エクスポートの「カテゴリー」列（カンマ区切り、`親 > 子` の階層表記、
//! 全角括弧混じり）を、アプリ側の固定カテゴリ1つに寄せる。
//!
//! ## 判定順
//! 1. 空欄なら「その他管理/代行」
//! 2. カンマで分割したタグを先頭から順に見る
//! 3. タグごとにカテゴリ一覧を正規順で照合（完全一致・双方向の部分一致）
//! 4. 同じタグが「学習管理システム」と「LMS」を両方含めば LMS カテゴリ
//! 5. 最後まで決まらなければ「その他管理/代行」

use crate::category::ServiceCategory;

/// 階層区切り
const HIERARCHY_SEPARATOR: &str = " > ";

const LMS_PHRASE: &str = "学習管理システム";
const LMS_FRAGMENT: &str = "LMS";

/// タグ1つを照合用の表記に揃える
///
/// - 前後の空白を除去
/// - `親 > 子` は左側だけ残す
/// - 全角括弧を半角に置換
pub fn normalize_tag(tag: &str) -> String {
    let mut tag = tag.trim();
    if let Some((head, _)) = tag.split_once(HIERARCHY_SEPARATOR) {
        tag = head.trim();
    }
    tag.replace('（', "(").replace('）', ")")
}

/// 「カテゴリー」列のセルからサービスカテゴリを1つ選ぶ
///
/// どんな入力でも必ずいずれかのカテゴリを返す。
pub fn resolve_category(cell: &str) -> ServiceCategory {
    if cell.trim().is_empty() {
        return ServiceCategory::FALLBACK;
    }

    for tag in cell.split(',').map(normalize_tag) {
        if tag.is_empty() {
            continue;
        }

        if let Some(category) = match_label(&tag) {
            return category;
        }

        // 表記ゆれ（「学習管理システム LMS」など）
        if tag.contains(LMS_PHRASE) && tag.contains(LMS_FRAGMENT) {
            return ServiceCategory::LearningManagementSystem;
        }
    }

    ServiceCategory::FALLBACK
}

/// 正規順で最初に当たったカテゴリ
fn match_label(tag: &str) -> Option<ServiceCategory> {
    ServiceCategory::ALL.iter().copied().find(|category| {
        let label = category.label();
        tag == label || tag.contains(label) || label.contains(tag)
    })
}

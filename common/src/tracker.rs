//! 書類完了トラッカー（導出部分）
//!
//! 書類の提出状況からステージと進捗を導出する純粋関数群。
//! 履歴には依存せず、毎回現在の書類状態だけから再計算する。

use crate::types::{DocumentRequirement, Stage};

/// 書類提出前の基本進捗
pub const PROGRESS_DOCUMENTS: u8 = 25;
/// 必須書類がすべて揃った時の進捗
pub const PROGRESS_ADMIN_REVIEW: u8 = 60;
/// 全書類が揃った時の進捗
pub const PROGRESS_LENDER_BIDDING: u8 = 75;
/// オファー受領時の進捗
pub const PROGRESS_OFFERS_RECEIVED: u8 = 90;
/// 契約確定時の進捗
pub const PROGRESS_LOAN_ACCEPTED: u8 = 100;

/// 書類の分類結果（元の順序を保持）
#[derive(Debug, Clone, Default)]
pub struct Classification<'a> {
    pub required_missing: Vec<&'a DocumentRequirement>,
    pub optional_missing: Vec<&'a DocumentRequirement>,
    pub completed: Vec<&'a DocumentRequirement>,
}

impl Classification<'_> {
    pub fn total(&self) -> usize {
        self.required_missing.len() + self.optional_missing.len() + self.completed.len()
    }
}

/// 完了件数の集計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompletionCounts {
    pub required_total: usize,
    pub required_done: usize,
    pub all_total: usize,
    pub all_done: usize,
}

impl CompletionCounts {
    pub fn from_documents(docs: &[DocumentRequirement]) -> Self {
        docs.iter().fold(Self::default(), |mut counts, doc| {
            counts.all_total += 1;
            if doc.is_complete() {
                counts.all_done += 1;
            }
            if doc.required {
                counts.required_total += 1;
                if doc.is_complete() {
                    counts.required_done += 1;
                }
            }
            counts
        })
    }

    /// 必須書類がすべて揃っているか（必須0件の場合も真）
    pub fn all_required_done(&self) -> bool {
        self.required_done == self.required_total
    }

    pub fn all_done(&self) -> bool {
        self.all_done == self.all_total
    }
}

/// 導出結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Derivation {
    pub stage: Stage,
    pub progress: u8,
}

impl Derivation {
    pub fn documents_complete(&self) -> bool {
        self.progress >= PROGRESS_ADMIN_REVIEW
    }
}

/// 書類を 必須未提出 / 任意未提出 / 提出済み に分類
pub fn classify(docs: &[DocumentRequirement]) -> Classification<'_> {
    let mut classification = Classification::default();

    for doc in docs {
        if doc.is_complete() {
            classification.completed.push(doc);
        } else if doc.required {
            classification.required_missing.push(doc);
        } else {
            classification.optional_missing.push(doc);
        }
    }

    classification
}

/// 件数からステージと進捗を決定
///
/// 後のルールが前のルールを上書きする:
/// 1. 基本: 25 / documents
/// 2. 必須がすべて揃った: 60 / admin_review
/// 3. さらに全書類が揃った: 75 / lender_bidding
pub fn derive_from_counts(counts: &CompletionCounts) -> Derivation {
    let mut derivation = Derivation {
        stage: Stage::Documents,
        progress: PROGRESS_DOCUMENTS,
    };

    if counts.all_required_done() {
        derivation = Derivation {
            stage: Stage::AdminReview,
            progress: PROGRESS_ADMIN_REVIEW,
        };

        if counts.all_done() {
            derivation = Derivation {
                stage: Stage::LenderBidding,
                progress: PROGRESS_LENDER_BIDDING,
            };
        }
    }

    derivation
}

/// 書類一覧からステージと進捗を導出
pub fn derive_progress(docs: &[DocumentRequirement]) -> Derivation {
    derive_from_counts(&CompletionCounts::from_documents(docs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UploadedFile;

    fn doc(id: &str, required: bool, files: usize) -> DocumentRequirement {
        DocumentRequirement {
            id: id.to_string(),
            name: id.to_string(),
            required,
            uploaded_files: (0..files)
                .map(|i| UploadedFile {
                    id: format!("{}-{}", id, i),
                    name: format!("{}-{}.pdf", id, i),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_classify_empty() {
        let result = classify(&[]);
        assert!(result.required_missing.is_empty());
        assert!(result.optional_missing.is_empty());
        assert!(result.completed.is_empty());
    }

    #[test]
    fn test_classify_preserves_order() {
        let docs = vec![
            doc("a", true, 0),
            doc("b", false, 1),
            doc("c", false, 0),
            doc("d", true, 2),
            doc("e", true, 0),
        ];

        let result = classify(&docs);
        let ids = |v: &[&DocumentRequirement]| v.iter().map(|d| d.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&result.required_missing), vec!["a", "e"]);
        assert_eq!(ids(&result.optional_missing), vec!["c"]);
        assert_eq!(ids(&result.completed), vec!["b", "d"]);
    }

    #[test]
    fn test_classify_partition_is_complete() {
        let docs = vec![
            doc("a", true, 0),
            doc("b", false, 1),
            doc("c", false, 0),
            doc("d", true, 1),
        ];

        let result = classify(&docs);
        assert_eq!(result.total(), docs.len());

        let mut ids: Vec<&str> = result
            .required_missing
            .iter()
            .chain(result.optional_missing.iter())
            .chain(result.completed.iter())
            .map(|d| d.id.as_str())
            .collect();
        ids.sort();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_required_done_optional_missing() {
        // required 3/3, all 3/5
        let docs = vec![
            doc("r1", true, 1),
            doc("r2", true, 1),
            doc("r3", true, 1),
            doc("o1", false, 0),
            doc("o2", false, 0),
        ];
        let d = derive_progress(&docs);
        assert_eq!(d.stage, Stage::AdminReview);
        assert_eq!(d.progress, 60);
        assert!(d.documents_complete());
    }

    #[test]
    fn test_all_required_is_all_docs() {
        let docs = vec![doc("r1", true, 1), doc("r2", true, 2), doc("r3", true, 1)];
        let d = derive_progress(&docs);
        assert_eq!(d.stage, Stage::LenderBidding);
        assert_eq!(d.progress, 75);
    }

    #[test]
    fn test_missing_required() {
        let docs = vec![doc("r1", true, 1), doc("r2", true, 0), doc("o1", false, 1)];
        let d = derive_progress(&docs);
        assert_eq!(d.stage, Stage::Documents);
        assert_eq!(d.progress, 25);
        assert!(!d.documents_complete());
    }

    #[test]
    fn test_zero_required_docs() {
        // 必須0件は「必須すべて揃った」扱い
        let docs = vec![doc("o1", false, 0)];
        let d = derive_progress(&docs);
        assert_eq!(d.stage, Stage::AdminReview);
        assert_eq!(d.progress, 60);

        let d = derive_progress(&[]);
        assert_eq!(d.stage, Stage::LenderBidding);
        assert_eq!(d.progress, 75);
    }

    #[test]
    fn test_derive_is_idempotent() {
        let docs = vec![doc("r1", true, 1), doc("o1", false, 0)];
        assert_eq!(derive_progress(&docs), derive_progress(&docs));
    }

    #[test]
    fn test_counts() {
        let docs = vec![doc("r1", true, 1), doc("r2", true, 0), doc("o1", false, 3)];
        let counts = CompletionCounts::from_documents(&docs);
        assert_eq!(
            counts,
            CompletionCounts {
                required_total: 2,
                required_done: 1,
                all_total: 3,
                all_done: 2,
            }
        );
    }
}

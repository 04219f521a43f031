use std::collections::HashSet;

use num::Num;

use crate::classifier::{corpus::Document, vocabulary::Vocabulary};

/// 語彙上の有無を 0/1 で表す特徴ベクトル
pub type FeatureVector<N = u8> = Vec<N>;

/// 文書集合の特徴行列とラベル列
/// `features[i]` と `labels[i]` が同じ文書に対応する
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSet<N = u8> {
    pub features: Vec<FeatureVector<N>>,
    pub labels: Vec<String>,
}

impl<N> FeatureSet<N> {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Binary bag-of-words vector of `tokens` over `vocabulary`.
///
/// Entry `i` is one iff vocabulary word `i` occurs at least once.
pub fn vectorize<N, T>(tokens: &[T], vocabulary: &Vocabulary) -> FeatureVector<N>
where
    N: Num + Copy,
    T: AsRef<str>,
{
    // 語彙ごとの線形探索を避けるため先に集合化する
    let present: HashSet<&str> = tokens.iter().map(|t| t.as_ref()).collect();
    vocabulary
        .iter()
        .map(|word| if present.contains(word) { N::one() } else { N::zero() })
        .collect()
}

pub fn vectorize_documents<N>(documents: &[Document], vocabulary: &Vocabulary) -> FeatureSet<N>
where
    N: Num + Copy,
{
    let features = documents
        .iter()
        .map(|doc| vectorize(&doc.tokens, vocabulary))
        .collect();
    let labels = documents.iter().map(|doc| doc.label.clone()).collect();
    FeatureSet { features, labels }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn vocab() -> Vocabulary {
        ["股票", "利息", "比赛", "球队"].into_iter().collect()
    }

    #[test]
    fn presence_not_count() {
        let v: FeatureVector = vectorize(&["股票", "股票", "比赛", "天气"], &vocab());
        assert_eq!(v, vec![1, 0, 1, 0]);
    }

    #[test]
    fn length_matches_vocabulary_and_values_are_binary() {
        let tokens = ["球队", "利息", "利息", "无关"];
        let vocab = vocab();
        let v: FeatureVector<f64> = vectorize(&tokens, &vocab);
        assert_eq!(v.len(), vocab.len());
        for (word, value) in vocab.iter().zip(&v) {
            let expected = if tokens.contains(&word) { 1.0 } else { 0.0 };
            assert_eq!(*value, expected);
        }
    }

    #[test]
    fn empty_inputs() {
        let none: [&str; 0] = [];
        let v: FeatureVector = vectorize(&none, &vocab());
        assert_eq!(v, vec![0, 0, 0, 0]);

        let v: FeatureVector = vectorize(&["股票"], &Vocabulary::default());
        assert!(v.is_empty());
    }

    #[test]
    fn deterministic() {
        let tokens = ["比赛", "股票", "球队"];
        let a: FeatureVector = vectorize(&tokens, &vocab());
        let b: FeatureVector = vectorize(&tokens, &vocab());
        assert_eq!(a, b);
    }

    #[test]
    fn documents_keep_label_alignment() {
        let docs = vec![
            Document::new(vec!["股票".into()], "财经"),
            Document::new(vec!["比赛".into(), "球队".into()], "体育"),
        ];
        let set: FeatureSet = vectorize_documents(&docs, &vocab());
        assert_eq!(set.len(), 2);
        assert_eq!(set.features, vec![vec![1, 0, 0, 0], vec![0, 0, 1, 1]]);
        assert_eq!(set.labels, vec!["财经", "体育"]);
    }
}

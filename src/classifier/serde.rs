use serde::{ser::SerializeStruct, Deserialize, Serialize};

use crate::classifier::{
    naive_bayes::MultinomialNb, tokenizer::Tokenizer, vocabulary::Vocabulary, NewsClassifier,
};

/// NewsClassifierのデシリアライズ用のデータ構造
/// tokenizer を含んでいないため、シリアライズ可能です。
/// `into_classifier`メソッドを使用して、`NewsClassifier`に変換できます。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsClassifierData {
    /// 学習済みモデル
    pub model: MultinomialNb,
    /// 学習に使った語彙 (順序込み)
    pub vocabulary: Vocabulary,
}

impl NewsClassifierData {
    /// `NewsClassifierData`から`NewsClassifier`に変換します。
    pub fn into_classifier<T: Tokenizer>(self, tokenizer: T) -> NewsClassifier<T> {
        NewsClassifier {
            model: self.model,
            vocabulary: self.vocabulary,
            tokenizer,
        }
    }
}

impl<T: Tokenizer> Serialize for NewsClassifier<T> {
    /// NewsClassifierをシリアライズします
    /// tokenizer は除外されます。
    /// デシリアライズするには`NewsClassifierData`を使用してください。
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("NewsClassifier", 2)?;
        state.serialize_field("model", &self.model)?;
        state.serialize_field("vocabulary", &self.vocabulary)?;
        state.end()
    }
}

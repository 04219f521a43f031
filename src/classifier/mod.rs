pub mod corpus;
pub mod feature;
pub mod naive_bayes;
pub mod serde;
pub mod stopwords;
pub mod token;
pub mod tokenizer;
pub mod vocabulary;

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use crate::{
    classifier::{
        corpus::read_document,
        feature::{vectorize, FeatureVector},
        naive_bayes::{Classifier, MultinomialNb},
        serde::NewsClassifierData,
        tokenizer::{JiebaTokenizer, Tokenizer},
        vocabulary::Vocabulary,
    },
    error::{ClassifierError, Result},
};

/// 学習済みモデル + 語彙 + tokenizer
///
/// 推論時は学習時と同じ分かち書きと同じ語彙でベクトル化する
#[derive(Debug)]
pub struct NewsClassifier<T = JiebaTokenizer>
where
    T: Tokenizer,
{
    pub(crate) model: MultinomialNb,
    pub(crate) vocabulary: Vocabulary,
    pub(crate) tokenizer: T,
}

impl<T: Tokenizer> NewsClassifier<T> {
    /// モデルと語彙の次元が一致しない場合はエラー
    pub fn new(model: MultinomialNb, vocabulary: Vocabulary, tokenizer: T) -> Result<Self> {
        if model.n_features() != vocabulary.len() {
            return Err(ClassifierError::DimensionMismatch {
                expected: model.n_features(),
                actual: vocabulary.len(),
            });
        }
        Ok(Self {
            model,
            vocabulary,
            tokenizer,
        })
    }

    pub fn model(&self) -> &MultinomialNb {
        &self.model
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn tokenizer(&self) -> &T {
        &self.tokenizer
    }

    /// 分かち書き済み token 列のカテゴリを推定
    pub fn predict_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> Result<String> {
        let x: FeatureVector = vectorize(tokens, &self.vocabulary);
        self.model.predict(&x)
    }

    /// 生テキストのカテゴリを推定
    pub fn predict_content(&self, content: &str) -> Result<String> {
        self.predict_tokens(&self.tokenizer.tokenize(content))
    }

    /// ファイルの内容 (前後の空白は除去) のカテゴリを推定
    /// 改行の扱いは学習時の読み込みと同じ
    pub fn predict_file<P: AsRef<Path>>(&self, path: P) -> Result<String> {
        let content = read_document(path.as_ref())?;
        self.predict_content(content.trim())
    }

    /// Writes the model blob (CBOR, vocabulary embedded) and the plain-text
    /// vocabulary file.
    pub fn save<P, Q>(&self, model_path: P, vocabulary_path: Q) -> Result<()>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let model_path = model_path.as_ref();
        let file = File::create(model_path).map_err(|e| ClassifierError::io(model_path, e))?;
        let mut writer = BufWriter::new(file);
        serde_cbor::to_writer(&mut writer, self)?;
        writer
            .flush()
            .map_err(|e| ClassifierError::io(model_path, e))?;
        log::info!("saved model to {}", model_path.display());

        self.vocabulary.save(vocabulary_path)
    }

    /// Restores a classifier saved with [`NewsClassifier::save`].
    ///
    /// Fails with [`ClassifierError::VocabularyMismatch`] when the vocabulary
    /// file differs from the vocabulary embedded in the model blob.
    pub fn load<P, Q>(model_path: P, vocabulary_path: Q, tokenizer: T) -> Result<Self>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let model_path = model_path.as_ref();
        let file = File::open(model_path).map_err(|e| ClassifierError::io(model_path, e))?;
        let data: NewsClassifierData = serde_cbor::from_reader(BufReader::new(file))?;

        let vocabulary = Vocabulary::load(vocabulary_path)?;
        if vocabulary != data.vocabulary {
            return Err(ClassifierError::VocabularyMismatch);
        }
        Self::new(data.model, vocabulary, tokenizer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use crate::classifier::{
        corpus::Document,
        feature::vectorize_documents,
        naive_bayes::Fit,
        tokenizer::WhitespaceTokenizer,
    };

    fn trained() -> NewsClassifier<WhitespaceTokenizer> {
        let docs = vec![
            Document::new(vec!["股票".into(), "利息".into()], "财经"),
            Document::new(vec!["股票".into(), "基金".into()], "财经"),
            Document::new(vec!["比赛".into(), "球队".into()], "体育"),
            Document::new(vec!["比赛".into(), "进球".into()], "体育"),
        ];
        let vocabulary: Vocabulary = ["股票", "比赛", "利息", "球队"].into_iter().collect();
        let set = vectorize_documents::<u8>(&docs, &vocabulary);
        let model = MultinomialNb::params().fit(&set.features, &set.labels).unwrap();
        NewsClassifier::new(model, vocabulary, WhitespaceTokenizer).unwrap()
    }

    #[test]
    fn predicts_from_content_and_file() {
        let clf = trained();
        assert_eq!(clf.predict_content("今天 股票 大涨").unwrap(), "财经");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("news.txt");
        fs::write(&path, "\n 球队 赢得 比赛 \n").unwrap();
        assert_eq!(clf.predict_file(&path).unwrap(), "体育");
    }

    #[test]
    fn save_and_load_predict_the_same() {
        let clf = trained();
        let dir = tempfile::tempdir().unwrap();
        let model_path = dir.path().join("model.cbor");
        let vocab_path = dir.path().join("words.txt");
        clf.save(&model_path, &vocab_path).unwrap();

        let loaded = NewsClassifier::load(&model_path, &vocab_path, WhitespaceTokenizer).unwrap();
        assert_eq!(loaded.model(), clf.model());
        assert_eq!(loaded.vocabulary(), clf.vocabulary());
        for text in ["股票 利息", "比赛 球队", "天气"] {
            assert_eq!(
                loaded.predict_content(text).unwrap(),
                clf.predict_content(text).unwrap()
            );
        }
    }

    #[test]
    fn load_rejects_foreign_vocabulary() {
        let clf = trained();
        let dir = tempfile::tempdir().unwrap();
        let model_path = dir.path().join("model.cbor");
        let vocab_path = dir.path().join("words.txt");
        clf.save(&model_path, &vocab_path).unwrap();

        fs::write(&vocab_path, "比赛\n股票\n利息\n球队\n").unwrap();
        let err = NewsClassifier::load(&model_path, &vocab_path, WhitespaceTokenizer).unwrap_err();
        assert!(matches!(err, ClassifierError::VocabularyMismatch));

        fs::write(&vocab_path, "股票\n比赛\n").unwrap();
        let err = NewsClassifier::load(&model_path, &vocab_path, WhitespaceTokenizer).unwrap_err();
        assert!(matches!(err, ClassifierError::VocabularyMismatch));
    }

    #[test]
    fn corrupted_model_is_codec_error() {
        let dir = tempfile::tempdir().unwrap();
        let model_path = dir.path().join("model.cbor");
        let vocab_path = dir.path().join("words.txt");
        fs::write(&model_path, b"not cbor at all").unwrap();
        fs::write(&vocab_path, "股票\n").unwrap();
        let err = NewsClassifier::load(&model_path, &vocab_path, WhitespaceTokenizer).unwrap_err();
        assert!(matches!(err, ClassifierError::Codec(_)));
    }

    #[test]
    fn new_checks_dimensions() {
        let clf = trained();
        let short: Vocabulary = ["股票"].into_iter().collect();
        let err = NewsClassifier::new(clf.model.clone(), short, WhitespaceTokenizer).unwrap_err();
        assert!(matches!(
            err,
            ClassifierError::DimensionMismatch { expected: 4, actual: 1 }
        ));
    }
}

use std::{
    env,
    path::PathBuf,
    str::FromStr,
    time::{Duration, Instant},
};

use crate::{
    classifier::{
        corpus::load_corpus,
        feature::{vectorize_documents, FeatureSet},
        naive_bayes::{Classifier, Fit, MultinomialNbParams},
        stopwords::StopWords,
        token::select_feature_words,
        tokenizer::Tokenizer,
        vocabulary::Vocabulary,
        NewsClassifier,
    },
    error::Result,
};

/// 学習データのルート (`train/`, `test/` を含む)
pub const DEFAULT_DATA_DIR: &str = "train_test_data";
pub const DEFAULT_STOPWORDS_FILE: &str = "stopwords.txt";
pub const DEFAULT_MODEL_FILE: &str = "news_clf_model.cbor";
pub const DEFAULT_VOCABULARY_FILE: &str = "news_clf_feature_words.txt";
/// 特徴語として使う上位語数
pub const DEFAULT_FEATURE_LIMIT: usize = 1000;

/// Every path and knob of a training run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    pub train_dir: PathBuf,
    pub test_dir: PathBuf,
    pub stopwords_file: PathBuf,
    pub model_file: PathBuf,
    pub vocabulary_file: PathBuf,
    /// top-N feature words kept for vectorization
    pub feature_limit: usize,
    /// tokenizer threads, 1 = no pool
    pub workers: usize,
    pub alpha: f64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self::with_data_dir(DEFAULT_DATA_DIR)
    }
}

impl TrainConfig {
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            train_dir: data_dir.join("train"),
            test_dir: data_dir.join("test"),
            stopwords_file: PathBuf::from(DEFAULT_STOPWORDS_FILE),
            model_file: PathBuf::from(DEFAULT_MODEL_FILE),
            vocabulary_file: PathBuf::from(DEFAULT_VOCABULARY_FILE),
            feature_limit: DEFAULT_FEATURE_LIMIT,
            workers: 1,
            alpha: MultinomialNbParams::default().alpha,
        }
    }

    /// 既定値を `NEWS_CLF_DATA_DIR`, `NEWS_CLF_WORKERS`, `NEWS_CLF_FEATURES` で上書き
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup("NEWS_CLF_DATA_DIR") {
            Some(dir) => Self::with_data_dir(dir),
            None => Self::default(),
        };
        config.workers = parse_or(&lookup, "NEWS_CLF_WORKERS", config.workers).max(1);
        config.feature_limit = parse_or(&lookup, "NEWS_CLF_FEATURES", config.feature_limit);
        config
    }
}

fn parse_or<F, V>(lookup: &F, key: &str, default: V) -> V
where
    F: Fn(&str) -> Option<String>,
    V: FromStr + Copy + std::fmt::Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => match raw.trim().parse() {
            Ok(v) => v,
            Err(_) => {
                log::warn!("ignoring {}={:?}, using {}", key, raw, default);
                default
            }
        },
    }
}

/// 学習結果
#[derive(Debug)]
pub struct TrainReport<T: Tokenizer> {
    pub classifier: NewsClassifier<T>,
    /// held-out accuracy in [0, 1]
    pub accuracy: f64,
    pub train_docs: usize,
    pub test_docs: usize,
    /// 特徴語候補の総数 (切り詰め前)
    pub candidate_words: usize,
    /// load から score までの時間 (保存は含まない)
    pub elapsed: Duration,
}

/// Loads both splits, selects features, fits, scores, and saves the artifacts.
pub fn train<T: Tokenizer>(config: &TrainConfig, tokenizer: T) -> Result<TrainReport<T>> {
    let start = Instant::now();

    let train_docs = load_corpus(&config.train_dir, &tokenizer, config.workers)?;
    let test_docs = load_corpus(&config.test_dir, &tokenizer, config.workers)?;
    let stop_words = StopWords::load(&config.stopwords_file)?;

    let ranked = select_feature_words(&train_docs, &stop_words);
    let candidate_words = ranked.len();
    let vocabulary = Vocabulary::from_ranked(ranked, config.feature_limit);
    log::info!(
        "selected {} feature words out of {} candidates",
        vocabulary.len(),
        candidate_words
    );

    let train_set: FeatureSet = vectorize_documents(&train_docs, &vocabulary);
    let test_set: FeatureSet = vectorize_documents(&test_docs, &vocabulary);

    let model = MultinomialNbParams::new()
        .alpha(config.alpha)
        .fit(&train_set.features, &train_set.labels)?;
    log::info!("trained on {} documents, classes {:?}", train_set.len(), model.classes());

    let accuracy = model.score(&test_set.features, &test_set.labels)?;
    log::info!("test accuracy {:.4} on {} documents", accuracy, test_set.len());
    let elapsed = start.elapsed();

    let classifier = NewsClassifier::new(model, vocabulary, tokenizer)?;
    classifier.save(&config.model_file, &config.vocabulary_file)?;

    Ok(TrainReport {
        classifier,
        accuracy,
        train_docs: train_docs.len(),
        test_docs: test_docs.len(),
        candidate_words,
        elapsed,
    })
}

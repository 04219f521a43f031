/// This crate is a bag-of-words Naive Bayes classifier for Chinese news articles.
pub mod classifier;
pub mod error;
pub mod pipeline;

/// News Classifier
/// The top-level struct of this crate: a trained model bundled with the
/// feature vocabulary it was trained on and the tokenizer used to segment
/// new input.
///
/// It predicts the category of raw text (`predict_content`) or of a file
/// (`predict_file`), returning only the label.
///
/// `NewsClassifier<T>` has one generic parameter:
/// - `T`: the tokenizer (defaults to `JiebaTokenizer`)
///
/// # Serialization
/// Supported, as CBOR through `save`.
/// The tokenizer is not part of the serialized data.
///
/// # Deserialization
/// Use `load`, or deserialize `NewsClassifierData` and call `into_classifier`.
pub use classifier::NewsClassifier;

/// News Classifier Data Structure for Serialization
/// The serializable part of `NewsClassifier` (model + vocabulary), without the
/// tokenizer.
pub use classifier::serde::NewsClassifierData;

/// Document and corpus loading
/// A `Document` is a token sequence plus the category it was filed under.
/// `load_corpus` reads a `root/<category>/<file>` tree, optionally tokenizing
/// on a rayon thread pool.
pub use classifier::corpus::{load_corpus, Document};

/// Token Frequency structure and feature word selection
/// `TokenFrequency` counts tokens in first-seen order, so equal counts keep a
/// deterministic order after the descending sort.
/// `select_feature_words` ranks the corpus tokens that survive the stop word
/// and shape filters.
pub use classifier::token::{is_feature_candidate, select_feature_words, TokenFrequency};

/// Stop words excluded from feature selection
pub use classifier::stopwords::StopWords;

/// Ordered feature vocabulary
/// Vector positions follow vocabulary order, so the vocabulary used for
/// prediction must equal the one used for training.
pub use classifier::vocabulary::Vocabulary;

/// Binary bag-of-words vectorization
pub use classifier::feature::{vectorize, vectorize_documents, FeatureSet, FeatureVector};

/// Classifier traits and the multinomial Naive Bayes model
/// - `Fit`: hyper-parameters that fit a model from a feature matrix and labels
/// - `Classifier`: `predict` one vector, `score` mean accuracy over a set
pub use classifier::naive_bayes::{Classifier, Fit, MultinomialNb, MultinomialNbParams};

/// Tokenizer trait and implementations
/// - `JiebaTokenizer`: Chinese word segmentation (accurate mode, HMM on)
/// - `WhitespaceTokenizer`: whitespace split, for pre-segmented text
pub use classifier::tokenizer::{JiebaTokenizer, Tokenizer, WhitespaceTokenizer};

pub use error::{ClassifierError, Result};
pub use pipeline::{train, TrainConfig, TrainReport};

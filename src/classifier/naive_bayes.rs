use std::collections::BTreeMap;

use num::Num;
use serde::{Deserialize, Serialize};

use crate::{
    classifier::feature::FeatureVector,
    error::{ClassifierError, Result},
};

/// 学習済みの分類器
pub trait Classifier {
    /// Predicts the label of one feature vector.
    fn predict<N>(&self, x: &[N]) -> Result<String>
    where
        N: Num + Copy + Into<f64>;

    /// Mean exact-match accuracy over `x` against `y`, in `[0.0, 1.0]`.
    fn score<N>(&self, x: &[FeatureVector<N>], y: &[String]) -> Result<f64>
    where
        N: Num + Copy + Into<f64>,
    {
        if x.is_empty() {
            return Err(ClassifierError::EmptyDataset("test"));
        }
        if x.len() != y.len() {
            return Err(ClassifierError::LabelMismatch {
                samples: x.len(),
                labels: y.len(),
            });
        }
        let mut correct = 0usize;
        for (row, label) in x.iter().zip(y) {
            if self.predict(row)? == *label {
                correct += 1;
            }
        }
        Ok(correct as f64 / x.len() as f64)
    }
}

/// 学習パラメータ
/// `fit` で学習済みモデルを作る
pub trait Fit {
    type Model: Classifier;

    fn fit<N>(&self, x: &[FeatureVector<N>], y: &[String]) -> Result<Self::Model>
    where
        N: Num + Copy + Into<f64>;
}

/// Hyper-parameters of [`MultinomialNb`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MultinomialNbParams {
    /// additive (Laplace/Lidstone) smoothing
    pub alpha: f64,
}

impl MultinomialNbParams {
    /// 下限より小さい alpha は log(0) を避けるため切り上げる
    pub const MIN_ALPHA: f64 = 1e-10;

    pub fn new() -> Self {
        Self { alpha: 1.0 }
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }
}

impl Default for MultinomialNbParams {
    fn default() -> Self {
        Self::new()
    }
}

/// 多項分布ナイーブベイズ
///
/// クラスはラベルの辞書順で保持する。
/// スコアが同点の場合は辞書順で先のクラスが選ばれる。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultinomialNb {
    classes: Vec<String>,
    /// クラスごとの学習文書数
    class_count: Vec<f64>,
    /// log P(c)
    class_log_prior: Vec<f64>,
    /// クラスごとの特徴値の合計 [class][feature]
    feature_count: Vec<Vec<f64>>,
    /// log P(f | c) [class][feature]
    feature_log_prob: Vec<Vec<f64>>,
    alpha: f64,
}

impl MultinomialNb {
    pub fn params() -> MultinomialNbParams {
        MultinomialNbParams::new()
    }

    /// 学習したクラス (辞書順)
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn n_features(&self) -> usize {
        self.feature_log_prob.first().map_or(0, Vec::len)
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn class_count(&self) -> &[f64] {
        &self.class_count
    }

    /// 各クラスの対数同時尤度 log P(c) + Σ x_f log P(f|c)
    pub fn joint_log_likelihood<N>(&self, x: &[N]) -> Result<Vec<f64>>
    where
        N: Num + Copy + Into<f64>,
    {
        if x.len() != self.n_features() {
            return Err(ClassifierError::DimensionMismatch {
                expected: self.n_features(),
                actual: x.len(),
            });
        }
        Ok(self
            .feature_log_prob
            .iter()
            .zip(&self.class_log_prior)
            .map(|(log_prob, prior)| {
                prior
                    + x.iter()
                        .zip(log_prob)
                        .map(|(&v, lp)| Into::<f64>::into(v) * lp)
                        .sum::<f64>()
            })
            .collect())
    }
}

impl Fit for MultinomialNbParams {
    type Model = MultinomialNb;

    fn fit<N>(&self, x: &[FeatureVector<N>], y: &[String]) -> Result<MultinomialNb>
    where
        N: Num + Copy + Into<f64>,
    {
        if x.is_empty() {
            return Err(ClassifierError::EmptyDataset("training"));
        }
        if x.len() != y.len() {
            return Err(ClassifierError::LabelMismatch {
                samples: x.len(),
                labels: y.len(),
            });
        }
        let n_features = x[0].len();
        if n_features == 0 {
            return Err(ClassifierError::EmptyVocabulary);
        }

        // BTreeMap で辞書順にクラス番号を振る
        let mut class_index: BTreeMap<&str, usize> = y.iter().map(|l| (l.as_str(), 0)).collect();
        for (idx, slot) in class_index.values_mut().enumerate() {
            *slot = idx;
        }
        let n_classes = class_index.len();

        let mut class_count = vec![0.0; n_classes];
        let mut feature_count = vec![vec![0.0; n_features]; n_classes];
        for (row, label) in x.iter().zip(y) {
            if row.len() != n_features {
                return Err(ClassifierError::DimensionMismatch {
                    expected: n_features,
                    actual: row.len(),
                });
            }
            let c = class_index[label.as_str()];
            class_count[c] += 1.0;
            for (acc, &v) in feature_count[c].iter_mut().zip(row) {
                *acc += Into::<f64>::into(v);
            }
        }

        let alpha = if self.alpha < MultinomialNbParams::MIN_ALPHA {
            log::warn!(
                "alpha {} is too small, using {}",
                self.alpha,
                MultinomialNbParams::MIN_ALPHA
            );
            MultinomialNbParams::MIN_ALPHA
        } else {
            self.alpha
        };

        let feature_log_prob: Vec<Vec<f64>> = feature_count
            .iter()
            .map(|counts| {
                let total = counts.iter().sum::<f64>() + alpha * n_features as f64;
                let log_total = total.ln();
                counts.iter().map(|&c| (c + alpha).ln() - log_total).collect()
            })
            .collect();

        let n_samples = x.len() as f64;
        let class_log_prior: Vec<f64> = class_count.iter().map(|&c| (c / n_samples).ln()).collect();

        log::debug!(
            "fitted multinomial NB: {} samples, {} classes, {} features",
            x.len(),
            n_classes,
            n_features
        );

        Ok(MultinomialNb {
            classes: class_index.into_keys().map(str::to_string).collect(),
            class_count,
            class_log_prior,
            feature_count,
            feature_log_prob,
            alpha,
        })
    }
}

impl Classifier for MultinomialNb {
    fn predict<N>(&self, x: &[N]) -> Result<String>
    where
        N: Num + Copy + Into<f64>,
    {
        let jll = self.joint_log_likelihood(x)?;
        let mut best = 0;
        for (idx, &score) in jll.iter().enumerate().skip(1) {
            if score > jll[best] {
                best = idx;
            }
        }
        Ok(self.classes[best].clone())
    }
}

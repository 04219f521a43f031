use std::{collections::HashSet, fs, path::Path};

use crate::error::{ClassifierError, Result};

/// 特徴語の選択から除外する語の集合
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    pub fn new() -> Self {
        Self::default()
    }

    /// 1 行 1 語のファイルから読み込む
    /// 各行は前後の空白を除去して登録される
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ClassifierError::io(path, e))?;
        let stop_words = Self::from_lines(&content);
        log::debug!("loaded {} stop words from {}", stop_words.len(), path.display());
        Ok(stop_words)
    }

    pub fn from_lines(content: &str) -> Self {
        content.lines().map(str::trim).collect()
    }

    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for StopWords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(Into::into).collect(),
        }
    }
}

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::{ClassifierError, Result};

/// 特徴語の語彙
/// 位置がそのまま特徴ベクトルの次元になるので、学習時と推論時で同一でなければならない
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Vocabulary {
    words: IndexSet<String>,
}

impl Vocabulary {
    /// 順位付き語リストから上位 `limit` 語を取る
    /// 重複は最初の出現だけを残す
    pub fn from_ranked<I, S>(ranked: I, limit: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut words = IndexSet::new();
        for word in ranked {
            if words.len() >= limit {
                break;
            }
            words.insert(word.into());
        }
        Self { words }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// 語の次元番号
    #[inline]
    pub fn index_of(&self, word: &str) -> Option<usize> {
        self.words.get_index_of(word)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Writes one word per line, most frequent first.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let io_err = |e| ClassifierError::io(path, e);
        let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
        for word in &self.words {
            writeln!(writer, "{}", word).map_err(io_err)?;
        }
        writer.flush().map_err(io_err)?;
        log::info!("wrote {} feature words to {}", self.len(), path.display());
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ClassifierError::io(path, e))?;
        Ok(Self::from_ranked(content.lines(), usize::MAX))
    }
}

/// IndexSet の比較は順序を無視するので、並びまで見る
impl PartialEq for Vocabulary {
    fn eq(&self, other: &Self) -> bool {
        self.words.iter().eq(other.words.iter())
    }
}

impl Eq for Vocabulary {}

impl<S: Into<String>> FromIterator<S> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_ranked(iter, usize::MAX)
    }
}

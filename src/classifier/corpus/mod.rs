use std::{
    fs,
    path::{Path, PathBuf},
};

use rayon::prelude::*;

use crate::{
    classifier::tokenizer::Tokenizer,
    error::{ClassifierError, Result},
};

/// 1 ファイル分の文書
/// 分かち書き済みの token 列と、所属カテゴリ名 (= ディレクトリ名) を持つ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub tokens: Vec<String>,
    pub label: String,
}

impl Document {
    pub fn new(tokens: Vec<String>, label: impl Into<String>) -> Self {
        Self {
            tokens,
            label: label.into(),
        }
    }
}

/// Loads `root/<category>/<file>` into labelled documents.
///
/// Only directories directly under `root` count as categories, and only
/// regular files directly inside a category count as documents; anything
/// else is skipped. Entries are visited in file-name order.
///
/// `workers > 1` tokenizes on a dedicated rayon pool of that size.
/// The result order does not depend on `workers`.
pub fn load_corpus<P, T>(root: P, tokenizer: &T, workers: usize) -> Result<Vec<Document>>
where
    P: AsRef<Path>,
    T: Tokenizer + ?Sized,
{
    let root = root.as_ref();
    log::info!("scanning {}", root.display());

    let mut raw = Vec::new();
    for category in list_entries(root, |p| p.is_dir())? {
        let Some(label) = category.file_name().and_then(|s| s.to_str()) else {
            log::debug!("skipping non UTF-8 category {}", category.display());
            continue;
        };
        let files = list_entries(&category, |p| p.is_file())?;
        log::debug!("category {}: {} files", label, files.len());
        for path in files {
            raw.push((read_document(&path)?, label.to_string()));
        }
    }

    let documents = tokenize_all(raw, tokenizer, workers)?;
    log::info!("loaded {} documents from {}", documents.len(), root.display());
    Ok(documents)
}

/// 文書ファイルを読み込む
///
/// 改行は `\n` に揃える (`\r\n` と単独の `\r` を置き換える)。
/// jieba は `"\r\n"` を 1 token として返すため、そのままだと特徴語に混ざる
pub(crate) fn read_document(path: &Path) -> Result<String> {
    let content = fs::read_to_string(path).map_err(|e| ClassifierError::io(path, e))?;
    Ok(normalize_newlines(content))
}

fn normalize_newlines(content: String) -> String {
    if content.contains('\r') {
        content.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        content
    }
}

fn tokenize_all<T>(raw: Vec<(String, String)>, tokenizer: &T, workers: usize) -> Result<Vec<Document>>
where
    T: Tokenizer + ?Sized,
{
    if workers <= 1 {
        return Ok(raw
            .into_iter()
            .map(|(content, label)| Document::new(tokenizer.tokenize(&content), label))
            .collect());
    }

    let pool = rayon::ThreadPoolBuilder::new().num_threads(workers).build()?;
    log::debug!("tokenizing in parallel (threads={})", workers);
    // par_iter の collect は入力順を保つ
    Ok(pool.install(|| {
        raw.into_par_iter()
            .map(|(content, label)| Document::new(tokenizer.tokenize(&content), label))
            .collect()
    }))
}

/// ディレクトリ直下のうち `keep` を満たすエントリをファイル名順で返す
fn list_entries<F>(dir: &Path, keep: F) -> Result<Vec<PathBuf>>
where
    F: Fn(&Path) -> bool,
{
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|e| ClassifierError::io(dir, e))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| keep(p))
        .collect();
    entries.sort();
    Ok(entries)
}

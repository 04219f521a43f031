use jieba_rs::Jieba;

/// 文章を token 列に分割する
///
/// 並列トークナイズ時にワーカー間で共有されるため `Send + Sync` が必要
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// jieba による中国語分かち書き
///
/// 精確モード + HMM (未登録語の推定あり)
/// 入力文字は一切捨てないので、token を連結すると元の文章に戻る
#[derive(Debug, Clone)]
pub struct JiebaTokenizer {
    jieba: Jieba,
}

impl JiebaTokenizer {
    /// 組み込み辞書で初期化
    pub fn new() -> Self {
        Self {
            jieba: Jieba::new(),
        }
    }
}

impl Default for JiebaTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for JiebaTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        self.jieba
            .cut(text, true)
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

/// Splits on Unicode whitespace.
/// Useful for pre-segmented corpora and for tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }
}

use std::sync::OnceLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::classifier::{corpus::Document, stopwords::StopWords};

///  TokenFrequency 構造体
/// tokenの出現頻度を管理するための構造体です
/// 初めて出現した順序を保持するため、同じ出現回数の token の並びは決定的です
///
/// # Examples
/// ```
/// use news_classifier::TokenFrequency;
/// let mut token_freq = TokenFrequency::new();
/// token_freq.add_token("股票");
/// token_freq.add_token("利息");
/// token_freq.add_token("股票");
///
/// assert_eq!(token_freq.token_count("股票"), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TokenFrequency {
    token_count: IndexMap<String, u32>,
    total_token_count: u64,
}

/// Tokenの追加の実装
impl TokenFrequency {
    /// 新しいTokenFrequencyを作成するメソッド
    pub fn new() -> Self {
        TokenFrequency {
            token_count: IndexMap::new(),
            total_token_count: 0,
        }
    }

    /// tokenを追加する
    ///
    /// # Arguments
    /// * `token` - 追加するトークン
    #[inline]
    pub fn add_token(&mut self, token: &str) -> &mut Self {
        // 既存 token では String を確保しない
        if let Some(count) = self.token_count.get_mut(token) {
            *count += 1;
        } else {
            self.token_count.insert(token.to_string(), 1);
        }
        self.total_token_count += 1;
        self
    }

    /// 複数のtokenを追加する
    ///
    /// # Arguments
    /// * `tokens` - 追加するトークンのスライス
    #[inline]
    pub fn add_tokens<T>(&mut self, tokens: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for token in tokens {
            self.add_token(token.as_ref());
        }
        self
    }
}

/// TokenFrequencyの情報を取得するための実装
impl TokenFrequency {
    /// あるtokenの出現回数を取得します
    ///
    /// # Arguments
    /// * `token` - トークン
    ///
    /// # Returns
    /// * `u32` - トークンの出現回数
    #[inline]
    pub fn token_count(&self, token: &str) -> u32 {
        *self.token_count.get(token).unwrap_or(&0)
    }

    /// 全tokenのカウントの合計を取得します
    #[inline]
    pub fn token_total_count(&self) -> u64 {
        self.total_token_count
    }

    /// 出現した単語数を取得します
    #[inline]
    pub fn token_num(&self) -> usize {
        self.token_count.len()
    }

    /// 頻度でソートされたトークンのベクタを取得(降順)
    /// 安定ソートなので、同じ頻度の token は初出順に並ぶ
    ///
    /// # Returns
    /// * `Vec<(String, u32)>` - 頻度でソートされたトークンのベクタ
    #[inline]
    pub fn sorted_frequency_vector(&self) -> Vec<(String, u32)> {
        let mut token_list: Vec<(String, u32)> = self
            .token_count
            .iter()
            .map(|(token, &count)| (token.clone(), count))
            .collect();

        token_list.sort_by(|a, b| b.1.cmp(&a.1));
        token_list
    }
}

fn ascii_alnum_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("^[a-zA-Z0-9]").expect("static pattern"))
}

/// Whether `token` may become a feature word.
///
/// Rejects tokens whose first character is an ASCII letter or digit (a prefix
/// match only, so `"股票A"` passes), tokens of at most one character, and
/// stop words.
#[inline]
pub fn is_feature_candidate(token: &str, stop_words: &StopWords) -> bool {
    !ascii_alnum_prefix().is_match(token)
        && token.chars().count() > 1
        && !stop_words.contains(token)
}

/// Counts candidate tokens over every document.
pub fn count_feature_tokens(documents: &[Document], stop_words: &StopWords) -> TokenFrequency {
    let mut freq = TokenFrequency::new();
    for doc in documents {
        for token in &doc.tokens {
            if is_feature_candidate(token, stop_words) {
                freq.add_token(token);
            }
        }
    }
    freq
}

/// 特徴語を頻度の降順で返す (切り詰めは呼び出し側で行う)
pub fn select_feature_words(documents: &[Document], stop_words: &StopWords) -> Vec<String> {
    let freq = count_feature_tokens(documents, stop_words);
    log::debug!(
        "{} distinct feature candidates out of {} counted tokens",
        freq.token_num(),
        freq.token_total_count()
    );
    freq.sorted_frequency_vector()
        .into_iter()
        .map(|(token, _)| token)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doc(tokens: &[&str], label: &str) -> Document {
        Document::new(tokens.iter().map(|s| s.to_string()).collect(), label)
    }

    #[test]
    fn add_token_counts_and_totals() {
        let mut freq = TokenFrequency::new();
        freq.add_tokens(&["股票", "利息", "股票"]);
        assert_eq!(freq.token_count("股票"), 2);
        assert_eq!(freq.token_count("利息"), 1);
        assert_eq!(freq.token_count("基金"), 0);
        assert_eq!(freq.token_total_count(), 3);
        assert_eq!(freq.token_num(), 2);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let mut freq = TokenFrequency::new();
        freq.add_tokens(&["基金", "利息", "股票", "利息", "股票", "基金"]);
        let sorted = freq.sorted_frequency_vector();
        let tokens: Vec<&str> = sorted.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(tokens, vec!["基金", "利息", "股票"]);
    }

    #[test]
    fn candidate_filter_rules() {
        let stop_words: StopWords = ["的", "我们"].into_iter().collect();
        assert!(is_feature_candidate("股票", &stop_words));
        // prefix only
        assert!(is_feature_candidate("股票A", &stop_words));
        assert!(!is_feature_candidate("A股", &stop_words));
        assert!(!is_feature_candidate("2024年", &stop_words));
        assert!(!is_feature_candidate("nba", &stop_words));
        // length counts characters, not bytes
        assert!(!is_feature_candidate("股", &stop_words));
        assert!(!is_feature_candidate("", &stop_words));
        assert!(!is_feature_candidate("我们", &stop_words));
    }

    #[test]
    fn selection_ranks_by_frequency_and_drops_stop_words() {
        let mut tokens = Vec::new();
        tokens.extend(std::iter::repeat("的").take(100));
        tokens.extend(std::iter::repeat("利息").take(3));
        tokens.extend(std::iter::repeat("股票").take(5));
        let docs = vec![doc(&tokens, "财经")];
        let stop_words: StopWords = ["的"].into_iter().collect();

        let words = select_feature_words(&docs, &stop_words);
        assert_eq!(words, vec!["股票".to_string(), "利息".to_string()]);
    }

    #[test]
    fn selection_counts_across_documents() {
        let docs = vec![
            doc(&["比赛", "球队", "比赛"], "体育"),
            doc(&["股票", "比赛", "上涨"], "财经"),
            doc(&["股票", "a", "1", "x86架构"], "财经"),
        ];
        let freq = count_feature_tokens(&docs, &StopWords::new());
        assert_eq!(freq.token_count("比赛"), 3);
        assert_eq!(freq.token_count("股票"), 2);
        assert_eq!(freq.token_count("x86架构"), 0);

        let words = select_feature_words(&docs, &StopWords::new());
        assert_eq!(words, vec!["比赛", "股票", "球队", "上涨"]);
    }

    #[test]
    fn empty_stop_words_only_apply_shape_filters() {
        let docs = vec![doc(&["的", "的的", "ok", "新闻"], "财经")];
        let words = select_feature_words(&docs, &StopWords::new());
        assert_eq!(words, vec!["的的", "新闻"]);
    }

    #[test]
    fn selection_is_sorted_non_increasing() {
        let docs = vec![
            doc(&["甲乙", "丙丁", "丙丁", "戊己", "戊己", "戊己"], "x"),
            doc(&["丙丁", "甲乙", "庚辛"], "y"),
        ];
        let freq = count_feature_tokens(&docs, &StopWords::new());
        let words = select_feature_words(&docs, &StopWords::new());
        for pair in words.windows(2) {
            assert!(freq.token_count(&pair[0]) >= freq.token_count(&pair[1]));
        }
    }
}

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::io::OutputFormat;
use crate::keywords::{KeywordRanker, Tokenizer};
use crate::stages::Stage3Config;
use crate::tagging::MentionTagger;
use crate::text::NormalizerConfig;

/// Language presets for fillers, profanity and stopwords
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Russian,
    Chinese,
}

impl Language {
    pub fn from_code(code: &str) -> Result<Self, ConfigError> {
        match code.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "ru" | "russian" => Ok(Language::Russian),
            "zh" | "chinese" => Ok(Language::Chinese),
            _ => Err(ConfigError::UnsupportedLanguage(code.to_string())),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Russian => "ru",
            Language::Chinese => "zh",
        }
    }

    pub fn filler_phrases(&self) -> &'static [&'static str] {
        match self {
            Language::English => &[
                "um", "uh", "erm", "hmm", "you know", "i mean", "basically", "literally",
                "sort of", "kind of",
            ],
            Language::Russian => &["э", "ээ", "эм", "ну", "как бы", "типа", "короче", "в общем"],
            Language::Chinese => &["嗯", "呃", "那个", "就是"],
        }
    }

    pub fn profanity_terms(&self) -> &'static [&'static str] {
        match self {
            Language::English => &["damn", "shit", "fuck", "bitch", "bastard", "crap"],
            Language::Russian => &["блять", "сука", "хуй", "пизда", "ебать"],
            Language::Chinese => &[],
        }
    }

    pub fn stopwords(&self) -> &'static [&'static str] {
        match self {
            Language::English => ENGLISH_STOPWORDS,
            Language::Russian => RUSSIAN_STOPWORDS,
            Language::Chinese => &["的", "了", "是", "在", "我", "你", "他", "她", "它", "们", "这", "那", "和", "也", "就", "都"],
        }
    }
}

const ENGLISH_STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few",
    "for", "from", "further", "get", "got", "had", "has", "have", "having", "he", "her", "here",
    "hers", "herself", "him", "himself", "his", "how", "if", "in", "into", "is", "it", "its",
    "itself", "just", "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of",
    "off", "on", "once", "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own",
    "same", "she", "should", "so", "some", "such", "than", "that", "the", "their", "theirs",
    "them", "themselves", "then", "there", "these", "they", "this", "those", "through", "to",
    "too", "under", "until", "up", "very", "was", "we", "were", "what", "when", "where", "which",
    "while", "who", "whom", "why", "will", "with", "would", "yeah", "yes", "you", "your",
    "yours", "yourself", "yourselves",
];

const RUSSIAN_STOPWORDS: &[&str] = &[
    "а", "без", "бы", "был", "была", "были", "было", "быть", "в", "вам", "вас", "во", "вот",
    "все", "всё", "вы", "да", "для", "до", "его", "ее", "её", "если", "есть", "еще", "ещё",
    "же", "за", "и", "из", "или", "им", "их", "к", "как", "когда", "кто", "ли", "мне", "мы",
    "на", "над", "не", "нет", "ни", "но", "о", "об", "он", "она", "они", "оно", "от", "по",
    "под", "при", "с", "со", "так", "там", "то", "тоже", "только", "ты", "у", "уже", "что",
    "это", "этот", "я",
];

/// Pipeline configuration, read from an optional TOML file.
///
/// Every field has a default. List fields left unset fall back to the language preset;
/// a list that is set replaces the preset entirely.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Preset selector: `en`, `ru` or `zh`
    pub language: String,
    pub filler_phrases: Option<Vec<String>>,
    pub profanity_terms: Option<Vec<String>>,
    pub stopwords: Option<Vec<String>>,
    pub keyword_top_n: usize,
    /// 1 for single words, 2 to add bigrams
    pub keyword_max_ngram: usize,
    pub keyword_min_term_len: usize,
    pub output_formats: Vec<OutputFormat>,
    /// Minimum mentions for a segment to be tagged
    pub mention_threshold: usize,
    /// Category to phrase lexicon for mention tagging
    pub mentions: BTreeMap<String, Vec<String>>,
    pub remove_fillers: bool,
    pub mask_profanity: bool,
    pub collapse_duplicates: bool,
    pub mask_char: char,
    /// Blocking workers for normalization; unset uses available parallelism
    pub normalize_workers: Option<usize>,
    pub transcript_wrap_width: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            filler_phrases: None,
            profanity_terms: None,
            stopwords: None,
            keyword_top_n: 10,
            keyword_max_ngram: 1,
            keyword_min_term_len: 2,
            output_formats: Stage3Config::default().formats,
            mention_threshold: 1,
            mentions: BTreeMap::new(),
            remove_fillers: true,
            mask_profanity: true,
            collapse_duplicates: true,
            mask_char: '*',
            normalize_workers: None,
            transcript_wrap_width: 80,
        }
    }
}

impl PipelineConfig {
    /// Load from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn language(&self) -> Result<Language, ConfigError> {
        Language::from_code(&self.language)
    }

    pub fn normalizer_config(&self) -> Result<NormalizerConfig, ConfigError> {
        let language = self.language()?;
        Ok(NormalizerConfig {
            filler_phrases: or_preset(&self.filler_phrases, language.filler_phrases()),
            profanity_terms: or_preset(&self.profanity_terms, language.profanity_terms()),
            remove_fillers: self.remove_fillers,
            mask_profanity: self.mask_profanity,
            collapse_duplicates: self.collapse_duplicates,
            mask_char: self.mask_char,
        })
    }

    pub fn keyword_ranker(&self) -> Result<KeywordRanker, ConfigError> {
        if !(1..=2).contains(&self.keyword_max_ngram) {
            return Err(ConfigError::InvalidNgram(self.keyword_max_ngram));
        }
        let language = self.language()?;
        let stopwords = or_preset(&self.stopwords, language.stopwords());
        let tokenizer = Tokenizer::new(
            stopwords,
            self.keyword_min_term_len.max(1),
            self.keyword_max_ngram,
        );
        Ok(KeywordRanker::new(tokenizer, self.keyword_top_n))
    }

    pub fn mention_tagger(&self) -> MentionTagger {
        MentionTagger::new(&self.mentions, self.mention_threshold)
    }

    pub fn render_config(&self) -> Stage3Config {
        Stage3Config {
            formats: self.output_formats.clone(),
            wrap_width: self.transcript_wrap_width.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.normalize_workers
            .or_else(|| std::thread::available_parallelism().ok().map(|n| n.get()))
            .unwrap_or(1)
            .max(1)
    }
}

fn or_preset(custom: &Option<Vec<String>>, preset: &[&str]) -> Vec<String> {
    match custom {
        Some(list) => list.clone(),
        None => preset.iter().map(|s| s.to_string()).collect(),
    }
}

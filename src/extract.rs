//! Candidate place-name extraction from free text.
//!
//! Text is split on transition words ("from", "to", 从, 到, arrows, ...) and
//! the pieces are cleaned of filler words. When that finds nothing, suffix
//! patterns (administrative, institutional, scenic) run over the raw text,
//! with a bare run of Han characters as the last resort.

use regex::Regex;
use std::sync::OnceLock;

const MIN_CHARS: usize = 2;

const ENGLISH_STOP_WORDS: &[&str] = &[
    "i", "we", "me", "my", "our", "you", "a", "an", "the", "and", "or", "want", "wanna", "would",
    "like", "plan", "planning", "go", "going", "visit", "visiting", "travel", "trip", "tour",
    "route", "please", "let", "lets", "us", "need", "take", "then", "first", "finally", "at", "in",
    "on", "by", "today", "tomorrow", "tonight", "morning", "afternoon", "evening", "night", "day",
    "week", "weekend", "next", "this",
];

// Longest first, so "我们" is stripped before "我".
const CHINESE_FILLERS: &[&str] = &[
    "我们", "我想", "我要", "打算", "计划", "准备", "想要", "希望", "今天", "明天", "后天", "周末",
    "上午", "中午", "下午", "晚上", "早上", "参观", "游览", "看看", "逛逛", "出发", "旅游", "旅行",
    "一下", "一趟", "最后", "接着", "我", "想", "要", "的", "了", "吧", "呢",
];

// Place names that begin with a one-character transition word.
const PROTECTED_NAMES: &[&str] = &["从化", "从江"];

const DENYLIST: &[&str] = &[
    "你好", "您好", "谢谢", "这里", "那里", "哪里", "地方", "什么", "怎么", "可以", "一个", "hello",
    "hi", "thanks", "here", "there", "somewhere", "place",
];

fn arrows() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"->|=>|→|⇒|➡|⟶").expect("arrow pattern"))
}

fn separators() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\s\p{P}]+").expect("separator pattern"))
}

fn transitions() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Protected names come first so they win over the transition they start with.
        let protected = PROTECTED_NAMES.join("|");
        Regex::new(&format!(
            r"(?i){}|\b(?:arrive at|go to|towards|from|to|via|then)\b|从|到达|抵达|前往|经过|途经|然后|再到|再去|到|去|→",
            protected
        ))
        .expect("transition pattern")
    })
}

fn suffix_patterns() -> &'static [Regex; 3] {
    static RE: OnceLock<[Regex; 3]> = OnceLock::new();
    RE.get_or_init(|| {
        [
            // administrative
            Regex::new(
                r"\p{Han}{1,10}(?:省|市|区|县|镇|乡|村|大道|路|街|巷|弄)|(?:[A-Z][a-z]+ )+(?:Province|City|District|County|Road|Street|Avenue)",
            )
            .expect("administrative pattern"),
            // institutions
            Regex::new(
                r"\p{Han}{1,10}(?:大学|学院|医院|银行|酒店|宾馆|机场|火车站|车站)|(?:[A-Z][a-z]+ )+(?:University|College|Hospital|Bank|Hotel|Airport|Station)",
            )
            .expect("institution pattern"),
            // scenic spots and landmarks
            Regex::new(
                r"\p{Han}{1,10}(?:景区|公园|博物馆|博物院|纪念馆|寺|庙|塔|楼|广场|中心|古镇|故居|山|湖)|(?:[A-Z][a-z]+ )+(?:Park|Museum|Temple|Tower|Square|Palace|Lake|Mountain)",
            )
            .expect("scenic pattern"),
        ]
    })
}

fn han_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\p{Han}{2,8}").expect("han pattern"))
}

/// Extracts candidate place names, de-duplicated in first-seen order.
pub fn extract(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return vec![];
    }

    let mut candidates = vec![];

    for name in segment(&normalize(text)) {
        push_candidate(&mut candidates, name);
    }

    if candidates.is_empty() {
        for name in fallback(text) {
            push_candidate(&mut candidates, name);
        }
    }

    tracing::debug!(?candidates, "extracted candidates");

    candidates
}

fn normalize(text: &str) -> String {
    let text = arrows().replace_all(text, " → ");
    separators().replace_all(&text, " ").trim().to_string()
}

fn segment(text: &str) -> Vec<String> {
    let mut names = vec![];

    for piece in split_on_transitions(text) {
        let mut latin: Vec<&str> = vec![];

        for token in piece.split_whitespace() {
            if is_latin(token) {
                if is_english_stop_word(token) {
                    flush_latin(&mut latin, &mut names);
                } else {
                    latin.push(token);
                }
                continue;
            }

            flush_latin(&mut latin, &mut names);

            let stripped = strip_fillers(token);
            if !stripped.is_empty() {
                names.push(stripped.to_string());
            }
        }

        flush_latin(&mut latin, &mut names);
    }

    names
}

/// Splits on transition words, leaving protected place names intact.
fn split_on_transitions(text: &str) -> Vec<&str> {
    let mut pieces = vec![];
    let mut start = 0;

    for m in transitions().find_iter(text) {
        if PROTECTED_NAMES.contains(&m.as_str()) {
            continue;
        }
        pieces.push(&text[start..m.start()]);
        start = m.end();
    }
    pieces.push(&text[start..]);

    pieces
}

fn fallback(text: &str) -> Vec<String> {
    let mut names: Vec<String> = suffix_patterns()
        .iter()
        .flat_map(|re| re.find_iter(text).map(|m| m.as_str().to_string()))
        .collect();

    if names.is_empty() {
        names = han_run()
            .find_iter(text)
            .map(|m| strip_fillers(m.as_str()).to_string())
            .collect();
    }

    names
}

fn flush_latin(latin: &mut Vec<&str>, names: &mut Vec<String>) {
    if !latin.is_empty() {
        names.push(latin.join(" "));
        latin.clear();
    }
}

fn strip_fillers(token: &str) -> &str {
    let mut token = token.trim();

    loop {
        let before = token.len();

        for filler in CHINESE_FILLERS {
            token = token.strip_prefix(filler).unwrap_or(token);
            token = token.strip_suffix(filler).unwrap_or(token);
        }

        if token.len() == before {
            return token;
        }
    }
}

fn is_latin(token: &str) -> bool {
    token.chars().all(|c| c.is_ascii_alphanumeric() || c == '\'')
}

fn is_english_stop_word(token: &str) -> bool {
    let lower = token.to_lowercase();
    ENGLISH_STOP_WORDS.contains(&lower.as_str()) || lower.chars().all(|c| c.is_ascii_digit())
}

fn push_candidate(candidates: &mut Vec<String>, name: String) {
    let name = name.trim().to_string();

    if name.chars().count() < MIN_CHARS {
        return;
    }

    if DENYLIST.contains(&name.to_lowercase().as_str()) {
        return;
    }

    if !candidates.contains(&name) {
        candidates.push(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_yields_nothing() {
        assert!(extract("").is_empty());
        assert!(extract("   \n\t").is_empty());
    }

    #[test]
    fn splits_on_chinese_transitions() {
        let candidates = extract("从北京天安门到北京颐和园");

        assert!(candidates.contains(&"北京天安门".to_string()));
        assert!(candidates.contains(&"北京颐和园".to_string()));
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn greeting_yields_nothing() {
        assert!(extract("你好").is_empty());
        assert!(extract("你好！").is_empty());
    }

    #[test]
    fn strips_filler_words() {
        let candidates = extract("我们明天上午从上海外滩出发，然后去东方明珠");

        assert!(candidates.contains(&"上海外滩".to_string()));
        assert!(candidates.contains(&"东方明珠".to_string()));
        assert!(candidates.iter().all(|c| !c.contains("明天")));
    }

    #[test]
    fn english_names_keep_their_words() {
        let candidates = extract("I want to go from Tiananmen Square to the Summer Palace tomorrow");

        assert!(candidates.contains(&"Tiananmen Square".to_string()));
        assert!(candidates.contains(&"Summer Palace".to_string()));
    }

    #[test]
    fn english_to_does_not_split_words() {
        let candidates = extract("Toronto -> Ottawa");

        assert!(candidates.contains(&"Toronto".to_string()));
        assert!(candidates.contains(&"Ottawa".to_string()));
    }

    #[test]
    fn arrows_separate_stops() {
        let candidates = extract("故宫→天坛=>颐和园");

        assert_eq!(candidates.len(), 3);
    }

    #[test]
    fn punctuation_separates_list_items() {
        let candidates = extract("故宫、天坛、颐和园");

        assert!(candidates.contains(&"天坛".to_string()));
        assert_eq!(candidates.len(), 3);
    }

    #[test]
    fn fallback_patterns_run_when_segmentation_finds_nothing() {
        assert_eq!(fallback("去清华大学"), vec!["去清华大学".to_string()]);
        assert_eq!(fallback("你好吗"), vec!["你好吗".to_string()]);
        assert!(fallback("hello").is_empty());
    }

    #[test]
    fn every_candidate_has_two_characters() {
        for text in ["a to b", "从A到B", "去", "到到到", "from x via yy to zzz"] {
            assert!(extract(text).iter().all(|c| c.chars().count() >= 2));
        }
    }

    #[test]
    fn district_names_starting_with_a_transition_survive() {
        assert_eq!(
            extract("从广州塔到从化温泉"),
            vec!["广州塔".to_string(), "从化温泉".to_string()]
        );
        assert_eq!(
            extract("从从化出发去黎平再到从江"),
            vec!["从化".to_string(), "黎平".to_string(), "从江".to_string()]
        );
    }

    #[test]
    fn duplicates_are_removed() {
        let candidates = extract("从故宫到天坛再到故宫");

        assert_eq!(candidates, vec!["故宫".to_string(), "天坛".to_string()]);
    }
}

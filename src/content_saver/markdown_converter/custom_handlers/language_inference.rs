//! Language inference for code blocks
//!
//! Weighted pattern scoring: every language scores the snippet against its
//! pattern table, the best score wins when it clears a confidence threshold
//! and a margin over the runner-up. Candidates are always restricted to the
//! caller's allow-list, so a winner outside the list is never reported.

use regex::{Regex, RegexSet};
use std::sync::LazyLock;

use super::language_patterns::ALL_LANGUAGES;

/// Size limit for quick detection prefix scan (bytes)
const QUICK_DETECT_PREFIX_SIZE: usize = 500;

/// Snippets longer than this are scored on a head/tail sample
const SAMPLE_THRESHOLD: usize = 50_000;

const HEAD_SAMPLE_SIZE: usize = 20_000;
const TAIL_SAMPLE_SIZE: usize = 10_000;

/// Below this ratio of (winner - runner-up) / winner, weak wins are dropped
const MIN_MARGIN_RATIO: f32 = 0.3;

/// Confidence level for language detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Confidence {
    None,   // score < 5
    Low,    // 5 <= score < 12
    Medium, // 12 <= score < 20
    High,   // score >= 20
}

impl Confidence {
    fn from_score(score: i32) -> Self {
        match score {
            s if s >= 20 => Confidence::High,
            s if s >= 12 => Confidence::Medium,
            s if s >= 5 => Confidence::Low,
            _ => Confidence::None,
        }
    }
}

/// Pattern weight categories
#[derive(Debug, Clone, Copy)]
pub enum PatternCategory {
    Unique,   // 10 pts - Only this language has this pattern
    Strong,   // 8 pts  - Very indicative, rarely elsewhere
    Medium,   // 5 pts  - Common but shared across languages
    Weak,     // 2 pts  - Mildly suggestive
    Negative, // -10 pts - Disqualifies this language
}

impl PatternCategory {
    pub const fn weight(&self) -> i8 {
        match self {
            PatternCategory::Unique => 10,
            PatternCategory::Strong => 8,
            PatternCategory::Medium => 5,
            PatternCategory::Weak => 2,
            PatternCategory::Negative => -10,
        }
    }
}

/// A single pattern with its category
pub struct WeightedPattern {
    pub pattern: &'static str,
    pub category: PatternCategory,
}

impl WeightedPattern {
    pub const fn new(pattern: &'static str, category: PatternCategory) -> Self {
        Self { pattern, category }
    }
}

/// Complete definition for one language
pub struct LanguageDefinition {
    /// Id written into `language-*` classes
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub patterns: &'static [WeightedPattern],
}

impl LanguageDefinition {
    fn answers_to(&self, id: &str) -> bool {
        self.name.eq_ignore_ascii_case(id) || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(id))
    }
}

/// Pre-compiled patterns: RegexSet for the match pass, individual Regex for counting
pub struct CompiledLanguage {
    pub name: &'static str,
    regex_set: RegexSet,
    individual: Vec<Regex>,
    weights: Vec<i8>,
}

impl CompiledLanguage {
    pub fn compile(lang: &LanguageDefinition) -> Self {
        let patterns: Vec<&str> = lang.patterns.iter().map(|p| p.pattern).collect();
        let weights: Vec<i8> = lang.patterns.iter().map(|p| p.category.weight()).collect();

        Self {
            name: lang.name,
            regex_set: RegexSet::new(&patterns)
                .expect("BUG: invalid regex pattern in language definition"),
            individual: patterns
                .iter()
                .map(|p| Regex::new(p).expect("BUG: invalid regex pattern in language definition"))
                .collect(),
            weights,
        }
    }

    /// Weighted score with diminishing returns for repeated matches of one pattern
    pub fn score(&self, code: &str) -> i32 {
        self.regex_set
            .matches(code)
            .iter()
            .map(|i| {
                let count = self.individual[i].find_iter(code).count();
                // First match full weight, every further pair adds one more, capped at 5 matches
                i32::from(self.weights[i]) * (1 + (count.min(5).saturating_sub(1)) / 2) as i32
            })
            .sum()
    }
}

static COMPILED_LANGUAGES: LazyLock<Vec<CompiledLanguage>> =
    LazyLock::new(|| ALL_LANGUAGES.iter().map(|lang| CompiledLanguage::compile(lang)).collect());

/// Map an id or alias to the canonical language name
#[must_use]
pub fn canonical_language(id: &str) -> Option<&'static str> {
    let id = id.trim();
    ALL_LANGUAGES
        .iter()
        .find(|lang| lang.answers_to(id))
        .map(|lang| lang.name)
}

/// Every accepted id and alias, sorted
#[must_use]
pub fn supported_language_ids() -> Vec<&'static str> {
    let mut ids: Vec<&'static str> = ALL_LANGUAGES
        .iter()
        .flat_map(|lang| std::iter::once(lang.name).chain(lang.aliases.iter().copied()))
        .collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Candidate set for one detection run
#[derive(Debug, Clone, Default)]
pub struct LanguageAllowList {
    /// Canonical names; empty means unrestricted unless `unresolved`
    names: Vec<&'static str>,
    /// Ids were requested but none is known, so nothing may be picked
    unresolved: bool,
}

impl LanguageAllowList {
    /// Resolve ids/aliases; unknown ids are logged and ignored.
    ///
    /// No ids (or only blank ones) means every language. Ids that all turn
    /// out unknown allow none, never silently widening to every language.
    pub fn new<S: AsRef<str>>(ids: &[S]) -> Self {
        let mut names = Vec::new();
        let mut requested = false;
        for id in ids.iter().map(AsRef::as_ref).filter(|id| !id.trim().is_empty()) {
            requested = true;
            match canonical_language(id) {
                Some(name) if !names.contains(&name) => names.push(name),
                Some(_) => {}
                None => log::warn!("Ignoring unknown language id '{id}'"),
            }
        }

        let unresolved = requested && names.is_empty();
        if unresolved {
            log::warn!("No known language requested; code blocks stay untagged");
        }
        Self { names, unresolved }
    }

    #[must_use]
    pub fn allows(&self, name: &str) -> bool {
        !self.unresolved && (self.names.is_empty() || self.names.contains(&name))
    }

    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        !self.unresolved && self.names.is_empty()
    }
}

/// Extract language from CSS class patterns
///
/// Supports: "language-rust", "lang-rust", "hljs-rust", "brush:rust"
pub fn extract_language_from_class(class: &str) -> Option<String> {
    for part in class.split_whitespace() {
        if let Some(lang) = part.strip_prefix("language-") {
            return Some(lang.to_string());
        }
        if let Some(lang) = part.strip_prefix("lang-") {
            return Some(lang.to_string());
        }
        if let Some(lang) = part.strip_prefix("hljs-") {
            return Some(lang.to_string());
        }
        if let Some(lang) = part.strip_prefix("brush:") {
            return Some(lang.trim().to_string());
        }
    }
    None
}

/// Largest char boundary at or before `max_bytes`
fn safe_prefix(s: &str, max_bytes: usize) -> &str {
    if max_bytes >= s.len() {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

fn safe_suffix_start(s: &str, approx: usize) -> usize {
    let mut start = approx;
    while start < s.len() && !s.is_char_boundary(start) {
        start += 1;
    }
    start
}

/// Definitive markers in the first few hundred bytes
fn quick_literal_detection(code: &str) -> Option<&'static str> {
    let prefix = safe_prefix(code, QUICK_DETECT_PREFIX_SIZE);

    if prefix.starts_with("#!/bin/bash")
        || prefix.starts_with("#!/usr/bin/env bash")
        || prefix.starts_with("#!/bin/sh")
        || prefix.starts_with("#!/usr/bin/env sh")
    {
        return Some("bash");
    }
    if prefix.starts_with("#!/usr/bin/env python") || prefix.starts_with("#!/usr/bin/python") {
        return Some("python");
    }
    if prefix.starts_with("#!/usr/bin/env node") {
        return Some("javascript");
    }
    if prefix.starts_with("#!/usr/bin/env ruby") || prefix.starts_with("#!/usr/bin/ruby") {
        return Some("ruby");
    }
    if prefix.starts_with("<?php") {
        return Some("php");
    }
    if prefix.contains("package main") && prefix.contains("func ") {
        return Some("go");
    }
    if prefix.contains("<!DOCTYPE html") || prefix.starts_with("<html") {
        return Some("html");
    }
    if prefix.starts_with("<?xml") {
        return Some("xml");
    }

    None
}

/// First-line declarations (document markers, JSON openers)
fn first_line_detection(code: &str) -> Option<&'static str> {
    let first_line = code.lines().next()?.trim();

    if first_line == "---"
        && let Some(second) = code.lines().nth(1)
        && second.contains(": ")
        && !second.trim_start().starts_with('{')
    {
        return Some("yaml");
    }

    if first_line.starts_with('{') || first_line.starts_with('[') {
        let trimmed = code.trim();
        if (trimmed.ends_with('}') || trimmed.ends_with(']')) && trimmed.contains("\":") {
            return Some("json");
        }
    }

    None
}

/// Head and tail of a large snippet; signatures cluster at the top
fn create_representative_sample(code: &str) -> String {
    let len = code.len();
    if len <= SAMPLE_THRESHOLD {
        return code.to_string();
    }

    let head = safe_prefix(code, HEAD_SAMPLE_SIZE);
    let head_end = head.rfind('\n').unwrap_or(head.len());

    let tail_start_approx = safe_suffix_start(code, len.saturating_sub(TAIL_SAMPLE_SIZE));
    let tail_start = code[tail_start_approx..]
        .find('\n')
        .map_or(tail_start_approx, |i| tail_start_approx + i + 1);

    format!("{}\n...\n{}", &code[..head_end], &code[tail_start..])
}

/// Score all allowed languages and pick a winner with enough confidence and margin
fn score_languages(code: &str, allow: &LanguageAllowList) -> Option<&'static str> {
    let mut scores: Vec<(&'static str, i32)> = COMPILED_LANGUAGES
        .iter()
        .filter(|lang| allow.allows(lang.name))
        .map(|lang| (lang.name, lang.score(code)))
        .filter(|(_, score)| *score > 0)
        .collect();

    // Stable sort keeps table order on ties
    scores.sort_by(|a, b| b.1.cmp(&a.1));

    let &(winner, winner_score) = scores.first()?;
    let confidence = Confidence::from_score(winner_score);

    if let Some(&(_, second_score)) = scores.get(1)
        && confidence != Confidence::High
    {
        let margin_ratio = (winner_score - second_score) as f32 / winner_score as f32;
        if margin_ratio < MIN_MARGIN_RATIO {
            return match confidence {
                Confidence::Medium if winner_score >= 10 => Some(winner),
                _ => None,
            };
        }
    }

    if confidence == Confidence::None {
        None
    } else {
        Some(winner)
    }
}

/// Infer the language of a code snippet, restricted to `allow`.
///
/// Staged: literal markers, first-line declarations, then weighted scoring.
/// Returns the canonical language name, or `None` when unsure.
#[must_use]
pub fn infer_language(code: &str, allow: &LanguageAllowList) -> Option<&'static str> {
    let trimmed = code.trim();

    if trimmed.len() < 5 {
        return None;
    }

    if let Some(lang) = quick_literal_detection(trimmed).filter(|l| allow.allows(l)) {
        return Some(lang);
    }

    if let Some(lang) = first_line_detection(trimmed).filter(|l| allow.allows(l)) {
        return Some(lang);
    }

    if trimmed.len() > SAMPLE_THRESHOLD {
        score_languages(&create_representative_sample(trimmed), allow)
    } else {
        score_languages(trimmed, allow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all() -> LanguageAllowList {
        LanguageAllowList::default()
    }

    fn defaults() -> LanguageAllowList {
        LanguageAllowList::new(crate::utils::DEFAULT_LANGUAGES)
    }

    #[test]
    fn test_canonical_language_aliases() {
        assert_eq!(canonical_language("js"), Some("javascript"));
        assert_eq!(canonical_language("PY"), Some("python"));
        assert_eq!(canonical_language("rb"), Some("ruby"));
        assert_eq!(canonical_language("golang"), Some("go"));
        assert_eq!(canonical_language("sh"), Some("bash"));
        assert_eq!(canonical_language("cobol"), None);
    }

    #[test]
    fn test_supported_ids_contains_names_and_aliases() {
        let ids = supported_language_ids();
        assert!(ids.contains(&"javascript"));
        assert!(ids.contains(&"js"));
        assert!(ids.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_detects_python() {
        let code = "def greet(name):\n    if name is None:\n        return 'hi'\n    print(f'hello {name}')\n";
        assert_eq!(infer_language(code, &defaults()), Some("python"));
    }

    #[test]
    fn test_detects_javascript() {
        let code = "const add = (a, b) => {\n  return a + b;\n};\nconsole.log(add(1, 2));";
        assert_eq!(infer_language(code, &defaults()), Some("javascript"));
    }

    #[test]
    fn test_detects_ruby() {
        let code = "class Greeter\n  attr_reader :name\n\n  def greet\n    puts \"Hello #{name}\"\n  end\nend";
        assert_eq!(infer_language(code, &defaults()), Some("ruby"));
    }

    #[test]
    fn test_detects_go() {
        let code = "func main() {\n\tx := 5\n\tif err != nil {\n\t\treturn\n\t}\n\tfmt.Println(x)\n}";
        assert_eq!(infer_language(code, &defaults()), Some("go"));
    }

    #[test]
    fn test_detects_sql() {
        let code = "SELECT id, name FROM users WHERE id = 1 ORDER BY name;";
        assert_eq!(infer_language(code, &defaults()), Some("sql"));
    }

    #[test]
    fn test_detects_css() {
        let code = ".button {\n  color: #fff;\n  padding: 4px 8px;\n}";
        assert_eq!(infer_language(code, &defaults()), Some("css"));
    }

    #[test]
    fn test_detects_html() {
        let code = "<div class=\"card\">\n  <p>Hello</p>\n</div>";
        assert_eq!(infer_language(code, &defaults()), Some("html"));
    }

    #[test]
    fn test_allow_list_excludes_winner() {
        let code = "fn main() {\n    let mut v = vec![1, 2];\n    println!(\"{:?}\", v);\n}";
        assert_eq!(infer_language(code, &all()), Some("rust"));
        assert_ne!(infer_language(code, &defaults()), Some("rust"));
    }

    #[test]
    fn test_quick_detection_respects_allow_list() {
        let code = "#!/bin/bash\necho hi";
        assert_eq!(infer_language(code, &all()), Some("bash"));
        let only_python = LanguageAllowList::new(&["py"]);
        assert_eq!(infer_language(code, &only_python), None);
    }

    #[test]
    fn test_prose_is_untagged() {
        assert_eq!(infer_language("just some words here", &defaults()), None);
        assert_eq!(infer_language("   ", &defaults()), None);
    }

    #[test]
    fn test_unknown_ids_ignored() {
        let allow = LanguageAllowList::new(&["klingon", "py"]);
        assert!(!allow.is_unrestricted());
        assert!(allow.allows("python"));
        assert!(!allow.allows("go"));
    }

    #[test]
    fn test_only_unknown_ids_allow_nothing() {
        let allow = LanguageAllowList::new(&["klingon"]);
        assert!(!allow.is_unrestricted());
        assert!(!allow.allows("python"));
        assert_eq!(infer_language("#!/bin/bash\necho hi", &allow), None);
    }

    #[test]
    fn test_no_ids_allow_everything() {
        let empty: [&str; 0] = [];
        assert!(LanguageAllowList::new(&empty).is_unrestricted());
        assert!(LanguageAllowList::new(&["", "  "]).is_unrestricted());
    }

    #[test]
    fn test_extract_language_from_class() {
        assert_eq!(
            extract_language_from_class("graf language-python"),
            Some("python".to_string())
        );
        assert_eq!(extract_language_from_class("graf graf--pre"), None);
    }
}

//! Language pattern definitions for weighted scoring detection
//!
//! Each language has patterns categorized by specificity:
//! - Unique (10pts): Only this language
//! - Strong (8pts): Very indicative
//! - Medium (5pts): Shared but suggestive
//! - Weak (2pts): Mildly suggestive
//! - Negative (-10pts): Disqualifies
//!
//! Names are the ids written into `language-*` classes; aliases are the
//! short ids accepted on the command line.

use super::language_inference::{LanguageDefinition, PatternCategory::*, WeightedPattern};

pub static JAVASCRIPT: LanguageDefinition = LanguageDefinition {
    name: "javascript",
    aliases: &["js", "jsx", "mjs", "cjs"],
    patterns: &[
        WeightedPattern::new(r"\bconsole\.(log|error|warn)\(", Unique),
        WeightedPattern::new(r"\bfunction\s*\w*\s*\([^)]*\)\s*\{", Unique),
        WeightedPattern::new(r"\brequire\(\s*['\x22]", Unique),
        WeightedPattern::new(r"\bmodule\.exports\b", Unique),
        WeightedPattern::new(r"\bdocument\.(getElementById|querySelector|createElement)", Unique),
        WeightedPattern::new(r"\bwindow\.\w+", Strong),
        WeightedPattern::new(r"\b(const|let|var)\s+\w+\s*=", Strong),
        WeightedPattern::new(r"\([^)]*\)\s*=>\s*[\{\(]?", Strong),
        WeightedPattern::new(r"\bexport\s+(default|const|function|class)\b", Strong),
        WeightedPattern::new(r"\bimport\s+[\w{}\s,*]+\s+from\s+['\x22]", Strong),
        WeightedPattern::new(r"\.then\(", Medium),
        WeightedPattern::new(r"\bnew\s+Promise\(", Medium),
        WeightedPattern::new(r"===|!==", Medium),
        WeightedPattern::new(r"\basync\s+function\b", Medium),
        WeightedPattern::new(r"\bawait\s+\w+", Weak),
        WeightedPattern::new(r"\bundefined\b", Weak),
        WeightedPattern::new(r";\s*$", Weak),
        WeightedPattern::new(r"\bdef\s+\w+\s*\(", Negative),
        WeightedPattern::new(r"\bfunc\s+\w+\s*\(", Negative),
        WeightedPattern::new(r"\bpublic\s+static\s+void\b", Negative),
        WeightedPattern::new(r":\s*(string|number|boolean)\b\s*[,)=;]", Negative),
    ],
};

pub static TYPESCRIPT: LanguageDefinition = LanguageDefinition {
    name: "typescript",
    aliases: &["ts", "tsx"],
    patterns: &[
        WeightedPattern::new(r":\s*(string|number|boolean|void|any|unknown)\b\s*[,)=;{]", Unique),
        WeightedPattern::new(r"\binterface\s+\w+\s*(extends\s+[\w,\s]+)?\{", Unique),
        WeightedPattern::new(r"\btype\s+\w+\s*=\s*[\w{'\x22(]", Strong),
        WeightedPattern::new(r"\b(public|private|protected|readonly)\s+\w+\s*:", Strong),
        WeightedPattern::new(r"<\w+(\[\])?>\(", Medium),
        WeightedPattern::new(r"\bas\s+(const|string|number|any)\b", Medium),
        WeightedPattern::new(r"\b(const|let)\s+\w+\s*=", Weak),
        WeightedPattern::new(r"\bimport\s+[\w{}\s,*]+\s+from\s+['\x22]", Weak),
        WeightedPattern::new(r"\bdef\s+\w+\s*\(", Negative),
    ],
};

pub static PYTHON: LanguageDefinition = LanguageDefinition {
    name: "python",
    aliases: &["py", "py3", "gyp"],
    patterns: &[
        WeightedPattern::new(r"(?m)^\s*def\s+\w+\s*\([^)]*\)\s*(->\s*[\w\[\], ]+)?:", Unique),
        WeightedPattern::new(r"(?m)^\s*class\s+\w+\s*(\([^)]*\))?\s*:\s*$", Unique),
        WeightedPattern::new(r"if\s+__name__\s*==\s*['\x22]__main__['\x22]", Unique),
        WeightedPattern::new(r"(?m)^\s*from\s+[\w.]+\s+import\s", Unique),
        WeightedPattern::new(r"\bself\.\w+", Unique),
        WeightedPattern::new(r"(?m)^\s*elif\s+.+:", Unique),
        WeightedPattern::new(r"(?m)^\s*except(\s+\w+(\s+as\s+\w+)?)?\s*:", Unique),
        WeightedPattern::new(r"\bprint\(f?['\x22]", Strong),
        WeightedPattern::new(r"(?m)^\s*import\s+\w+(\s+as\s+\w+)?\s*$", Strong),
        WeightedPattern::new(r"\b(True|False|None)\b", Medium),
        WeightedPattern::new(r"(?m)^\s*(for|while|if|with)\s.+:\s*$", Medium),
        WeightedPattern::new(r"\blen\(\w+\)", Weak),
        WeightedPattern::new(r"(?m)^\s*#[^!\[{]", Weak),
        WeightedPattern::new(r";\s*$", Negative),
        WeightedPattern::new(r"\bfunction\s+\w+\s*\(", Negative),
        WeightedPattern::new(r"(?m)^\s*end\s*$", Negative),
    ],
};

pub static RUBY: LanguageDefinition = LanguageDefinition {
    name: "ruby",
    aliases: &["rb", "gemspec", "podspec"],
    patterns: &[
        WeightedPattern::new(r"(?m)^\s*def\s+[\w?!.]+(\s*\([^)]*\))?\s*$", Unique),
        WeightedPattern::new(r"(?m)^\s*require(_relative)?\s+['\x22]", Unique),
        WeightedPattern::new(r"(?m)^\s*(module|class)\s+[A-Z]\w*(\s*<\s*[\w:]+)?\s*$", Unique),
        WeightedPattern::new(r"\battr_(accessor|reader|writer)\s+:", Unique),
        WeightedPattern::new(r"\bdo\s*\|[^|]*\|", Unique),
        WeightedPattern::new(r"\bputs\s+", Strong),
        WeightedPattern::new(r"(?m)^\s*end\s*$", Strong),
        WeightedPattern::new(r"#\{[^}]+\}", Strong),
        WeightedPattern::new(r"\.each(_with_index)?\s*(do|\{)", Strong),
        WeightedPattern::new(r":\w+\s*=>", Medium),
        WeightedPattern::new(r"\b(unless|elsif)\b", Medium),
        WeightedPattern::new(r"@\w+\s*=", Weak),
        WeightedPattern::new(r"\bnil\b", Weak),
        WeightedPattern::new(r";\s*$", Negative),
        WeightedPattern::new(r"\bself\.\w+\s*=\s*\w+\s*$", Weak),
        WeightedPattern::new(r"(?m)^\s*def\s+\w+\s*\([^)]*\)\s*:", Negative),
    ],
};

pub static JAVA: LanguageDefinition = LanguageDefinition {
    name: "java",
    aliases: &["jsp"],
    patterns: &[
        WeightedPattern::new(r"\bpublic\s+static\s+void\s+main\s*\(", Unique),
        WeightedPattern::new(r"\bSystem\.out\.print(ln)?\(", Unique),
        WeightedPattern::new(r"(?m)^\s*import\s+java(x)?\.", Unique),
        WeightedPattern::new(r"(?m)^\s*package\s+[\w.]+;", Unique),
        WeightedPattern::new(r"\b(public|private|protected)\s+(final\s+)?class\s+\w+", Strong),
        WeightedPattern::new(r"\b(public|private|protected)\s+(static\s+)?[\w<>\[\]]+\s+\w+\s*\([^)]*\)\s*(throws\s+[\w, ]+)?\{", Strong),
        WeightedPattern::new(r"@(Override|Autowired|Test|Entity)\b", Strong),
        WeightedPattern::new(r"\bnew\s+[A-Z]\w*(<[^>]*>)?\(", Medium),
        WeightedPattern::new(r"\b(String|Integer|List|Map)<", Medium),
        WeightedPattern::new(r";\s*$", Weak),
        WeightedPattern::new(r"\bfunction\s+\w+\s*\(", Negative),
        WeightedPattern::new(r"\bdef\s+\w+", Negative),
    ],
};

pub static GO: LanguageDefinition = LanguageDefinition {
    name: "go",
    aliases: &["golang"],
    patterns: &[
        WeightedPattern::new(r"(?m)^\s*package\s+\w+\s*$", Unique),
        WeightedPattern::new(r"\bfunc\s+(\([^)]*\)\s*)?\w+\s*\(", Unique),
        WeightedPattern::new(r"\bfmt\.(Print|Sprint|Fprint|Errorf)", Unique),
        WeightedPattern::new(r":=", Strong),
        WeightedPattern::new(r"(?m)^\s*import\s*\(", Strong),
        WeightedPattern::new(r"\bif\s+err\s*!=\s*nil\b", Unique),
        WeightedPattern::new(r"\bgo\s+func\b", Unique),
        WeightedPattern::new(r"\bdefer\s+\w+", Strong),
        WeightedPattern::new(r"\b(chan|struct|interface)\s*\{", Medium),
        WeightedPattern::new(r"\bmake\(\s*(\[\]|map|chan)", Medium),
        WeightedPattern::new(r"\bnil\b", Weak),
        WeightedPattern::new(r";\s*$", Negative),
        WeightedPattern::new(r"\bfunction\s+\w+\s*\(", Negative),
    ],
};

pub static SQL: LanguageDefinition = LanguageDefinition {
    name: "sql",
    aliases: &["mysql", "postgresql", "psql"],
    patterns: &[
        WeightedPattern::new(r"(?i)\bSELECT\s+[\w*.,\s()]+\s+FROM\s+\w+", Unique),
        WeightedPattern::new(r"(?i)\bINSERT\s+INTO\s+\w+", Unique),
        WeightedPattern::new(r"(?i)\bUPDATE\s+\w+\s+SET\s+", Unique),
        WeightedPattern::new(r"(?i)\bDELETE\s+FROM\s+\w+", Unique),
        WeightedPattern::new(r"(?i)\b(CREATE|ALTER|DROP)\s+(TABLE|INDEX|VIEW|DATABASE)\b", Unique),
        WeightedPattern::new(r"(?i)\b(INNER|LEFT|RIGHT|FULL|CROSS)\s+(OUTER\s+)?JOIN\b", Strong),
        WeightedPattern::new(r"(?i)\b(GROUP|ORDER)\s+BY\b", Strong),
        WeightedPattern::new(r"(?i)\bWHERE\s+\w+(\.\w+)?\s*(=|<|>|LIKE|IN|IS)\b", Strong),
        WeightedPattern::new(r"(?i)\b(VARCHAR|INTEGER|PRIMARY\s+KEY|NOT\s+NULL)\b", Medium),
        WeightedPattern::new(r"(?i)\b(COUNT|SUM|AVG)\s*\(", Weak),
        WeightedPattern::new(r"(?m)^\s*--\s", Weak),
        WeightedPattern::new(r"\b(def|func|function)\s+\w+\s*\(", Negative),
    ],
};

pub static CSS: LanguageDefinition = LanguageDefinition {
    name: "css",
    aliases: &[],
    patterns: &[
        WeightedPattern::new(r"(?m)^\s*[.#]?[a-zA-Z][\w-]*(\s*[,>+~]?\s*[.#]?[\w-]+)*(:{1,2}[\w-]+)?\s*\{\s*$", Strong),
        WeightedPattern::new(r"(?m)^\s*[a-z-]+\s*:\s*[^;{}]+;\s*$", Strong),
        WeightedPattern::new(r"@(media|keyframes|font-face|import|supports)\b", Unique),
        WeightedPattern::new(r"\b(margin|padding|border|background|color|display|font-size|width|height)\s*:", Strong),
        WeightedPattern::new(r"\d+(px|em|rem|vh|vw)\b", Medium),
        WeightedPattern::new(r"#[0-9a-fA-F]{3}([0-9a-fA-F]{3})?\b", Medium),
        WeightedPattern::new(r"\b(rgba?|hsla?)\(", Medium),
        WeightedPattern::new(r"!important\b", Unique),
        WeightedPattern::new(r"\b(function|def|func|return)\b", Negative),
        WeightedPattern::new(r"<\w+[^>]*>", Negative),
    ],
};

pub static HTML: LanguageDefinition = LanguageDefinition {
    name: "html",
    aliases: &["htm", "xhtml"],
    patterns: &[
        WeightedPattern::new(r"(?i)<!DOCTYPE\s+html", Unique),
        WeightedPattern::new(r"(?i)</?(html|head|body|div|span|p|ul|li|a|script|style)\b[^>]*>", Unique),
        WeightedPattern::new(r"(?i)<(meta|link|img|br|input)\b[^>]*/?>", Strong),
        WeightedPattern::new(r#"\b(class|id|href|src)=["']"#, Strong),
        WeightedPattern::new(r"</\w+>", Medium),
        WeightedPattern::new(r"<!--.*-->", Weak),
        WeightedPattern::new(r"^\s*<\?xml", Negative),
    ],
};

pub static XML: LanguageDefinition = LanguageDefinition {
    name: "xml",
    aliases: &["svg", "plist", "rss", "atom"],
    patterns: &[
        WeightedPattern::new(r"^\s*<\?xml\s", Unique),
        WeightedPattern::new(r"\bxmlns(:\w+)?=", Unique),
        WeightedPattern::new(r"<\w+:\w+[^>]*>", Strong),
        WeightedPattern::new(r"<!\[CDATA\[", Unique),
        WeightedPattern::new(r"</\w+>", Medium),
        WeightedPattern::new(r"(?i)<!DOCTYPE\s+html", Negative),
    ],
};

pub static JSON: LanguageDefinition = LanguageDefinition {
    name: "json",
    aliases: &[],
    patterns: &[
        WeightedPattern::new(r#"^\s*[\{\[]\s*"\w[^"]*"\s*:"#, Unique),
        WeightedPattern::new(r#""[^"]+"\s*:\s*("|\d|true|false|null|\{|\[)"#, Strong),
        WeightedPattern::new(r"\}\s*,\s*\{", Medium),
        WeightedPattern::new(r"\b(function|def|var|let|const)\b", Negative),
        WeightedPattern::new(r";\s*$", Negative),
    ],
};

pub static YAML: LanguageDefinition = LanguageDefinition {
    name: "yaml",
    aliases: &["yml"],
    patterns: &[
        WeightedPattern::new(r"^---\s*\n", Unique),
        WeightedPattern::new(r"(?m)^[a-zA-Z_][\w-]*:\s*$", Strong),
        WeightedPattern::new(r"(?m)^\s+-\s+[\w\x22']", Medium),
        WeightedPattern::new(r"(?m)^\s*[a-zA-Z_][\w-]*:\s+[^\s{;]", Medium),
        WeightedPattern::new(r"[;{}]\s*$", Negative),
        WeightedPattern::new(r"\b(def|function|func|class)\s+\w+", Negative),
    ],
};

pub static SHELL: LanguageDefinition = LanguageDefinition {
    name: "bash",
    aliases: &["sh", "shell", "zsh"],
    patterns: &[
        WeightedPattern::new(r"^#!/(usr/)?bin/(env\s+)?(ba|z)?sh", Unique),
        WeightedPattern::new(r"(?m)^\s*\$\s+\w+", Strong),
        WeightedPattern::new(r"(?m)^\s*(sudo|apt-get|apt|brew|npm|yarn|pip|gem|bundle|git|curl|wget|docker|cd|mkdir|export)\s", Strong),
        WeightedPattern::new(r"(?m)^\s*(if|for|while)\s.*;\s*(then|do)\b", Unique),
        WeightedPattern::new(r"(?m)^\s*(fi|done|esac)\s*$", Unique),
        WeightedPattern::new(r"\$\{?\w+\}?", Weak),
        WeightedPattern::new(r"\s\|\s*(grep|awk|sed|xargs|sort|head|tail)\b", Strong),
        WeightedPattern::new(r"\s--?[a-z][\w-]*", Weak),
        WeightedPattern::new(r"\b(function|def|func)\s+\w+\s*\(", Negative),
    ],
};

pub static RUST: LanguageDefinition = LanguageDefinition {
    name: "rust",
    aliases: &["rs"],
    patterns: &[
        WeightedPattern::new(r"\bfn\s+\w+\s*(<[^>]*>)?\([^)]*\)\s*(->\s*[^{]+)?\{", Unique),
        WeightedPattern::new(r"\blet\s+mut\s+\w+", Unique),
        WeightedPattern::new(r"\bimpl(<[^>]*>)?\s+\w+", Unique),
        WeightedPattern::new(r"#\[derive\(", Unique),
        WeightedPattern::new(r"\b(println|format|vec)!\(", Unique),
        WeightedPattern::new(r"\buse\s+(std|crate|super)::", Unique),
        WeightedPattern::new(r"\b(Option|Result|Vec|Box)<", Strong),
        WeightedPattern::new(r"&(mut\s+)?self\b", Strong),
        WeightedPattern::new(r"\.unwrap\(\)", Strong),
        WeightedPattern::new(r"\bmatch\s+\w+\s*\{", Medium),
        WeightedPattern::new(r"\bpub\s+(fn|struct|enum|mod)\b", Strong),
        WeightedPattern::new(r"\bfunction\s+\w+", Negative),
        WeightedPattern::new(r"\bdef\s+\w+", Negative),
    ],
};

pub static PHP: LanguageDefinition = LanguageDefinition {
    name: "php",
    aliases: &["php5", "php7"],
    patterns: &[
        WeightedPattern::new(r"<\?php", Unique),
        WeightedPattern::new(r"\$\w+\s*=", Strong),
        WeightedPattern::new(r"\$this->\w+", Unique),
        WeightedPattern::new(r"\becho\s+['\x22$]", Strong),
        WeightedPattern::new(r"\bfunction\s+\w+\s*\(\s*\$", Unique),
        WeightedPattern::new(r"->\w+\(", Weak),
        WeightedPattern::new(r"\bdef\s+\w+", Negative),
    ],
};

pub static C_LANG: LanguageDefinition = LanguageDefinition {
    name: "c",
    aliases: &["h"],
    patterns: &[
        WeightedPattern::new(r"#include\s*<\w+\.h>", Unique),
        WeightedPattern::new(r"\bint\s+main\s*\(\s*(void|int\s+argc)?", Strong),
        WeightedPattern::new(r"\bprintf\s*\(", Strong),
        WeightedPattern::new(r"\b(malloc|free|sizeof)\s*\(", Strong),
        WeightedPattern::new(r"\b(struct|typedef)\s+\w+", Medium),
        WeightedPattern::new(r"\bstd::", Negative),
        WeightedPattern::new(r"\b(class|namespace|template)\b", Negative),
    ],
};

pub static CPP: LanguageDefinition = LanguageDefinition {
    name: "cpp",
    aliases: &["c++", "cc", "hpp", "cxx"],
    patterns: &[
        WeightedPattern::new(r"#include\s*<(iostream|vector|string|map|memory)>", Unique),
        WeightedPattern::new(r"\bstd::\w+", Unique),
        WeightedPattern::new(r"\bstd::cout\s*<<", Unique),
        WeightedPattern::new(r"\b(namespace|template\s*<)", Strong),
        WeightedPattern::new(r"\bclass\s+\w+\s*(:\s*(public|private)\s+\w+)?\s*\{", Medium),
        WeightedPattern::new(r"\bint\s+main\s*\(", Medium),
        WeightedPattern::new(r"\bdef\s+\w+", Negative),
    ],
};

/// Every language the classifier knows, in tie-break order
pub static ALL_LANGUAGES: &[&LanguageDefinition] = &[
    &JAVASCRIPT,
    &TYPESCRIPT,
    &PYTHON,
    &RUBY,
    &JAVA,
    &GO,
    &SQL,
    &CSS,
    &HTML,
    &XML,
    &JSON,
    &YAML,
    &SHELL,
    &RUST,
    &PHP,
    &C_LANG,
    &CPP,
];

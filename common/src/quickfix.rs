//! クイック整形（正規表現ベースの表記修正）
//!
//! 構文解析は行わず、言語ごとの置換ルール表を順に適用するだけの浅い整形。
//! 空白・記号まわりの表記のみを対象とし、プログラムの意味は変えない。
//!
//! 既知の制限: 字句解析をしないため、文字列リテラルやコメント内の
//! テキストも置換対象になり得る。
//!
//! ## 処理フロー
//! 1. テキスト正規化（[`crate::normalizer::normalize`]）
//! 2. 言語別ルール表を上から順に適用
//! 3. 1-2 を出力が変化しなくなるまで繰り返す（冪等性の保証）

use crate::normalizer;
use regex::Regex;

/// 不動点に達するまでの最大パス数
const MAX_PASSES: usize = 16;

/// 整形不要時の表示メッセージ
pub const ALREADY_FORMATTED: &str = "Code is already well-formatted! 👍";

/// 置換ルール（パターン → 置換文字列）
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub pattern: &'static str,
    pub replacement: &'static str,
}

/// 言語別ルール表
#[derive(Debug, Clone, Copy)]
pub struct RuleSet {
    /// 対象言語（小文字）
    pub languages: &'static [&'static str],
    pub rules: &'static [Rule],
}

// ---------------------------------------------
// 共通ルール
// ---------------------------------------------

const PAREN_BRACE: Rule = Rule {
    name: "paren-brace",
    pattern: r"\)[ \t]*\{",
    replacement: ") {",
};

const BRACE_KEYWORD: Rule = Rule {
    name: "brace-keyword",
    pattern: r"\}[ \t]*(else|catch|finally)\b",
    replacement: "} ${1}",
};

// 1e+5 のような指数表記に触れないよう、左辺は識別子か閉じ括弧に限定
const TIGHT_PLUS: Rule = Rule {
    name: "tight-plus",
    pattern: r"(\b[A-Za-z_]\w*|[)\]])\+([\w(])",
    replacement: "${1} + ${2}",
};

const TIGHT_MINUS: Rule = Rule {
    name: "tight-minus",
    pattern: r"(\b[A-Za-z_]\w*|[)\]])-([\w(])",
    replacement: "${1} - ${2}",
};

const COMMA_SPACE: Rule = Rule {
    name: "comma-space",
    pattern: r#",[ \t]*([\w"'`(\[{.-])"#,
    replacement: ", ${1}",
};

const SPACE_BEFORE_SEMICOLON: Rule = Rule {
    name: "space-before-semicolon",
    pattern: r"(\S)[ \t]+;",
    replacement: "${1};",
};

const DUPLICATE_SEMICOLONS: Rule = Rule {
    name: "duplicate-semicolons",
    pattern: r"(?m);(?:[ \t]*;)+$",
    replacement: ";",
};

// ---------------------------------------------
// 言語別ルール
// ---------------------------------------------

const JAVA_RULES: &[Rule] = &[
    Rule {
        name: "keyword-paren",
        pattern: r"\b(if|for|while|switch|catch|synchronized)[ \t]*\(",
        replacement: "${1} (",
    },
    PAREN_BRACE,
    BRACE_KEYWORD,
    Rule {
        name: "word-brace",
        pattern: r"(\w)[ \t]*\{",
        replacement: "${1} {",
    },
    Rule {
        name: "tight-assignment",
        pattern: r#"(\w)(==|!=|<=|>=|\+=|-=|\*=|/=|=)([\w"'(\[{-])"#,
        replacement: "${1} ${2} ${3}",
    },
    TIGHT_PLUS,
    TIGHT_MINUS,
    COMMA_SPACE,
    SPACE_BEFORE_SEMICOLON,
    DUPLICATE_SEMICOLONS,
];

const JAVASCRIPT_RULES: &[Rule] = &[
    Rule {
        name: "keyword-paren",
        pattern: r"\b(if|for|while|switch|catch)[ \t]*\(",
        replacement: "${1} (",
    },
    Rule {
        name: "anonymous-function",
        pattern: r"\bfunction[ \t]*\(",
        replacement: "function (",
    },
    PAREN_BRACE,
    BRACE_KEYWORD,
    Rule {
        name: "arrow-left",
        pattern: r"([\w)\]])=>",
        replacement: "${1} =>",
    },
    Rule {
        name: "arrow-right",
        pattern: r"=>(\S)",
        replacement: "=> ${1}",
    },
    Rule {
        name: "object-open",
        pattern: r#"\{([\w"'])"#,
        replacement: "{ ${1}",
    },
    Rule {
        name: "object-close",
        pattern: r#"([\w"'])\}"#,
        replacement: "${1} }",
    },
    Rule {
        name: "tight-assignment",
        pattern: r#"(\w)(===|!==|==|!=|<=|>=|\+=|-=|\*=|/=|=)([\w"'`(\[{-])"#,
        replacement: "${1} ${2} ${3}",
    },
    TIGHT_PLUS,
    TIGHT_MINUS,
    COMMA_SPACE,
    SPACE_BEFORE_SEMICOLON,
    DUPLICATE_SEMICOLONS,
];

const PYTHON_RULES: &[Rule] = &[
    Rule {
        name: "tab-to-spaces",
        pattern: r"\t",
        replacement: "    ",
    },
    Rule {
        name: "keyword-paren",
        pattern: r"\b(if|elif|while)[ \t]*\(",
        replacement: "${1} (",
    },
    Rule {
        name: "space-before-colon",
        pattern: r"(?m)(\S)[ \t]+:$",
        replacement: "${1}:",
    },
    // キーワード引数の `=` は対象外
    Rule {
        name: "tight-comparison",
        pattern: r#"(\w)(==|!=|<=|>=|\+=|-=|\*=|/=)([\w"'(\[{-])"#,
        replacement: "${1} ${2} ${3}",
    },
    Rule {
        name: "comma-space",
        pattern: r#",[ \t]*([\w"'(\[{*-])"#,
        replacement: ", ${1}",
    },
    Rule {
        name: "trailing-semicolon",
        pattern: r"(?m)[ \t]*;+$",
        replacement: "",
    },
];

/// 登録済みルール表
pub const RULE_SETS: &[RuleSet] = &[
    RuleSet { languages: &["java"], rules: JAVA_RULES },
    RuleSet { languages: &["javascript", "typescript"], rules: JAVASCRIPT_RULES },
    RuleSet { languages: &["python"], rules: PYTHON_RULES },
];

struct CompiledRule {
    regex: Regex,
    replacement: &'static str,
}

struct CompiledRuleSet {
    languages: &'static [&'static str],
    rules: Vec<CompiledRule>,
}

lazy_static::lazy_static! {
    static ref COMPILED_RULE_SETS: Vec<CompiledRuleSet> = RULE_SETS
        .iter()
        .map(|set| CompiledRuleSet {
            languages: set.languages,
            rules: set
                .rules
                .iter()
                .map(|rule| CompiledRule {
                    regex: Regex::new(rule.pattern).unwrap(),
                    replacement: rule.replacement,
                })
                .collect(),
        })
        .collect();
}

fn compiled_rule_set(language: &str) -> Option<&'static CompiledRuleSet> {
    let language = language.trim().to_lowercase();
    COMPILED_RULE_SETS
        .iter()
        .find(|set| set.languages.contains(&language.as_str()))
}

/// ルール表が登録されている言語か
pub fn has_rule_set(language: &str) -> bool {
    compiled_rule_set(language).is_some()
}

/// 正規化 + ルール表の1パス
fn run_pass(code: &str, rule_set: Option<&CompiledRuleSet>) -> String {
    let mut text = normalizer::normalize(code);

    if let Some(set) = rule_set {
        for rule in &set.rules {
            text = rule.regex.replace_all(&text, rule.replacement).into_owned();
        }
    }

    text
}

/// クイック整形を適用する
///
/// 言語名は大文字小文字を区別しない。ルール表のない言語は正規化のみ。
/// 出力が変化しなくなるまでパスを繰り返すため、
/// `apply_quick_fixes(&apply_quick_fixes(c, l), l) == apply_quick_fixes(c, l)`。
pub fn apply_quick_fixes(code: &str, language: &str) -> String {
    let rule_set = compiled_rule_set(language);
    let mut current = code.to_string();

    for _ in 0..MAX_PASSES {
        let next = run_pass(&current, rule_set);
        if next == current {
            return current;
        }
        current = next;
    }

    tracing::warn!(language, "quick fixes did not converge after {} passes", MAX_PASSES);
    current
}

/// クイック整形の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickFix {
    pub original: String,
    pub formatted: String,
}

impl QuickFix {
    pub fn new(code: &str, language: &str) -> Self {
        Self {
            original: code.to_string(),
            formatted: apply_quick_fixes(code, language),
        }
    }

    /// 変更なし（「整形済み」と表示すべき）
    pub fn is_unchanged(&self) -> bool {
        self.original == self.formatted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_idempotent(code: &str, language: &str) {
        let once = apply_quick_fixes(code, language);
        let twice = apply_quick_fixes(&once, language);
        assert_eq!(once, twice, "pipeline not idempotent for {} input {:?}", language, code);
    }

    #[test]
    fn test_all_patterns_compile() {
        for set in RULE_SETS {
            for rule in set.rules {
                assert!(Regex::new(rule.pattern).is_ok(), "invalid pattern: {}", rule.name);
            }
        }
    }

    #[test]
    fn test_java_quick_fixes() {
        let code = "public class Demo{\n    public int add(int a,int b){\n        int sum=a+b ;\n        if(sum>=10){\n            return sum;;\n        }else{\n            return 0;\n        }\n    }\n}";
        let expected = "public class Demo {\n    public int add(int a, int b) {\n        int sum = a + b;\n        if (sum >= 10) {\n            return sum;\n        } else {\n            return 0;\n        }\n    }\n}";

        assert_eq!(apply_quick_fixes(code, "java"), expected);
    }

    #[test]
    fn test_java_keeps_exponent_and_increment() {
        let code = "double d = 1e+5;\ni++;\nx = -1;";
        assert_eq!(apply_quick_fixes(code, "java"), code);
    }

    #[test]
    fn test_javascript_quick_fixes() {
        let code = "function greet(name){\n  if(name===\"x\"){return 'hi '+name}\n  const f=(a,b)=>a+b;\n  return [1,2,3].map(x=>x*2);\n}";
        let fixed = apply_quick_fixes(code, "javascript");

        assert!(fixed.contains("function greet(name) {"));
        assert!(fixed.contains("if (name === \"x\") { return 'hi '+name }"));
        assert!(fixed.contains("const f = (a, b) => a + b;"));
        assert!(fixed.contains("[1, 2, 3].map(x => x*2);"));
    }

    #[test]
    fn test_typescript_uses_javascript_rules() {
        let code = "let total=a+b;";
        assert_eq!(apply_quick_fixes(code, "TypeScript"), "let total = a + b;");
    }

    #[test]
    fn test_python_quick_fixes() {
        let code = "def f(a,b):\n\tif(a==b) :\n\t\treturn a;\n\treturn b";
        let expected = "def f(a, b):\n    if (a == b):\n        return a\n    return b";

        assert_eq!(apply_quick_fixes(code, "python"), expected);
    }

    #[test]
    fn test_python_keeps_keyword_arguments() {
        let code = "print(value, end=\"\")";
        assert_eq!(apply_quick_fixes(code, "python"), code);
    }

    #[test]
    fn test_language_is_case_insensitive() {
        assert_eq!(apply_quick_fixes("x=1;", "JAVA"), apply_quick_fixes("x=1;", "java"));
        assert!(has_rule_set("Python"));
    }

    #[test]
    fn test_unknown_language_only_normalizes() {
        let code = "fn main(){let x=1;}   \r\n\r\n\r\n";
        assert_eq!(apply_quick_fixes(code, "rust"), "fn main(){let x=1;}\n\n");
        assert!(!has_rule_set("rust"));
    }

    #[test]
    fn test_chained_operators_converge() {
        assert_eq!(apply_quick_fixes("x=a+b+c-d;", "java"), "x = a + b + c - d;");
    }

    #[test]
    fn test_pipeline_idempotence() {
        let samples = [
            ("java", "class A{void f(){int x=1;x+=2;if(x!=3){x=x-1 ;;}}}"),
            ("java", "for(int i=0;i<n;i++){\r\n\r\n\r\n  sum=sum+i;   \r\n}"),
            ("javascript", "var o={a:1,b:[1,2]};\nconst g=async(x)=>{return x};"),
            ("typescript", "function(a,b){return a===b}"),
            ("python", "def g(*args,**kw) :\n\tfor x in args:\n\t\t\tprint(x);;\n"),
            ("go", "func main()  {\n\n\n}"),
            ("java", ""),
            ("python", "if a:\n\t\tb = 1\n\n\n"),
        ];

        for (language, code) in samples {
            assert_idempotent(code, language);
        }
    }

    #[test]
    fn test_python_deep_tab_indentation() {
        let code = format!("{}x = 1", "\t".repeat(20));
        let once = apply_quick_fixes(&code, "python");

        assert_eq!(once, format!("{}x = 1", " ".repeat(80)));
        assert_idempotent(&code, "python");
    }

    #[test]
    fn test_quick_fix_unchanged() {
        let clean = QuickFix::new("int x = 1;", "java");
        assert!(clean.is_unchanged());

        let dirty = QuickFix::new("int x=1;", "java");
        assert!(!dirty.is_unchanged());
        assert_eq!(dirty.formatted, "int x = 1;");
    }
}

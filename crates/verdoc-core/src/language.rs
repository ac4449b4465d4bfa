//! Language to syntax-mode resolution.
//!
//! ## Learning: Exhaustive Matches
//!
//! `Language` is a closed enum and `Language::mode` matches every variant
//! without a wildcard arm. Adding a language fails to compile until it is
//! given a mode, which a string switch with a fallthrough can't promise.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Languages a snippet can be displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    JavaScript,
    TypeScript,
    Java,
    C,
    #[serde(rename = "C++")]
    Cpp,
    #[serde(rename = "C#")]
    CSharp,
    Go,
}

impl Language {
    /// Every supported language.
    pub const ALL: [Language; 7] = [
        Language::JavaScript,
        Language::TypeScript,
        Language::Java,
        Language::C,
        Language::Cpp,
        Language::CSharp,
        Language::Go,
    ];

    /// Human-readable name, as sent by the application.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
            Language::Java => "Java",
            Language::C => "C",
            Language::Cpp => "C++",
            Language::CSharp => "C#",
            Language::Go => "Go",
        }
    }

    /// Syntax mode used to highlight this language.
    pub fn mode(&self) -> ModeId {
        match self {
            Language::JavaScript => ModeId::JavaScript,
            Language::TypeScript => ModeId::TypeScript,
            Language::Java => ModeId::Java,
            Language::C | Language::Cpp => ModeId::CCpp,
            Language::CSharp => ModeId::CSharp,
            Language::Go => ModeId::Golang,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|language| language.display_name() == name)
            .ok_or_else(|| UnsupportedLanguage(name.to_string()))
    }
}

/// Syntax highlighting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModeId {
    JavaScript,
    TypeScript,
    Java,
    CCpp,
    CSharp,
    Golang,
}

impl ModeId {
    /// Mode path understood by the widget.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModeId::JavaScript => "ace/mode/javascript",
            ModeId::TypeScript => "ace/mode/typescript",
            ModeId::Java => "ace/mode/java",
            ModeId::CCpp => "ace/mode/c_cpp",
            ModeId::CSharp => "ace/mode/csharp",
            ModeId::Golang => "ace/mode/golang",
        }
    }
}

impl fmt::Display for ModeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A language name outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported language: {0:?}")]
pub struct UnsupportedLanguage(pub String);

/// Resolves a display name to its syntax mode.
pub fn resolve_mode(language: &str) -> Result<ModeId, UnsupportedLanguage> {
    language.parse::<Language>().map(|language| language.mode())
}

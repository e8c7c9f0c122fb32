use std::fmt;
use std::str::FromStr;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Languages offered by the selector. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    Javascript,
    Java,
    Cpp,
    Go,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::Python,
        Language::Javascript,
        Language::Java,
        Language::Cpp,
        Language::Go,
    ];

    /// Tag embedded in the prompt and used on the wire.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::Javascript => "javascript",
            Self::Java => "java",
            Self::Cpp => "cpp",
            Self::Go => "go",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Python => "Python",
            Self::Javascript => "JavaScript",
            Self::Java => "Java",
            Self::Cpp => "C++",
            Self::Go => "Go",
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::Python
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .iter()
            .copied()
            .find(|language| language.tag() == s.trim())
            .ok_or_else(|| {
                let supported: Vec<&str> = Language::ALL.iter().map(|l| l.tag()).collect();
                format!("unsupported language '{}', expected one of: {}", s, supported.join(", "))
            })
    }
}

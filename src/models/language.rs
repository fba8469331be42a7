// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Display language selection.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Language used for display names and labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "zh")]
    Chinese,
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        if tag == "en" || tag.starts_with("en-") || tag.starts_with("en_") {
            Ok(Language::English)
        } else if tag == "zh" || tag.starts_with("zh-") || tag.starts_with("zh_") {
            Ok(Language::Chinese)
        } else {
            Err(format!("unsupported language: {s}"))
        }
    }
}

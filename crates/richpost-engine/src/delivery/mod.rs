//! # Delivery
//!
//! Fits a document into a message for the messaging platform: appends the
//! "more info" section and the promo footer and, when the result is over
//! budget, drops trailing sentences and adds a truncation notice.
//!
//! - **`sentences`**: the `SentenceSplitter` seam and a punctuation-based
//!   default

pub mod sentences;

use log::debug;
use thiserror::Error;

use crate::editing::Document;
use crate::error::DocumentError;
use crate::text;

pub use sentences::{PunctuationSplitter, SentenceSplitter};

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("contact section grows the budget to {budget}, over the {max} limit")]
    BudgetExceeded { budget: usize, max: usize },
    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Budget and fixed texts used by [`prepare_for_delivery`].
///
/// Lengths are UTF-16 code units of the rendered markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryOptions {
    /// Soft budget for the whole post.
    pub preferred_len: usize,
    /// Hard platform limit the budget may never exceed.
    pub max_len: usize,
    pub language: String,
    /// Markup heading of the "more info" section.
    pub more_info_title: String,
    /// Section body used when no "more info" text is given.
    pub more_info_placeholder: String,
    pub truncation_notice: String,
    /// Markup footer; empty for none.
    pub promo: String,
}

impl Default for DeliveryOptions {
    fn default() -> Self {
        Self {
            preferred_len: 3000,
            max_len: 4096,
            language: "russian".to_string(),
            more_info_title: "**Подробнее:**".to_string(),
            more_info_placeholder: "Нажми - Подробнее 👇".to_string(),
            truncation_notice: "Упс, кажется текст обрезался 🥲".to_string(),
            promo: String::new(),
        }
    }
}

/// Canonical language name, or an error for languages without a splitter
/// configuration.
pub fn normalize_language(language: &str) -> Result<&'static str, DocumentError> {
    match language.to_lowercase().as_str() {
        "ru" | "russian" => Ok("russian"),
        "en" | "english" => Ok("english"),
        other => Err(DocumentError::UnsupportedOperation(format!(
            "no sentence splitting for language {other:?}"
        ))),
    }
}

/// Removes every sentence that contains one of `substrings`, ignoring case.
pub fn remove_substrings(
    doc: &Document,
    substrings: &[&str],
    splitter: &dyn SentenceSplitter,
    language: &str,
) -> Result<Document, DocumentError> {
    let language = normalize_language(language)?;
    let mut doc = doc.clone();
    for substring in substrings {
        let needle = substring.trim().to_lowercase();
        if needle.is_empty() {
            continue;
        }
        let matching: Vec<String> = splitter
            .split(&doc.plain(), language)
            .into_iter()
            .filter(|sentence| sentence.to_lowercase().contains(&needle))
            .collect();
        for sentence in matching {
            doc = doc.replace(&sentence, "");
        }
    }
    Ok(doc)
}

/// Keeps leading sentences while their running plain length fits `budget`
/// and removes the rest.
///
/// A sentence that occurs more than once is kept: removing it would also
/// remove its earlier copies.
pub fn approximate_cut(
    doc: &Document,
    budget: usize,
    splitter: &dyn SentenceSplitter,
    language: &str,
) -> Result<Document, DocumentError> {
    let language = normalize_language(language)?;
    let plain = doc.plain();
    let mut running = 0;
    let mut removed = Vec::new();
    for sentence in splitter.split(&plain, language) {
        running += text::utf16_len(&sentence);
        if running > budget && plain.matches(sentence.as_str()).count() == 1 {
            removed.push(sentence);
        }
    }
    debug!("cutting {} sentences to fit {budget} units", removed.len());
    let removed: Vec<&str> = removed.iter().map(String::as_str).collect();
    remove_substrings(doc, &removed, splitter, language)
}

/// Builds the final post: body, "more info" section and promo footer.
///
/// A longer "more info" text raises the budget by the same amount so the
/// body is not cut for it, up to `max_len`.
pub fn prepare_for_delivery(
    doc: &Document,
    more_info: Option<&str>,
    options: &DeliveryOptions,
    splitter: &dyn SentenceSplitter,
) -> Result<Document, DeliveryError> {
    let section_for = |body: &str| format!("\n\n{} \n{body}", options.more_info_title);
    let placeholder_section = section_for(&options.more_info_placeholder);
    let section = match more_info.map(str::trim).filter(|info| !info.is_empty()) {
        Some(info) => section_for(info),
        None => placeholder_section.clone(),
    };

    let budget = (options.preferred_len + text::utf16_len(&section))
        .saturating_sub(text::utf16_len(&placeholder_section));
    if budget > options.max_len {
        return Err(DeliveryError::BudgetExceeded {
            budget,
            max: options.max_len,
        });
    }

    let promo = if options.promo.is_empty() {
        String::new()
    } else {
        format!("\n\n{}", options.promo)
    };
    let full = doc.clone() + section.as_str() + promo.as_str();
    if full.markup_len() <= budget {
        return Ok(full);
    }

    let notice = format!("\n\n{}", options.truncation_notice);
    let reserved = [&notice, &section, &promo]
        .iter()
        .map(|s| text::utf16_len(s))
        .sum::<usize>();
    debug!(
        "post is {} units, over the {budget} budget; cutting body",
        full.markup_len()
    );
    let body = approximate_cut(
        doc,
        budget.saturating_sub(reserved),
        splitter,
        &options.language,
    )?
    .strip();
    Ok(body + notice.as_str() + section.as_str() + promo.as_str())
}

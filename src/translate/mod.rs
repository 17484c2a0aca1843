//! Record translation: dictionary-driven (strict and lenient) and automatic.
//!
//! The dictionary translators are pure functions of (record, dictionaries).
//! Automatic translation goes through the [`TextTranslator`] seam so the
//! orchestration can run against the HTTP endpoint or a scripted stand-in.

pub mod auto;
pub mod client;
pub mod lenient;
pub mod progress;
pub mod strict;

use std::future::Future;

use crate::error::TranslateError;

/// External text-translation primitive.
pub trait TextTranslator: Sync {
    /// What: Translate one string between two languages.
    ///
    /// Inputs:
    /// - `text`: Non-blank source text
    /// - `source_lang`: Source language code
    /// - `target_lang`: Target language code
    ///
    /// Output:
    /// - The translated text.
    ///
    /// # Errors
    /// - Returns `TranslateError` when the translation could not be produced.
    fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> impl Future<Output = Result<String, TranslateError>> + Send;
}

/// What: Translate a list of texts in order, one call at a time.
///
/// Inputs:
/// - `translator`: Text-translation primitive
/// - `texts`: Texts to translate; positions are preserved
/// - `source_lang`: Source language code
/// - `target_lang`: Target language code
///
/// Output:
/// - One translated text per input, in input order.
///
/// # Errors
/// - Returns the first `TranslateError`; the remaining texts are not sent.
///
/// Details:
/// - Blank texts are kept as they are and never sent.
/// - A blank translation falls back to the original text.
pub async fn translate_batch<T: TextTranslator>(
    translator: &T,
    texts: &[String],
    source_lang: &str,
    target_lang: &str,
) -> Result<Vec<String>, TranslateError> {
    let mut out = Vec::with_capacity(texts.len());
    for text in texts {
        if text.trim().is_empty() {
            out.push(text.clone());
            continue;
        }
        let translated = translator.translate(text, source_lang, target_lang).await?;
        if translated.trim().is_empty() {
            tracing::warn!(text = %text, "empty translation, keeping original");
            out.push(text.clone());
        } else {
            out.push(translated);
        }
    }
    Ok(out)
}

//! Tests for [`openai_client::mask_token`].
//!
//! Keys are logged as first 7 chars + `***` + last 4 chars; keys of 11 chars or fewer are fully hidden.

use openai_client::mask_token;

/// **Test: Short or empty keys are fully masked.**
#[test]
fn mask_token_short_is_fully_hidden() {
    assert_eq!(mask_token(""), "***");
    assert_eq!(mask_token("sk-12345"), "***");
    assert_eq!(mask_token("sk-proj-123"), "***");
}

/// **Test: Long keys keep a 7-char head and a 4-char tail.**
#[test]
fn mask_token_long_keeps_head_and_tail() {
    assert_eq!(mask_token("sk-proj-abcdefghijklmnop"), "sk-proj***mnop");
    assert_eq!(mask_token("sk-proj-wxyz"), "sk-proj***wxyz");
}

/// **Test: Non-ASCII keys are cut on character boundaries.**
#[test]
fn mask_token_multibyte_does_not_split_chars() {
    let masked = mask_token("ключ-ключ-ключ-ключ");
    assert_eq!(masked, "ключ-кл***ключ");
}

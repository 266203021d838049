const MP4_SUFFIX: &str = ".mp4";

/// Uppercases the first character of every whitespace-delimited word and
/// leaves everything else, whitespace included, untouched.
pub fn capitalize_words(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut at_word_start = true;

    for character in text.chars() {
        if character.is_whitespace() {
            at_word_start = true;
            output.push(character);
        } else if at_word_start {
            at_word_start = false;
            output.extend(character.to_uppercase());
        } else {
            output.push(character);
        }
    }

    output
}

/// Swaps a trailing `.mp4` for `extension`. URLs without that suffix have no
/// derived counterpart.
pub fn derive_media_url(mp4_url: &str, extension: &str) -> Option<String> {
    let stem = mp4_url.strip_suffix(MP4_SUFFIX)?;
    Some(format!("{stem}.{}", extension.trim_start_matches('.')))
}

pub fn audio_url(mp4_url: &str) -> Option<String> {
    derive_media_url(mp4_url, "mp3")
}

pub fn caption_url(mp4_url: &str) -> Option<String> {
    derive_media_url(mp4_url, "vtt")
}

/// Accepts the empty string or ASCII digits only.
pub fn is_digits_only(value: &str) -> bool {
    value.bytes().all(|byte| byte.is_ascii_digit())
}

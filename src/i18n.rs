// ==========================================
// Internationalization (i18n) module
// ==========================================
// rust-i18n, Vietnamese (plant language) and English. The macro itself
// is initialized in lib.rs; this module wraps locale switching and the
// placeholder substitution used by the validation messages.
// ==========================================

/// Current locale code.
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// Set the locale ("vi" or "en").
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// Translate a message without arguments.
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// Translate a message, substituting every `%{name}` placeholder.
///
/// # Example
/// ```no_run
/// use heat_timeline::i18n::t_with_args;
/// let msg = t_with_args("validate.unknown_unit", &[("unit", "XYZ9")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    args.iter().fold(rust_i18n::t!(key).to_string(), |msg, (name, value)| {
        msg.replace(&format!("%{{{name}}}"), value)
    })
}

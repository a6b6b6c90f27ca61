//! PHP version placeholder tokens used by the legacy buildpack

use regex::Regex;
use std::sync::OnceLock;

/// Token meaning "whatever version the php buildpack defaults to"
pub const PHP_DEFAULT_TOKEN: &str = "{PHP_DEFAULT}";

fn latest_token() -> &'static Regex {
    static LATEST: OnceLock<Regex> = OnceLock::new();
    LATEST.get_or_init(|| Regex::new(r"^\{PHP_(\d)(\d+)_LATEST\}$").expect("valid regex"))
}

/// Translates a legacy `PHP_VERSION` value into a version constraint.
///
/// `{PHP_DEFAULT}` becomes empty, `{PHP_<major><minor>_LATEST}` becomes
/// `<major>.<minor>.*`, and anything else is returned unchanged. Tokens may
/// carry surrounding whitespace.
pub fn translate_php_version(raw: &str) -> String {
    let token = raw.trim();
    if token == PHP_DEFAULT_TOKEN {
        return String::new();
    }

    match latest_token().captures(token) {
        Some(caps) => format!("{}.{}.*", &caps[1], &caps[2]),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[parameterized(
        php_default = { "{PHP_DEFAULT}", "" },
        php_71 = { "{PHP_71_LATEST}", "7.1.*" },
        php_72 = { "{PHP_72_LATEST}", "7.2.*" },
        php_73 = { "{PHP_73_LATEST}", "7.3.*" },
        php_74 = { "{PHP_74_LATEST}", "7.4.*" },
        php_80 = { "{PHP_80_LATEST}", "8.0.*" },
        exact = { "7.3.10", "7.3.10" },
        range = { "7.2.*", "7.2.*" },
        empty = { "", "" },
        unknown_token = { "{PHP_LATEST}", "{PHP_LATEST}" },
        padded_token = { " {PHP_72_LATEST}\n", "7.2.*" },
        padded_default = { " {PHP_DEFAULT} ", "" },
        padded_version = { " 7.3.10 ", " 7.3.10 " },
    )]
    fn test_translate_php_version(raw: &str, expected: &str) {
        assert_eq!(translate_php_version(raw), expected);
    }
}

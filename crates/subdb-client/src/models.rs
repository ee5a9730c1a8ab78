// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt;

/// Client identity sent as the `User-Agent` of every request.
///
/// SubDB requires the form `SubDB/1.0 (<name>/<version>; <url>)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAgent(String);

impl UserAgent {
    pub fn new(client_name: &str, client_version: &str, client_url: &str) -> Self {
        Self(format!(
            "SubDB/1.0 ({}/{}; {})",
            client_name, client_version, client_url
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Split a comma separated response body into language codes.
///
/// Entries are kept verbatim: no trimming, and an empty body yields a single
/// empty entry.
pub(crate) fn split_languages(body: &str) -> Vec<String> {
    body.split(',').map(str::to_string).collect()
}

pub(crate) fn normalize_language(code: &str) -> String {
    code.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_format() {
        let ua = UserAgent::new("SubDownloader", "1.2.3", "http://subdownloader.net");
        assert_eq!(
            ua.as_str(),
            "SubDB/1.0 (SubDownloader/1.2.3; http://subdownloader.net)"
        );
    }

    #[test]
    fn test_split_languages() {
        assert_eq!(split_languages("en,fr,es"), vec!["en", "fr", "es"]);
        assert_eq!(split_languages("en"), vec!["en"]);
        assert_eq!(split_languages(""), vec![""]);
    }

    #[test]
    fn test_split_languages_keeps_whitespace() {
        assert_eq!(split_languages("en, fr,"), vec!["en", " fr", ""]);
    }

    #[test]
    fn test_normalize_language() {
        assert_eq!(normalize_language("EN"), "en");
        assert_eq!(normalize_language("Pt"), "pt");
        assert_eq!(normalize_language("en"), "en");
    }
}

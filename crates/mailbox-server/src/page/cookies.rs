use axum::http::{header::COOKIE, HeaderMap};
use cookie::{Cookie, CookieJar};

use mailbox_core::model::SessionToken;

/// Build a jar from every `Cookie` request header; unparsable pairs are skipped.
///
/// Values are percent-decoded when they decode cleanly, raw otherwise. When a
/// name repeats, the first occurrence wins (user agents send the most specific
/// path first).
pub fn jar_from_headers(headers: &HeaderMap) -> CookieJar {
    let mut jar = CookieJar::new();
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|h| h.split(';'))
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .filter_map(parse_pair)
        .for_each(|c| {
            if jar.get(c.name()).is_none() {
                jar.add_original(c);
            }
        });
    jar
}

fn parse_pair(pair: &str) -> Option<Cookie<'static>> {
    Cookie::parse_encoded(pair.to_owned())
        .or_else(|_| Cookie::parse(pair.to_owned()))
        .ok()
}

/// Session token under `name`, if present and non-empty once quotes are stripped.
pub fn session_token(jar: &CookieJar, name: &str) -> Option<SessionToken> {
    jar.get(name).and_then(|c| SessionToken::new(c.value_trimmed()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(values: &[&str]) -> HeaderMap {
        let mut h = HeaderMap::new();
        for v in values {
            h.append(COOKIE, HeaderValue::from_str(v).unwrap());
        }
        h
    }

    #[test]
    fn reads_token_among_other_cookies() {
        let jar = jar_from_headers(&headers(&["theme=dark; sb-access-token=abc.def.ghi; lang=en"]));
        let token = session_token(&jar, "sb-access-token").unwrap();
        assert_eq!(token.as_str(), "abc.def.ghi");
    }

    #[test]
    fn merges_multiple_headers() {
        let jar = jar_from_headers(&headers(&["a=1", "sb-access-token=t"]));
        assert_eq!(jar.get("a").map(|c| c.value()), Some("1"));
        assert!(session_token(&jar, "sb-access-token").is_some());
    }

    #[test]
    fn missing_or_empty_is_none() {
        assert!(session_token(&jar_from_headers(&HeaderMap::new()), "sb-access-token").is_none());
        let jar = jar_from_headers(&headers(&["sb-access-token="]));
        assert!(session_token(&jar, "sb-access-token").is_none());
    }

    #[test]
    fn first_duplicate_wins() {
        let jar = jar_from_headers(&headers(&["sb-access-token=first; sb-access-token=second"]));
        assert_eq!(session_token(&jar, "sb-access-token").unwrap().as_str(), "first");

        let jar = jar_from_headers(&headers(&["sb-access-token=", "sb-access-token=x"]));
        assert!(session_token(&jar, "sb-access-token").is_none());

        let jar = jar_from_headers(&headers(&["sb-access-token=; sb-access-token=x"]));
        assert!(session_token(&jar, "sb-access-token").is_none());
    }

    #[test]
    fn strips_quotes_and_decodes() {
        let jar = jar_from_headers(&headers(&["sb-access-token=\"abc\""]));
        assert_eq!(session_token(&jar, "sb-access-token").unwrap().as_str(), "abc");

        let jar = jar_from_headers(&headers(&["sb-access-token=a%2Bb%3D"]));
        assert_eq!(session_token(&jar, "sb-access-token").unwrap().as_str(), "a+b=");

        let jar = jar_from_headers(&headers(&["sb-access-token=\"\""]));
        assert!(session_token(&jar, "sb-access-token").is_none());

        let jar = jar_from_headers(&headers(&["sb-access-token=100%ZZ"]));
        assert_eq!(session_token(&jar, "sb-access-token").unwrap().as_str(), "100%ZZ");

        // not utf-8 once decoded: raw value
        let jar = jar_from_headers(&headers(&["sb-access-token=a%FF"]));
        assert_eq!(session_token(&jar, "sb-access-token").unwrap().as_str(), "a%FF");
    }

    #[test]
    fn skips_garbage_pairs() {
        let jar = jar_from_headers(&headers(&[";;=oops; ok=1;"]));
        assert_eq!(jar.get("ok").map(|c| c.value()), Some("1"));
    }
}

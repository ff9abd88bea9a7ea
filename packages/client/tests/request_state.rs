//! Request state: header and cookie maps, option layering, encoding policy

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use fetchkit_client::{EncodingDialect, OptionKey, OptionSet, RequestState};
    use serde_json::json;

    #[test]
    fn test_null_header_removes_entry() {
        let mut state = RequestState::new();
        state.add_header("H", Some("v")).add_header("H", None);

        let resolved = state.resolve_options();
        assert!(resolved.get(&OptionKey::HTTP_HEADER).is_none());
        assert_eq!(state.header("H"), None);
    }

    #[test]
    fn test_null_removal_keeps_other_headers() {
        let mut state = RequestState::new();
        state
            .add_header("A", Some("1"))
            .add_header("H", Some("v"))
            .add_header("H", None);

        let resolved = state.resolve_options();
        let lines = resolved.list(&OptionKey::HTTP_HEADER).unwrap();
        assert_eq!(lines, ["A: 1"]);
        assert!(lines.iter().all(|line| !line.starts_with("H:")));
    }

    #[test]
    fn test_header_overwrite_keeps_first_position() {
        let mut state = RequestState::new();
        state
            .add_header("Accept", Some("text/html"))
            .add_header("X-Trace", Some("1"))
            .add_header("Accept", Some("application/json"));

        let resolved = state.resolve_options();
        assert_eq!(
            resolved.list(&OptionKey::HTTP_HEADER).unwrap(),
            ["Accept: application/json", "X-Trace: 1"]
        );
    }

    #[test]
    fn test_header_keys_are_case_sensitive() {
        let mut state = RequestState::new();
        state
            .add_header("accept", Some("a"))
            .add_header("Accept", Some("b"));

        let resolved = state.resolve_options();
        assert_eq!(resolved.list(&OptionKey::HTTP_HEADER).unwrap().len(), 2);
    }

    #[test]
    fn test_derived_header_list_wins_over_explicit() {
        let mut state = RequestState::new();
        state
            .add_option(OptionKey::HTTP_HEADER, vec!["stale"])
            .add_header("A", Some("1"));

        let resolved = state.resolve_options();
        assert_eq!(resolved.list(&OptionKey::HTTP_HEADER).unwrap(), ["A: 1"]);
    }

    #[test]
    fn test_explicit_header_list_survives_without_headers() {
        let mut state = RequestState::new();
        state.add_option(OptionKey::HTTP_HEADER, vec!["X-Raw: 1"]);

        let resolved = state.resolve_options();
        assert_eq!(resolved.list(&OptionKey::HTTP_HEADER).unwrap(), ["X-Raw: 1"]);
    }

    #[test]
    fn test_cookie_string_uses_semicolon_separator() {
        let mut state = RequestState::new();
        state
            .add_cookies([("sid", Some("abc")), ("lang", Some("en")), ("drop", None)])
            .add_option(OptionKey::COOKIE, "stale=1");

        let resolved = state.resolve_options();
        assert_eq!(resolved.text(&OptionKey::COOKIE), Some("sid=abc; lang=en"));
    }

    #[test]
    fn test_set_options_replaces_explicit_but_keeps_derived() {
        let mut state = RequestState::new();
        state
            .add_header("A", Some("1"))
            .add_option(OptionKey::REFERER, "http://old")
            .set_options(OptionSet::new().with(OptionKey::TIMEOUT, 500_i64));

        let resolved = state.resolve_options();
        assert!(resolved.get(&OptionKey::REFERER).is_none());
        assert_eq!(resolved.int(&OptionKey::TIMEOUT), Some(500));
        assert_eq!(resolved.list(&OptionKey::HTTP_HEADER).unwrap(), ["A: 1"]);
    }

    #[test]
    fn test_add_option_last_write_wins() {
        let mut state = RequestState::new();
        state
            .add_option(OptionKey::USER_AGENT, "first")
            .add_option(OptionKey::USER_AGENT, "second");

        assert_eq!(state.options().text(&OptionKey::USER_AGENT), Some("second"));
    }

    #[test]
    fn test_typed_option_setters() {
        let mut state = RequestState::new();
        state
            .set_timeout(Duration::from_secs(2))
            .set_connect_timeout(Duration::from_millis(250))
            .set_user_agent("tests/1.0")
            .set_referer("http://ref")
            .set_basic_auth("user", "pass")
            .set_verify_peer(false);

        let options = state.options();
        assert_eq!(options.int(&OptionKey::TIMEOUT), Some(2000));
        assert_eq!(options.int(&OptionKey::CONNECT_TIMEOUT), Some(250));
        assert_eq!(options.text(&OptionKey::USER_AGENT), Some("tests/1.0"));
        assert_eq!(options.text(&OptionKey::REFERER), Some("http://ref"));
        assert_eq!(options.text(&OptionKey::USER_PWD), Some("user:pass"));
        assert!(!options.flag(&OptionKey::SSL_VERIFY_PEER));
    }

    #[test]
    fn test_query_builders_follow_dialect_and_bracket_policy() {
        let mut state = RequestState::new();
        state
            .set_url_encoding(EncodingDialect::Rfc3986)
            .set_body_encoding(EncodingDialect::Rfc1738)
            .set_suppress_array_brackets(true);

        let data = json!({"q": "a b", "ids": [1, 2]});
        assert_eq!(state.build_url_query(&data), "q=a%20b&ids=1&ids=2");
        assert_eq!(state.build_payload_query(&data), "q=a+b&ids=1&ids=2");
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut state = RequestState::new();
        state
            .set_url("http://x")
            .add_header("A", Some("1"))
            .add_cookie("c", Some("1"))
            .set_return_raw_body(false)
            .reset();

        assert_eq!(state.url(), None);
        assert!(state.resolve_options().is_empty());
        assert!(state.return_raw_body());
        assert_eq!(state.url_encoding(), EncodingDialect::Rfc3986);
    }
}

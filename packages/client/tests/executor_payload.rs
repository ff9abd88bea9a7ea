//! Verb dispatch, query/body placement, codecs and the transport error policy

mod common;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use fetchkit_client::executor::prepare_form_payload;
    use fetchkit_client::transport::codes;
    use fetchkit_client::{
        EncodingDialect, ExecutorConfig, JsonCodec, Method, OptionKey, OptionValue, RequestData,
        RequestExecutor, TransportErrorPolicy, error,
    };
    use serde::Deserialize;
    use serde_json::{Value, json};

    use crate::common::RecordingTransport;

    #[test]
    fn test_get_appends_query_string() {
        let transport = Arc::new(RecordingTransport::new());
        let mut executor = RequestExecutor::new(transport.clone());

        executor.acquire(Some("http://x/users"), None).unwrap();
        executor.get(json!({"page": 1, "per_page": 1})).unwrap();

        let invoked = transport.last_invoked();
        assert_eq!(invoked.text(&OptionKey::URL), Some("http://x/users?page=1&per_page=1"));
        assert_eq!(invoked.text(&OptionKey::METHOD), Some("GET"));
        assert!(invoked.get(&OptionKey::POST_FIELDS).is_none());
    }

    #[test]
    fn test_get_with_empty_data_leaves_url_unchanged() {
        let transport = Arc::new(RecordingTransport::new());
        let mut executor = RequestExecutor::new(transport.clone());

        executor.acquire(Some("http://x/users"), None).unwrap();
        executor.get(json!({})).unwrap();
        assert_eq!(transport.last_invoked().text(&OptionKey::URL), Some("http://x/users"));

        executor.acquire(Some("http://x/users"), None).unwrap();
        executor.get(json!({"only": null})).unwrap();
        assert_eq!(transport.last_invoked().text(&OptionKey::URL), Some("http://x/users"));
    }

    #[test]
    fn test_get_joins_existing_query_with_ampersand() {
        let transport = Arc::new(RecordingTransport::new());
        let mut executor = RequestExecutor::new(transport.clone());

        executor.acquire(Some("http://x/users?sort=asc"), None).unwrap();
        executor.get(json!({"page": 2})).unwrap();
        assert_eq!(
            transport.last_invoked().text(&OptionKey::URL),
            Some("http://x/users?sort=asc&page=2")
        );
    }

    #[test]
    fn test_get_places_query_before_fragment() {
        let transport = Arc::new(RecordingTransport::new());
        let mut executor = RequestExecutor::new(transport.clone());

        executor.acquire(Some("http://x/users#top"), None).unwrap();
        executor.get(json!({"page": 1})).unwrap();
        assert_eq!(
            transport.last_invoked().text(&OptionKey::URL),
            Some("http://x/users?page=1#top")
        );

        executor.acquire(Some("http://x/users?sort=asc#top"), None).unwrap();
        executor.get(json!({"page": 2})).unwrap();
        assert_eq!(
            transport.last_invoked().text(&OptionKey::URL),
            Some("http://x/users?sort=asc&page=2#top")
        );
    }

    #[test]
    fn test_get_query_uses_url_dialect() {
        let transport = Arc::new(RecordingTransport::new());
        let mut executor = RequestExecutor::new(transport.clone());
        executor
            .state_mut()
            .set_url_encoding(EncodingDialect::Rfc1738)
            .set_suppress_array_brackets(true);

        executor.acquire(Some("http://x/search"), None).unwrap();
        executor.get(json!({"q": "a b", "tag": ["x", "y"]})).unwrap();
        assert_eq!(
            transport.last_invoked().text(&OptionKey::URL),
            Some("http://x/search?q=a+b&tag=x&tag=y")
        );
    }

    #[test]
    fn test_post_json_sets_body_and_post_flag() {
        let transport = Arc::new(RecordingTransport::new());
        let mut executor = RequestExecutor::new(transport.clone());

        executor.acquire(Some("http://x/users"), None).unwrap();
        executor.post(json!({"email": "a@b.c"})).unwrap();

        let invoked = transport.last_invoked();
        assert!(invoked.flag(&OptionKey::POST));
        assert_eq!(invoked.text(&OptionKey::POST_FIELDS), Some(r#"{"email":"a@b.c"}"#));
        assert_eq!(invoked.text(&OptionKey::METHOD), Some("POST"));
        assert_eq!(invoked.text(&OptionKey::URL), Some("http://x/users"));
    }

    #[test]
    fn test_json_body_labelled_with_content_type() {
        let transport = Arc::new(RecordingTransport::new());
        let mut executor = RequestExecutor::new(transport.clone());
        executor.state_mut().add_header("Accept", Some("application/json"));

        executor.acquire(Some("http://x/users"), None).unwrap();
        executor.post(json!({"email": "a@b.c"})).unwrap();
        assert_eq!(
            transport.last_invoked().list(&OptionKey::HTTP_HEADER).unwrap(),
            ["Accept: application/json", "Content-Type: application/json"]
        );
    }

    #[test]
    fn test_existing_content_type_is_kept() {
        let transport = Arc::new(RecordingTransport::new());
        let mut executor = RequestExecutor::new(transport.clone());
        executor
            .state_mut()
            .add_header("content-type", Some("application/vnd.api+json"));

        executor.acquire(Some("http://x/users"), None).unwrap();
        executor.post(json!({"email": "a@b.c"})).unwrap();
        assert_eq!(
            transport.last_invoked().list(&OptionKey::HTTP_HEADER).unwrap(),
            ["content-type: application/vnd.api+json"]
        );
    }

    #[test]
    fn test_raw_and_query_data_are_not_labelled_json() {
        let transport = Arc::new(RecordingTransport::new());
        let mut executor = RequestExecutor::new(transport.clone());

        executor.acquire(Some("http://x"), None).unwrap();
        executor.post("a=1").unwrap();
        assert!(transport.last_invoked().get(&OptionKey::HTTP_HEADER).is_none());

        executor.acquire(Some("http://x"), None).unwrap();
        executor.get(json!({"a": 1})).unwrap();
        assert!(transport.last_invoked().get(&OptionKey::HTTP_HEADER).is_none());
    }

    #[derive(serde::Serialize)]
    struct Signup<'a> {
        email: &'a str,
        tags: Vec<&'a str>,
    }

    #[test]
    fn test_serializable_struct_becomes_fields() {
        let transport = Arc::new(RecordingTransport::new());
        let mut executor = RequestExecutor::new(transport.clone());
        let data = RequestData::from_serialize(&Signup {
            email: "a@b.c",
            tags: vec!["x"],
        })
        .unwrap();
        assert_eq!(data, RequestData::Fields(json!({"email": "a@b.c", "tags": ["x"]})));

        executor.acquire(Some("http://x/signup"), None).unwrap();
        executor.get(data).unwrap();
        assert_eq!(
            transport.last_invoked().text(&OptionKey::URL),
            Some("http://x/signup?email=a%40b.c&tags%5B0%5D=x")
        );
    }

    #[test]
    fn test_post_with_empty_data_sends_no_body() {
        let transport = Arc::new(RecordingTransport::new());
        let mut executor = RequestExecutor::new(transport.clone());

        executor.acquire(Some("http://x/ping"), None).unwrap();
        executor.post(RequestData::empty()).unwrap();

        let invoked = transport.last_invoked();
        assert!(invoked.get(&OptionKey::POST_FIELDS).is_none());
        assert_eq!(invoked.text(&OptionKey::URL), Some("http://x/ping"));
    }

    #[test]
    fn test_raw_string_is_never_reencoded() {
        let transport = Arc::new(RecordingTransport::new());
        let mut executor = RequestExecutor::new(transport.clone());

        executor.acquire(Some("http://x"), None).unwrap();
        executor.put("already=encoded&x=1").unwrap();
        assert_eq!(
            transport.last_invoked().text(&OptionKey::POST_FIELDS),
            Some("already=encoded&x=1")
        );
    }

    #[test]
    fn test_non_json_payload_passes_fields_through() {
        let transport = Arc::new(RecordingTransport::new());
        let config = ExecutorConfig::default().encode_as_json(false);
        let mut executor = RequestExecutor::with_config(transport.clone(), config).unwrap();

        executor.acquire(Some("http://x"), None).unwrap();
        executor.patch(json!({"a": 1})).unwrap();
        assert_eq!(
            transport.last_invoked().get(&OptionKey::POST_FIELDS),
            Some(&OptionValue::Fields(json!({"a": 1})))
        );
    }

    #[test]
    fn test_form_preparer_renders_body_dialect() {
        let transport = Arc::new(RecordingTransport::new());
        let config = ExecutorConfig::default().encode_as_json(false);
        let mut executor = RequestExecutor::with_config(transport.clone(), config)
            .unwrap()
            .with_payload_preparer(prepare_form_payload);
        executor.state_mut().set_body_encoding(EncodingDialect::Rfc1738);

        executor.acquire(Some("http://x/login"), None).unwrap();
        executor.post(json!({"user": "ada l", "roles": ["a"]})).unwrap();
        assert_eq!(
            transport.last_invoked().text(&OptionKey::POST_FIELDS),
            Some("user=ada+l&roles%5B0%5D=a")
        );
    }

    #[test]
    fn test_explicit_execute_can_send_query_on_post() {
        let transport = Arc::new(RecordingTransport::new());
        let mut executor = RequestExecutor::new(transport.clone());

        executor.acquire(Some("http://x/jobs"), None).unwrap();
        executor.execute(Method::POST, json!({"run": true}), false, true).unwrap();

        let invoked = transport.last_invoked();
        assert_eq!(invoked.text(&OptionKey::URL), Some("http://x/jobs?run=1"));
        assert!(invoked.get(&OptionKey::POST_FIELDS).is_none());
    }

    #[derive(Debug)]
    struct FailingCodec;

    impl JsonCodec for FailingCodec {
        fn encode(&self, _value: &Value) -> fetchkit_client::error::Result<String> {
            Err(error::codec("refusing to encode"))
        }
    }

    #[test]
    fn test_codec_failure_keeps_handle_ready() {
        let transport = Arc::new(RecordingTransport::new());
        let mut executor = RequestExecutor::new(transport.clone()).with_codec(Arc::new(FailingCodec));

        executor.acquire(Some("http://x"), None).unwrap();
        let err = executor.post(json!({"a": 1})).unwrap_err();
        assert!(err.is_codec());
        assert_eq!(transport.invoke_count(), 0);

        // Raw bodies bypass the codec on the same handle
        executor.post("a=1").unwrap();
        assert_eq!(transport.invoke_count(), 1);
    }

    #[test]
    fn test_transport_error_raised_by_default() {
        let transport = Arc::new(RecordingTransport::failing(
            codes::COULDNT_CONNECT,
            "connection refused",
        ));
        let mut executor = RequestExecutor::new(transport.clone());

        executor.acquire(Some("http://x"), None).unwrap();
        let err = executor.get(json!({})).unwrap_err();
        assert!(err.is_transport());
        assert_eq!(err.transport_code(), Some(codes::COULDNT_CONNECT));
        assert_eq!(err.transport_message(), Some("connection refused"));
        assert_eq!(err.url(), Some("http://x"));

        // The failed exchange is still recorded
        assert_eq!(executor.error_code(), codes::COULDNT_CONNECT);
        assert_eq!(executor.error_message(), "connection refused");
    }

    #[test]
    fn test_missing_transport_message_described_by_code() {
        let transport = Arc::new(RecordingTransport::failing(codes::COULDNT_CONNECT, ""));
        let mut executor = RequestExecutor::new(transport);

        executor.acquire(Some("http://x"), None).unwrap();
        let err = executor.get(json!({})).unwrap_err();
        assert_eq!(err.transport_message(), Some("could not connect to server"));
        assert_eq!(executor.error_message(), codes::describe(codes::COULDNT_CONNECT));
    }

    #[test]
    fn test_transport_error_stored_when_configured() {
        let transport = Arc::new(RecordingTransport::failing(
            codes::OPERATION_TIMEDOUT,
            "timed out",
        ));
        let config = ExecutorConfig::default().transport_errors(TransportErrorPolicy::Store);
        let mut executor = RequestExecutor::with_config(transport, config).unwrap();

        executor.acquire(Some("http://x"), None).unwrap();
        let response = executor.get(json!({})).unwrap();
        assert_eq!(response.transport_error_code, codes::OPERATION_TIMEDOUT);
        assert_eq!(response.transport_error_message, "timed out");
        assert!(!response.is_success());
        assert_eq!(executor.status_code(), 0);
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct User {
        id: u32,
        name: String,
    }

    #[test]
    fn test_response_body_decodes_as_json() {
        let transport = Arc::new(RecordingTransport::responding(200, r#"{"id":7,"name":"Ada"}"#));
        let mut executor = RequestExecutor::new(transport);

        executor.acquire(Some("http://x/users/7"), None).unwrap();
        let response = executor.get(json!({})).unwrap();
        assert!(response.is_success());
        assert_eq!(response.text(), Some(r#"{"id":7,"name":"Ada"}"#));

        let user: User = executor.json().unwrap();
        assert_eq!(user, User { id: 7, name: "Ada".to_string() });
    }

    #[test]
    fn test_invalid_json_body_is_decode_error() {
        let transport = Arc::new(RecordingTransport::responding(200, "<html>"));
        let mut executor = RequestExecutor::new(transport);

        assert!(executor.json::<Value>().unwrap_err().is_lifecycle());
        executor.acquire(Some("http://x"), None).unwrap();
        executor.get(json!({})).unwrap();
        assert!(executor.json::<Value>().unwrap_err().is_decode());
    }

    #[test]
    fn test_return_raw_body_flag_reaches_transport() {
        let transport = Arc::new(RecordingTransport::new());
        let mut executor = RequestExecutor::new(transport.clone());
        executor.state_mut().set_return_raw_body(false);

        executor.acquire(Some("http://x"), None).unwrap();
        assert!(!transport.opened()[0].flag(&OptionKey::RETURN_TRANSFER));
    }
}

#[cfg(test)]
mod reqwest_http_client {

    use bytes::Bytes;

    use media_gateway::http_client::error::Error;
    use media_gateway::http_client::http_client::HttpClient;
    use media_gateway::http_client::request::{Request, RequestHeaders, RequestMethod};
    use media_gateway::http_client::reqwest_http_client::ReqwestHttpClient;

    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn should_send_a_get_request_propagating_the_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/assets/img.jpg"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("X-Request-Id", "12345")
                    .set_body_raw(vec![0xFF, 0xD8, 0xFF], "image/jpeg"),
            )
            .mount(&mock_server)
            .await;

        let http_client = ReqwestHttpClient::default();

        let http_client_response = http_client
            .execute(Request::get(format!("{}/assets/img.jpg", mock_server.uri())))
            .await
            .unwrap();

        assert_eq!(http_client_response.status, 200);
        assert_eq!(http_client_response.body, Bytes::from_static(&[0xFF, 0xD8, 0xFF]));
        assert_eq!(http_client_response.content_type(), Some("image/jpeg"));
        assert_eq!(
            http_client_response.headers.get("x-request-id").unwrap(),
            "12345"
        );
    }

    #[tokio::test]
    async fn should_send_a_post_request_with_headers_and_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/json"))
            .and(header("Content-Type", "application/json"))
            .and(header("Accept", "application/json"))
            .and(body_string(r#"{"url":"https://example.com/video"}"#))
            .respond_with(ResponseTemplate::new(201).set_body_string("Created"))
            .mount(&mock_server)
            .await;

        let http_client = ReqwestHttpClient::default();
        let http_client_request = Request {
            url: format!("{}/api/json", mock_server.uri()),
            method: RequestMethod::Post,
            headers: RequestHeaders::from([
                ("Content-Type".to_string(), "application/json".to_string()),
                ("Accept".to_string(), "application/json".to_string()),
            ]),
            body: Bytes::from(r#"{"url":"https://example.com/video"}"#),
        };

        let http_client_response = http_client.execute(http_client_request).await.unwrap();

        assert_eq!(http_client_response.status, 201);
        assert_eq!(http_client_response.body, Bytes::from("Created"));
    }

    #[tokio::test]
    async fn should_return_non_success_responses_instead_of_failing() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
            .mount(&mock_server)
            .await;

        let http_client_response = ReqwestHttpClient::default()
            .execute(Request::get(format!("{}/missing", mock_server.uri())))
            .await
            .unwrap();

        assert_eq!(http_client_response.status, 404);
        assert!(!http_client_response.is_success());
        assert_eq!(http_client_response.body, Bytes::from("Not Found"));
    }

    #[tokio::test]
    async fn should_follow_redirects_and_return_the_final_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/old"))
            .respond_with(
                ResponseTemplate::new(302)
                    .insert_header("Location", format!("{}/new", mock_server.uri()).as_str()),
            )
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/new"))
            .respond_with(ResponseTemplate::new(200).set_body_string("moved here"))
            .mount(&mock_server)
            .await;

        let http_client_response = ReqwestHttpClient::default()
            .execute(Request::get(format!("{}/old", mock_server.uri())))
            .await
            .unwrap();

        assert_eq!(http_client_response.status, 200);
        assert_eq!(http_client_response.body, Bytes::from("moved here"));
    }

    #[tokio::test]
    async fn should_detect_a_network_error() {
        let http_client = ReqwestHttpClient::default();

        let http_client_response = http_client
            .execute(Request::get("http://127.0.0.1:1/health"))
            .await;

        assert!(matches!(
            http_client_response.unwrap_err(),
            Error::Network(_)
        ));
    }

    #[tokio::test]
    async fn should_detect_a_timeout_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_delay(std::time::Duration::from_millis(100)),
            )
            .mount(&mock_server)
            .await;

        let http_client = ReqwestHttpClient::new(
            reqwest::Client::builder()
                .timeout(std::time::Duration::from_millis(1))
                .build()
                .unwrap(),
        );

        let http_client_response = http_client
            .execute(Request::get(format!("{}/slow", mock_server.uri())))
            .await;

        assert!(matches!(http_client_response.unwrap_err(), Error::Timeout));
    }

    #[tokio::test]
    async fn should_reject_unsupported_schemes_before_sending() {
        let http_client_response = ReqwestHttpClient::default()
            .execute(Request::get("ftp://example.com/file.bin"))
            .await;

        assert!(http_client_response.is_err());
    }
}

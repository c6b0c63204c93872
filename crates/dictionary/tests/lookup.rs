use dictionary::{Credentials, Dictionary, DictionaryError, Locale};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

const APPLE: &str = r#"{"results":[{"lexicalEntries":[{"entries":[{"senses":[{"definitions":["a round fruit"]}]}]}]}]}"#;

/// Answers one connection per canned response, in order, and hands back the
/// request heads it saw.
async fn serve(responses: Vec<(&'static str, &'static str)>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let mut requests = Vec::new();
        for (status, body) in responses {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let read = socket.read(&mut buf).await.unwrap();
                if read == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..read]);
            }
            requests.push(String::from_utf8_lossy(&head).into_owned());
            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        }
        requests
    });
    (format!("http://{addr}/api/v2"), handle)
}

fn dictionary(base_url: String, locales: Vec<Locale>) -> Dictionary {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    Dictionary::new(
        base_url,
        Credentials {
            app_id: "test-id".to_owned(),
            app_key: "test-key".to_owned(),
        },
    )
    .with_locales(locales)
    .with_client(client)
}

#[tokio::test]
async fn fetches_first_definition() {
    let (base_url, server) = serve(vec![("200 OK", APPLE)]).await;
    let dict = dictionary(base_url, vec![Locale::EnGb]);

    let definition = dict.fetch_definition("Apple").await;
    assert_eq!(definition.as_deref(), Some("a round fruit"));

    let requests = server.await.unwrap();
    let request = requests[0].to_ascii_lowercase();
    assert!(request.starts_with("get /api/v2/entries/en-gb/apple http/1.1"));
    assert!(request.contains("app_id: test-id"));
    assert!(request.contains("app_key: test-key"));
}

#[tokio::test]
async fn not_found_is_absent() {
    let not_found = ("404 Not Found", r#"{"error":"No entry found"}"#);
    let (base_url, server) = serve(vec![not_found, not_found]).await;
    let dict = dictionary(base_url, vec![Locale::EnGb]);

    assert_eq!(dict.fetch_definition("apple").await, None);

    let error = dict.get_definition("apple").await.unwrap_err();
    assert!(matches!(error, DictionaryError::NotFound { ref word } if word == "apple"));
    assert_eq!(error.status_code(), Some(404));
    assert_eq!(server.await.unwrap().len(), 2);
}

#[tokio::test]
async fn fetch_definition_swallows_server_errors() {
    let (base_url, server) = serve(vec![("500 Internal Server Error", "oops")]).await;
    let dict = dictionary(base_url, vec![Locale::EnGb]);

    assert_eq!(dict.fetch_definition("apple").await, None);
    server.await.unwrap();
}

#[tokio::test]
async fn missing_senses_is_absent() {
    let body = r#"{"results":[{"lexicalEntries":[{"entries":[{"etymologies":["old"]}]}]}]}"#;
    let (base_url, server) = serve(vec![("200 OK", body)]).await;
    let dict = dictionary(base_url, vec![Locale::EnGb]);

    let error = dict.get_definition("apple").await.unwrap_err();
    assert!(matches!(error, DictionaryError::MissingField("senses")));
    server.await.unwrap();
}

#[tokio::test]
async fn null_clue_data_still_yields_the_definition() {
    let body = r#"{"results":[{"lexicalEntries":[{"lexicalCategory":null,"entries":[{"etymologies":null,"senses":[{"definitions":["a round fruit"],"examples":[{"text":null}]}]}]}]}]}"#;
    let (base_url, server) = serve(vec![("200 OK", body)]).await;
    let dict = dictionary(base_url, vec![Locale::EnGb]);

    let entry = dict.get_definition("apple").await.unwrap();
    assert_eq!(entry.definition, "a round fruit");
    assert_eq!(entry.example, None);
    assert_eq!(entry.etymology, None);
    server.await.unwrap();
}

#[tokio::test]
async fn garbage_body_is_a_parse_error() {
    let (base_url, server) = serve(vec![("200 OK", "<html>not json</html>")]).await;
    let dict = dictionary(base_url, vec![Locale::EnGb]);

    let error = dict.get_definition("apple").await.unwrap_err();
    assert!(matches!(error, DictionaryError::Deserialize(_)));
    server.await.unwrap();
}

#[tokio::test]
async fn falls_back_to_second_locale() {
    let (base_url, server) = serve(vec![("404 Not Found", "{}"), ("200 OK", APPLE)]).await;
    let dict = dictionary(base_url, vec![Locale::EnGb, Locale::En]);

    let entry = dict.get_definition("apple").await.unwrap();
    assert_eq!(entry.definition, "a round fruit");

    let requests = server.await.unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].starts_with("GET /api/v2/entries/en-gb/apple "));
    assert!(requests[1].starts_with("GET /api/v2/entries/en/apple "));
}

#[tokio::test]
async fn reports_last_error_when_every_locale_fails() {
    let (base_url, server) = serve(vec![
        ("404 Not Found", "{}"),
        ("503 Service Unavailable", ""),
    ])
    .await;
    let dict = dictionary(base_url, vec![Locale::EnGb, Locale::En]);

    let error = dict.get_definition("apple").await.unwrap_err();
    assert!(matches!(error, DictionaryError::Status(503)));
    server.await.unwrap();
}

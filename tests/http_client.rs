use rmdex::domain::{CatalogError, FilterCriteria, Gender, LifeStatus};
use rmdex::infrastructure::{CatalogApi, HttpCatalogClient};
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

const RICK: &str = r#"{"id":1,"name":"Rick Sanchez","status":"Alive","species":"Human","type":"","gender":"Male",
"origin":{"name":"Earth (C-137)","url":"https://rickandmortyapi.com/api/location/1"},
"location":{"name":"Citadel of Ricks","url":"https://rickandmortyapi.com/api/location/3"},
"image":"https://rickandmortyapi.com/api/character/avatar/1.jpeg",
"episode":["https://rickandmortyapi.com/api/episode/1","https://rickandmortyapi.com/api/episode/2"],
"url":"https://rickandmortyapi.com/api/character/1","created":"2017-11-04T18:48:46.250Z"}"#;

const SUMMER: &str = r#"{"id":3,"name":"Summer Smith","status":"Alive","species":"Human","type":"","gender":"Female",
"origin":{"name":"Earth (Replacement Dimension)","url":""},
"location":{"name":"Earth (Replacement Dimension)","url":""},
"image":"https://rickandmortyapi.com/api/character/avatar/3.jpeg",
"episode":["https://rickandmortyapi.com/api/episode/6"],
"url":"https://rickandmortyapi.com/api/character/3","created":"2017-11-04T19:09:56.428Z"}"#;

const PILOT: &str = r#"{"id":1,"name":"Pilot","air_date":"December 2, 2013","episode":"S01E01",
"characters":["https://rickandmortyapi.com/api/character/1"],
"url":"https://rickandmortyapi.com/api/episode/1","created":"2017-11-10T12:56:33.798Z"}"#;

const LAWNMOWER_DOG: &str = r#"{"id":2,"name":"Lawnmower Dog","air_date":"December 9, 2013","episode":"S01E02",
"characters":["https://rickandmortyapi.com/api/character/1"],
"url":"https://rickandmortyapi.com/api/episode/2","created":"2017-11-10T12:56:33.916Z"}"#;

/// Serves a single HTTP response and returns the request line it received.
fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();
        loop {
            let mut header = String::new();
            let read = reader.read_line(&mut header).unwrap();
            if read == 0 || header == "\r\n" {
                break;
            }
        }
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        request_line.trim_end().to_string()
    });

    (format!("http://{addr}/api"), handle)
}

fn client(base_url: &str) -> HttpCatalogClient {
    let http = reqwest::blocking::Client::builder().no_proxy().build().unwrap();
    HttpCatalogClient::with_client(http, base_url)
}

#[test]
fn test_character_page_query_and_body() {
    let body = format!(
        r#"{{"info":{{"count":2,"pages":1,"next":null,"prev":null}},"results":[{RICK},{SUMMER}]}}"#
    );
    let (url, server) = serve_once("200 OK", &body);
    let filters = FilterCriteria {
        status: Some(LifeStatus::Alive),
        gender: Some(Gender::Female),
        species: Some(String::new()),
        ..Default::default()
    };

    let page = client(&url).fetch_character_page(2, &filters).unwrap();

    assert_eq!(server.join().unwrap(), "GET /api/character?page=2&status=alive&gender=female HTTP/1.1");
    assert_eq!(page.count(), 2);
    assert_eq!(page.pages(), 1);
    assert_eq!(page.results.len(), 2);
    assert!(page.results.len() as u32 <= page.count());
    assert_eq!(page.results[1].name, "Summer Smith");
}

#[test]
fn test_character_page_error_status() {
    let (url, server) = serve_once("404 Not Found", r#"{"error":"There is nothing here"}"#);
    let err = client(&url).fetch_character_page(99, &FilterCriteria::default()).unwrap_err();
    server.join().unwrap();
    assert_eq!(err, CatalogError::Remote { status: 404 });
}

#[test]
fn test_character_by_id() {
    let (url, server) = serve_once("200 OK", RICK);
    let rick = client(&url).fetch_character_by_id(1).unwrap();
    assert_eq!(server.join().unwrap(), "GET /api/character/1 HTTP/1.1");
    assert_eq!(rick.name, "Rick Sanchez");
    assert_eq!(rick.episode.len(), 2);
}

#[test]
fn test_character_by_id_not_found() {
    let (url, server) = serve_once("404 Not Found", r#"{"error":"Character not found"}"#);
    let err = client(&url).fetch_character_by_id(9999).unwrap_err();
    server.join().unwrap();
    assert_eq!(err, CatalogError::NotFound { resource: "Character 9999".to_string() });
}

#[test]
fn test_character_by_id_server_error() {
    let (url, server) = serve_once("500 Internal Server Error", "oops");
    let err = client(&url).fetch_character_by_id(1).unwrap_err();
    server.join().unwrap();
    assert_eq!(err, CatalogError::Remote { status: 500 });
}

#[test]
fn test_single_episode_batch_is_a_sequence() {
    let (url, server) = serve_once("200 OK", PILOT);
    let episodes = client(&url).fetch_episodes_by_ids(&[1]).unwrap();
    assert_eq!(server.join().unwrap(), "GET /api/episode/1 HTTP/1.1");
    assert_eq!(episodes.len(), 1);
    assert_eq!(episodes[0].name, "Pilot");
}

#[test]
fn test_episode_batch_keeps_order() {
    let body = format!("[{PILOT},{LAWNMOWER_DOG}]");
    let (url, server) = serve_once("200 OK", &body);
    let episodes = client(&url).fetch_episodes_by_ids(&[1, 2]).unwrap();
    assert_eq!(server.join().unwrap(), "GET /api/episode/1,2 HTTP/1.1");
    assert_eq!(episodes.iter().map(|e| e.episode.as_str()).collect::<Vec<_>>(), vec!["S01E01", "S01E02"]);
}

#[test]
fn test_empty_episode_batch_makes_no_request() {
    // Nothing listens on this address; a request would fail.
    let episodes = client("http://127.0.0.1:9/api").fetch_episodes_by_ids(&[]).unwrap();
    assert!(episodes.is_empty());
}

#[test]
fn test_unreachable_catalog_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{addr}/api")).fetch_character_by_id(1).unwrap_err();
    assert!(matches!(err, CatalogError::Transport(_)));
}

#[test]
fn test_malformed_body_is_a_decode_error() {
    let (url, server) = serve_once("200 OK", r#"{"info":{}}"#);
    let err = client(&url).fetch_character_page(1, &FilterCriteria::default()).unwrap_err();
    server.join().unwrap();
    assert!(matches!(err, CatalogError::Decode(_)));
}

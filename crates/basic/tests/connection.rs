use std::sync::Arc;

use indoc::indoc;
use mvc_http::connection::HttpConnection;
use mvc_web::Server;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

async fn exchange(input: &str) -> String {
    let server = Server::builder().router(mvc_basic::router().unwrap()).build().unwrap();

    let (client, socket) = tokio::io::duplex(64 * 1024);
    let (server_read, server_write) = tokio::io::split(socket);
    let (mut client_read, mut client_write) = tokio::io::split(client);

    client_write.write_all(input.as_bytes()).await.unwrap();
    client_write.shutdown().await.unwrap();

    HttpConnection::new(server_read, server_write).process(Arc::new(server)).await.unwrap();

    let mut output = String::new();
    client_read.read_to_string(&mut output).await.unwrap();
    output
}

#[tokio::test]
async fn keep_alive_serves_pipelined_requests() {
    let input = indoc! {r##"
        GET /mapping/users HTTP/1.1
        Host: localhost

        POST /request-body-json-v5 HTTP/1.1
        Host: localhost
        Content-Type: application/json
        Content-Length: 29

        {"username":"hello","age":20}"##};

    let output = exchange(input).await;

    assert_eq!(output.matches("HTTP/1.1 200 OK").count(), 2);
    let users = output.find("getUsers").unwrap();
    let echo = output.find(r#"{"username":"hello","age":20}"#).unwrap();
    assert!(users < echo);
}

#[tokio::test]
async fn not_found_keeps_connection_open() {
    let input = indoc! {r##"
        GET /missing HTTP/1.1

        GET /hello-basic HTTP/1.1

        "##};

    let output = exchange(input).await;

    assert!(output.starts_with("HTTP/1.1 404 Not Found\r\n"));
    assert!(output.contains("HTTP/1.1 200 OK"));
    assert!(output.ends_with("ok"));
}

#[tokio::test]
async fn delete_with_form_body_keeps_requests_in_step() {
    let input = indoc! {r##"
        DELETE /request-param-v3 HTTP/1.1
        Content-Type: application/x-www-form-urlencoded
        Content-Length: 21

        username=hello&age=20GET /hello-basic HTTP/1.1

        "##};

    let output = exchange(input).await;

    assert_eq!(output.matches("HTTP/1.1 200 OK").count(), 2);
    assert!(!output.contains("400 Bad Request"));
    assert!(output.ends_with("ok"));
}

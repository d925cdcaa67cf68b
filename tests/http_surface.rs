//! End-to-end tests over a real socket.

use verthandi::SqliteStore;

mod common;

const DECLARATION: &str = "<?xml version='1.0' encoding='utf-8'?>";
const ROOT_OPEN: &str = "<verthandi xmlns='http://verthandi.org/2014/verthandi'>";

async fn get(server: &common::TestServer, resource: &str) -> (u16, String, String) {
    let res = common::client()
        .get(server.url(resource))
        .send()
        .await
        .expect("server unreachable");
    let status = res.status().as_u16();
    let content_type = res
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let body = res.text().await.unwrap();
    (status, content_type, body)
}

fn assert_enveloped(body: &str) {
    assert!(body.starts_with(DECLARATION), "missing declaration: {body}");
    assert!(
        body.starts_with(&format!("{DECLARATION}{ROOT_OPEN}")),
        "missing root: {body}"
    );
    assert!(body.ends_with("</verthandi>"), "unterminated root: {body}");
    assert_eq!(body.matches("<verthandi").count(), 1);
}

#[tokio::test]
async fn test_project_without_optional_fields() {
    let server = common::start_server(common::seeded_store()).await;

    let (status, content_type, body) = get(&server, "/verthandi/project/7").await;
    assert_eq!(status, 200);
    assert_eq!(content_type, "text/xml; charset=utf-8");
    assert_enveloped(&body);
    assert!(body.contains("<project id='7' name='Launch'/>"), "{body}");

    server.stop().await;
}

#[tokio::test]
async fn test_project_with_urgency() {
    let server = common::start_server(common::seeded_store()).await;

    let (_, _, body) = get(&server, "/verthandi/project/8").await;
    assert!(body.contains("<project id='8' name='Launch' urgency='3'/>"), "{body}");

    let (_, _, body) = get(&server, "/verthandi/project/9").await;
    let urgency = body.find("urgency='3'").unwrap();
    let importance = body.find("importance='5'").unwrap();
    assert!(body.find("name='Ranked'").unwrap() < urgency);
    assert!(urgency < importance);

    server.stop().await;
}

#[tokio::test]
async fn test_missing_project_is_invalid() {
    let server = common::start_server(common::seeded_store()).await;

    let (status, _, body) = get(&server, "/verthandi/project/999").await;
    assert_eq!(status, 200);
    assert_enveloped(&body);
    assert!(body.contains("<project id='999' status='invalid'/>"), "{body}");

    server.stop().await;
}

#[tokio::test]
async fn test_task() {
    let server = common::start_server(common::seeded_store()).await;

    let (status, _, body) = get(&server, "/verthandi/task/2").await;
    assert_eq!(status, 200);
    assert!(body.contains("<task id='2' name='Write spec'/>"), "{body}");

    let (_, _, body) = get(&server, "/verthandi/task/7").await;
    assert!(body.contains("<task id='7' status='invalid'/>"), "{body}");

    server.stop().await;
}

#[tokio::test]
async fn test_unrouted_path_is_echoed() {
    let server = common::start_server(common::seeded_store()).await;

    let (status, content_type, body) = get(&server, "/nonexistent/path").await;
    assert_eq!(status, 200);
    assert_eq!(content_type, "text/xml; charset=utf-8");
    assert_enveloped(&body);
    assert!(body.contains("<resource>/nonexistent/path</resource>"), "{body}");

    server.stop().await;
}

#[tokio::test]
async fn test_description_null_vs_empty() {
    let server = common::start_server(common::seeded_store()).await;

    let (_, _, body) = get(&server, "/verthandi/project/10").await;
    assert!(
        body.contains("<project id='10' name='Described'>Body text</project>"),
        "{body}"
    );

    let (_, _, body) = get(&server, "/verthandi/project/11").await;
    assert!(body.contains("<project id='11' name='Blank'></project>"), "{body}");

    server.stop().await;
}

#[tokio::test]
async fn test_name_is_escaped() {
    let server = common::start_server(common::seeded_store()).await;

    let (_, _, body) = get(&server, "/verthandi/project/12").await;
    assert!(
        body.contains("name='Tom &amp; Jerry&apos;s &lt;show&gt;'"),
        "{body}"
    );

    server.stop().await;
}

#[tokio::test]
async fn test_oversized_id_does_not_crash() {
    let server = common::start_server(common::seeded_store()).await;

    let (status, _, body) = get(&server, "/verthandi/project/99999999999999999999").await;
    assert_eq!(status, 200);
    assert!(
        body.contains("<project id='99999999999999999999' status='invalid'/>"),
        "{body}"
    );

    // Still serving afterwards.
    let (status, _, _) = get(&server, "/verthandi/project/7").await;
    assert_eq!(status, 200);

    server.stop().await;
}

#[tokio::test]
async fn test_storage_failure_still_answers() {
    let store = SqliteStore::from_connection(rusqlite::Connection::open_in_memory().unwrap());
    let server = common::start_server(store).await;

    let (status, _, body) = get(&server, "/verthandi/task/1").await;
    assert_eq!(status, 200);
    assert!(body.contains("<task id='1' status='invalid'/>"), "{body}");

    server.stop().await;
}

#[tokio::test]
async fn test_concurrent_requests() {
    let server = common::start_server(common::seeded_store()).await;
    let client = common::client();

    let mut tasks = Vec::new();
    for i in 0..32 {
        let client = client.clone();
        let url = if i % 2 == 0 {
            server.url("/verthandi/project/7")
        } else {
            server.url("/verthandi/task/2")
        };
        tasks.push(tokio::spawn(async move {
            let res = client.get(url).send().await.unwrap();
            assert_eq!(res.status().as_u16(), 200);
            (i, res.text().await.unwrap())
        }));
    }

    for task in tasks {
        let (i, body) = task.await.unwrap();
        if i % 2 == 0 {
            assert!(body.contains("<project id='7' name='Launch'/>"));
        } else {
            assert!(body.contains("<task id='2' name='Write spec'/>"));
        }
    }

    server.stop().await;
}

#[tokio::test]
async fn test_shutdown_stops_server() {
    let server = common::start_server(common::seeded_store()).await;
    let addr = server.addr;

    server.stop().await;

    let result = common::client()
        .get(format!("http://{addr}/verthandi/project/7"))
        .send()
        .await;
    assert!(result.is_err(), "server still accepting after shutdown");
}

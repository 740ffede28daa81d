use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use trip_coordinator::agent::{ActivityPlanner, PlanningAgentClient, WeatherAgentClient, WeatherProvider};
use trip_coordinator::error::ServiceError;
use trip_coordinator::model::{Activity, WeatherReport};
use trip_coordinator::protocol::AgentClient;

/// Answers a single HTTP request with `status` and `body`, and hands back
/// the request line and JSON body it received.
async fn serve_once(status: u16, body: String) -> (String, JoinHandle<(String, Value)>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        let header_end = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "client closed before sending headers");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let content_length = head
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);

        while buf.len() < header_end + content_length {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "client closed before sending body");
            buf.extend_from_slice(&chunk[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status} Status\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();

        let request_line = head.lines().next().unwrap_or_default().to_string();
        let request_body: Value = serde_json::from_slice(&buf[header_end..header_end + content_length]).unwrap();
        (request_line, request_body)
    });

    (base_url, handle)
}

fn agent_reply(text: &str) -> Value {
    json!({ "content": { "type": "text", "text": text }, "role": "agent" })
}

#[tokio::test]
async fn weather_request_carries_bare_location() {
    let reply = agent_reply("Weather in Da Nang:\n🌡️ Temperature: 28°C\n☁️ Condition: Sunny\n💧 Humidity: 75%");
    let (base_url, server) = serve_once(200, reply.to_string()).await;
    let client = WeatherAgentClient::new(AgentClient::new(&base_url));

    let report = client.get_weather("Da Nang").await.unwrap();
    let (request_line, request) = server.await.unwrap();

    assert_eq!(report, WeatherReport::new("Da Nang", 28.0, "Sunny", 75));
    assert_eq!(request_line, "POST /a2a HTTP/1.1");
    assert_eq!(
        request,
        json!({ "content": { "type": "text", "text": "Da Nang" }, "role": "user" })
    );
}

#[tokio::test]
async fn planning_request_uses_composed_text() {
    let mut reply = agent_reply("🎯 Activity Suggestions for Da Nang:\n\n🏖️ Beach Day\nSwim.");
    reply["metadata"] = json!({ "count": 1, "raw_response": "..." });
    let (base_url, server) = serve_once(200, reply.to_string()).await;
    let client = PlanningAgentClient::new(AgentClient::new(&base_url));

    let plan = client.get_activities("Da Nang", "Sunny, 28°C").await.unwrap();
    let (_, request) = server.await.unwrap();

    assert_eq!(plan.activities, vec![Activity::new("🏖️ Beach Day", "Swim.")]);
    assert_eq!(
        request["content"]["text"],
        "Plan for Da Nang with weather: Sunny, 28°C"
    );
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let (base_url, server) = serve_once(503, "{}".to_string()).await;
    let client = WeatherAgentClient::new(AgentClient::new(&base_url));

    let err = client.get_weather("Hanoi").await.unwrap_err();
    server.await.unwrap();

    assert_eq!(err, ServiceError::Status { status: 503 });
}

#[tokio::test]
async fn agent_error_field_is_a_rejection() {
    let mut reply = agent_reply("Sorry, I couldn't fetch weather data");
    reply["error"] = json!("weather backend down");
    let (base_url, server) = serve_once(200, reply.to_string()).await;
    let client = WeatherAgentClient::new(AgentClient::new(&base_url));

    let err = client.get_weather("Hanoi").await.unwrap_err();
    server.await.unwrap();

    assert_eq!(err, ServiceError::Rejected("weather backend down".into()));
}

#[tokio::test]
async fn undecodable_body_is_malformed() {
    let (base_url, server) = serve_once(200, "not json".to_string()).await;
    let client = WeatherAgentClient::new(AgentClient::new(&base_url));

    let err = client.get_weather("Hanoi").await.unwrap_err();
    server.await.unwrap();

    assert!(matches!(err, ServiceError::MalformedPayload(_)));
}

#[tokio::test]
async fn unreachable_agent_is_a_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    let client = WeatherAgentClient::new(AgentClient::new(&base_url));

    let err = client.get_weather("Hanoi").await.unwrap_err();

    assert!(matches!(err, ServiceError::Network(_)));
}

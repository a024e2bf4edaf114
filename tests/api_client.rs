use chrono::{TimeZone, Utc};
use job_board::core::ApiClient;
use job_board::types::{ApplicationStatus, JobType, ModeOfInterview};
use job_board::workflow::InterviewPlan;
use job_board::ClientError;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serve one canned response and hand back the raw request text
async fn serve_once(status: u16, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.expect("accept");
        let request = read_request(&mut stream).await;

        let reason = match status {
            200 => "OK",
            401 => "Unauthorized",
            404 => "Not Found",
            _ => "Error",
        };
        let response = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            reason,
            body.len(),
            body
        );
        stream
            .write_all(response.as_bytes())
            .await
            .expect("write response");
        stream.shutdown().await.ok();
        request
    });

    (format!("http://{}", addr), handle)
}

async fn read_request(stream: &mut tokio::net::TcpStream) -> String {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let read = stream.read(&mut chunk).await.expect("read request");
        if read == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..read]);

        let text = String::from_utf8_lossy(&buffer);
        if let Some((head, body)) = text.split_once("\r\n\r\n") {
            let content_length = head
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if body.len() >= content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

fn request_body(request: &str) -> serde_json::Value {
    let (_, body) = request.split_once("\r\n\r\n").expect("request separator");
    serde_json::from_str(body).expect("json body")
}

const JOBS_BODY: &str = r#"{
    "message": "fetched all Data",
    "response": [
        {
            "id": 1,
            "title": "Software Engineer",
            "description": "Build campus systems",
            "companyName": "Centurion University",
            "campus": "Main Campus",
            "department": "Computer Science",
            "Qualification": "B.Tech",
            "jobType": "FULL_TIME",
            "status": "ACTIVE",
            "adminId": 1,
            "applicationDeadline": "2025-07-31"
        },
        {
            "id": 4,
            "title": "Marketing Intern",
            "jobType": "INTERNSHIP",
            "status": "SOMETHING_NEW"
        }
    ]
}"#;

#[tokio::test]
async fn test_list_jobs_attaches_token_and_unwraps_envelope() {
    let (base_url, server) = serve_once(200, JOBS_BODY).await;
    let client = ApiClient::new(&base_url, 5)
        .unwrap()
        .with_token(Some("tok-123".into()));

    let jobs = client.list_jobs().await.unwrap();
    let request = server.await.unwrap();

    assert!(request.starts_with("GET /job HTTP/1.1"));
    assert!(request.to_lowercase().contains("x-access-token: tok-123"));
    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0].qualification, "B.Tech");
    assert_eq!(jobs[1].job_type, JobType::Internship);
    assert_eq!(jobs[1].status, Default::default());
}

#[tokio::test]
async fn test_anonymous_requests_carry_no_token() {
    let (base_url, server) = serve_once(200, JOBS_BODY).await;
    let client = ApiClient::new(&base_url, 5).unwrap();

    client.list_jobs().await.unwrap();
    let request = server.await.unwrap();
    assert!(!request.to_lowercase().contains("x-access-token"));
}

#[tokio::test]
async fn test_status_codes_map_to_user_messages() {
    let (base_url, server) = serve_once(401, r#"{"message":"jwt expired"}"#).await;
    let err = ApiClient::new(&base_url, 5).unwrap().list_jobs().await.unwrap_err();
    server.await.unwrap();
    assert!(matches!(err, ClientError::Unauthorized));
    assert_eq!(err.to_string(), "Unauthorized. Please log in again.");

    let (base_url, server) = serve_once(404, "").await;
    let err = ApiClient::new(&base_url, 5).unwrap().get_job(99).await.unwrap_err();
    server.await.unwrap();
    assert_eq!(err.to_string(), "Job not found");

    let (base_url, server) = serve_once(400, r#"{"message":"Email already registered"}"#).await;
    let err = ApiClient::new(&base_url, 5)
        .unwrap()
        .login("priya.patel@example.com", "secret")
        .await
        .unwrap_err();
    server.await.unwrap();
    assert_eq!(err.to_string(), "Email already registered");

    let (base_url, server) = serve_once(500, "<html>oops</html>").await;
    let err = ApiClient::new(&base_url, 5).unwrap().list_jobs().await.unwrap_err();
    server.await.unwrap();
    assert_eq!(err.to_string(), "An error occurred");
}

#[tokio::test]
async fn test_unconfirmed_success_is_unexpected() {
    let (base_url, server) = serve_once(200, r#"{"success":"no","response":[]}"#).await;
    let err = ApiClient::new(&base_url, 5).unwrap().list_jobs().await.unwrap_err();
    server.await.unwrap();
    assert_eq!(err.to_string(), "Unexpected response format");

    let (base_url, server) = serve_once(200, r#"{"success":"ok"}"#).await;
    let err = ApiClient::new(&base_url, 5).unwrap().list_jobs().await.unwrap_err();
    server.await.unwrap();
    assert!(matches!(err, ClientError::UnexpectedResponse));
}

#[tokio::test]
async fn test_unreachable_server_is_a_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(&format!("http://{}", addr), 2).unwrap();
    let err = client.list_jobs().await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)));
    assert_eq!(
        err.to_string(),
        "Unable to reach the server. Please check your network or contact support."
    );
}

#[tokio::test]
async fn test_change_status_sends_status_and_job_title() {
    let (base_url, server) = serve_once(200, r#"{"success":"ok","response":true}"#).await;
    let client = ApiClient::new(&base_url, 5)
        .unwrap()
        .with_token(Some("admin-tok".into()));

    client
        .change_status(2, ApplicationStatus::UnderReview, "Software Engineer")
        .await
        .unwrap();
    let request = server.await.unwrap();

    assert!(request.starts_with("PUT /application/change-status/2 HTTP/1.1"));
    let body = request_body(&request);
    assert_eq!(body["applicationId"], 2);
    assert_eq!(body["status"], "UNDER_REVIEW");
    assert_eq!(body["jobTitle"], "Software Engineer");
}

#[tokio::test]
async fn test_reschedule_puts_interview_fields() {
    let (base_url, server) = serve_once(
        200,
        r#"{"success":"ok","response":{
            "id": 2,
            "jobApplicationId": 6,
            "scheduledAt": "2025-07-01T10:30:00.000Z",
            "status": "SCHEDULED",
            "interviewerName": "Prof. Anita Desai",
            "modeOfInterview": "OFFLINE"
        }}"#,
    )
    .await;
    let client = ApiClient::new(&base_url, 5).unwrap();
    let plan = InterviewPlan {
        application_id: 6,
        scheduled_at: Utc.with_ymd_and_hms(2025, 7, 1, 10, 30, 0).unwrap(),
        interviewer_name: "Prof. Anita Desai".into(),
        interviewer_email: "anita.desai@centurion.edu".into(),
        interviewer_phone: "+91 9876543221".into(),
        mode: ModeOfInterview::Offline,
    };

    let response = client.reschedule_interview(2, &plan).await.unwrap();
    let request = server.await.unwrap();

    assert!(request.starts_with("PUT /api/interview/2 HTTP/1.1"));
    let body = request_body(&request);
    assert_eq!(body["scheduledAt"], "2025-07-01T10:30:00.000Z");
    assert_eq!(body["status"], "SCHEDULED");
    assert_eq!(body["modeOfInterview"], "OFFLINE");
    assert_eq!(body["jobApplicationId"], 6);

    assert_eq!(response.interview.id, 2);
    assert!(response.job_application.is_none());
}

use asistencia_api::types::{CreateParty, CreatePolitician, MonthlyAttendance, YearlyAttendance};
use asistencia_api::{Client, Error};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[tokio::test]
async fn get_parties_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("parties.json");

    Mock::given(method("GET"))
        .and(path("/api/parties"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let resp = client.get_parties().await.unwrap();
    assert_eq!(resp.data.len(), 2);
    assert_eq!(resp.data[0].slug, "partido-socialista");
}

#[tokio::test]
async fn get_parties_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/parties"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let result = client.get_parties().await;
    assert!(matches!(result, Err(Error::HttpStatus { status: 500, .. })));
}

#[tokio::test]
async fn get_parties_malformed_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/parties"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not valid json}"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let result = client.get_parties().await;
    assert!(matches!(result, Err(Error::RequestFailed)));
}

#[tokio::test]
async fn get_politicians_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("politicians.json");

    Mock::given(method("GET"))
        .and(path("/api/politicians"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let resp = client.get_politicians().await.unwrap();
    assert_eq!(resp.data.len(), 2);
    assert_eq!(resp.data[0].name, "Acevedo Sáez, María Candelaria");
    // partySlug is optional on read responses
    assert_eq!(resp.data[1].party_slug, None);
}

#[tokio::test]
async fn create_party_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/parties"))
        .and(body_partial_json(serde_json::json!({
            "slug": "partido-socialista"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {
                "id": 1,
                "name": "Partido Socialista",
                "slug": "partido-socialista",
                "abbreviation": "Partido Socialista"
            },
            "statusCode": 200
        })))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let created = client
        .create_party(&CreateParty {
            name: "Partido Socialista".into(),
            slug: "partido-socialista".into(),
            abbreviation: "Partido Socialista".into(),
        })
        .await
        .unwrap();
    assert_eq!(created.id, 1);
}

#[tokio::test]
async fn create_politician_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/politicians"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "id": 42, "name": "Aedo Jeldres, Eric", "partySlug": "dc" },
            "statusCode": 200
        })))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let created = client
        .create_politician(&CreatePolitician {
            name: "Aedo Jeldres, Eric".into(),
            party_slug: "dc".into(),
        })
        .await
        .unwrap();
    assert_eq!(created.id, 42);
}

#[tokio::test]
async fn create_politician_error_envelope() {
    let mock_server = MockServer::start().await;

    // The API reports duplicates through the error envelope, not a bare 4xx.
    Mock::given(method("POST"))
        .and(path("/api/politicians"))
        .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
            "error": "politician name already exists",
            "statusCode": 409
        })))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let result = client
        .create_politician(&CreatePolitician {
            name: "Aedo Jeldres, Eric".into(),
            party_slug: "dc".into(),
        })
        .await;

    match result {
        Err(Error::Rejected { message }) => {
            assert_eq!(message, "politician name already exists");
        }
        other => panic!("expected Rejected, got {:?}", other.map(|p| p.id)),
    }
}

#[tokio::test]
async fn upsert_monthly_attendance_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/attendance/monthly"))
        .and(body_partial_json(serde_json::json!({
            "politicianId": 10,
            "year": 2025,
            "month": 6
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "id": 7 },
            "statusCode": 200
        })))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let result = client
        .upsert_monthly_attendance(&MonthlyAttendance {
            politician_id: 10,
            year: 2025,
            month: 6,
            attendance_count: 18,
            absent_count: 2,
            justified_absent_count: 1,
            unjustified_absent_count: 1,
            attendance_average: 90.0,
        })
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn upsert_yearly_attendance_non_success_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/attendance/yearly"))
        .respond_with(
            ResponseTemplate::new(422).set_body_string("{\"error\":\"invalid year\"}"),
        )
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let result = client
        .upsert_yearly_attendance(&YearlyAttendance {
            politician_id: 10,
            year: 1900,
            attendance_count: 0,
            absent_count: 0,
            justified_absent_count: 0,
            unjustified_absent_count: 0,
            attendance_average: 0.0,
        })
        .await;

    // Attendance acks keep the status and body for the caller to log.
    match result {
        Err(Error::HttpStatus { status, body }) => {
            assert_eq!(status, 422);
            assert!(body.contains("invalid year"));
        }
        other => panic!("expected HttpStatus, got {:?}", other),
    }
}

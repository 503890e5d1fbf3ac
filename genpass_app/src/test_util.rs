use genpass_domain::profile::Profile;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use tower::ServiceExt;

pub trait EmptyBody {
    fn empty_body(self) -> Request<Body>;
}

impl EmptyBody for http::request::Builder {
    fn empty_body(self) -> Request<Body> {
        self.body(Body::empty()).unwrap()
    }
}

pub async fn request(router: axum::Router, request: Request<Body>) -> (StatusCode, Bytes) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    match axum::body::to_bytes(response.into_body(), usize::MAX).await {
        Ok(bytes) => (status, bytes),
        Err(_) => panic!("error while fetching body"),
    }
}

pub async fn request_json<B: DeserializeOwned>(
    router: axum::Router,
    request: Request<Body>,
) -> Result<(StatusCode, B), (StatusCode, Bytes)> {
    let (status, bytes) = self::request(router, request).await;
    serde_json::from_slice(&bytes)
        .map(|body| (status, body))
        .map_err(|_| (status, bytes))
}

pub fn test_profile(student_id: &str) -> Profile {
    Profile {
        student_id: student_id.into(),
        name: "Jordan Patel".to_string(),
        age: 22,
        school: "Eastlake Institute".to_string(),
        major: "Mathematics".to_string(),
        graduation_year: 2026,
        gpa: 3.12,
        email: "jordan.patel@eastlakeinstitute.edu".to_string(),
        city: "Cedar Falls".to_string(),
        state: "IA".to_string(),
        interests: vec![
            "robotics".to_string(),
            "chess".to_string(),
            "painting".to_string(),
        ],
    }
}

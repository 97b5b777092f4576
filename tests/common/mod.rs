#![allow(dead_code)]

use std::time::Duration;

use alumnitrack::router::init_router;
use alumnitrack::state::AppState;
use alumnitrack_auth::issue_token;
use alumnitrack_config::{CorsConfig, JwtConfig};
use alumnitrack_db::Stores;
use alumnitrack_models::{
    Alumni, AlumniId, CreateAlumniDto, CreateJobDto, JobRecord, NewUser, User, UserRole,
};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_SECRET: &str = "integration-test-secret";

/// The full router over in-memory stores.
pub struct TestApp {
    pub state: AppState,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let stores = Stores::in_memory(Duration::from_secs(10));
        let state = AppState::new(stores, JwtConfig::new(TEST_SECRET), CorsConfig::from_value(None));
        let router = init_router(state.clone());
        Self { state, router }
    }

    pub fn jwt_config(&self) -> &JwtConfig {
        &self.state.jwt_config
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request("GET", uri, Some(token), None).await
    }

    /// Inserts an account directly through the credential store. The stored
    /// hash is not a valid bcrypt hash, so these accounts cannot log in.
    pub async fn insert_user(
        &self,
        username: &str,
        role: UserRole,
        alumni_id: Option<AlumniId>,
    ) -> User {
        self.state
            .stores
            .users
            .create(NewUser {
                username: username.to_string(),
                email: format!("{}@example.com", username),
                password_hash: "!".to_string(),
                role,
                alumni_id,
            })
            .await
            .unwrap()
    }

    pub fn token_for(&self, user: &User) -> String {
        issue_token(user.id.into_inner(), user.role, self.jwt_config()).unwrap()
    }

    pub async fn admin_token(&self) -> (User, String) {
        let admin = self.insert_user(&unique("admin"), UserRole::Admin, None).await;
        let token = self.token_for(&admin);
        (admin, token)
    }

    pub async fn user_token(&self, alumni_id: Option<AlumniId>) -> (User, String) {
        let user = self.insert_user(&unique("user"), UserRole::User, alumni_id).await;
        let token = self.token_for(&user);
        (user, token)
    }

    pub async fn insert_alumni(&self, name: &str) -> Alumni {
        self.state
            .stores
            .alumni
            .create(alumni_dto(&unique("nim"), name))
            .await
            .unwrap()
    }

    pub async fn insert_job(&self, alumni_id: AlumniId, employer: &str) -> JobRecord {
        self.state
            .stores
            .jobs
            .create(job_dto(alumni_id, employer))
            .await
            .unwrap()
    }
}

pub fn unique(prefix: &str) -> String {
    format!("{}{}", prefix, &Uuid::new_v4().simple().to_string()[..10])
}

pub fn alumni_dto(nim: &str, name: &str) -> CreateAlumniDto {
    CreateAlumniDto {
        nim: nim.to_string(),
        name: name.to_string(),
        major: "Informatics".to_string(),
        entry_year: 2018,
        graduation_year: Some(2022),
        email: format!("{}@example.com", nim),
        phone: None,
        address: None,
    }
}

pub fn job_dto(alumni_id: AlumniId, employer: &str) -> CreateJobDto {
    CreateJobDto {
        alumni_id,
        employer: employer.to_string(),
        position: "Software Engineer".to_string(),
        industry: "Technology".to_string(),
        location: "Jakarta".to_string(),
        salary_range: Some("10-15 juta".to_string()),
        start_date: NaiveDate::from_ymd_opt(2022, 8, 1).unwrap(),
        end_date: None,
        employment_status: "active".to_string(),
        description: None,
    }
}

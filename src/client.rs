//! This module provides a client to connect to the dashboard server

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::config::user_agent;
use crate::error::{Error, Result};
use crate::event::Event;
use crate::filter::{Role, TaskFilter};
use crate::resource::Resource;
use crate::task::{MutationAck, Task, TaskDraft, TaskId, TaskUpdate};
use crate::traits::TaskBackend;
use crate::user::{Department, User};
use crate::utils::{format_day, DateRange};

/// A [`TaskBackend`] that fetches its data from the server's JSON API
#[derive(Clone, Debug)]
pub struct Client {
    resource: Resource,
    http: reqwest::Client,
}

impl Client {
    /// Create a client. This does not start a connection
    pub fn new<S: AsRef<str>>(url: S) -> Result<Self> {
        let url = Url::parse(url.as_ref())?;
        Self::from_resource(Resource::new(url))
    }

    pub fn from_resource(resource: Resource) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent())
            .build()?;
        Ok(Self { resource, http })
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    /// The URL `get_tasks` requests for a given filter
    pub fn tasks_url(&self, filter: &TaskFilter, role: Role) -> Result<Url> {
        self.resource.endpoint_with_query("/api/tasks", filter.query_pairs(role))
    }

    pub fn events_url(&self, range: DateRange) -> Result<Url> {
        self.resource.endpoint_with_query("/api/events", vec![
            ("start", format_day(range.start)),
            ("end", format_day(range.end)),
        ])
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        log::debug!("{} {}", method, url);
        let builder = self.http.request(method, url);
        match (self.resource.username(), self.resource.password()) {
            (Some(username), password) => builder.basic_auth(username, password),
            _ => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await?;
        if response.status().is_success() == false {
            return Err(Error::Status {
                status: response.status(),
                url: response.url().to_string(),
            });
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self.send(self.request(Method::GET, url)).await?;
        decode(response).await
    }

    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(&self, method: Method, url: Url, body: &B) -> Result<T> {
        let response = self.send(self.request(method, url).json(body)).await?;
        decode(response).await
    }
}

/// Decode the body of a response. The body is read as text first so that decoding errors keep their context
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|err| {
        log::warn!("Unable to decode response body: {}", err);
        Error::Decode(err)
    })
}

#[async_trait]
impl TaskBackend for Client {
    async fn get_tasks(&self, filter: &TaskFilter, role: Role) -> Result<Vec<Task>> {
        let url = self.tasks_url(filter, role)?;
        self.get_json(url).await
    }

    async fn get_users(&self) -> Result<Vec<User>> {
        self.get_json(self.resource.endpoint("/api/users")).await
    }

    async fn get_departments(&self) -> Result<Vec<Department>> {
        self.get_json(self.resource.endpoint("/api/departments")).await
    }

    async fn create_task(&self, draft: &TaskDraft) -> Result<MutationAck> {
        self.send_json(Method::POST, self.resource.endpoint("/api/tasks"), draft).await
    }

    async fn update_task(&self, id: TaskId, update: &TaskUpdate) -> Result<MutationAck> {
        let url = self.resource.endpoint(&format!("/api/tasks/{}", id));
        self.send_json(Method::PUT, url, update).await
    }

    async fn delete_task(&self, id: TaskId) -> Result<MutationAck> {
        let url = self.resource.endpoint(&format!("/api/tasks/{}", id));
        let response = self.send(self.request(Method::DELETE, url)).await?;
        decode(response).await
    }

    async fn complete_task(&self, id: TaskId) -> Result<MutationAck> {
        let url = self.resource.endpoint(&format!("/api/tasks/{}/complete", id));
        let response = self.send(self.request(Method::POST, url)).await?;
        decode(response).await
    }

    async fn get_events(&self, range: DateRange) -> Result<Vec<Event>> {
        let url = self.events_url(range)?;
        self.get_json(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskStatus;
    use chrono::NaiveDate;

    #[test]
    fn task_urls() {
        let client = Client::new("http://localhost:5000/").unwrap();
        let filter = TaskFilter {
            status: Some(TaskStatus::Completed),
            search: "weekly report".into(),
            department: Some("IT".into()),
            ..TaskFilter::default()
        };
        assert_eq!(
            client.tasks_url(&filter, Role::Admin).unwrap().as_str(),
            "http://localhost:5000/api/tasks?status=completed&priority=all&q=weekly+report&department=IT"
        );
        assert_eq!(
            client.tasks_url(&filter, Role::Member).unwrap().as_str(),
            "http://localhost:5000/api/tasks?status=completed&priority=all&q=weekly+report"
        );
    }

    #[test]
    fn event_urls() {
        let client = Client::new("http://localhost:5000").unwrap();
        let range = DateRange::month_of(NaiveDate::from_ymd_opt(2024, 2, 10).unwrap());
        assert_eq!(
            client.events_url(range).unwrap().as_str(),
            "http://localhost:5000/api/events?start=2024-02-01&end=2024-02-29"
        );
    }

    #[test]
    fn invalid_url() {
        assert!(matches!(Client::new("not a url"), Err(Error::Url(_))));
    }

    /// Serve a single canned response on a local port.
    /// The returned handle yields the raw request head the server received
    async fn serve_once(status_line: &str, body: &str) -> (Url, tokio::task::JoinHandle<String>) {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = Url::parse(&format!("http://{}/", listener.local_addr().unwrap())).unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            status_line, body.len(), body
        );

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut received = Vec::new();
            let mut buffer = [0u8; 1024];
            while !String::from_utf8_lossy(&received).contains("\r\n\r\n") {
                let n = socket.read(&mut buffer).await.unwrap();
                if n == 0 {
                    break;
                }
                received.extend_from_slice(&buffer[..n]);
            }
            // The client may hang up as soon as it has read the head
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
            String::from_utf8_lossy(&received).to_string()
        });
        (url, handle)
    }

    #[tokio::test]
    async fn server_errors_are_reported_with_their_status() {
        let _ = env_logger::builder().is_test(true).try_init();
        let (url, server) = serve_once("500 Internal Server Error", "").await;
        let client = Client::from_resource(Resource::new(url)).unwrap();

        match client.get_tasks(&TaskFilter::default(), Role::Admin).await {
            Err(Error::Status { status, url }) => {
                assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
                assert!(url.contains("/api/tasks?status=all&priority=all"));
            },
            other => panic!("unexpected {:?}", other),
        }
        let request = server.await.unwrap();
        assert!(request.starts_with("GET /api/tasks?status=all&priority=all HTTP/1.1"));
    }

    #[tokio::test]
    async fn malformed_bodies_are_decode_errors() {
        let _ = env_logger::builder().is_test(true).try_init();
        let (url, server) = serve_once("200 OK", "not json").await;
        let client = Client::from_resource(Resource::new(url)).unwrap();

        let result = client.get_users().await;
        assert!(matches!(result, Err(Error::Decode(_))), "unexpected {:?}", result);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn tasks_are_parsed_and_credentials_sent() {
        let _ = env_logger::builder().is_test(true).try_init();
        let body = r#"[{"id": 4, "title": "Ship it", "due_date": "2024-06-15T23:00:00", "status": "pending",
                        "priority": "high", "assignee_id": 2, "assignee_name": "John Doe", "is_overdue": false}]"#;
        let (url, server) = serve_once("200 OK", body).await;
        let client = Client::from_resource(Resource::new(url).with_credentials("user", "pass")).unwrap();
        assert_eq!(client.resource().username(), Some("user"));

        let tasks = client.get_tasks(&TaskFilter::default(), Role::Member).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title(), "Ship it");
        assert_eq!(tasks[0].due_date(), NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());

        let request = server.await.unwrap().to_lowercase();
        // base64 of "user:pass"
        assert!(request.contains("authorization: basic dxnlcjpwyxnz"), "{}", request);
        assert!(request.contains("user-agent: timelineboard/"));
    }

    #[tokio::test]
    async fn deletions_target_the_task() {
        let _ = env_logger::builder().is_test(true).try_init();
        let (url, server) = serve_once("200 OK", r#"{"message": "Task deleted successfully"}"#).await;
        let client = Client::from_resource(Resource::new(url)).unwrap();

        let ack = client.delete_task(7).await.unwrap();
        assert_eq!(ack.message.as_deref(), Some("Task deleted successfully"));
        assert!(server.await.unwrap().starts_with("DELETE /api/tasks/7 HTTP/1.1"));
    }
}

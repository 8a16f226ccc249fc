//! In-memory FTP server used by the integration tests.
//!
//! Records every command it receives and counts opened and quit sessions,
//! so tests can assert on exactly what reached the "server".

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use ftp_gateway::api::{AppState, build_router};
use ftp_gateway::error::{ConnectionFailure, RemoteError};
use ftp_gateway::session::{Connector, FtpClient, SessionGateway};

enum Node {
    File(Vec<u8>),
    Dir,
}

#[derive(Default)]
struct State {
    nodes: BTreeMap<String, Node>,
    commands: Vec<String>,
    opened: usize,
    quit: usize,
    refuse_login: bool,
    /// Replies forced for an exact command line, e.g. "CWD docs"
    faults: Vec<(String, RemoteError)>,
}

impl State {
    fn children(&self, dir: &str) -> Vec<String> {
        self.nodes
            .keys()
            .filter(|path| path.as_str() != "/" && parent(path) == dir)
            .map(|path| base_name(path).to_string())
            .collect()
    }

    fn is_dir(&self, path: &str) -> bool {
        matches!(self.nodes.get(path), Some(Node::Dir))
    }
}

#[derive(Clone)]
pub struct FakeFtpServer {
    state: Arc<Mutex<State>>,
}

impl FakeFtpServer {
    pub fn new() -> Self {
        let mut state = State::default();
        state.nodes.insert("/".into(), Node::Dir);
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Server that accepts TCP connections but rejects every login
    pub fn refusing_login() -> Self {
        let server = Self::new();
        server.state.lock().unwrap().refuse_login = true;
        server
    }

    /// Create a directory (and any missing parents).
    pub fn dir(self, path: &str) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let mut current = String::new();
            for segment in path.split('/').filter(|s| !s.is_empty()) {
                current = format!("{}/{}", current, segment);
                state.nodes.entry(current.clone()).or_insert(Node::Dir);
            }
        }
        self
    }

    /// Create a file (and any missing parent directories).
    pub fn file(self, path: &str, content: &[u8]) -> Self {
        let server = self.dir(parent(path));
        server
            .state
            .lock()
            .unwrap()
            .nodes
            .insert(path.to_string(), Node::File(content.to_vec()));
        server
    }

    /// Answer `command` (exact line, e.g. "SIZE /a.txt") with `code text`.
    pub fn fail(self, command: &str, code: u32, text: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .faults
            .push((command.to_string(), reply(code, text)));
        self
    }

    /// Drop the connection when `command` is sent.
    pub fn fail_transport(self, command: &str) -> Self {
        self.state.lock().unwrap().faults.push((
            command.to_string(),
            RemoteError::transport("Connection reset by peer"),
        ));
        self
    }

    pub fn exists(&self, path: &str) -> bool {
        self.state.lock().unwrap().nodes.contains_key(path)
    }

    pub fn content(&self, path: &str) -> Option<Vec<u8>> {
        match self.state.lock().unwrap().nodes.get(path) {
            Some(Node::File(data)) => Some(data.clone()),
            _ => None,
        }
    }

    pub fn commands(&self) -> Vec<String> {
        self.state.lock().unwrap().commands.clone()
    }

    /// True if any recorded command starts with `verb`
    pub fn issued(&self, verb: &str) -> bool {
        self.commands()
            .iter()
            .any(|command| command.split(' ').next() == Some(verb))
    }

    pub fn sessions_opened(&self) -> usize {
        self.state.lock().unwrap().opened
    }

    pub fn sessions_quit(&self) -> usize {
        self.state.lock().unwrap().quit
    }

    /// Router wired to this server through the real gateway
    pub fn router(&self) -> Router {
        build_router(AppState {
            gateway: SessionGateway::with_connector(Arc::new(self.clone())),
            max_upload_size_bytes: 1024 * 1024,
        })
    }
}

impl Connector for FakeFtpServer {
    fn connect(&self) -> Result<Box<dyn FtpClient>, ConnectionFailure> {
        let mut state = self.state.lock().unwrap();
        if state.refuse_login {
            return Err(ConnectionFailure::Login("530 Login incorrect.".into()));
        }
        state.opened += 1;
        Ok(Box::new(FakeClient {
            state: Arc::clone(&self.state),
            cwd: "/".into(),
        }))
    }
}

struct FakeClient {
    state: Arc<Mutex<State>>,
    cwd: String,
}

impl FakeClient {
    fn record(&self, command: String) -> Result<std::sync::MutexGuard<'_, State>, RemoteError> {
        let mut state = self.state.lock().unwrap();
        let fault = state
            .faults
            .iter()
            .find(|(line, _)| *line == command)
            .map(|(_, error)| error.clone());
        state.commands.push(command);
        match fault {
            Some(error) => Err(error),
            None => Ok(state),
        }
    }

    fn resolve(&self, path: &str) -> String {
        let joined = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("{}/{}", self.cwd, path)
        };

        let mut segments: Vec<&str> = Vec::new();
        for segment in joined.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                other => segments.push(other),
            }
        }
        format!("/{}", segments.join("/"))
    }
}

fn reply(code: u32, text: &str) -> RemoteError {
    RemoteError::from_reply(code, &format!("{} {}", code, text))
}

impl FtpClient for FakeClient {
    fn cwd(&mut self, path: &str) -> Result<(), RemoteError> {
        let target = self.resolve(path);
        let state = self.record(format!("CWD {}", path))?;
        if state.is_dir(&target) {
            drop(state);
            self.cwd = target;
            Ok(())
        } else {
            Err(reply(550, "Failed to change directory."))
        }
    }

    fn cdup(&mut self) -> Result<(), RemoteError> {
        drop(self.record("CDUP".into())?);
        self.cwd = parent(&self.cwd).to_string();
        Ok(())
    }

    fn nlst(&mut self) -> Result<Vec<String>, RemoteError> {
        let state = self.record("NLST".into())?;
        Ok(state.children(&self.cwd))
    }

    fn size(&mut self, path: &str) -> Result<u64, RemoteError> {
        let target = self.resolve(path);
        let state = self.record(format!("SIZE {}", path))?;
        match state.nodes.get(&target) {
            Some(Node::File(data)) => Ok(data.len() as u64),
            _ => Err(reply(550, "Could not get file size.")),
        }
    }

    fn put_file(&mut self, filename: &str, data: &[u8]) -> Result<u64, RemoteError> {
        let target = self.resolve(filename);
        let mut state = self.record(format!("STOR {}", filename))?;
        if state.is_dir(&target) {
            return Err(reply(553, "Could not create file."));
        }
        state.nodes.insert(target, Node::File(data.to_vec()));
        Ok(data.len() as u64)
    }

    fn mkdir(&mut self, name: &str) -> Result<(), RemoteError> {
        let target = self.resolve(name);
        let mut state = self.record(format!("MKD {}", name))?;
        if state.nodes.contains_key(&target) || !state.is_dir(parent(&target)) {
            return Err(reply(550, "Create directory operation failed."));
        }
        state.nodes.insert(target, Node::Dir);
        Ok(())
    }

    fn rmdir(&mut self, name: &str) -> Result<(), RemoteError> {
        let target = self.resolve(name);
        let mut state = self.record(format!("RMD {}", name))?;
        if !state.is_dir(&target) || !state.children(&target).is_empty() {
            return Err(reply(550, "Remove directory operation failed."));
        }
        state.nodes.remove(&target);
        Ok(())
    }

    fn rm(&mut self, name: &str) -> Result<(), RemoteError> {
        let target = self.resolve(name);
        let mut state = self.record(format!("DELE {}", name))?;
        match state.nodes.get(&target) {
            Some(Node::File(_)) => {
                state.nodes.remove(&target);
                Ok(())
            }
            _ => Err(reply(550, "Delete operation failed.")),
        }
    }

    fn quit(&mut self) -> Result<(), RemoteError> {
        let mut state = self.record("QUIT".into())?;
        state.quit += 1;
        Ok(())
    }
}

fn parent(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) | None => "/",
        Some(index) => &path[..index],
    }
}

fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

// ═══ REQUEST HELPERS ═══

pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn form(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

const BOUNDARY: &str = "gateway-test-boundary";

/// Multipart body carrying only text fields
pub fn multipart_form(method: &str, uri: &str, fields: &[(&str, &str)]) -> Request<Body> {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));

    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Multipart upload with an optional `directory` field and an optional file part
pub fn upload(directory: Option<&str>, file: Option<(&str, &[u8])>) -> Request<Body> {
    let mut body: Vec<u8> = Vec::new();
    if let Some(directory) = directory {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"directory\"\r\n\r\n{directory}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((filename, content)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/upload-file")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

/// Loopback HTTP server answering the API and archive requests of one test.
///
/// Unknown paths answer `404 Not Found`, like GitHub does.
pub struct FakeGithub {
    base: String,
    routes: Vec<(String, u16, Vec<u8>)>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeGithub {
    pub fn builder() -> FakeGithubBuilder {
        FakeGithubBuilder { routes: Vec::new() }
    }

    /// Base URL to hand to `--api-url`.
    pub fn api_url(&self) -> String {
        format!("{}/api", self.base)
    }

    /// Repository URL whose archive is served by this server.
    pub fn repo_url(&self, owner: &str, repo: &str) -> String {
        format!("{}/{owner}/{repo}", self.base)
    }

    /// Request paths received so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn served(&self, path: &str) -> bool {
        self.requests().iter().any(|p| p == path)
    }

    fn start(mut self) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        self.base = format!("http://{}", listener.local_addr().unwrap());
        let routes = self.routes.clone();
        let requests = Arc::clone(&self.requests);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else {
                    continue;
                };
                respond(stream, &routes, &requests);
            }
        });
        self
    }
}

pub struct FakeGithubBuilder {
    routes: Vec<(String, u16, Vec<u8>)>,
}

impl FakeGithubBuilder {
    /// `GET /api/repos/<owner>/<repo>` answers with `default_branch`.
    pub fn repository(mut self, owner: &str, repo: &str, default_branch: &str) -> Self {
        let body = format!(r#"{{"name": "{repo}", "default_branch": "{default_branch}"}}"#);
        self.routes
            .push((format!("/api/repos/{owner}/{repo}"), 200, body.into_bytes()));
        self
    }

    /// `GET /api/repos/<owner>/<repo>/branches/<branch>` finds the branch.
    pub fn branch(mut self, owner: &str, repo: &str, branch: &str) -> Self {
        let body = format!(r#"{{"name": "{branch}"}}"#);
        self.routes.push((
            format!("/api/repos/{owner}/{repo}/branches/{branch}"),
            200,
            body.into_bytes(),
        ));
        self
    }

    /// `GET /<owner>/<repo>/archive/refs/heads/<branch>.zip` serves `zip`.
    pub fn archive(mut self, owner: &str, repo: &str, branch: &str, zip: Vec<u8>) -> Self {
        self.routes.push((
            format!("/{owner}/{repo}/archive/refs/heads/{branch}.zip"),
            200,
            zip,
        ));
        self
    }

    pub fn start(self) -> FakeGithub {
        FakeGithub {
            base: String::new(),
            routes: self.routes,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
        .start()
    }
}

fn respond(
    stream: TcpStream,
    routes: &[(String, u16, Vec<u8>)],
    requests: &Mutex<Vec<String>>,
) {
    let mut reader = BufReader::new(&stream);
    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    // the headers are not needed, but must be consumed
    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) if line == "\r\n" || line == "\n" => break,
            Ok(_) => {}
        }
    }

    let path = request_line
        .split_whitespace()
        .nth(1)
        .unwrap_or("/")
        .to_owned();
    requests.lock().unwrap().push(path.clone());

    let (status, body) = routes
        .iter()
        .find(|(route, _, _)| *route == path)
        .map(|(_, status, body)| (*status, body.clone()))
        .unwrap_or_else(|| (404, br#"{"message": "Not Found"}"#.to_vec()));
    let reason = match status {
        200 => "OK",
        404 => "Not Found",
        _ => "Unknown",
    };

    let mut stream = &stream;
    let head = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&body);
    let _ = stream.flush();
}

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tokio::{net::TcpListener, sync::RwLock};

pub const REALM: &str = "Basic realm=\"Tomcat Manager Application\"";

/// A deployed web application as reported by `list`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct App {
    pub path: String,
    pub running: bool,
    pub sessions: u32,
    pub name: String,
}

impl App {
    fn new(path: &str, sessions: u32, name: &str) -> Self {
        Self {
            path: path.to_string(),
            running: true,
            sessions,
            name: name.to_string(),
        }
    }
}

pub type Db = Arc<RwLock<Vec<App>>>;

#[derive(Clone)]
struct AppState {
    db: Db,
    authorization: String,
}

const ROLES: &[(&str, &str)] = &[
    ("manager-gui", "Access to the HTML interface"),
    ("manager-script", "Access to the text interface"),
];

const RESOURCES: &[(&str, &str)] = &[
    ("UserDatabase", "org.apache.catalina.UserDatabase"),
    ("jdbc/AppDB", "javax.sql.DataSource"),
];

const SERVER_INFO: &[(&str, &str)] = &[
    ("Tomcat Version", "Apache Tomcat/9.0.85"),
    ("OS Name", "Linux"),
    ("OS Architecture", "amd64"),
    ("JVM Version", "17.0.10+7"),
    ("JVM Vendor", "Eclipse Adoptium"),
];

/// Applications deployed on a fresh server.
pub fn seed() -> Vec<App> {
    vec![App::new("/", 0, "ROOT"), App::new("/manager", 3, "manager")]
}

/// Router accepting the default `admin`/`admin` credentials.
pub fn app() -> Router {
    app_with_credentials("admin", "admin")
}

pub fn app_with_credentials(user: &str, password: &str) -> Router {
    let state = AppState {
        db: Arc::new(RwLock::new(seed())),
        authorization: format!("Basic {}", STANDARD.encode(format!("{user}:{password}"))),
    };
    Router::new()
        .route("/manager/{command}", get(manager))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn manager(
    State(state): State<AppState>,
    Path(command): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == state.authorization);
    if !authorized {
        tracing::debug!(command = %command, "rejecting unauthenticated manager request");
        return (
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, REALM)],
            "401 Unauthorized\n",
        )
            .into_response();
    }

    let path = params.get("path").map(String::as_str);
    let body = match command.as_str() {
        "list" => render_list(&state.db.read().await),
        "roles" => render_pairs("OK - Listed security roles", ROLES),
        "resources" => render_resources(params.get("type").map(String::as_str)),
        "serverinfo" => render_server_info(),
        "start" => set_running(&mut state.db.write().await, path, true),
        "stop" => set_running(&mut state.db.write().await, path, false),
        other => format!("FAIL - Unknown command /{other}\n"),
    };

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain;charset=utf-8")],
        body,
    )
        .into_response()
}

pub fn render_list(apps: &[App]) -> String {
    let mut body = String::from("OK - Listed applications for virtual host localhost\n");
    for app in apps {
        let status = if app.running { "running" } else { "stopped" };
        body.push_str(&format!("{}:{}:{}:{}\n", app.path, status, app.sessions, app.name));
    }
    body
}

fn render_pairs(status: &str, pairs: &[(&str, &str)]) -> String {
    let mut body = format!("{status}\n");
    for (key, value) in pairs {
        body.push_str(&format!("{key}:{value}\n"));
    }
    body
}

pub fn render_resources(kind: Option<&str>) -> String {
    match kind {
        None => render_pairs("OK - Listed global resources of all types", RESOURCES),
        Some(kind) => {
            let matching: Vec<_> = RESOURCES.iter().copied().filter(|(_, t)| *t == kind).collect();
            render_pairs(&format!("OK - Listed global resources of type {kind}"), &matching)
        }
    }
}

pub fn render_server_info() -> String {
    let mut body = String::from("OK - Server info\n");
    for (key, value) in SERVER_INFO {
        body.push_str(&format!("{key}: {value}\n"));
    }
    body
}

/// Start or stop the application deployed at `path`. Stopping drops its
/// sessions.
pub fn set_running(apps: &mut [App], path: Option<&str>, running: bool) -> String {
    let Some(path) = path else {
        return "FAIL - Invalid context path null was specified\n".to_string();
    };
    let Some(app) = apps.iter_mut().find(|a| a.path == path) else {
        return format!("FAIL - No context exists for path {path}\n");
    };
    app.running = running;
    if running {
        format!("OK - Started application at context path {path}\n")
    } else {
        app.sessions = 0;
        format!("OK - Stopped application at context path {path}\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_renders_one_line_per_app() {
        let body = render_list(&seed());
        assert_eq!(
            body,
            "OK - Listed applications for virtual host localhost\n/:running:0:ROOT\n/manager:running:3:manager\n"
        );
    }

    #[test]
    fn stop_marks_app_stopped_and_clears_sessions() {
        let mut apps = seed();
        let body = set_running(&mut apps, Some("/manager"), false);
        assert_eq!(body, "OK - Stopped application at context path /manager\n");
        assert!(!apps[1].running);
        assert_eq!(apps[1].sessions, 0);
    }

    #[test]
    fn start_unknown_path_fails() {
        let mut apps = seed();
        let body = set_running(&mut apps, Some("/nope"), true);
        assert!(body.starts_with("FAIL - No context exists"));
        assert_eq!(apps, seed());
    }

    #[test]
    fn start_without_path_fails() {
        let mut apps = seed();
        assert!(set_running(&mut apps, None, true).starts_with("FAIL"));
    }

    #[test]
    fn resources_filter_by_type() {
        let body = render_resources(Some("javax.sql.DataSource"));
        assert_eq!(
            body,
            "OK - Listed global resources of type javax.sql.DataSource\njdbc/AppDB:javax.sql.DataSource\n"
        );
    }

    #[test]
    fn server_info_uses_colon_space() {
        let body = render_server_info();
        assert!(body.starts_with("OK - Server info\n"));
        assert!(body.contains("OS Name: Linux\n"));
    }
}

//! Development server: static files with live reload, plus a small JSON API
//! for likes, post views and the contact form

use anyhow::Result;
use axum::{
    body::Body,
    extract::{
        ws::{Message, WebSocket},
        Form, Path, Query, State, WebSocketUpgrade,
    },
    http::{header, HeaderValue, Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode, DebounceEventResult};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, RwLock};
use tower_http::services::ServeDir;

use crate::contact::mailto_link;
use crate::content::{DocumentSource, MarkdownRenderer};
use crate::likes::LikeStore;
use crate::viewer::PostViewer;
use crate::Folio;

/// Live reload script injected into HTML pages
const LIVE_RELOAD_SCRIPT: &str = r#"
<script>
(function() {
    var ws = new WebSocket('ws://' + location.host + '/__livereload');
    ws.onmessage = function(msg) {
        if (msg.data === 'reload') {
            location.reload();
        }
    };
    ws.onclose = function() {
        console.log('Live reload disconnected. Attempting to reconnect...');
        setTimeout(function() { location.reload(); }, 1000);
    };
})();
</script>
</body>
"#;

/// Everything built from `_config.yml`; swapped out when the config changes
struct Site {
    folio: Folio,
    likes: LikeStore,
    source: Arc<dyn DocumentSource>,
    renderer: MarkdownRenderer,
}

impl Site {
    fn new(folio: Folio) -> Self {
        Self {
            likes: folio.like_store(),
            source: folio.document_source(),
            renderer: folio.renderer(),
            folio,
        }
    }
}

/// Server state
struct ServerState {
    site: RwLock<Arc<Site>>,
    reload_tx: broadcast::Sender<()>,
    live_reload: bool,
}

impl ServerState {
    async fn site(&self) -> Arc<Site> {
        self.site.read().await.clone()
    }

    async fn replace_site(&self, site: Site) {
        *self.site.write().await = Arc::new(site);
    }
}

/// Build the router
fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/__livereload", get(livereload_handler))
        .route("/api/likes/:slug", get(get_likes_handler))
        .route("/api/likes/:slug/toggle", post(toggle_like_handler))
        .route("/api/posts/:slug", get(post_handler))
        .route("/api/contact", post(contact_handler))
        .fallback(fallback_handler)
        .with_state(state)
}

/// Start the development server
pub async fn start(folio: &Folio, ip: &str, port: u16, watch: bool, open: bool) -> Result<()> {
    let (reload_tx, _) = broadcast::channel::<()>(16);

    let site = Site::new(folio.clone());
    if let Some(user) = site.likes.user_id() {
        tracing::debug!("Local profile: {}", user);
    }

    let state = Arc::new(ServerState {
        site: RwLock::new(Arc::new(site)),
        reload_tx,
        live_reload: watch,
    });

    let app = router(state.clone());

    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    if watch {
        println!("Live reload enabled. Watching for changes...");
    }
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    if watch {
        let folio = folio.clone();
        tokio::spawn(async move {
            if let Err(e) = watch_and_reload(folio, state).await {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Watch content, static assets and config; rebuild, refresh the served site
/// and notify clients
async fn watch_and_reload(folio: Folio, state: Arc<ServerState>) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<DebounceEventResult>();

    let mut debouncer = new_debouncer(Duration::from_millis(500), move |res| {
        let _ = tx.send(res);
    })?;

    let config_path = folio.base_dir.join("_config.yml");
    for (path, mode) in [
        (&folio.content_dir, RecursiveMode::Recursive),
        (&folio.static_dir, RecursiveMode::Recursive),
        (&config_path, RecursiveMode::NonRecursive),
    ] {
        if path.exists() {
            debouncer.watcher().watch(path, mode)?;
            tracing::debug!("Watching: {:?}", path);
        }
    }

    while let Some(result) = rx.recv().await {
        match result {
            Ok(events) => {
                let relevant: Vec<_> = events
                    .iter()
                    .filter(|e| is_relevant(&e.path))
                    .collect();
                if relevant.is_empty() {
                    continue;
                }

                for event in &relevant {
                    tracing::info!("File changed: {}", event.path.display());
                }

                // Pick up edits to _config.yml as well
                let folio = match Folio::new(&folio.base_dir) {
                    Ok(reloaded) => reloaded,
                    Err(e) => {
                        tracing::error!("Failed to reload config: {:#}", e);
                        continue;
                    }
                };

                match folio.generate().await {
                    Ok(()) => {
                        tracing::info!("Regenerated successfully");
                        state.replace_site(Site::new(folio)).await;
                        let _ = state.reload_tx.send(());
                    }
                    Err(e) => tracing::error!("Generation failed: {:#}", e),
                }
            }
            Err(e) => tracing::error!("Watch error: {:?}", e),
        }
    }

    Ok(())
}

fn is_relevant(path: &std::path::Path) -> bool {
    let path_str = path.to_string_lossy();
    !path_str.contains(".git")
        && !path_str.contains(".DS_Store")
        && !path_str.contains(".folio")
        && !path_str.ends_with('~')
}

#[derive(Debug, Deserialize)]
struct CountQuery {
    fallback: Option<u64>,
}

#[derive(Debug, Serialize)]
struct LikeResponse {
    slug: String,
    count: u64,
    liked: bool,
}

/// The site, if `slug` names a configured blog post
async fn site_for_post(state: &ServerState, slug: &str) -> Result<Arc<Site>, StatusCode> {
    let site = state.site().await;
    if site.folio.config.blog_item(slug).is_none() {
        tracing::debug!("Rejected like request for unknown post {:?}", slug);
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(site)
}

/// GET /api/likes/:slug
async fn get_likes_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
    Query(query): Query<CountQuery>,
) -> Result<Json<LikeResponse>, StatusCode> {
    let site = site_for_post(&state, &slug).await?;
    let count = site
        .likes
        .get_count(&slug, query.fallback.unwrap_or(0))
        .await;
    let liked = site.likes.get_liked(&slug);
    Ok(Json(LikeResponse { slug, count, liked }))
}

/// POST /api/likes/:slug/toggle
async fn toggle_like_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Result<Json<LikeResponse>, StatusCode> {
    let site = site_for_post(&state, &slug).await?;
    let like = site.likes.toggle(&slug).await;
    tracing::debug!("Toggled like on {}: {:?}", slug, like);
    Ok(Json(LikeResponse {
        slug,
        count: like.count,
        liked: like.liked,
    }))
}

/// GET /api/posts/:slug
async fn post_handler(State(state): State<Arc<ServerState>>, Path(slug): Path<String>) -> Response {
    let site = state.site().await;
    let mut viewer = PostViewer::new(
        &site.folio.config,
        site.source.as_ref(),
        &site.renderer,
        &site.likes,
    );
    match viewer.open(&slug).await {
        Some(view) => Json(view).into_response(),
        None => (StatusCode::NOT_FOUND, "Post not found").into_response(),
    }
}

#[derive(Debug, Deserialize)]
struct ContactForm {
    name: String,
    email: String,
    message: String,
}

/// POST /api/contact - redirect the browser to the mail client
async fn contact_handler(
    State(state): State<Arc<ServerState>>,
    Form(form): Form<ContactForm>,
) -> Response {
    let site = state.site().await;
    let link = mailto_link(
        &site.folio.config.contact.email,
        &form.name,
        &form.email,
        &form.message,
    );
    match HeaderValue::from_str(&link) {
        Ok(location) => (StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response(),
        Err(_) => (StatusCode::BAD_REQUEST, "Invalid contact address").into_response(),
    }
}

/// WebSocket handler for live reload
async fn livereload_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    let reload_rx = state.reload_tx.subscribe();
    ws.on_upgrade(move |socket| handle_livereload_socket(socket, reload_rx))
}

async fn handle_livereload_socket(mut socket: WebSocket, mut reload_rx: broadcast::Receiver<()>) {
    tracing::debug!("Live reload client connected");

    loop {
        tokio::select! {
            result = reload_rx.recv() => {
                match result {
                    Ok(_) => {
                        if socket.send(Message::Text("reload".to_string())).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
        }
    }

    tracing::debug!("Live reload client disconnected");
}

/// Serve files from the public directory, injecting the reload script into HTML
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let site = state.site().await;
    let public_dir = &site.folio.public_dir;
    let file_path = resolve_path(public_dir, request.uri().path());

    let is_html = file_path
        .extension()
        .map(|ext| ext == "html" || ext == "htm")
        .unwrap_or(false);

    if is_html && state.live_reload {
        match tokio::fs::read_to_string(&file_path).await {
            Ok(content) => Html(inject_live_reload(&content)).into_response(),
            Err(_) => (StatusCode::NOT_FOUND, "Not found").into_response(),
        }
    } else {
        let mut service = ServeDir::new(public_dir).append_index_html_on_directories(true);
        match service.try_call(request).await {
            Ok(response) => response.into_response(),
            Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
        }
    }
}

/// Map a request path to a file under the public directory
fn resolve_path(public_dir: &std::path::Path, path: &str) -> PathBuf {
    let clean_path = path.trim_start_matches('/');
    if clean_path.is_empty() {
        return public_dir.join("index.html");
    }
    if clean_path.split('/').any(|segment| segment == "..") {
        return public_dir.join("__not_found__");
    }

    let candidate = public_dir.join(clean_path);
    if candidate.is_dir() {
        candidate.join("index.html")
    } else if candidate.exists() {
        candidate
    } else {
        let with_html = public_dir.join(format!("{}.html", clean_path));
        if with_html.exists() {
            with_html
        } else {
            candidate
        }
    }
}

/// Inject live reload script into HTML content
fn inject_live_reload(html: &str) -> String {
    if html.contains("</body>") {
        html.replace("</body>", LIVE_RELOAD_SCRIPT)
    } else {
        format!("{}{}", html, LIVE_RELOAD_SCRIPT)
    }
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}

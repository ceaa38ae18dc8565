use std::io;
use std::sync::Arc;

use ntex::web;
use ntex_files::NamedFile;
use spdlog::{error, info};

use crate::config::Config;
use crate::content::BlogEntry;
use crate::feed::{site_feed, FEED_CONTENT_TYPE};
use crate::pages::{blog_store, render_entry_page, render_index_page};

struct AppState {
    config: Config,
}

type State = web::types::State<Arc<AppState>>;

enum BlogRoute<'a> {
    Index,
    Entry(&'a str),
    Redirect(String),
}

/// Maps the path below `/blog/` to what should be served for it.
fn blog_route(path: &str) -> BlogRoute<'_> {
    if path.is_empty() {
        return BlogRoute::Index;
    }
    match path.strip_suffix('/') {
        Some(slug) => BlogRoute::Entry(slug),
        None => BlogRoute::Redirect(format!("/blog/{}/", path)),
    }
}

fn html(body: String) -> web::HttpResponse {
    web::HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn redirect(location: &str) -> web::HttpResponse {
    web::HttpResponse::TemporaryRedirect()
        .header("Location", location)
        .content_type("text/html; charset=utf-8")
        .finish()
}

fn internal_error(context: &str, err: impl std::fmt::Display) -> web::HttpResponse {
    error!("{}: {}", context, err);
    web::HttpResponse::InternalServerError()
        .body(format!("{}: {}", context, err))
}

#[web::get("/rss.xml")]
async fn rss(state: State) -> web::HttpResponse {
    match site_feed(&state.config) {
        Ok(xml) => web::HttpResponse::Ok()
            .content_type(FEED_CONTENT_TYPE)
            .body(xml),
        Err(e) => internal_error("Error generating feed", e),
    }
}

#[web::get("/blog")]
async fn blog_wo_slash() -> web::HttpResponse {
    redirect("/blog/")
}

#[web::get("/blog/{path:.*}")]
async fn blog(path: web::types::Path<String>, state: State) -> web::HttpResponse {
    let path = path.into_inner();
    let config = &state.config;

    match blog_route(&path) {
        BlogRoute::Index => {
            let entries = match blog_store(config).get_collection(BlogEntry::is_published) {
                Ok(entries) => entries,
                Err(e) => return internal_error("Error listing posts", e),
            };
            match render_index_page(config, &entries) {
                Ok(page) => html(page),
                Err(e) => internal_error("Error rendering post list", e),
            }
        }
        BlogRoute::Entry(slug) => {
            let entry = match blog_store(config).get_entry(slug) {
                Ok(Some(entry)) if entry.is_published() => entry,
                Ok(_) => return web::HttpResponse::NotFound()
                    .body(format!("Post not found: {}", slug)),
                Err(e) => return internal_error("Error loading post", e),
            };
            match render_entry_page(config, &entry) {
                Ok(page) => html(page),
                Err(e) => internal_error(&format!("Error rendering post {}", slug), e),
            }
        }
        BlogRoute::Redirect(location) => redirect(&location),
    }
}

#[web::get("/public/{file_name:.*}")]
async fn public_files(path: web::types::Path<String>, state: State) -> Result<NamedFile, web::Error> {
    if path.contains("../") || path.contains("..\\") {
        return Err(web::error::ErrorUnauthorized("Access forbidden").into());
    }

    let file_path = state.config.paths.public_dir.join(path.into_inner());
    Ok(NamedFile::open(file_path)?)
}

#[web::get("/")]
async fn index() -> web::HttpResponse {
    redirect("/blog/")
}

pub async fn server_run(config: Config) -> io::Result<()> {
    let store = blog_store(&config);
    match store.get_collection(|_| true) {
        Ok(entries) => {
            for entry in entries.iter() {
                info!("Post: {}", entry);
            }
        }
        // Served pages report the error per request
        Err(e) => error!("The blog collection is invalid: {}", e),
    }

    let bind_addr = config.server.address.clone();
    let bind_port = config.server.port;
    let app_state = Arc::new(AppState {
        config,
    });

    web::HttpServer::new(move || {
        web::App::new()
            .state(app_state.clone())
            .service(index)
            .service(rss)
            .service(blog_wo_slash)
            .service(blog)
            .service(public_files)
    })
        .bind((bind_addr, bind_port))?
        .run()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blog_route() {
        assert!(matches!(blog_route(""), BlogRoute::Index));
        assert!(matches!(blog_route("hello-world/"), BlogRoute::Entry("hello-world")));
        assert!(matches!(blog_route("2024/first-post/"), BlogRoute::Entry("2024/first-post")));
        match blog_route("hello-world") {
            BlogRoute::Redirect(location) => assert_eq!(location, "/blog/hello-world/"),
            _ => panic!("expected a redirect"),
        }
    }
}

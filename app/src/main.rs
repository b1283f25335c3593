//! Bank security server.
//!
//! # Run
//! ```bash
//! cargo run -p bank-security-app -- [settings.toml]
//! ```
//!
//! # Test
//! ```bash
//! curl -u admin:12345 http://localhost:8080/myAccount
//! curl -i http://localhost:8080/myAccount              # 401, Basic challenge
//! curl -i -H 'Accept: text/html' http://localhost:8080/myAccount   # 302 /login
//! ```

use std::io;

use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::Key;
use actix_web::{web, App, HttpServer};
use bank_security_app::handlers;
use bank_security_app::settings::AppSettings;
use bank_security_core::http::security::form_login;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let path = std::env::args().nth(1);
    let settings = AppSettings::load(path.as_deref()).map_err(io::Error::other)?;
    let policy = settings.security_policy().map_err(io::Error::other)?;

    // Sessions do not survive a restart.
    let key = Key::generate();

    log::info!("listening on http://{}", settings.server.bind);

    HttpServer::new(move || {
        let login = policy.form_login_service();
        App::new()
            .wrap(SessionMiddleware::new(CookieSessionStore::default(), key.clone()))
            .service(
                web::scope("")
                    .wrap(policy.transform())
                    .configure(|cfg| {
                        if let Some(service) = login {
                            form_login::configure(service)(cfg);
                        }
                    })
                    .configure(handlers::routes),
            )
    })
    .bind(&settings.server.bind)?
    .run()
    .await
}

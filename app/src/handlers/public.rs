//! Pages meant to be reachable without logging in.

use actix_web::{get, HttpResponse, Responder};
use bank_security_core::http::security::OptionalUser;

#[get("/notices")]
async fn notices(user: OptionalUser) -> impl Responder {
    let greeting = match user.into_inner() {
        Some(user) => format!("Hello, {}. ", user.get_username()),
        None => String::new(),
    };
    HttpResponse::Ok().body(format!("{greeting}Here are the notices from the bank"))
}

#[get("/contact")]
async fn contact() -> impl Responder {
    HttpResponse::Ok().body("Contact details are saved to the bank")
}

//! Account pages. Every handler requires an authenticated user.

use actix_web::{get, HttpResponse, Responder};
use bank_security_core::http::security::AuthenticatedUser;

#[get("/myAccount")]
async fn my_account(user: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().body(format!(
        "Here are the account details for {}. Your roles: {:?}",
        user.get_username(),
        user.get_roles()
    ))
}

#[get("/myBalance")]
async fn my_balance(user: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().body(format!("Here are the balance details for {}", user.get_username()))
}

#[get("/myLoans")]
async fn my_loans(user: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().body(format!("Here are the loan details for {}", user.get_username()))
}

#[get("/myCards")]
async fn my_cards(user: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().body(format!("Here are the card details for {}", user.get_username()))
}
